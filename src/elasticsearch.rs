use crate::bulk::build_bulk_body;
use crate::chunk::Chunk;
use crate::config::ElasticsearchConfig;
use crate::decorate::{decorators_for, RecordDecorator};
use crate::error::SinkError;
use crate::sink::ChunkSink;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::error::Error;
use tracing::debug;

/// Elasticsearch sink that delivers record chunks via the HTTP bulk API.
///
/// Each delivered chunk becomes exactly one `POST /_bulk` request: records
/// are decorated, routed to their target index, optionally given a
/// deterministic id, and serialized as alternating meta/document JSON
/// lines. A non-success response fails the whole chunk. Per-document
/// errors inside a successful response are not inspected; a 2xx status is
/// treated as acceptance of the entire batch.
pub struct ElasticsearchSink {
    client: Client,
    config: ElasticsearchConfig,
    decorators: Vec<Box<dyn RecordDecorator>>,
}

impl ElasticsearchSink {
    /// Construct a sink from a validated configuration.
    ///
    /// The HTTP client and its connection pool live as long as the sink
    /// value; dropping the sink releases them.
    pub fn new(config: ElasticsearchConfig) -> Self {
        let decorators = decorators_for(&config);
        ElasticsearchSink {
            client: Client::new(),
            config,
            decorators,
        }
    }

    fn bulk_url(&self) -> String {
        format!("http://{}:{}/_bulk", self.config.host, self.config.port)
    }

    /// Serialize and send one chunk, reporting failures as [`SinkError`].
    ///
    /// The payload is fully assembled before anything is sent, so a
    /// serialization failure aborts the call with no bytes on the wire.
    /// This method does not retry.
    pub async fn write(&self, chunk: Chunk) -> Result<(), SinkError> {
        let records = chunk.len();
        let body = build_bulk_body(&self.config, &self.decorators, chunk)?;
        debug!(records, bytes = body.len(), "sending bulk request");

        let resp = self
            .client
            .post(self.bulk_url())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(SinkError::Response { status, body })
        }
    }
}

#[async_trait]
impl ChunkSink for ElasticsearchSink {
    async fn deliver(&self, chunk: Chunk) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.write(chunk).await?;
        Ok(())
    }
}
