//! Deliver one chunk to a local cluster using the static index name.
//!
//! Expects Elasticsearch on `localhost:9200` (override via `ES_SINK_*`
//! environment variables).

use elasticsearch_bulk_sink::chunk::Chunk;
use elasticsearch_bulk_sink::config::ElasticsearchConfig;
use elasticsearch_bulk_sink::elasticsearch::ElasticsearchSink;
use elasticsearch_bulk_sink::record::Record;
use serde_json::Value;
use std::collections::BTreeMap;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ElasticsearchConfig::from_env();
    let sink = ElasticsearchSink::new(config);

    let now = chrono::Utc::now().timestamp();
    let mut chunk = Chunk::new();
    for i in 0..3 {
        let mut fields = BTreeMap::new();
        fields.insert(
            "message".to_string(),
            Value::String(format!("demo event {i}")),
        );
        fields.insert("request_id".to_string(), Value::String(format!("req-{i}")));
        chunk.push(Record::new("app.access", now, fields));
    }

    match sink.write(chunk).await {
        Ok(()) => println!("chunk delivered"),
        Err(e) => eprintln!("delivery failed: {e}"),
    }
}
