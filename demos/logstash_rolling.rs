//! Ship records through the buffered forwarder into time-rolling indices,
//! with deterministic ids and timestamp/tag decoration enabled.

use elasticsearch_bulk_sink::buffer::{BufferConfig, BufferedForwarder};
use elasticsearch_bulk_sink::config::{parse_id_keys, ElasticsearchConfig};
use elasticsearch_bulk_sink::elasticsearch::ElasticsearchSink;
use elasticsearch_bulk_sink::record::Record;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut config = ElasticsearchConfig::from_env();
    config.logstash_format = true;
    config.logstash_prefix = "demo".to_string();
    config.id_keys = parse_id_keys("request_id,attempt");
    config.add_timestamp = true;
    config.include_tag_key = true;

    let sink = Arc::new(ElasticsearchSink::new(config));
    let (forwarder, handle) = BufferedForwarder::new(
        sink,
        BufferConfig {
            chunk_records: 8,
            flush_interval: Duration::from_millis(200),
            ..BufferConfig::default()
        },
    );

    let now = chrono::Utc::now().timestamp();
    for i in 0..16 {
        let mut fields = BTreeMap::new();
        fields.insert("request_id".to_string(), Value::String(format!("req-{i}")));
        fields.insert("attempt".to_string(), Value::from(1));
        fields.insert(
            "message".to_string(),
            Value::String(format!("rolling demo event {i}")),
        );
        forwarder.push(Record::new("demo.rolling", now, fields));
    }

    // Give the background task time to flush, then close the channel and
    // wait for the drain.
    tokio::time::sleep(Duration::from_millis(500)).await;
    drop(forwarder);
    let _ = handle.await;
}
