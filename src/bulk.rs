use crate::chunk::Chunk;
use crate::config::ElasticsearchConfig;
use crate::decorate::RecordDecorator;
use crate::doc_id::generate_id;
use crate::error::SinkError;
use crate::index::resolve_index;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

/// Assemble the newline-delimited bulk body for one chunk.
///
/// Records are processed in chunk order. Each record is decorated, routed
/// to its index and optionally given a deterministic id, then contributes
/// an action meta line immediately followed by its document line. The body
/// ends with the empty line the bulk protocol uses as batch terminator, so
/// a chunk of N records always yields 2N + 1 lines; an empty chunk yields
/// just the terminator.
///
/// The whole body is built before any bytes are sent. A record that cannot
/// be serialized aborts the chunk, keeping the payload atomic.
pub fn build_bulk_body(
    config: &ElasticsearchConfig,
    decorators: &[Box<dyn RecordDecorator>],
    chunk: Chunk,
) -> Result<String, SinkError> {
    let mut lines = Vec::with_capacity(chunk.len() * 2 + 1);

    for mut record in chunk {
        let when = DateTime::<Utc>::from_timestamp(record.time, 0)
            .ok_or(SinkError::InvalidTimestamp(record.time))?;
        for decorator in decorators {
            decorator.decorate(&mut record, when);
        }

        let mut action = Map::new();
        action.insert(
            "_index".to_string(),
            Value::String(resolve_index(config, when)),
        );
        action.insert("_type".to_string(), Value::String(config.type_name.clone()));
        if let Some(id) = generate_id(&config.id_keys, &record) {
            action.insert("_id".to_string(), Value::String(id));
        }
        let meta = json!({ "index": action });

        lines.push(serde_json::to_string(&meta)?);
        lines.push(serde_json::to_string(&record.fields)?);
    }

    // Batch terminator: one trailing empty line.
    lines.push(String::new());
    Ok(lines.join("\n"))
}
