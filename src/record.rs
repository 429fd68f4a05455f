use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One buffered log event: the tag it was emitted under, its event time in
/// epoch seconds, and the structured payload that becomes the indexed
/// document.
///
/// The msgpack wire form is the positional triple `[tag, time, fields]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub tag: String,
    pub time: i64,
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(tag: impl Into<String>, time: i64, fields: BTreeMap<String, Value>) -> Self {
        Record {
            tag: tag.into(),
            time,
            fields,
        }
    }
}
