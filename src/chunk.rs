use crate::record::Record;

/// Error type returned by the msgpack chunk codec.
#[derive(thiserror::Error, Debug)]
pub enum ChunkCodecError {
    #[error("failed to encode chunk: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode chunk: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// An ordered, finite batch of buffered records, delivered to a sink as
/// one unit.
///
/// A chunk is handed to [`ChunkSink::deliver`](crate::sink::ChunkSink) at
/// most once per delivery attempt and its record order is preserved in the
/// emitted payload. The msgpack codec stores the batch as one array of
/// `[tag, time, fields]` triples, the same compact form the records are
/// buffered in upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    records: Vec<Record>,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Encode the chunk into its msgpack wire form.
    pub fn encode(&self) -> Result<Vec<u8>, ChunkCodecError> {
        Ok(rmp_serde::to_vec(&self.records)?)
    }

    /// Decode a chunk from its msgpack wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, ChunkCodecError> {
        let records: Vec<Record> = rmp_serde::from_slice(bytes)?;
        Ok(Chunk { records })
    }
}

impl From<Vec<Record>> for Chunk {
    fn from(records: Vec<Record>) -> Self {
        Chunk { records }
    }
}

impl FromIterator<Record> for Chunk {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Chunk {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Chunk {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn record(tag: &str, time: i64, message: &str) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert("message".to_string(), Value::String(message.to_string()));
        Record::new(tag, time, fields)
    }

    #[test]
    fn codec_preserves_records_and_order() {
        let chunk: Chunk = vec![
            record("app.a", 1_699_948_800, "first"),
            record("app.b", 1_699_948_801, "second"),
        ]
        .into();

        let bytes = chunk.encode().expect("encode");
        let decoded = Chunk::decode(&bytes).expect("decode");

        assert_eq!(decoded, chunk);
        assert_eq!(decoded.records()[0].tag, "app.a");
        assert_eq!(decoded.records()[1].tag, "app.b");
    }

    #[test]
    fn empty_chunk_round_trips() {
        let bytes = Chunk::new().encode().expect("encode");
        let decoded = Chunk::decode(&bytes).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Chunk::decode(b"not msgpack at all").is_err());
    }
}
