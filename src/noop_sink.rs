use crate::chunk::Chunk;
use crate::sink::ChunkSink;
use async_trait::async_trait;
use std::error::Error;

/// A sink that simply drops all chunks.
///
/// Useful for measuring the overhead of the buffering side without any
/// external I/O, and for unit tests that don't care about persistence.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl ChunkSink for NoopSink {
    async fn deliver(&self, _chunk: Chunk) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
