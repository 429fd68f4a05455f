use crate::chunk::Chunk;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for buffered [`Chunk`]s of records.
///
/// Implementations turn exactly one chunk into one transport call against
/// a concrete backend. They never decide when a chunk is flushed; that is
/// the buffering side's job.
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Deliver a single chunk to the underlying backend.
    ///
    /// **Parameters**
    /// - `chunk`: ordered batch of records, owned by the sink for the
    ///   duration of this call.
    ///
    /// **Returns**
    /// - `Ok(())` once the whole chunk was accepted by the backend and may
    ///   be discarded by the caller.
    /// - `Err(..)` if delivery failed (serialization error, network error,
    ///   HTTP status, etc.). The caller is expected to keep the chunk and
    ///   retry later.
    ///
    /// There is no partial delivery: a failed call means no record of the
    /// chunk was durably accepted, and a call must not return `Ok` after
    /// sending only part of a chunk.
    async fn deliver(&self, chunk: Chunk) -> Result<(), Box<dyn Error + Send + Sync>>;
}
