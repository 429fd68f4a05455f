use crate::chunk::Chunk;
use crate::error::SinkError;
use crate::record::Record;
use crate::sink::ChunkSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{error, warn};

/// Buffering behavior of [`BufferedForwarder`].
///
/// **Fields**
/// - `channel_buffer`: maximum number of [`Record`]s queued before new
///   pushes are dropped.
/// - `chunk_records`: number of records collected into one chunk before it
///   is delivered.
/// - `flush_interval`: maximum interval between deliveries even with a
///   partial chunk pending.
#[derive(Clone, Debug)]
pub struct BufferConfig {
    pub channel_buffer: usize,
    pub chunk_records: usize,
    pub flush_interval: Duration,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            chunk_records: 128,
            flush_interval: Duration::from_secs(1),
        }
    }
}

/// Host-side buffering collaborator: accumulates records into ordered
/// chunks and decides when a chunk is flushed to a [`ChunkSink`].
///
/// Producers push records through a bounded channel; a background task
/// batches them and delivers full chunks. Transient delivery failures are
/// retried with exponential backoff, redelivering the same chunk
/// unmodified, so sinks configured with deterministic ids overwrite rather
/// than duplicate. Failures that cannot succeed on redelivery drop the
/// chunk instead. The sink itself never schedules a flush.
pub struct BufferedForwarder {
    sender: mpsc::Sender<Record>,
    /// Total records offered to the forwarder.
    pub total_records: Arc<AtomicU64>,
    /// Successfully enqueued into the channel.
    pub enqueued_records: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_records: Arc<AtomicU64>,
}

impl BufferedForwarder {
    /// Create a forwarder and spawn the background task that drains the
    /// channel into `sink`.
    ///
    /// Minimal thresholds are enforced for `channel_buffer`,
    /// `chunk_records` and `flush_interval` to avoid degenerate
    /// configurations. Dropping the forwarder closes the channel; the task
    /// flushes whatever is pending and exits.
    pub fn new(sink: Arc<dyn ChunkSink>, config: BufferConfig) -> (Self, JoinHandle<()>) {
        // Enforce minimal thresholds to avoid degenerate configs.
        let channel_buffer = config.channel_buffer.max(16);
        let chunk_records = config.chunk_records.max(1);
        let flush_interval = config.flush_interval.max(Duration::from_millis(10));

        let (tx, mut rx) = mpsc::channel::<Record>(channel_buffer);

        let total_records = Arc::new(AtomicU64::new(0));
        let enqueued_records = Arc::new(AtomicU64::new(0));
        let dropped_records = Arc::new(AtomicU64::new(0));

        let enqueued_bg = Arc::clone(&enqueued_records);

        let handle = tokio::spawn(async move {
            let mut pending: Vec<Record> = Vec::with_capacity(chunk_records);
            let backoff = Duration::from_millis(100);
            let max_backoff = Duration::from_secs(10);

            loop {
                tokio::select! {
                    received = rx.recv() => {
                        let Some(record) = received else { break };
                        pending.push(record);
                        enqueued_bg.fetch_add(1, Ordering::Relaxed);
                        if pending.len() >= chunk_records {
                            flush_pending(&*sink, &mut pending, backoff, max_backoff).await;
                        }
                    }
                    _ = sleep(flush_interval) => {
                        if !pending.is_empty() {
                            flush_pending(&*sink, &mut pending, backoff, max_backoff).await;
                        }
                    }
                }
            }

            // Channel closed: flush the remainder before exiting.
            if !pending.is_empty() {
                flush_pending(&*sink, &mut pending, backoff, max_backoff).await;
            }
        });

        (
            Self {
                sender: tx,
                total_records,
                enqueued_records,
                dropped_records,
            },
            handle,
        )
    }

    /// Offer a record without blocking.
    ///
    /// Returns `false` when the channel is full and the record was
    /// dropped; the drop is counted in `dropped_records`.
    pub fn push(&self, record: Record) -> bool {
        self.total_records.fetch_add(1, Ordering::Relaxed);
        match self.sender.try_send(record) {
            Ok(()) => true,
            Err(_) => {
                self.dropped_records.fetch_add(1, Ordering::Relaxed);
                warn!("record channel full, dropping record");
                false
            }
        }
    }
}

async fn flush_pending(
    sink: &dyn ChunkSink,
    pending: &mut Vec<Record>,
    mut backoff: Duration,
    max_backoff: Duration,
) {
    loop {
        let chunk = Chunk::from(pending.clone());
        match sink.deliver(chunk).await {
            Ok(()) => {
                pending.clear();
                return;
            }
            Err(e) => {
                let fatal = e
                    .downcast_ref::<SinkError>()
                    .is_some_and(|sink_err| sink_err.is_fatal());
                if fatal {
                    error!(
                        error = %e,
                        records = pending.len(),
                        "dropping chunk after unrecoverable delivery error"
                    );
                    pending.clear();
                    return;
                }
                warn!(
                    error = %e,
                    backoff_ms = backoff.as_millis() as u64,
                    "chunk delivery failed, retrying"
                );
                sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, max_backoff);
            }
        }
    }
}
