/// Failure modes of a single bulk delivery attempt.
///
/// `Serialization` and `InvalidTimestamp` are fatal for the chunk that
/// produced them: the payload cannot be built, so redelivering the same
/// chunk cannot succeed. `Transport` and `Response` are transient; the
/// caller is expected to keep the chunk and retry later.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// A meta or document line could not be encoded as JSON.
    #[error("failed to serialize bulk line: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record carried a time outside the representable UTC range.
    #[error("record time {0} is not representable as a UTC timestamp")]
    InvalidTimestamp(i64),

    /// The request never produced an HTTP response.
    #[error("bulk request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The bulk endpoint answered with a non-success status.
    #[error("bulk endpoint returned {status}: {body}")]
    Response {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl SinkError {
    /// True when retrying the same chunk cannot succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SinkError::Serialization(_) | SinkError::InvalidTimestamp(_)
        )
    }
}
