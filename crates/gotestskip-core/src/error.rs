//! Error types for stream decoding.

use thiserror::Error;

/// A stream record that does not decode as a [`TestEvent`](crate::TestEvent).
#[derive(Debug, Error)]
#[error("cannot decode test event at record {record}")]
pub struct DecodeError {
    /// 1-based record (line) number in the input stream.
    pub record: usize,
    #[source]
    pub source: serde_json::Error,
}
