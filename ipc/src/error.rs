//! Channel error types

use crate::ChannelEnd;
use std::io;
use thiserror::Error;

/// Errors that can occur on a channel or one of its endpoints
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The OS could not allocate a channel or duplicate an endpoint
    #[error("Channel resources exhausted: {0}")]
    ResourceExhausted(#[source] io::Error),

    /// The owner already closed this endpoint
    #[error("Endpoint {0} is closed")]
    Closed(ChannelEnd),

    /// Read or write failed on the underlying stream
    #[error("I/O error on {end}: {source}")]
    Io { end: ChannelEnd, source: io::Error },

    /// The stream ended partway through a record
    #[error("Truncated record on {end}: received {received} of {expected} bytes")]
    TruncatedRecord {
        end: ChannelEnd,
        received: usize,
        expected: usize,
    },
}

impl ChannelError {
    /// Checks if the peer closed every read endpoint
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, ChannelError::Io { source, .. } if source.kind() == io::ErrorKind::BrokenPipe)
    }
}
