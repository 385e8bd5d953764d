//! Channel abstraction over OS pipes

use crate::ChannelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, PipeReader, PipeWriter, Read, Write};
use uuid::Uuid;

/// Unique identifier for a communication channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(Uuid);

impl ChannelId {
    /// Creates a new random channel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self.0)
    }
}

/// Names one end of a unidirectional channel
///
/// Unlike Unix file descriptors, channel ends are explicitly typed
/// and cannot be confused with other resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelEnd {
    /// Producer-side end
    Write(ChannelId),
    /// Consumer-side end
    Read(ChannelId),
}

impl fmt::Display for ChannelEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelEnd::Write(id) => write!(f, "Write({})", id),
            ChannelEnd::Read(id) => write!(f, "Read({})", id),
        }
    }
}

/// Producer-side endpoint of a channel
///
/// Closing is idempotent. The endpoint is also closed when dropped.
#[derive(Debug)]
pub struct WriteEndpoint {
    end: ChannelEnd,
    inner: Option<PipeWriter>,
}

impl WriteEndpoint {
    /// Returns which end this is
    pub fn end(&self) -> ChannelEnd {
        self.end
    }

    /// Checks if the owner has closed this endpoint
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Performs a single write, returning the number of bytes transferred
    ///
    /// A short count is possible and is left for the caller to judge.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, ChannelError> {
        let end = self.end;
        let writer = self.inner.as_mut().ok_or(ChannelError::Closed(end))?;
        loop {
            match writer.write(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(ChannelError::Io { end, source }),
            }
        }
    }

    /// Closes this endpoint
    pub fn close(&mut self) {
        self.inner.take();
    }

    fn duplicate(&self) -> Result<Self, ChannelError> {
        let writer = self.inner.as_ref().ok_or(ChannelError::Closed(self.end))?;
        let inner = writer
            .try_clone()
            .map_err(ChannelError::ResourceExhausted)?;
        Ok(Self {
            end: self.end,
            inner: Some(inner),
        })
    }
}

/// Consumer-side endpoint of a channel
#[derive(Debug)]
pub struct ReadEndpoint {
    end: ChannelEnd,
    inner: Option<PipeReader>,
}

impl ReadEndpoint {
    /// Returns which end this is
    pub fn end(&self) -> ChannelEnd {
        self.end
    }

    /// Checks if the owner has closed this endpoint
    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Reads into `buf`, returning the number of bytes read
    ///
    /// `Ok(0)` means end-of-stream: every write endpoint has been closed.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let end = self.end;
        let reader = self.inner.as_mut().ok_or(ChannelError::Closed(end))?;
        loop {
            match reader.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(ChannelError::Io { end, source }),
            }
        }
    }

    /// Closes this endpoint
    pub fn close(&mut self) {
        self.inner.take();
    }

    fn duplicate(&self) -> Result<Self, ChannelError> {
        let reader = self.inner.as_ref().ok_or(ChannelError::Closed(self.end))?;
        let inner = reader
            .try_clone()
            .map_err(ChannelError::ResourceExhausted)?;
        Ok(Self {
            end: self.end,
            inner: Some(inner),
        })
    }
}

/// A unidirectional channel as held by its creator
///
/// The creator hands duplicates to workers via [`Channel::inherit`] and must
/// then [`Channel::close`] its own copies. A leftover write copy keeps the
/// reader from ever seeing end-of-stream.
#[derive(Debug)]
pub struct Channel {
    write: WriteEndpoint,
    read: ReadEndpoint,
}

/// Creates a new channel
pub fn create_channel() -> Result<Channel, ChannelError> {
    let (reader, writer) = io::pipe().map_err(ChannelError::ResourceExhausted)?;
    let id = ChannelId::new();
    Ok(Channel {
        write: WriteEndpoint {
            end: ChannelEnd::Write(id),
            inner: Some(writer),
        },
        read: ReadEndpoint {
            end: ChannelEnd::Read(id),
            inner: Some(reader),
        },
    })
}

impl Channel {
    /// Duplicates both endpoints for a newly spawned worker
    pub fn inherit(&self) -> Result<InheritedEndpoints, ChannelError> {
        Ok(InheritedEndpoints {
            write: self.write.duplicate()?,
            read: self.read.duplicate()?,
        })
    }

    /// Checks if both of the creator's copies are closed
    pub fn is_closed(&self) -> bool {
        self.write.is_closed() && self.read.is_closed()
    }

    /// Closes the creator's copies of both endpoints
    pub fn close(&mut self) {
        self.write.close();
        self.read.close();
    }

    /// Splits the channel into its endpoints without duplicating them
    pub fn into_endpoints(self) -> (WriteEndpoint, ReadEndpoint) {
        (self.write, self.read)
    }
}

/// Both endpoints of a channel as inherited by a worker
///
/// A worker keeps one side; the other is closed before the worker runs.
#[derive(Debug)]
pub struct InheritedEndpoints {
    write: WriteEndpoint,
    read: ReadEndpoint,
}

impl InheritedEndpoints {
    /// Keeps the write endpoint, closing the inherited read endpoint
    pub fn into_write(self) -> WriteEndpoint {
        let Self { write, mut read } = self;
        read.close();
        write
    }

    /// Keeps the read endpoint, closing the inherited write endpoint
    pub fn into_read(self) -> ReadEndpoint {
        let Self { mut write, read } = self;
        write.close();
        read
    }
}
