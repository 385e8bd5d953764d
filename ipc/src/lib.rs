//! # Inter-Process Communication (IPC)
//!
//! This crate defines PipePair's channel transport.
//!
//! ## Philosophy
//!
//! - **One direction only**: A channel has exactly one write endpoint and one
//!   read endpoint.
//! - **Ownership is closure**: Dropping an endpoint closes it. A reader sees
//!   end-of-stream once every copy of the write endpoint is gone, so a worker
//!   that dies mid-stream never leaves its peer blocked.
//! - **Inheritance is explicit**: A worker receives both endpoints, the way a
//!   forked child inherits both descriptors, and must say which one it keeps.
//!
//! ## Architecture
//!
//! Channels are backed by OS pipes. On top of the raw byte stream sits a
//! fixed-size record codec for the `i32` values the workers exchange.

pub mod channel;
pub mod error;
pub mod record;

pub use channel::{
    create_channel, Channel, ChannelEnd, ChannelId, InheritedEndpoints, ReadEndpoint,
    WriteEndpoint,
};
pub use error::ChannelError;
pub use record::{decode_record, encode_record, RECORD_SIZE};
