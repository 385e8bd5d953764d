//! # Core Types
//!
//! This crate defines the identifiers shared by every PipePair crate.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Workers and pairs have typed identities,
//!   not raw integers that can be confused with descriptors or counts.
//! - **Never reused**: A worker identity is assigned once, at spawn time.
//!
//! ## Key Types
//!
//! - [`WorkerId`]: Unique identifier for a spawned worker
//! - [`PairId`]: Numeric identifier for a producer/consumer pair

pub mod ids;

pub use ids::{PairId, WorkerId};
