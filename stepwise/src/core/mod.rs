//! Core types shared by every layer of the engine.
//!
//! # Configuration
//! - [`EngineConfig`]: tick cadence, input caps and numeric tolerances
//!
//! # Serialization
//! - [`serialize_value`]: Convert Rust types to JSON bytes
//! - [`deserialize_value`]: Convert JSON bytes back to Rust types
//! - [`fingerprint`]: Stable hash of a value, used to compare replayed states
//! - [`distance`]: serde adapters that keep infinite distances through JSON
//!
//! # Error Handling
//! - [`CoreError`]: Core error type with proper error chains
//! - [`Result<T>`]: Type alias for Results using CoreError

mod config;
pub mod distance;
mod error;
mod serialization;

pub use config::{
    EngineConfig, DEFAULT_BASE_INTERVAL, DEFAULT_FLOW_EPSILON, DEFAULT_MAX_ARRAY_LEN,
    DEFAULT_MAX_VALUE,
};
pub use error::{CoreError, Error, Result};
pub use serialization::{deserialize_value, fingerprint, serialize_value};
