//! Core error types.
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. The store, schema, and fetch layers define their own
//! richer error types; this module only covers failures that can occur
//! inside the foundational types themselves.

use thiserror::Error;

/// Errors raised by the foundational types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A string did not name a known variant of an enumerated domain.
    #[error("unknown {domain} value: {value:?}")]
    UnknownVariant {
        /// The enumerated domain being parsed (e.g. "event type").
        domain: &'static str,
        /// The rejected input.
        value: String,
    },
}
