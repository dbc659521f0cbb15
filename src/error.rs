//! Error types for the cache engines
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engines.
///
/// The in-memory engines never fail once constructed; the `Result` returned by
/// the [`Cache`](crate::cache::Cache) mutators exists so that fallible tiers
/// can implement the same contract.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No Tokio runtime is available to host the expiry sweep task
    #[error("No Tokio runtime available for the expiry sweep: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// A backing tier could not be reached
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engines.
pub type Result<T> = std::result::Result<T, CacheError>;
