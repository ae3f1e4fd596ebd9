//! Store error types

use thiserror::Error;

/// Persistence-layer error type.
///
/// Both variants are non-fatal by policy: `RemoteUnavailable` degrades the
/// operation to local-only continuation, `MalformedCredential` is treated
/// the same as "not logged in".
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network, status, or parse failure on a document-store call
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// The stored credential token failed to decode or parse
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),
}

/// Result type alias
pub type StoreResult<T> = Result<T, StoreError>;
