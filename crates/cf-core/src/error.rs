//! Error types for CaseForge

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CfError {
    /// Selection was asked to draw from an empty or weightless pool. This is
    /// a programmer error — catalog loading rejects such cases up front.
    #[error("Invalid pool: {0}")]
    InvalidPool(String),
}

/// Result type alias
pub type CfResult<T> = Result<T, CfError>;
