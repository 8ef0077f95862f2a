// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! The session and gate paths never surface these errors: every failure in
//! that subsystem degrades to "no session" locally. `AppError` exists for
//! the API boundary and the storage backends, where a caller can actually
//! act on the failure.

use crate::storage::StorageError;

/// Client-core error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Backend API error: {0}")]
    Api(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
