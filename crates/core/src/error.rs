//! Error taxonomy shared by every layer.
//!
//! The HTTP layer maps each variant to a status code; the core only decides
//! which category a failure belongs to.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The project, task or user does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or invalid input, including bad credentials at login.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No usable identity (missing, invalid or expired token).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller exists but fails the project access gate.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
