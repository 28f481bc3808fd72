//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the crate, allowing
//! for type-safe error handling throughout the codebase.

pub use crate::cities::CitiesError;
pub use crate::config::ConfigError;
pub use crate::store::StateError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types in the
/// crate. It uses `thiserror` for automatic error derivation and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// City service errors
    #[error("City service error: {0}")]
    Cities(#[from] CitiesError),

    /// City store errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
