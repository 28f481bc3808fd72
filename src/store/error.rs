//! Store-specific error types.
//!
//! Both variants are programmer errors. They are handed back to the caller
//! untouched instead of being folded into the store's `error` message.

/// Errors that can occur while dispatching to or reaching a city store.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A serialized action carried a tag outside the known transition set
    #[error("Unknown action type '{0}'")]
    UnknownAction(String),

    /// A serialized action had a known tag but an unusable payload
    #[error("Malformed '{tag}' action: {message}")]
    MalformedAction { tag: String, message: String },

    /// Store accessed after its provider was unmounted
    #[error("City store was used outside of its provider")]
    MissingProvider,
}
