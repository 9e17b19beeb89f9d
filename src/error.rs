//! Error types produced during event dispatch.
//!
//! Registry operations (add/remove/list) never fail observably: duplicate
//! registrations and removals of absent entries are silent no-ops, and
//! emitting an unregistered event is signaled by the absence of a dispatch
//! handle rather than an error. The only fault left is a handler failing
//! mid-invocation, which [`HandlerError`] describes.

use thiserror::Error;

/// # Errors produced by a single handler invocation.
///
/// A faulted handler never aborts the dispatch or touches the registry; the
/// error is delivered inside that handler's [`Response`](crate::Response)
/// while every other handler's response still arrives.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum HandlerError {
    /// The handler panicked while processing the emitted event.
    #[error("handler panicked: {reason}")]
    Panicked {
        /// The captured panic payload, if it was a string.
        reason: String,
    },
}

impl HandlerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanout::HandlerError;
    ///
    /// let err = HandlerError::Panicked { reason: "boom".into() };
    /// assert_eq!(err.as_label(), "handler_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Panicked { reason } => format!("panic: {reason}"),
        }
    }
}
