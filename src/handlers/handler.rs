//! # Core handler trait.
//!
//! `Handle` is the extension point for plugging callbacks into the emitter.
//! Each dispatched invocation runs on its own task, so implementations may
//! be slow without blocking the publisher or other handlers.

use std::sync::Arc;

use async_trait::async_trait;

/// Shared handle to a handler, as stored in the registry.
pub type HandlerRef<A, R> = Arc<dyn Handle<A, R>>;

/// Contract for event handlers.
///
/// `A` is the argument payload supplied to [`emit`](crate::EventEmitter::emit)
/// (cloned once per handler), `R` the value returned to the caller inside a
/// [`Response`](crate::Response). Argument and return shapes are checked at
/// compile time; a registered handler can never be invoked with a mismatched
/// payload.
#[async_trait]
pub trait Handle<A, R>: Send + Sync + 'static
where
    A: Send + 'static,
    R: Send + 'static,
{
    /// Handle a single emission of the event this handler is registered on.
    async fn call(&self, args: A) -> R;

    /// Human-readable name (for logs/diagnostics).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
