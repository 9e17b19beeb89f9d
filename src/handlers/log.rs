//! # Simple logging decorator for debugging and demos.
//!
//! [`LogHandler`] wraps another handler and prints each invocation and its
//! return value to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [invoke] handler=echo args="Hello World"
//! [return] handler=echo ret="Hello World"
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::handlers::handler::{Handle, HandlerRef};

/// Stdout logging decorator around a [`HandlerRef`].
///
/// Enabled via the `logging` feature. Prints the wrapped handler's arguments
/// and return value for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Handle`] for
/// structured logging or metrics collection.
pub struct LogHandler<A, R> {
    inner: HandlerRef<A, R>,
}

impl<A, R> LogHandler<A, R> {
    /// Wraps an existing handler.
    pub fn new(inner: HandlerRef<A, R>) -> Self {
        Self { inner }
    }

    /// Wraps an existing handler and returns it as a shared handle.
    pub fn arc(inner: HandlerRef<A, R>) -> Arc<Self> {
        Arc::new(Self::new(inner))
    }
}

#[async_trait]
impl<A, R> Handle<A, R> for LogHandler<A, R>
where
    A: Debug + Send + 'static,
    R: Debug + Send + 'static,
{
    async fn call(&self, args: A) -> R {
        println!("[invoke] handler={} args={:?}", self.inner.name(), args);
        let ret = self.inner.call(args).await;
        println!("[return] handler={} ret={:?}", self.inner.name(), ret);
        ret
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
