//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(A) -> Fut`, producing a fresh future
//! per invocation. This avoids shared mutable state: each dispatch gets its
//! own future owning its own state. If handlers need shared state, move an
//! `Arc<...>` into the closure explicitly.
//!
//! ## Example
//! ```rust
//! use fanout::{Handle, HandlerFn, HandlerRef};
//!
//! let h: HandlerRef<String, String> = HandlerFn::arc("echo", |msg: String| async move { msg });
//!
//! assert_eq!(h.name(), "echo");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::handlers::handler::Handle;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a
    /// [`HandlerRef`](crate::HandlerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the handler and returns it as a shared handle (`Arc<Self>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut, A, R> Handle<A, R> for HandlerFn<F>
where
    F: Fn(A) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = R> + Send + 'static,
    A: Send + 'static,
    R: Send + 'static,
{
    async fn call(&self, args: A) -> R {
        (self.f)(args).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
