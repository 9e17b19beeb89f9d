//! # Event handlers: the invocable seam of the emitter.
//!
//! This module defines the [`Handle`] trait implemented by everything that
//! can react to an emitted event, plus the function-backed [`HandlerFn`]
//! convenience wrapper. The common handle type is [`HandlerRef`], an
//! `Arc<dyn Handle>` suitable for sharing across the registry and the
//! dispatch tasks.
//!
//! ## Implementing custom handlers
//! ```no_run
//! use fanout::Handle;
//! use async_trait::async_trait;
//!
//! struct WordCount;
//!
//! #[async_trait]
//! impl Handle<String, usize> for WordCount {
//!     async fn call(&self, msg: String) -> usize {
//!         msg.split_whitespace().count()
//!     }
//! }
//! ```

mod handler;
mod handler_fn;

#[cfg(feature = "logging")]
mod log;

pub use handler::{Handle, HandlerRef};
pub use handler_fn::HandlerFn;

#[cfg(feature = "logging")]
pub use log::LogHandler;
