//! # fanout
//!
//! **Fanout** is a lightweight in-process publish/subscribe library for Rust.
//!
//! It maps named events to ordered sets of uniquely-identified handlers and
//! dispatches each emission as one concurrent task per handler, funneling
//! results back to the caller through a buffered channel. The crate is
//! designed as a building block: embed an [`EventEmitter`] as a field of a
//! host type and wire your components through it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!              emitter.on("recv", id, handler)
//!                           │
//!                           ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventEmitter<A, R, I>                                    │
//! │  RwLock<HashMap<event name, Vec<Entry { id, handler }>>>  │
//! └──────────────────────────┬────────────────────────────────┘
//!                            │ emit("recv", args)
//!                            │   (snapshot entries under read lock,
//!                            │    then dispatch outside the lock)
//!            ┌───────────────┼───────────────┐
//!            ▼               ▼               ▼
//!     ┌────────────┐  ┌────────────┐  ┌────────────┐
//!     │ tokio task │  │ tokio task │  │ tokio task │   one per entry
//!     │ handler #1 │  │ handler #2 │  │ handler #N │
//!     └──────┬─────┘  └──────┬─────┘  └──────┬─────┘
//!            │ Response      │ Response      │ Response
//!            └───────────────┼───────────────┘
//!                            ▼
//!                 ┌─────────────────────┐
//!                 │  Dispatch<R>        │   buffered mpsc, closes
//!                 │  recv() / collect() │   after the last response
//!                 └─────────────────────┘
//! ```
//!
//! ### Dispatch lifecycle
//! ```text
//! emit(event, args)
//!   ├─ event absent or no entries ──► None (no dispatch)
//!   └─ else, per entry:
//!        ├─► spawn task: handler.call(args.clone())
//!        │       ├─ Ok(value)  ──► Response { event, result: Ok(value) }
//!        │       └─ panic      ──► Response { event, result: Err(Panicked) }
//!        └─► Some(Dispatch) returned immediately (never awaits handlers)
//!
//! Responses arrive in completion order; no ordering is guaranteed.
//! The result channel closes once every dispatched task has finished.
//! ```
//!
//! ## Features
//! | Area              | Description                                             | Key types / traits                        |
//! |-------------------|---------------------------------------------------------|-------------------------------------------|
//! | **Registry**      | Register, deduplicate, remove, and list event handlers. | [`EventEmitter`], [`Entry`]               |
//! | **Dispatch**      | Concurrent fan-out with a non-blocking result handle.   | [`Dispatch`], [`Response`]                |
//! | **Handlers**      | Define handlers as closures or trait impls.             | [`Handle`], [`HandlerFn`], [`HandlerRef`] |
//! | **Errors**        | Typed per-handler dispatch faults.                      | [`HandlerError`]                          |
//! | **Configuration** | Tune the result-channel capacity.                       | [`EmitterConfig`]                         |
//!
//! ## Optional features
//! - `logging`: exports the [`LogHandler`] decorator _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use fanout::{EventEmitter, HandlerFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
//!
//!     emitter
//!         .on("recv", 10, HandlerFn::arc("echo", |msg: String| async move { msg }))
//!         .await;
//!
//!     if let Some(dispatch) = emitter.emit("recv", "Hello World".to_string()).await {
//!         for resp in dispatch.collect().await {
//!             println!("{} -> {:?}", resp.event, resp.result);
//!         }
//!     }
//! }
//! ```
mod config;
mod emitter;
mod error;
mod handlers;

// ---- Public re-exports ----

pub use config::EmitterConfig;
pub use emitter::{Dispatch, Entry, EventEmitter, Response};
pub use error::HandlerError;
pub use handlers::{Handle, HandlerFn, HandlerRef};

// Optional: expose a simple built-in logging decorator (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use handlers::LogHandler;
