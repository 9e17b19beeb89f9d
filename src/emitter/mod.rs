//! # Event registry and dispatch.
//!
//! This module groups the registry **data model** and the **dispatch
//! protocol** used to fan emissions out to registered handlers.
//!
//! ## Contents
//! - [`EventEmitter`], [`Entry`] the event-name → handler-list registry
//! - [`Dispatch`], [`Response`] the per-emission result stream
//!
//! ## Quick reference
//! - **Registration**: [`EventEmitter::add_listener`] / [`EventEmitter::on`],
//!   deduplicated per event by handler identity.
//! - **Emission**: [`EventEmitter::emit`] snapshots the entry list, spawns
//!   one task per handler, and returns a [`Dispatch`] immediately.

mod dispatch;
mod registry;

pub use dispatch::{Dispatch, Response};
pub use registry::{Entry, EventEmitter};
