//! # Event registry: the event-name → handler-list mapping.
//!
//! [`EventEmitter`] owns the only shared mutable state in the crate: a map
//! from event name to an ordered list of [`Entry`] values, guarded by a
//! [`tokio::sync::RwLock`]. Registration and removal take the write lock;
//! listing and the snapshot at the start of a dispatch take the read lock.
//! Handlers themselves never run under the lock.
//!
//! ## Rules
//! - **Per-event identity**: two entries under one event never share an
//!   identity; a duplicate insert is a silent no-op.
//! - **Insertion order**: preserved, and significant only for iteration
//!   during dispatch, never for response ordering.
//! - **No-op fallbacks**: removing an absent event or identity does nothing;
//!   listing an absent event yields an empty snapshot.
//!
//! ## Embedding
//! The emitter is built to live as a field of a larger host type. It is
//! valid from construction, so the host needs no separate init step:
//!
//! ```rust
//! use fanout::{EventEmitter, HandlerFn};
//!
//! #[derive(Default)]
//! struct Server {
//!     emitter: EventEmitter<String, String, u32>,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let server = Server::default();
//!     server
//!         .emitter
//!         .on("recv", 10, HandlerFn::arc("echo", |msg: String| async move { msg }))
//!         .await;
//!
//!     assert_eq!(server.emitter.listeners("recv").await.len(), 1);
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::EmitterConfig;
use crate::handlers::HandlerRef;

/// A registered handler and the identity it was registered under.
///
/// Identities deduplicate and selectively remove handlers within one event;
/// uniqueness is scoped per event name, not globally.
pub struct Entry<A, R, I> {
    id: I,
    handler: HandlerRef<A, R>,
}

impl<A, R, I> Entry<A, R, I> {
    /// The caller-supplied identity of this entry.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// The registered handler.
    pub fn handler(&self) -> &HandlerRef<A, R> {
        &self.handler
    }
}

impl<A, R, I: Clone> Clone for Entry<A, R, I> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// In-process registry of named events and their handlers.
///
/// Generic over the argument payload `A` (cloned once per handler at
/// dispatch), the handler return value `R`, and the handler identity `I`.
///
/// Valid from construction: [`EventEmitter::new`], [`EventEmitter::with_config`]
/// and the [`Default`] impl all produce a usable empty registry, so the type
/// can be embedded as a plain field without an init step.
pub struct EventEmitter<A, R, I> {
    pub(crate) config: EmitterConfig,
    pub(crate) events: RwLock<HashMap<String, Vec<Entry<A, R, I>>>>,
}

impl<A, R, I> Default for EventEmitter<A, R, I> {
    fn default() -> Self {
        Self {
            config: EmitterConfig::default(),
            events: RwLock::new(HashMap::new()),
        }
    }
}

impl<A, R, I> EventEmitter<A, R, I>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    I: PartialEq + Clone + Send + Sync + 'static,
{
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with an explicit configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            config,
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `handler` against `event` under `id`.
    ///
    /// Creates the event's entry list on first use. If an entry with an equal
    /// identity already exists under this event, the call is a no-op and the
    /// new handler is discarded silently.
    pub async fn add_listener(&self, event: impl Into<String>, id: I, handler: HandlerRef<A, R>) {
        let mut events = self.events.write().await;
        let entries = events.entry(event.into()).or_default();

        if entries.iter().any(|e| e.id == id) {
            return;
        }
        entries.push(Entry { id, handler });
    }

    /// Alias to [`add_listener`](Self::add_listener).
    pub async fn on(&self, event: impl Into<String>, id: I, handler: HandlerRef<A, R>) {
        self.add_listener(event, id, handler).await;
    }

    /// Removes the entry registered under `id` for `event`, if present.
    ///
    /// A no-op when the event or the identity is absent.
    pub async fn remove_listener(&self, event: &str, id: &I) {
        let mut events = self.events.write().await;
        if let Some(entries) = events.get_mut(event) {
            if let Some(pos) = entries.iter().position(|e| e.id == *id) {
                entries.remove(pos);
            }
        }
    }

    /// Removes all entries registered for `event`. A no-op if absent.
    pub async fn remove_listeners(&self, event: &str) {
        self.events.write().await.remove(event);
    }

    /// Returns a snapshot of the entries registered for `event`, in
    /// insertion order (empty if absent).
    ///
    /// The snapshot is isolated: mutating the registry afterwards never
    /// changes a previously returned snapshot.
    pub async fn listeners(&self, event: &str) -> Vec<Entry<A, R, I>> {
        let events = self.events.read().await;
        events.get(event).cloned().unwrap_or_default()
    }

    /// Returns the sorted names of events with at least one entry.
    pub async fn event_names(&self) -> Vec<String> {
        let events = self.events.read().await;
        let mut names: Vec<String> = events
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns true if no event has a registered entry.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.values().all(Vec::is_empty)
    }
}
