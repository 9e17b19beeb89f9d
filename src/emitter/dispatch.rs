//! # Dispatch protocol: concurrent fan-out of one emission.
//!
//! [`EventEmitter::emit`] snapshots the entry list for an event under the
//! read lock, releases the lock, then spawns one task per entry. Each task
//! invokes its handler, packages the outcome as a [`Response`], and sends it
//! into a buffered channel owned by the returned [`Dispatch`] handle.
//!
//! ## Architecture
//! ```text
//! emit(event, args)
//!     │  snapshot entries (read lock), then for each entry:
//!     ├──► task 1 ── handler.call(args) ──► Response ──┐
//!     ├──► task 2 ── handler.call(args) ──► Response ──┼──► [mpsc] ──► Dispatch
//!     └──► task N ── handler.call(args) ──► Response ──┘    (buffered)
//! ```
//!
//! ## Rules
//! - **Non-blocking emit**: the `Dispatch` is returned immediately after
//!   spawning; `emit` never awaits handler completion.
//! - **No response ordering**: responses arrive in task completion order.
//! - **No producer blocking**: the channel buffer covers every dispatched
//!   task by default, so unconsumed dispatches never wedge handler tasks.
//! - **Completion signal**: every task drops its sender clone when done, so
//!   the channel closes after the last response; [`Dispatch::recv`] then
//!   yields `None` and [`Dispatch::collect`] terminates on its own.
//! - **No built-in timeout**: callers wanting one race [`Dispatch::recv`]
//!   against `tokio::time::timeout`.
//!
//! ## Panic handling
//! Dispatch tasks use `catch_unwind` to isolate handler panics:
//! - The panic is caught and converted to a [`HandlerError::Panicked`]
//!   response for that handler only.
//! - Other handlers and the registry itself are unaffected.
//!
//! ## Example
//! ```rust
//! use fanout::{EventEmitter, HandlerFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let emitter: EventEmitter<u32, u32, &'static str> = EventEmitter::new();
//!     emitter
//!         .on("sum", "double", HandlerFn::arc("double", |n: u32| async move { n * 2 }))
//!         .await;
//!
//!     if let Some(dispatch) = emitter.emit("sum", 21).await {
//!         assert_eq!(dispatch.dispatched(), 1);
//!         let responses = dispatch.collect().await;
//!         assert_eq!(responses.len(), 1);
//!     }
//!
//!     // No handlers, no dispatch.
//!     assert!(emitter.emit("other", 1).await.is_none());
//! }
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::emitter::registry::EventEmitter;
use crate::error::HandlerError;

/// The packaged outcome of one handler invocation during an emission.
///
/// Delivered once per handler that fired. `result` is `Err` only when the
/// handler itself faulted; see [`HandlerError`].
#[derive(Debug, Clone)]
pub struct Response<R> {
    /// Name of the emitted event.
    pub event: Arc<str>,
    /// The handler's return value, or the fault that replaced it.
    pub result: Result<R, HandlerError>,
}

impl<R> Response<R> {
    /// Unwraps the response into the handler's result.
    pub fn into_result(self) -> Result<R, HandlerError> {
        self.result
    }
}

/// Handle to one in-flight emission.
///
/// Owns the receiving side of the result channel plus the number of handlers
/// that were dispatched. The channel closes once every dispatched task has
/// delivered its response, so consuming past the end is well-defined:
/// [`Dispatch::recv`] returns `None` and [`Dispatch::collect`] terminates
/// without the caller tracking handler counts.
#[derive(Debug)]
pub struct Dispatch<R> {
    event: Arc<str>,
    dispatched: usize,
    rx: mpsc::Receiver<Response<R>>,
}

impl<R> Dispatch<R> {
    /// Name of the emitted event.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Number of handler tasks spawned by this emission.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Receives the next response, in completion order.
    ///
    /// Returns `None` once all dispatched handlers have responded and every
    /// response has been consumed.
    pub async fn recv(&mut self) -> Option<Response<R>> {
        self.rx.recv().await
    }

    /// Drains the dispatch, returning all responses in completion order.
    pub async fn collect(mut self) -> Vec<Response<R>> {
        let mut responses = Vec::with_capacity(self.dispatched);
        while let Some(resp) = self.rx.recv().await {
            responses.push(resp);
        }
        responses
    }
}

impl<A, R, I> EventEmitter<A, R, I>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    I: PartialEq + Clone + Send + Sync + 'static,
{
    /// Emits `event`, invoking every registered handler concurrently.
    ///
    /// Returns `None` when no handler is registered for `event` (the caller
    /// can distinguish "nothing was dispatched" from "nothing has responded
    /// yet"). Otherwise spawns one task per handler, each receiving its own
    /// clone of `args`, and returns the [`Dispatch`] handle immediately.
    ///
    /// A handler that panics produces an `Err` response for that handler
    /// only; the other handlers and the registry are unaffected.
    pub async fn emit(&self, event: &str, args: A) -> Option<Dispatch<R>> {
        let entries = {
            let events = self.events.read().await;
            match events.get(event) {
                Some(entries) if !entries.is_empty() => entries.clone(),
                _ => return None,
            }
        };

        let dispatched = entries.len();
        let capacity = match self.config.channel_capacity {
            0 => dispatched,
            cap => cap,
        };
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let name: Arc<str> = Arc::from(event);

        for entry in entries {
            let tx = tx.clone();
            let args = args.clone();
            let event = Arc::clone(&name);
            let handler = Arc::clone(entry.handler());

            tokio::spawn(async move {
                let result = match AssertUnwindSafe(handler.call(args)).catch_unwind().await {
                    Ok(value) => Ok(value),
                    Err(panic) => Err(HandlerError::Panicked {
                        reason: panic_reason(panic.as_ref()),
                    }),
                };
                // Send failure means the Dispatch was dropped; nothing to do.
                let _ = tx.send(Response { event, result }).await;
            });
        }

        Some(Dispatch {
            event: name,
            dispatched,
            rx,
        })
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::EmitterConfig;
    use crate::handlers::{HandlerFn, HandlerRef};

    fn echo() -> HandlerRef<String, String> {
        HandlerFn::arc("echo", |msg: String| async move { msg })
    }

    fn tagged(tag: &'static str) -> HandlerRef<String, String> {
        HandlerFn::arc(tag, move |msg: String| async move { format!("{tag}:{msg}") })
    }

    #[tokio::test]
    async fn test_emit_unregistered_event_returns_none() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
        assert!(emitter.emit("missing", "hi".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_emit_after_remove_listeners_returns_none() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();

        emitter.on("recv", 1, echo()).await;
        emitter.remove_listeners("recv").await;

        assert!(emitter.emit("recv", "hi".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_emit_after_removing_last_listener_returns_none() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();

        emitter.on("recv", 1, echo()).await;
        emitter.remove_listener("recv", &1).await;

        // An emptied entry list behaves exactly like an absent key.
        assert!(emitter.emit("recv", "hi".to_string()).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_echo_roundtrip_single_response() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
        emitter.on("recv", 10, echo()).await;

        let mut dispatch = emitter
            .emit("recv", "Hello World".to_string())
            .await
            .expect("one handler registered");
        assert_eq!(dispatch.event(), "recv");
        assert_eq!(dispatch.dispatched(), 1);

        let resp = dispatch.recv().await.expect("exactly one response");
        assert_eq!(resp.event.as_ref(), "recv");
        assert_eq!(resp.result.as_deref().ok(), Some("Hello World"));

        // Channel closes once all dispatched handlers have responded.
        assert!(dispatch.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fanout_multiset_matches_irrespective_of_order() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
        emitter.on("recv", 1, tagged("a")).await;
        emitter.on("recv", 2, tagged("b")).await;
        emitter.on("recv", 3, tagged("c")).await;

        let dispatch = emitter
            .emit("recv", "hi".to_string())
            .await
            .expect("three handlers registered");
        assert_eq!(dispatch.dispatched(), 3);

        let collected = tokio::time::timeout(Duration::from_secs(5), dispatch.collect())
            .await
            .expect("dispatch must terminate");

        let mut results: Vec<String> = collected
            .into_iter()
            .map(|r| r.into_result().expect("no handler faulted"))
            .collect();
        results.sort();
        assert_eq!(results, vec!["a:hi", "b:hi", "c:hi"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_panicking_handler_is_isolated() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
        emitter.on("recv", 1, echo()).await;
        emitter
            .on(
                "recv",
                2,
                HandlerFn::arc("boom", |_msg: String| async { panic!("boom") }),
            )
            .await;

        let dispatch = emitter
            .emit("recv", "hi".to_string())
            .await
            .expect("two handlers registered");
        let responses = tokio::time::timeout(Duration::from_secs(5), dispatch.collect())
            .await
            .expect("dispatch must terminate");
        assert_eq!(responses.len(), 2);

        let oks: Vec<&String> = responses.iter().filter_map(|r| r.result.as_ref().ok()).collect();
        assert_eq!(oks, vec!["hi"]);

        let errs: Vec<&HandlerError> = responses
            .iter()
            .filter_map(|r| r.result.as_ref().err())
            .collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].as_label(), "handler_panicked");
        assert!(errs[0].as_message().contains("boom"));

        // A dispatch fault never corrupts the registry.
        assert_eq!(emitter.listeners("recv").await.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unconsumed_dispatch_does_not_wedge_handlers() {
        let emitter: EventEmitter<String, String, u32> = EventEmitter::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for id in 0..8 {
            let hits = Arc::clone(&hits);
            emitter
                .on(
                    "recv",
                    id,
                    HandlerFn::arc("count", move |msg: String| {
                        let hits = Arc::clone(&hits);
                        async move {
                            hits.fetch_add(1, Ordering::SeqCst);
                            msg
                        }
                    }),
                )
                .await;
        }

        let dispatch = emitter
            .emit("recv", "hi".to_string())
            .await
            .expect("eight handlers registered");
        drop(dispatch);

        // All handlers still run to completion with nobody consuming.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while hits.load(Ordering::SeqCst) < 8 {
            assert!(
                tokio::time::Instant::now() < deadline,
                "handlers wedged after dispatch was dropped"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_capped_channel_capacity_still_drains() {
        let emitter: EventEmitter<String, String, u32> =
            EventEmitter::with_config(EmitterConfig { channel_capacity: 1 });

        for id in 0..4 {
            emitter.on("recv", id, echo()).await;
        }

        let dispatch = emitter
            .emit("recv", "hi".to_string())
            .await
            .expect("four handlers registered");
        let responses = tokio::time::timeout(Duration::from_secs(5), dispatch.collect())
            .await
            .expect("dispatch must terminate");
        assert_eq!(responses.len(), 4);
    }
}
