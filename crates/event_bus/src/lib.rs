//! Synchronous in-process publish/subscribe bus.
//!
//! The bus is the sole communication channel between the shop model, the
//! navigation state machine, and the view/network collaborators. Dispatch is
//! synchronous and single-threaded: `emit` invokes every matching handler on
//! the calling stack before returning, so all state mutation in the system is
//! serialized without locks.
//!
//! # Dispatch order
//!
//! For each emit, exact and rule subscribers are invoked first, in
//! registration order, followed by catch-all subscribers in registration
//! order. Every matching subscriber is called exactly once per emit.
//!
//! # Re-entrancy
//!
//! Handlers may emit further events. Nested emits run depth-first: all
//! deliveries of the inner event complete before the outer emit resumes with
//! its remaining handlers. Runaway recursion (mutually emitting handlers) is
//! cut off at [`MAX_EMIT_DEPTH`]; emits past the bound are dropped with an
//! error log instead of overflowing the stack.
//!
//! Subscribing during a dispatch takes effect from the next emit. Removing a
//! subscription during a dispatch does not retract deliveries already in
//! flight for the current emit.
//!
//! # Thread safety
//!
//! The bus is `Rc`-based and not `Send`/`Sync`; keep it on one thread and
//! feed it from other threads via channels.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// Event payloads travel as loosely typed JSON; typed payload structs live in
/// `shared::protocol` and convert at the edges.
pub type Payload = Value;

/// Nested emits deeper than this are dropped.
pub const MAX_EMIT_DEPTH: usize = 32;

/// What a subscriber listens for, resolved at subscribe time.
#[derive(Clone)]
pub enum Pattern {
    /// Matches only the identical event name.
    Exact(String),
    /// Matches any event name the predicate accepts.
    Rule(Rc<dyn Fn(&str) -> bool>),
}

impl Pattern {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn rule(predicate: impl Fn(&str) -> bool + 'static) -> Self {
        Self::Rule(Rc::new(predicate))
    }

    fn matches(&self, event: &str) -> bool {
        match self {
            Self::Exact(name) => name == event,
            Self::Rule(predicate) => predicate(event),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&str, &Payload)>;

struct Subscriber {
    id: SubscriptionId,
    /// `None` marks a catch-all subscriber.
    pattern: Option<Pattern>,
    handler: Handler,
}

struct BusInner {
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
    depth: Cell<usize>,
}

#[derive(Clone)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(BusInner {
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                depth: Cell::new(0),
            }),
        }
    }

    /// Registers a handler for events matching `pattern`.
    pub fn subscribe(
        &self,
        pattern: Pattern,
        handler: impl Fn(&str, &Payload) + 'static,
    ) -> SubscriptionId {
        self.register(Some(pattern), Rc::new(handler))
    }

    /// Registers a handler for every emitted event, regardless of name.
    /// Catch-all handlers run after all pattern handlers of an emit.
    pub fn subscribe_all(&self, handler: impl Fn(&str, &Payload) + 'static) -> SubscriptionId {
        self.register(None, Rc::new(handler))
    }

    /// Removes a subscription. No-op if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .borrow_mut()
            .retain(|subscriber| subscriber.id != id);
    }

    /// Synchronously delivers `payload` to every matching subscriber.
    pub fn emit(&self, event: &str, payload: Payload) {
        let depth = self.inner.depth.get();
        if depth >= MAX_EMIT_DEPTH {
            error!(event, depth, "emit depth bound exceeded; dropping event");
            return;
        }

        // Snapshot the matching handlers so subscribers may (un)subscribe
        // while the dispatch is running.
        let mut matched: Vec<Handler> = Vec::new();
        let mut catch_all: Vec<Handler> = Vec::new();
        for subscriber in self.inner.subscribers.borrow().iter() {
            match &subscriber.pattern {
                Some(pattern) if pattern.matches(event) => {
                    matched.push(Rc::clone(&subscriber.handler));
                }
                Some(_) => {}
                None => catch_all.push(Rc::clone(&subscriber.handler)),
            }
        }

        self.inner.depth.set(depth + 1);
        for handler in matched.into_iter().chain(catch_all) {
            handler(event, &payload);
        }
        self.inner.depth.set(depth);
    }

    /// Serializes `payload` and emits it. A value that fails to serialize is
    /// logged and not delivered.
    pub fn emit_serialized<T: Serialize>(&self, event: &str, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.emit(event, value),
            Err(err) => error!(event, %err, "failed to serialize event payload"),
        }
    }

    fn register(&self, pattern: Option<Pattern>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            pattern,
            handler,
        });
        id
    }
}

#[cfg(test)]
mod tests;
