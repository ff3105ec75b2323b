//! Navigation state machine. Consumes every event offered to [`dispatch`]
//! and changes state only through transition-table lookups.
//!
//! [`dispatch`]: ShopStates::dispatch

use std::cell::Cell;

use event_bus::{EventBus, Payload};
use shared::domain::NavigationState;
use shared::protocol::{StateChangedPayload, STATE_CHANGED};

use crate::transitions::TransitionTable;

pub struct ShopStates {
    events: EventBus,
    table: TransitionTable,
    current: Cell<NavigationState>,
    previous: Cell<Option<NavigationState>>,
}

impl ShopStates {
    pub fn new(events: EventBus, table: TransitionTable) -> Self {
        Self {
            events,
            table,
            current: Cell::new(NavigationState::INITIAL),
            previous: Cell::new(None),
        }
    }

    /// Offers one event to the machine. When the table holds a transition for
    /// `(current state, event)`, the state advances and exactly one
    /// `state:changed` is emitted carrying the new state and the triggering
    /// payload. Events without a transition are silently ignored; that is a
    /// defined no-op, not an error.
    pub fn dispatch(&self, event: &str, data: &Payload) {
        let Some(next) = self.table.next(self.current.get(), event) else {
            return;
        };
        self.previous.set(Some(self.current.get()));
        self.current.set(next);
        self.events.emit_serialized(
            STATE_CHANGED,
            &StateChangedPayload {
                state: next,
                data: data.clone(),
            },
        );
    }

    pub fn state(&self) -> NavigationState {
        self.current.get()
    }

    /// The state active before the last transition; history depth is 1. The
    /// orchestrator uses this to clear the order draft only when browsing is
    /// reached by leaving the checkout flow.
    pub fn previous_state(&self) -> Option<NavigationState> {
        self.previous.get()
    }
}
