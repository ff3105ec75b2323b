//! Static transition table for the navigation state machine.

use shared::domain::NavigationState;
use shared::protocol::{CART_OPEN, MODAL_CLOSE, ORDER_OPEN, ORDER_SENT, ORDER_SUBMIT, PREVIEW_OPEN};

/// Mapping from `(state, event name)` to the next state. Pairs not present
/// mean the event is ignored in that state.
pub struct TransitionTable {
    entries: Vec<(NavigationState, &'static str, NavigationState)>,
}

impl TransitionTable {
    pub fn new(
        entries: impl IntoIterator<Item = (NavigationState, &'static str, NavigationState)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn next(&self, state: NavigationState, event: &str) -> Option<NavigationState> {
        self.entries
            .iter()
            .find(|(from, name, _)| *from == state && *name == event)
            .map(|(_, _, to)| *to)
    }
}

/// The shop's navigation table. `browsing` is reachable from every modal
/// state via `modal:close`.
pub fn shop_transitions() -> TransitionTable {
    use NavigationState::*;

    TransitionTable::new([
        (Browsing, PREVIEW_OPEN, Preview),
        (Browsing, CART_OPEN, Cart),
        (Preview, MODAL_CLOSE, Browsing),
        (Cart, ORDER_OPEN, OrderForm),
        (Cart, MODAL_CLOSE, Browsing),
        (OrderForm, ORDER_SUBMIT, ContactForm),
        (OrderForm, MODAL_CLOSE, Browsing),
        (ContactForm, ORDER_SENT, OrderSuccess),
        (ContactForm, MODAL_CLOSE, Browsing),
        (OrderSuccess, MODAL_CLOSE, Browsing),
    ])
}
