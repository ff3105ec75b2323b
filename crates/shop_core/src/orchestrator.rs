//! Wires the bus, model, and state machine together and owns the event
//! handlers that are not view plumbing: cart toggling, draft field writes,
//! submit gating, and the draft-clearing policy.

use std::rc::Rc;

use event_bus::{EventBus, Pattern};
use serde_json::Value;
use shared::domain::{NavigationState, OrderDraft, OrderFieldWrite};
use shared::protocol::{
    self, FieldChangePayload, ItemIdPayload, PaymentSelectPayload, StateChangedPayload,
};
use tracing::{debug, warn};

use crate::model::ShopModel;
use crate::states::ShopStates;

/// Subscribes all core handlers. `submit` is the network edge: it receives a
/// draft snapshot once the order passes validation and is expected to deliver
/// the result back onto the bus as `order:sent` (or log the failure and drop
/// it).
pub fn wire(
    bus: &EventBus,
    model: &Rc<ShopModel>,
    states: &Rc<ShopStates>,
    submit: impl Fn(OrderDraft) + 'static,
) {
    // Every event in the system is offered to the state machine; the table
    // decides which ones navigate.
    {
        let states = Rc::clone(states);
        bus.subscribe_all(move |event, payload| states.dispatch(event, payload));
    }

    // Cart membership toggle. The in_cart check is the caller discipline that
    // keeps adds and removals paired.
    {
        let model = Rc::clone(model);
        bus.subscribe(Pattern::exact(protocol::ITEM_CART_ACTION), move |_, payload| {
            match serde_json::from_value::<ItemIdPayload>(payload.clone()) {
                Ok(action) => {
                    if model.in_cart(&action.id) {
                        model.remove_from_cart(&action.id);
                    } else {
                        model.add_to_cart(&action.id);
                    }
                }
                Err(err) => warn!(%err, "malformed item:cart-action payload"),
            }
        });
    }

    {
        let model = Rc::clone(model);
        bus.subscribe(Pattern::exact(protocol::PAYMENT_SELECT), move |_, payload| {
            match serde_json::from_value::<PaymentSelectPayload>(payload.clone()) {
                Ok(select) => model.set_order_field(OrderFieldWrite::Payment(select.payment)),
                Err(err) => warn!(%err, "malformed payment:select payload"),
            }
        });
    }

    // Per-keystroke form updates from both checkout steps.
    {
        let model = Rc::clone(model);
        bus.subscribe(
            Pattern::rule(protocol::is_form_field_change),
            move |event, payload| {
                let change: FieldChangePayload = match serde_json::from_value(payload.clone()) {
                    Ok(change) => change,
                    Err(err) => {
                        warn!(event, %err, "malformed form field-change payload");
                        return;
                    }
                };
                match OrderFieldWrite::from_form_field(&change.field, &change.value) {
                    Some(write) => model.set_order_field(write),
                    None => warn!(event, field = %change.field, "unknown order field; ignoring"),
                }
            },
        );
    }

    // Submission gate: only a draft the validation engine accepts reaches the
    // network edge. A rejected draft's only effect is the orderErrors:changed
    // emitted by validate_order.
    {
        let model = Rc::clone(model);
        bus.subscribe(Pattern::exact(protocol::CONTACTS_SUBMIT), move |_, _| {
            if model.validate_order() {
                submit(model.order());
            } else {
                debug!("order draft failed validation; submission withheld");
            }
        });
    }

    // Closing the success note is a plain modal close as far as navigation is
    // concerned.
    {
        let bus_out = bus.clone();
        bus.subscribe(Pattern::exact(protocol::SUCCESS_CLOSE), move |_, _| {
            bus_out.emit(protocol::MODAL_CLOSE, Value::Null);
        });
    }

    // Post-transition side effects. The cart empties once the confirmed order
    // is on screen; the draft's user fields survive until the shopper is back
    // to browsing, so the success modal renders from intact data.
    {
        let model = Rc::clone(model);
        let states = Rc::clone(states);
        bus.subscribe(Pattern::exact(protocol::STATE_CHANGED), move |_, payload| {
            let changed: StateChangedPayload = match serde_json::from_value(payload.clone()) {
                Ok(changed) => changed,
                Err(err) => {
                    warn!(%err, "malformed state:changed payload");
                    return;
                }
            };
            match changed.state {
                NavigationState::OrderSuccess => model.clear_cart(),
                NavigationState::Browsing => {
                    if matches!(
                        states.previous_state(),
                        Some(
                            NavigationState::OrderForm
                                | NavigationState::ContactForm
                                | NavigationState::OrderSuccess
                        )
                    ) {
                        model.clear_order_draft();
                    }
                }
                _ => {}
            }
        });
    }
}
