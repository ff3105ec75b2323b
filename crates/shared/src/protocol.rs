//! Event-name contract between the coordination core and its collaborators.
//!
//! The names are the wire contract with the view/network layers and must be
//! kept verbatim; payload structs give them a typed shape on either side of
//! the bus.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CatalogItem, NavigationState, Payment};

/// Emitted by the model after the catalog is replaced wholesale.
pub const ITEMS_CHANGED: &str = "items:changed";
/// Emitted by the model after any cart mutation.
pub const CART_CHANGED: &str = "cart:changed";
/// Emitted by the model after every validation run.
pub const ORDER_ERRORS_CHANGED: &str = "orderErrors:changed";
/// Emitted by the state machine after a successful transition.
pub const STATE_CHANGED: &str = "state:changed";

/// View request to toggle an item's cart membership.
pub const ITEM_CART_ACTION: &str = "item:cart-action";
/// View selection of a payment method.
pub const PAYMENT_SELECT: &str = "payment:select";
/// View submission of the contacts step; triggers order placement.
pub const CONTACTS_SUBMIT: &str = "contacts:submit";
/// Confirmation that the order was accepted by the server.
pub const ORDER_SENT: &str = "order:sent";

pub const PREVIEW_OPEN: &str = "preview:open";
pub const CART_OPEN: &str = "cart:open";
pub const ORDER_OPEN: &str = "order:open";
pub const ORDER_SUBMIT: &str = "order:submit";
pub const MODAL_OPEN: &str = "modal:open";
pub const MODAL_CLOSE: &str = "modal:close";
pub const SUCCESS_CLOSE: &str = "success:close";

/// Matches the `section.field:change` events the order and contacts forms
/// emit per keystroke (`order.address:change`, `contacts.email:change`, ...).
pub fn is_form_field_change(event: &str) -> bool {
    (event.starts_with("order.") || event.starts_with("contacts."))
        && event.ends_with(":change")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsChangedPayload {
    pub items: Vec<CatalogItem>,
}

/// Payload of `item:cart-action` and `preview:open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemIdPayload {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSelectPayload {
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChangePayload {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangedPayload {
    pub state: NavigationState,
    /// Payload of the event that triggered the transition.
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSentPayload {
    pub total: u64,
}
