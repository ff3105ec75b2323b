//! Order/cart model: catalog, cart membership, and the in-progress order
//! draft, with change notifications over the event bus.

use std::cell::RefCell;

use event_bus::EventBus;
use serde_json::Value;
use shared::domain::{CatalogItem, OrderDraft, OrderErrors, OrderFieldWrite};
use shared::protocol::{self, ItemsChangedPayload};

use crate::validation;

/// Holds all business state of the shop. Mutators take `&self` so handlers
/// running inside a bus dispatch can call back into the model through a
/// shared handle; every borrow is dropped before the follow-up event is
/// emitted, which keeps re-entrant dispatches safe.
pub struct ShopModel {
    events: EventBus,
    items: RefCell<Vec<CatalogItem>>,
    cart: RefCell<Vec<String>>,
    order: RefCell<OrderDraft>,
    errors: RefCell<OrderErrors>,
}

impl ShopModel {
    pub fn new(events: EventBus) -> Self {
        Self {
            events,
            items: RefCell::new(Vec::new()),
            cart: RefCell::new(Vec::new()),
            order: RefCell::new(OrderDraft::default()),
            errors: RefCell::new(OrderErrors::new()),
        }
    }

    /// Replaces the catalog wholesale and emits `items:changed`. Cart ids
    /// that no longer resolve are tolerated; they contribute nothing to the
    /// total and are never displayed.
    pub fn set_catalog(&self, items: Vec<CatalogItem>) {
        *self.items.borrow_mut() = items;
        let payload = ItemsChangedPayload {
            items: self.items.borrow().clone(),
        };
        self.events
            .emit_serialized(protocol::ITEMS_CHANGED, &payload);
    }

    pub fn item(&self, id: &str) -> Option<CatalogItem> {
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }

    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.items.borrow().clone()
    }

    /// Adds an item to the cart. Membership is a toggle, not a count: adding
    /// an id that is already present leaves the cart unchanged but still
    /// emits `cart:changed`, mirroring the removal of an absent id.
    pub fn add_to_cart(&self, id: &str) {
        {
            let mut cart = self.cart.borrow_mut();
            if !cart.iter().any(|member| member == id) {
                cart.push(id.to_string());
            }
        }
        self.sync_cart_derived_fields();
    }

    /// Removes an item from the cart; removing a non-member is a no-op that
    /// still emits `cart:changed`.
    pub fn remove_from_cart(&self, id: &str) {
        self.cart.borrow_mut().retain(|member| member != id);
        self.sync_cart_derived_fields();
    }

    pub fn clear_cart(&self) {
        self.cart.borrow_mut().clear();
        self.sync_cart_derived_fields();
    }

    pub fn in_cart(&self, id: &str) -> bool {
        self.cart.borrow().iter().any(|member| member == id)
    }

    pub fn cart_amount(&self) -> usize {
        self.cart.borrow().len()
    }

    /// Sum of the prices of carted items; priceless and stale ids count 0.
    pub fn cart_total(&self) -> u64 {
        let items = self.items.borrow();
        self.cart
            .borrow()
            .iter()
            .map(|id| {
                items
                    .iter()
                    .find(|item| item.id == *id)
                    .and_then(|item| item.price)
                    .unwrap_or(0)
            })
            .sum()
    }

    /// Writes one user-entry field of the draft, then re-runs validation and
    /// emits `orderErrors:changed`.
    pub fn set_order_field(&self, write: OrderFieldWrite) {
        {
            let mut order = self.order.borrow_mut();
            match write {
                OrderFieldWrite::Payment(payment) => order.payment = Some(payment),
                OrderFieldWrite::Email(email) => order.email = email,
                OrderFieldWrite::Phone(phone) => order.phone = phone,
                OrderFieldWrite::Address(address) => order.address = address,
            }
        }
        self.validate_order();
    }

    /// Resets the draft's user-entry fields; `items`/`total` stay derived
    /// from the cart.
    pub fn clear_order_draft(&self) {
        self.order.borrow_mut().clear_user_fields();
    }

    /// Runs the validation engine over the current draft, overwrites the
    /// stored error map, and emits `orderErrors:changed` even when the result
    /// is unchanged. Returns whether the draft is submittable.
    pub fn validate_order(&self) -> bool {
        let errors = validation::validate(&self.order.borrow());
        *self.errors.borrow_mut() = errors.clone();
        self.events
            .emit_serialized(protocol::ORDER_ERRORS_CHANGED, &errors);
        errors.is_empty()
    }

    pub fn order(&self) -> OrderDraft {
        self.order.borrow().clone()
    }

    pub fn order_errors(&self) -> OrderErrors {
        self.errors.borrow().clone()
    }

    /// Re-derives `draft.items`/`draft.total` from the cart and announces the
    /// cart change. Keeping the resync here (instead of in a `cart:changed`
    /// handler) pins the invariant to the mutation itself.
    fn sync_cart_derived_fields(&self) {
        let members = self.cart.borrow().clone();
        let total = self.cart_total();
        {
            let mut order = self.order.borrow_mut();
            order.items = members;
            order.total = total;
        }
        self.events.emit(protocol::CART_CHANGED, Value::Null);
    }
}
