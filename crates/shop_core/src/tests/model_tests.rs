use std::cell::RefCell;
use std::rc::Rc;

use event_bus::{EventBus, Pattern};
use shared::domain::{
    CatalogItem, DraftField, ItemCategory, OrderDraft, OrderFieldWrite, Payment,
};
use shared::protocol;

use crate::model::ShopModel;
use crate::validation;

fn item(id: &str, price: Option<u64>) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: format!("item {id}"),
        description: "test item".to_string(),
        image: format!("/images/{id}.png"),
        category: ItemCategory::Other,
        price,
    }
}

fn counting(bus: &EventBus, event: &'static str) -> Rc<RefCell<usize>> {
    let count = Rc::new(RefCell::new(0usize));
    let count_clone = Rc::clone(&count);
    bus.subscribe(Pattern::exact(event), move |_, _| {
        *count_clone.borrow_mut() += 1;
    });
    count
}

#[test]
fn empty_cart_has_zero_amount_and_total() {
    let model = ShopModel::new(EventBus::new());
    assert_eq!(model.cart_amount(), 0);
    assert_eq!(model.cart_total(), 0);
}

#[test]
fn set_catalog_replaces_wholesale_and_emits() {
    let bus = EventBus::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let emitted_clone = Rc::clone(&emitted);
    bus.subscribe(Pattern::exact(protocol::ITEMS_CHANGED), move |_, payload| {
        emitted_clone.borrow_mut().push(payload.clone());
    });

    let model = ShopModel::new(bus);
    model.set_catalog(vec![item("a", Some(100)), item("b", None)]);
    model.set_catalog(vec![item("c", Some(50))]);

    assert_eq!(emitted.borrow().len(), 2);
    assert_eq!(model.catalog().len(), 1);
    assert!(model.item("a").is_none());
    assert_eq!(model.item("c").map(|i| i.price), Some(Some(50)));
}

#[test]
fn cart_total_sums_prices_with_priceless_as_zero() {
    let model = ShopModel::new(EventBus::new());
    model.set_catalog(vec![
        item("a", Some(100)),
        item("b", Some(250)),
        item("priceless", None),
    ]);

    model.add_to_cart("a");
    model.add_to_cart("b");
    model.add_to_cart("priceless");

    assert_eq!(model.cart_amount(), 3);
    assert_eq!(model.cart_total(), 350);

    model.remove_from_cart("b");
    assert_eq!(model.cart_total(), 100);
}

#[test]
fn duplicate_add_keeps_membership_single_but_still_emits() {
    let bus = EventBus::new();
    let cart_changes = counting(&bus, protocol::CART_CHANGED);
    let model = ShopModel::new(bus);
    model.set_catalog(vec![item("a", Some(100))]);

    model.add_to_cart("a");
    model.add_to_cart("a");

    assert_eq!(model.cart_amount(), 1);
    assert_eq!(model.cart_total(), 100);
    assert_eq!(*cart_changes.borrow(), 2);
}

#[test]
fn removing_absent_member_is_noop_but_emits() {
    let bus = EventBus::new();
    let cart_changes = counting(&bus, protocol::CART_CHANGED);
    let model = ShopModel::new(bus);

    model.remove_from_cart("ghost");
    assert_eq!(model.cart_amount(), 0);
    assert_eq!(*cart_changes.borrow(), 1);
}

#[test]
fn stale_cart_ids_survive_catalog_refresh_but_count_zero() {
    let model = ShopModel::new(EventBus::new());
    model.set_catalog(vec![item("a", Some(100))]);
    model.add_to_cart("a");

    model.set_catalog(vec![item("b", Some(10))]);

    assert!(model.in_cart("a"));
    assert_eq!(model.cart_total(), 0);
}

#[test]
fn cart_mutations_resync_draft_items_and_total() {
    let model = ShopModel::new(EventBus::new());
    model.set_catalog(vec![item("a", Some(100)), item("b", Some(50))]);

    model.add_to_cart("a");
    model.add_to_cart("b");
    let order = model.order();
    assert_eq!(order.items, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(order.total, 150);

    model.clear_cart();
    let order = model.order();
    assert!(order.items.is_empty());
    assert_eq!(order.total, 0);
}

#[test]
fn set_order_field_revalidates_and_emits_errors() {
    let bus = EventBus::new();
    let error_changes = counting(&bus, protocol::ORDER_ERRORS_CHANGED);
    let model = ShopModel::new(bus);

    model.set_order_field(OrderFieldWrite::Email("buyer@example.com".to_string()));
    assert_eq!(*error_changes.borrow(), 1);
    assert!(!model.order_errors().contains_key(&DraftField::Email));
    assert!(model.order_errors().contains_key(&DraftField::Payment));

    model.set_order_field(OrderFieldWrite::Payment(Payment::Cash));
    assert_eq!(*error_changes.borrow(), 2);
    assert!(!model.order_errors().contains_key(&DraftField::Payment));
}

#[test]
fn validate_order_emits_even_when_result_is_unchanged() {
    let bus = EventBus::new();
    let error_changes = counting(&bus, protocol::ORDER_ERRORS_CHANGED);
    let model = ShopModel::new(bus);

    assert!(!model.validate_order());
    assert!(!model.validate_order());
    assert_eq!(*error_changes.borrow(), 2);
}

#[test]
fn cleared_draft_validates_like_a_fresh_one() {
    let model = ShopModel::new(EventBus::new());
    model.set_order_field(OrderFieldWrite::Payment(Payment::Card));
    model.set_order_field(OrderFieldWrite::Email("buyer@example.com".to_string()));
    model.set_order_field(OrderFieldWrite::Phone("+1234567".to_string()));
    model.set_order_field(OrderFieldWrite::Address("somewhere".to_string()));
    assert!(model.validate_order());

    model.clear_order_draft();
    model.validate_order();

    assert_eq!(
        model.order_errors(),
        validation::validate(&OrderDraft::default())
    );
}

#[test]
fn clear_order_draft_keeps_cart_derived_fields() {
    let model = ShopModel::new(EventBus::new());
    model.set_catalog(vec![item("a", Some(100))]);
    model.add_to_cart("a");
    model.set_order_field(OrderFieldWrite::Email("buyer@example.com".to_string()));

    model.clear_order_draft();

    let order = model.order();
    assert!(order.email.is_empty());
    assert_eq!(order.items, vec!["a".to_string()]);
    assert_eq!(order.total, 100);
}
