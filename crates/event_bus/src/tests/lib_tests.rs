use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::{EventBus, Pattern, MAX_EMIT_DEPTH};

fn recording_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn exact_subscribers_run_in_registration_order() {
    let bus = EventBus::new();
    let log = recording_log();

    for label in ["first", "second", "third"] {
        let log = Rc::clone(&log);
        bus.subscribe(Pattern::exact("cart:changed"), move |_, _| {
            log.borrow_mut().push(label.to_string());
        });
    }

    bus.emit("cart:changed", Value::Null);
    assert_eq!(*log.borrow(), ["first", "second", "third"]);
}

#[test]
fn exact_subscriber_ignores_other_events() {
    let bus = EventBus::new();
    let log = recording_log();

    let log_clone = Rc::clone(&log);
    bus.subscribe(Pattern::exact("cart:changed"), move |event, _| {
        log_clone.borrow_mut().push(event.to_string());
    });

    bus.emit("items:changed", Value::Null);
    assert!(log.borrow().is_empty());
}

#[test]
fn rule_subscriber_matches_event_family() {
    let bus = EventBus::new();
    let log = recording_log();

    let log_clone = Rc::clone(&log);
    bus.subscribe(
        Pattern::rule(|event| event.starts_with("order.") && event.ends_with(":change")),
        move |event, payload| {
            let field = payload["field"].as_str().unwrap_or_default().to_string();
            log_clone.borrow_mut().push(format!("{event}={field}"));
        },
    );

    bus.emit(
        "order.address:change",
        json!({"field": "address", "value": "x"}),
    );
    bus.emit("order:open", Value::Null);
    bus.emit("contacts.email:change", json!({"field": "email"}));

    assert_eq!(*log.borrow(), ["order.address:change=address"]);
}

#[test]
fn catch_all_receives_every_event_after_pattern_handlers() {
    let bus = EventBus::new();
    let log = recording_log();

    let log_all = Rc::clone(&log);
    bus.subscribe_all(move |event, _| {
        log_all.borrow_mut().push(format!("all:{event}"));
    });
    let log_exact = Rc::clone(&log);
    bus.subscribe(Pattern::exact("cart:open"), move |event, _| {
        log_exact.borrow_mut().push(format!("exact:{event}"));
    });

    bus.emit("cart:open", Value::Null);
    bus.emit("modal:close", Value::Null);

    // The catch-all was registered first but still runs after the exact match.
    assert_eq!(
        *log.borrow(),
        ["exact:cart:open", "all:cart:open", "all:modal:close"]
    );
}

#[test]
fn unsubscribe_stops_delivery_and_is_idempotent() {
    let bus = EventBus::new();
    let log = recording_log();

    let log_clone = Rc::clone(&log);
    let id = bus.subscribe(Pattern::exact("ping"), move |_, _| {
        log_clone.borrow_mut().push("ping".to_string());
    });

    bus.emit("ping", Value::Null);
    bus.unsubscribe(id);
    bus.emit("ping", Value::Null);
    bus.unsubscribe(id);
    bus.emit("ping", Value::Null);

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn nested_emit_completes_before_outer_emit_resumes() {
    let bus = EventBus::new();
    let log = recording_log();

    let inner_bus = bus.clone();
    let log_outer_first = Rc::clone(&log);
    bus.subscribe(Pattern::exact("outer"), move |_, _| {
        log_outer_first.borrow_mut().push("outer-a".to_string());
        inner_bus.emit("inner", Value::Null);
    });
    let log_inner = Rc::clone(&log);
    bus.subscribe(Pattern::exact("inner"), move |_, _| {
        log_inner.borrow_mut().push("inner".to_string());
    });
    let log_outer_second = Rc::clone(&log);
    bus.subscribe(Pattern::exact("outer"), move |_, _| {
        log_outer_second.borrow_mut().push("outer-b".to_string());
    });

    bus.emit("outer", Value::Null);

    // Depth-first: the nested emit finishes before the second outer handler.
    assert_eq!(*log.borrow(), ["outer-a", "inner", "outer-b"]);
}

#[test]
fn runaway_recursive_emit_is_cut_off_at_depth_bound() {
    let bus = EventBus::new();
    let calls = Rc::new(RefCell::new(0usize));

    let inner_bus = bus.clone();
    let calls_clone = Rc::clone(&calls);
    bus.subscribe(Pattern::exact("loop"), move |_, _| {
        *calls_clone.borrow_mut() += 1;
        inner_bus.emit("loop", Value::Null);
    });

    bus.emit("loop", Value::Null);

    assert_eq!(*calls.borrow(), MAX_EMIT_DEPTH);
}

#[test]
fn subscription_added_during_dispatch_starts_with_next_emit() {
    let bus = EventBus::new();
    let log = recording_log();

    let registrar_bus = bus.clone();
    let log_for_new = Rc::clone(&log);
    let registered = Rc::new(RefCell::new(false));
    let registered_flag = Rc::clone(&registered);
    bus.subscribe(Pattern::exact("tick"), move |_, _| {
        if !*registered_flag.borrow() {
            *registered_flag.borrow_mut() = true;
            let log_inner = Rc::clone(&log_for_new);
            registrar_bus.subscribe(Pattern::exact("tick"), move |_, _| {
                log_inner.borrow_mut().push("late".to_string());
            });
        }
    });

    bus.emit("tick", Value::Null);
    assert!(log.borrow().is_empty());

    bus.emit("tick", Value::Null);
    assert_eq!(*log.borrow(), ["late"]);
}

#[test]
fn emit_serialized_delivers_typed_payload_as_json() {
    let bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Value::Null));

    let seen_clone = Rc::clone(&seen);
    bus.subscribe(Pattern::exact("order:sent"), move |_, payload| {
        *seen_clone.borrow_mut() = payload.clone();
    });

    bus.emit_serialized("order:sent", &json!({"total": 750}));
    assert_eq!(seen.borrow()["total"], 750);
}
