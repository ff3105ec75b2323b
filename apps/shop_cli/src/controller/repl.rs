//! Line-command front end. Each accepted command is translated into the same
//! named events the browser views would emit, so the whole coordination core
//! is exercised end to end.

use event_bus::EventBus;
use serde_json::{json, Value};
use shared::domain::Payment;
use shared::protocol;
use shop_core::{ShopModel, ShopStates};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Catalog,
    Preview(String),
    Toggle(String),
    Cart,
    Order,
    Pay(Payment),
    Address(String),
    Email(String),
    Phone(String),
    Next,
    Submit,
    Close,
    Done,
    State,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let with_arg = |cmd: fn(String) -> ReplCommand, usage: &str| {
        if rest.is_empty() {
            Err(format!("usage: {usage}"))
        } else {
            Ok(cmd(rest.to_string()))
        }
    };

    match verb {
        "catalog" => Ok(ReplCommand::Catalog),
        "preview" => with_arg(ReplCommand::Preview, "preview <item-id>"),
        "toggle" => with_arg(ReplCommand::Toggle, "toggle <item-id>"),
        "cart" => Ok(ReplCommand::Cart),
        "order" => Ok(ReplCommand::Order),
        "pay" => Payment::parse(rest)
            .map(ReplCommand::Pay)
            .ok_or_else(|| "usage: pay <card|cash>".to_string()),
        "address" => with_arg(ReplCommand::Address, "address <text>"),
        "email" => with_arg(ReplCommand::Email, "email <text>"),
        "phone" => with_arg(ReplCommand::Phone, "phone <text>"),
        "next" => Ok(ReplCommand::Next),
        "submit" => Ok(ReplCommand::Submit),
        "close" => Ok(ReplCommand::Close),
        "done" => Ok(ReplCommand::Done),
        "state" => Ok(ReplCommand::State),
        "help" => Ok(ReplCommand::Help),
        "quit" | "exit" => Ok(ReplCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

/// Runs one input line against the bus. Returns `false` when the user quits.
pub fn handle_line(bus: &EventBus, model: &ShopModel, states: &ShopStates, line: &str) -> bool {
    let command = match parse(line) {
        Ok(command) => command,
        Err(message) => {
            if !message.is_empty() {
                println!("{message}");
            }
            return true;
        }
    };

    match command {
        ReplCommand::Catalog => print_catalog(model),
        ReplCommand::Preview(id) => bus.emit(protocol::PREVIEW_OPEN, json!({ "id": id })),
        ReplCommand::Toggle(id) => bus.emit(protocol::ITEM_CART_ACTION, json!({ "id": id })),
        ReplCommand::Cart => bus.emit(protocol::CART_OPEN, Value::Null),
        ReplCommand::Order => bus.emit(protocol::ORDER_OPEN, Value::Null),
        ReplCommand::Pay(payment) => bus.emit_serialized(
            protocol::PAYMENT_SELECT,
            &protocol::PaymentSelectPayload { payment },
        ),
        ReplCommand::Address(value) => bus.emit(
            "order.address:change",
            json!({ "field": "address", "value": value }),
        ),
        ReplCommand::Email(value) => bus.emit(
            "contacts.email:change",
            json!({ "field": "email", "value": value }),
        ),
        ReplCommand::Phone(value) => bus.emit(
            "contacts.phone:change",
            json!({ "field": "phone", "value": value }),
        ),
        ReplCommand::Next => bus.emit(protocol::ORDER_SUBMIT, Value::Null),
        ReplCommand::Submit => bus.emit(protocol::CONTACTS_SUBMIT, Value::Null),
        ReplCommand::Close => bus.emit(protocol::MODAL_CLOSE, Value::Null),
        ReplCommand::Done => bus.emit(protocol::SUCCESS_CLOSE, Value::Null),
        ReplCommand::State => print_state(model, states),
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => return false,
    }
    true
}

fn print_catalog(model: &ShopModel) {
    let items = model.catalog();
    if items.is_empty() {
        println!("catalog is empty (still loading?)");
        return;
    }
    for item in items {
        let price = item
            .price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "priceless".to_string());
        let marker = if model.in_cart(&item.id) { "*" } else { " " };
        println!("{marker} {}  {}  [{price}]", item.id, item.title);
    }
}

fn print_state(model: &ShopModel, states: &ShopStates) {
    println!(
        "screen: {}  cart: {} item(s), total {}",
        states.state(),
        model.cart_amount(),
        model.cart_total()
    );
    let errors = model.order_errors();
    if errors.is_empty() {
        println!("order draft is submittable");
    } else {
        for (field, message) in errors {
            println!("  {field:?}: {message}");
        }
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         catalog              list loaded items\n  \
         preview <id>         open item preview\n  \
         toggle <id>          add/remove item in cart\n  \
         cart                 open the cart\n  \
         order                start checkout\n  \
         pay <card|cash>      choose payment\n  \
         address <text>       set shipping address\n  \
         next                 continue to contacts\n  \
         email <text>         set email\n  \
         phone <text>         set phone\n  \
         submit               place the order\n  \
         close                close current modal\n  \
         done                 dismiss success note\n  \
         state                show screen, cart and draft status\n  \
         quit                 exit"
    );
}
