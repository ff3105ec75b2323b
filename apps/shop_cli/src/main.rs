//! Headless shop client: wires the coordination core (event bus, order/cart
//! model, navigation state machine) to the HTTP backend and drives it from
//! stdin line commands.

use std::io::BufRead;
use std::rc::Rc;

use clap::Parser;
use crossbeam_channel::select;
use event_bus::{EventBus, Pattern};
use shared::protocol::{self, OrderSentPayload, StateChangedPayload};
use shop_core::{shop_transitions, ShopModel, ShopStates};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;

use backend_bridge::commands::BackendCommand;
use controller::events::ShopEvent;
use controller::orchestration::dispatch_backend_command;

#[derive(Parser)]
#[command(name = "shop_cli", about = "Interactive client for the shop API")]
struct Args {
    /// Shop API base URL (overrides shop.toml and SHOP_API_URL).
    #[arg(long)]
    api_url: Option<String>,
    /// CDN base URL for item images.
    #[arg(long)]
    cdn_url: Option<String>,
}

/// `RUST_LOG` when set and parseable, `info` otherwise.
fn log_filter(directive: Option<String>) -> EnvFilter {
    directive
        .and_then(|directive| directive.parse().ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();
    let args = Args::parse();
    let settings = config::load_settings().with_overrides(args.api_url, args.cdn_url);
    info!(api_url = %settings.api_url, "starting shop client");

    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded::<BackendCommand>(32);
    let (event_tx, event_rx) = crossbeam_channel::unbounded::<ShopEvent>();
    backend_bridge::runtime::launch(settings, cmd_rx, event_tx);

    let bus = EventBus::new();
    let model = Rc::new(ShopModel::new(bus.clone()));
    let states = Rc::new(ShopStates::new(bus.clone(), shop_transitions()));

    let submit_queue = cmd_tx.clone();
    shop_core::wire(&bus, &model, &states, move |draft| {
        dispatch_backend_command(&submit_queue, BackendCommand::PlaceOrder { draft });
    });
    attach_printers(&bus);

    dispatch_backend_command(&cmd_tx, BackendCommand::FetchCatalog);

    let (line_tx, line_rx) = crossbeam_channel::unbounded::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    println!("shop client ready; type 'help' for commands");
    loop {
        select! {
            recv(event_rx) -> event => match event {
                Ok(ShopEvent::CatalogLoaded(items)) => {
                    info!(count = items.len(), "catalog loaded");
                    model.set_catalog(items);
                }
                Ok(ShopEvent::CatalogFailed(reason)) => {
                    warn!(%reason, "catalog unavailable; retry with 'quit' and restart");
                }
                Ok(ShopEvent::OrderPlaced(result)) => {
                    info!(order_id = %result.id, total = result.total, "order accepted");
                    bus.emit_serialized(
                        protocol::ORDER_SENT,
                        &OrderSentPayload { total: result.total },
                    );
                }
                Ok(ShopEvent::OrderFailed(reason)) => {
                    warn!(%reason, "order was not placed; fix the draft and 'submit' again");
                }
                Err(_) => {
                    error!("backend worker disconnected; shutting down");
                    break;
                }
            },
            recv(line_rx) -> line => match line {
                Ok(line) => {
                    if !controller::repl::handle_line(&bus, &model, &states, &line) {
                        break;
                    }
                }
                Err(_) => break,
            },
        }
    }

    Ok(())
}

/// Minimal stand-ins for the browser views: print what a view would render.
fn attach_printers(bus: &EventBus) {
    bus.subscribe(Pattern::exact(protocol::STATE_CHANGED), |_, payload| {
        if let Ok(changed) = serde_json::from_value::<StateChangedPayload>(payload.clone()) {
            println!("-> screen: {}", changed.state);
        }
    });
    bus.subscribe(Pattern::exact(protocol::ORDER_ERRORS_CHANGED), |_, payload| {
        match payload.as_object() {
            Some(map) if !map.is_empty() => {
                for (field, message) in map {
                    println!("!  {field}: {}", message.as_str().unwrap_or_default());
                }
            }
            _ => {}
        }
    });
    bus.subscribe(Pattern::exact(protocol::ORDER_SENT), |_, payload| {
        println!("order placed, total {}", payload["total"]);
    });
}
