//! Worker thread bridging the synchronous front loop and the async HTTP
//! client. Commands come in over a crossbeam queue; completions go back as
//! [`ShopEvent`]s that the front loop re-emits onto the bus.

use crossbeam_channel::{Receiver, Sender};
use shop_api::{ShopApi, ShopBackend};
use tracing::error;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::ShopEvent;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, event_tx: Sender<ShopEvent>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(%err, "failed to build backend runtime");
                return;
            }
        };

        let api = ShopApi::new(settings.api_url, settings.cdn_url);
        runtime.block_on(async move {
            while let Ok(command) = cmd_rx.recv() {
                let outcome = match command {
                    BackendCommand::FetchCatalog => match api.fetch_catalog().await {
                        Ok(items) => ShopEvent::CatalogLoaded(items),
                        Err(err) => {
                            error!(err = %format!("{err:#}"), "catalog fetch failed");
                            ShopEvent::CatalogFailed(format!("{err:#}"))
                        }
                    },
                    BackendCommand::PlaceOrder { draft } => match api.submit_order(&draft).await {
                        Ok(result) => ShopEvent::OrderPlaced(result),
                        Err(err) => {
                            error!(err = %format!("{err:#}"), "order submission failed");
                            ShopEvent::OrderFailed(format!("{err:#}"))
                        }
                    },
                };
                if event_tx.send(outcome).is_err() {
                    break;
                }
            }
        });
    });
}
