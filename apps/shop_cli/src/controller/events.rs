//! Completions delivered from the backend worker to the front loop.

use shared::domain::{CatalogItem, OrderResult};

pub enum ShopEvent {
    CatalogLoaded(Vec<CatalogItem>),
    CatalogFailed(String),
    OrderPlaced(OrderResult),
    OrderFailed(String),
}
