//! Backend commands queued from the front thread to the network worker.

use shared::domain::OrderDraft;

pub enum BackendCommand {
    FetchCatalog,
    PlaceOrder { draft: OrderDraft },
}
