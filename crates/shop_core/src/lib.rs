//! Coordination core of the shop: order/cart model, validation engine,
//! navigation state machine, and the orchestrator that wires them onto the
//! event bus. Rendering and HTTP live outside this crate and talk to it only
//! through emitted events (see `shared::protocol`).

pub mod model;
pub mod orchestrator;
pub mod states;
pub mod transitions;
pub mod validation;

pub use model::ShopModel;
pub use orchestrator::wire;
pub use states::ShopStates;
pub use transitions::{shop_transitions, TransitionTable};

#[cfg(test)]
mod tests;
