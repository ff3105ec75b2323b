//! Controller layer: backend completion events, command orchestration, and
//! the line-command stand-in for the view.

pub mod events;
pub mod orchestration;
pub mod repl;
