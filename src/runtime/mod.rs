//! Application lifecycle and execution modes

pub mod lifetime;
pub mod modes;

#[cfg(feature = "server")]
pub use modes::run_server;
