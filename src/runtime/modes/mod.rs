//! Mode routing
//!
//! The HTTP server is the only execution mode; it is gated behind the
//! `server` feature so the storage core can be built on its own.

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;
