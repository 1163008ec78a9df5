//! System-level modules
//!
//! Process-wide setup that sits outside the request path.

pub mod logging;

pub use logging::init_logging;
