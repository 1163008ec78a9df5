//! Shortener - a deterministic URL shortener
//!
//! Every URL is mapped to a short key derived from its content (32-bit
//! FNV-1a, URL-safe base64), so the same URL always gets the same key.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//!
//! # Architecture
//! - `storage`: key encoder, the `Storer` contract, memory and flat-file backends
//! - `api`: HTTP handlers and middleware
//! - `config`: Configuration loading (file, flags, environment)
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup
//! - `errors`: Error taxonomy shared by every layer

#[cfg(feature = "server")]
pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
