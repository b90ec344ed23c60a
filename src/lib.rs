//! overlay-proxy: container API request rewriting for overlay networking.
//!
//! This library exposes the interception core for embedding in a proxy and
//! for integration testing. The binary entrypoint is in `main.rs`.

pub mod cli;
pub mod config;
pub mod daemon;
pub mod document;
pub mod error;
pub mod intercept;
pub mod network;
pub mod utils;

pub use error::{ProxyError, Result};
