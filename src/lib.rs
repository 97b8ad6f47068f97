//! ReactiveLooper library surface.
//!
//! The API server (`src/main.rs`) exposes the mock contract allocator and the
//! WETH faucet; the console (`src/bin/looper_console.rs`) drives the wallet
//! session, the launch orchestrator and the product pages against it.

pub mod allocator;
pub mod api;
pub mod chain;
pub mod client;
pub mod error;
pub mod faucet;
pub mod pages;
pub mod runtime;
pub mod token;
pub mod utils;
pub mod wallet;

pub mod config {
    pub mod chains;
}
