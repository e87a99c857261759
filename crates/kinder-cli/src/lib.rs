//! # Kinder Gateway
//!
//! REST gateway over the Kinder record trees.
//!
//! This crate provides:
//! - **Children API**: insert, search, update, delete and list, mounted once
//!   per tree under `/children/bst` and `/children/avl`
//! - **Tree statistics**: height, node count and balance
//! - **Configuration**: TOML file, environment and command line
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP Clients                      │
//! └─────────────────────────┬───────────────────────────┘
//!                           │
//! ┌─────────────────────────▼───────────────────────────┐
//! │                  Kinder Gateway                     │
//! ├─────────────────────────────────────────────────────┤
//! │      Request ID │ Access log │ CORS │ Body limit    │
//! ├─────────────────────────────────────────────────────┤
//! │     /children/bst          │     /children/avl      │
//! ├─────────────────────────────────────────────────────┤
//! │                    kinder-core                      │
//! │          (SharedTree, BST and AVL engines)          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ApiError, ErrorCode};
pub use server::{run_server, run_server_with_shutdown};
pub use state::AppState;
