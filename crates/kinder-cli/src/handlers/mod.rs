//! REST API request handlers

pub mod children;
pub mod service;

pub use children::*;
pub use service::*;
