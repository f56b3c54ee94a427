//! HTTP Handlers

mod dispatch;

pub use dispatch::*;
