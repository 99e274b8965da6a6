//! # Yatube Server
//!
//! HTTP layer of the blog: public feeds, the post form behind a login gate,
//! and the session endpoints that open that gate.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod state;
pub mod telemetry;
