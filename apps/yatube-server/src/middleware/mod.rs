//! Middleware modules.

pub mod error;
pub mod gate;
pub mod session;
