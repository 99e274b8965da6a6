//! # Yatube Shared
//!
//! Serializable view contexts and response envelopes.
//! Kept free of domain types so a renderer or client can depend on it alone.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, TemplateResponse};
