//! SeaORM entities for the blog tables.

pub mod group;
pub mod post;
pub mod user;
