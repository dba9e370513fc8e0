//! HTTP handlers, grouped by resource.

pub mod orders;
pub mod ping;
pub mod products;
pub mod users;
