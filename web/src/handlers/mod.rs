//! HTTP handlers shared by every storefront service.

pub mod health;

pub use health::health_check;
