//! State slices of the storefront client.
//!
//! Each slice owns one field of [`crate::store::StorefrontState`] and comes
//! as a pure `reduce` function plus a [`storefront_core::Reducer`] wrapper
//! that assigns its result and returns the effect for request actions.
//! Actions a slice does not handle leave it unchanged.

pub mod auth;
pub mod cart;
pub mod order;
pub mod orders;
pub mod products;

pub use auth::{AuthReducer, AuthState};
pub use cart::{CartReducer, CartState};
pub use order::{NewOrderReducer, NewOrderState};
pub use orders::{MyOrdersReducer, MyOrdersState, OrderDetailsReducer, OrderDetailsState};
pub use products::{ProductDetailsReducer, ProductDetailsState, ProductsReducer, ProductsState};
