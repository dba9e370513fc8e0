//! The storefront's root state and store.
//!
//! UI code owns a [`StorefrontStore`] value (cheap to clone) and passes it
//! down; there is no global instance.
//!
//! # Example
//!
//! ```ignore
//! let store = storefront_store(Arc::new(HttpStorefrontApi::new(config.api_url)));
//!
//! let outcome = store
//!     .send_and_wait_for(
//!         Action::CreateOrderRequest(order),
//!         |a| matches!(a, Action::CreateOrderSuccess { .. } | Action::CreateOrderFail(_)),
//!         Duration::from_secs(10),
//!     )
//!     .await?;
//!
//! let placed = store.state(|s| s.new_order.order.clone()).await;
//! ```

use crate::actions::Action;
use crate::api::StorefrontApi;
use crate::environment::ClientEnvironment;
use crate::slices::{
    AuthReducer, AuthState, CartReducer, CartState, MyOrdersReducer, MyOrdersState,
    NewOrderReducer, NewOrderState, OrderDetailsReducer, OrderDetailsState,
    ProductDetailsReducer, ProductDetailsState, ProductsReducer, ProductsState,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use storefront_runtime::Store;

/// Every slice of client state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontState {
    /// Product listing.
    pub products: ProductsState,
    /// Product being viewed.
    pub product_details: ProductDetailsState,
    /// Cart and saved address.
    pub cart: CartState,
    /// Session.
    pub auth: AuthState,
    /// Order being placed.
    pub new_order: NewOrderState,
    /// Order history.
    pub my_orders: MyOrdersState,
    /// Order being viewed.
    pub order_details: OrderDetailsState,
}

impl StorefrontState {
    /// Error messages currently held by any slice.
    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        [
            self.products.error.as_deref(),
            self.product_details.error.as_deref(),
            self.auth.error.as_deref(),
            self.new_order.error.as_deref(),
            self.my_orders.error.as_deref(),
            self.order_details.error.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Root reducer over [`StorefrontState`].
pub type StorefrontReducer = CombinedReducer<StorefrontState, Action, ClientEnvironment>;

/// Store running the storefront reducers.
pub type StorefrontStore = Store<StorefrontState, Action, ClientEnvironment, StorefrontReducer>;

/// Every slice reducer scoped to its field and combined.
#[must_use]
pub fn storefront_reducer() -> StorefrontReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            ProductsReducer,
            |s: &StorefrontState| &s.products,
            |s: &mut StorefrontState, v| s.products = v,
        )),
        Box::new(scope_reducer(
            ProductDetailsReducer,
            |s: &StorefrontState| &s.product_details,
            |s: &mut StorefrontState, v| s.product_details = v,
        )),
        Box::new(scope_reducer(
            CartReducer,
            |s: &StorefrontState| &s.cart,
            |s: &mut StorefrontState, v| s.cart = v,
        )),
        Box::new(scope_reducer(
            AuthReducer,
            |s: &StorefrontState| &s.auth,
            |s: &mut StorefrontState, v| s.auth = v,
        )),
        Box::new(scope_reducer(
            NewOrderReducer,
            |s: &StorefrontState| &s.new_order,
            |s: &mut StorefrontState, v| s.new_order = v,
        )),
        Box::new(scope_reducer(
            MyOrdersReducer,
            |s: &StorefrontState| &s.my_orders,
            |s: &mut StorefrontState, v| s.my_orders = v,
        )),
        Box::new(scope_reducer(
            OrderDetailsReducer,
            |s: &StorefrontState| &s.order_details,
            |s: &mut StorefrontState, v| s.order_details = v,
        )),
    ])
}

/// Store with empty state whose effects call `api`.
#[must_use]
pub fn storefront_store(api: Arc<dyn StorefrontApi>) -> StorefrontStore {
    Store::new(
        StorefrontState::default(),
        storefront_reducer(),
        ClientEnvironment::new(api),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStorefrontApi;
    use storefront_core::Reducer;

    fn env() -> ClientEnvironment {
        ClientEnvironment::new(Arc::new(MockStorefrontApi::new()))
    }

    #[test]
    fn combines_every_slice() {
        assert_eq!(storefront_reducer().len(), 7);
    }

    #[test]
    fn clear_errors_reaches_every_slice() {
        let reducer = storefront_reducer();
        let mut state = StorefrontState::default();

        let _ = reducer.reduce(&mut state, Action::AllProductsFail("a".to_string()), &env());
        let _ = reducer.reduce(&mut state, Action::LoginFail("b".to_string()), &env());
        let _ = reducer.reduce(&mut state, Action::CreateOrderFail("c".to_string()), &env());
        assert_eq!(state.errors(), vec!["a", "b", "c"]);

        let effects = reducer.reduce(&mut state, Action::ClearErrors, &env());
        assert!(state.errors().is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn request_only_yields_its_own_effect() {
        let reducer = storefront_reducer();
        let mut state = StorefrontState::default();

        let effects = reducer.reduce(&mut state, Action::MyOrdersRequest, &env());
        assert_eq!(effects.len(), 1);
        assert!(state.my_orders.loading);
        assert!(!state.order_details.loading);
    }
}
