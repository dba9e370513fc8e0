//! Cart slice. Purely local; no effects.

use crate::actions::Action;
use crate::environment::ClientEnvironment;
use serde::{Deserialize, Serialize};
use storefront_core::model::{CartItem, ShippingInfo};
use storefront_core::{Effect, Reducer, SmallVec, smallvec};

/// Cart lines and the address saved for checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// At most one line per product.
    pub cart_items: Vec<CartItem>,
    /// Address saved for checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<ShippingInfo>,
}

/// Next cart state for an action.
#[must_use]
pub fn reduce(state: &CartState, action: &Action) -> CartState {
    match action {
        Action::AddToCart(item) => {
            let mut cart_items = state.cart_items.clone();
            match cart_items.iter_mut().find(|line| line.product == item.product) {
                Some(line) => *line = item.clone(),
                None => cart_items.push(item.clone()),
            }
            CartState {
                cart_items,
                ..state.clone()
            }
        },
        Action::RemoveItemCart { product } => CartState {
            cart_items: state
                .cart_items
                .iter()
                .filter(|line| line.product != *product)
                .cloned()
                .collect(),
            ..state.clone()
        },
        Action::SaveShippingInfo(info) => CartState {
            shipping_info: Some(info.clone()),
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`CartState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = CartState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut CartState,
        action: Action,
        _env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce(state, &action);
        smallvec![Effect::None]
    }
}
