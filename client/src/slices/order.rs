//! New-order slice: checkout submission.

use crate::actions::Action;
use crate::environment::ClientEnvironment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::model::{NewOrder, Order, ShippingInfo};
use storefront_core::{Effect, Reducer, SmallVec, async_effect, smallvec};

/// State of the order being placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderState {
    /// A create-order request is in flight.
    pub loading: bool,
    /// Delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<ShippingInfo>,
    /// Last order created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Last failure message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Next order state for an action.
///
/// Success starts from a fresh state, so a previous address or error does not
/// survive it. Failure leaves `loading` set.
#[must_use]
pub fn reduce(state: &NewOrderState, action: &Action) -> NewOrderState {
    match action {
        Action::CreateOrderRequest(_) => NewOrderState {
            loading: true,
            ..state.clone()
        },
        Action::CreateOrderSuccess { data } => NewOrderState {
            loading: false,
            order: Some(data.clone()),
            ..NewOrderState::default()
        },
        Action::CreateOrderFail(message) => NewOrderState {
            loading: true,
            error: Some(message.clone()),
            ..NewOrderState::default()
        },
        Action::ClearErrors => NewOrderState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`NewOrderState`]; `CREATE_ORDER_REQUEST` submits the order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewOrderReducer;

impl Reducer for NewOrderReducer {
    type State = NewOrderState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut NewOrderState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce(state, &action);

        match action {
            Action::CreateOrderRequest(order) => smallvec![create_order(env, order)],
            _ => smallvec![Effect::None],
        }
    }
}

fn create_order(env: &ClientEnvironment, order: NewOrder) -> Effect<Action> {
    let api = Arc::clone(&env.api);
    async_effect! {
        call: api.create_order(order),
        on_success: |data| Some(Action::CreateOrderSuccess { data }),
        on_error: |error| {
            tracing::debug!(%error, "Order rejected");
            Some(Action::CreateOrderFail(error.to_string()))
        }
    }
}
