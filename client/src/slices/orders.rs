//! Order history slices: the user's orders and a single order's details.

use crate::actions::Action;
use crate::environment::ClientEnvironment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::model::Order;
use storefront_core::{Effect, Reducer, SmallVec, async_effect, smallvec};

/// Orders placed by the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyOrdersState {
    /// A history request is in flight.
    pub loading: bool,
    /// Loaded orders.
    pub orders: Vec<Order>,
    /// Last failure message.
    pub error: Option<String>,
}

/// Next history state for an action.
#[must_use]
pub fn reduce_my_orders(state: &MyOrdersState, action: &Action) -> MyOrdersState {
    match action {
        Action::MyOrdersRequest => MyOrdersState {
            loading: true,
            ..state.clone()
        },
        Action::MyOrdersSuccess(orders) => MyOrdersState {
            loading: false,
            orders: orders.clone(),
            error: None,
        },
        Action::MyOrdersFail(message) => MyOrdersState {
            loading: false,
            error: Some(message.clone()),
            ..state.clone()
        },
        Action::ClearErrors => MyOrdersState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`MyOrdersState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MyOrdersReducer;

impl Reducer for MyOrdersReducer {
    type State = MyOrdersState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut MyOrdersState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce_my_orders(state, &action);

        match action {
            Action::MyOrdersRequest => {
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    call: api.my_orders(),
                    on_success: |orders| Some(Action::MyOrdersSuccess(orders)),
                    on_error: |error| Some(Action::MyOrdersFail(error.to_string()))
                }]
            },
            _ => smallvec![Effect::None],
        }
    }
}

/// The order being viewed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailsState {
    /// A details request is in flight.
    pub loading: bool,
    /// The loaded order.
    pub order: Option<Order>,
    /// Last failure message.
    pub error: Option<String>,
}

/// Next details state for an action.
#[must_use]
pub fn reduce_order_details(state: &OrderDetailsState, action: &Action) -> OrderDetailsState {
    match action {
        Action::OrderDetailsRequest { .. } => OrderDetailsState {
            loading: true,
            ..state.clone()
        },
        Action::OrderDetailsSuccess(order) => OrderDetailsState {
            loading: false,
            order: Some(order.clone()),
            error: None,
        },
        Action::OrderDetailsFail(message) => OrderDetailsState {
            loading: false,
            error: Some(message.clone()),
            ..state.clone()
        },
        Action::ClearErrors => OrderDetailsState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`OrderDetailsState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDetailsReducer;

impl Reducer for OrderDetailsReducer {
    type State = OrderDetailsState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut OrderDetailsState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce_order_details(state, &action);

        match action {
            Action::OrderDetailsRequest { id } => {
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    call: api.order_details(id),
                    on_success: |order| Some(Action::OrderDetailsSuccess(order)),
                    on_error: |error| Some(Action::OrderDetailsFail(error.to_string()))
                }]
            },
            _ => smallvec![Effect::None],
        }
    }
}
