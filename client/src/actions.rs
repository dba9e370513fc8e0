//! The storefront action set.
//!
//! One closed enum covers every slice. On the wire an action is
//! `{ "type": "CREATE_ORDER_REQUEST", "payload": ... }`; any `type` outside
//! the known set decodes to [`Action::Unknown`], which every reducer ignores.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};
use storefront_core::model::{
    CartItem, Credentials, NewOrder, NewUser, Order, Product, ProductsPage, ShippingInfo, User,
};
use uuid::Uuid;

/// Tagged intent or outcome dispatched to the storefront store.
// `remote = "Self"` keeps the derived codec as inherent functions so the
// trait impls below can route foreign tags to `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Action {
    // Products
    /// Load one page of products, optionally filtered by keyword.
    AllProductsRequest {
        /// Case-insensitive name filter.
        keyword: Option<String>,
        /// 1-based page number.
        page: u32,
    },
    /// Product page loaded.
    AllProductsSuccess(ProductsPage),
    /// Product page failed to load.
    AllProductsFail(String),

    // Product details
    /// Load one product.
    ProductDetailsRequest {
        /// Product identifier.
        id: Uuid,
    },
    /// Product loaded.
    ProductDetailsSuccess(Product),
    /// Product failed to load.
    ProductDetailsFail(String),

    // Cart
    /// Add a line to the cart, replacing any line for the same product.
    AddToCart(CartItem),
    /// Remove the line for a product.
    RemoveItemCart {
        /// Product identifier.
        product: Uuid,
    },
    /// Remember the delivery address for checkout.
    SaveShippingInfo(ShippingInfo),

    // Auth
    /// Log in with email and password.
    LoginRequest(Credentials),
    /// Logged in.
    LoginSuccess(User),
    /// Login rejected.
    LoginFail(String),
    /// Create an account.
    RegisterUserRequest(NewUser),
    /// Account created and logged in.
    RegisterUserSuccess(User),
    /// Registration rejected.
    RegisterUserFail(String),
    /// Load the current user from the session token.
    LoadUserRequest,
    /// Current user loaded.
    LoadUserSuccess(User),
    /// No valid session.
    LoadUserFail(String),
    /// End the session.
    LogoutRequest,
    /// Session ended.
    LogoutSuccess,
    /// Session could not be ended.
    LogoutFail(String),

    // New order
    /// Submit an order. The payload only feeds the API call.
    CreateOrderRequest(NewOrder),
    /// Order created.
    CreateOrderSuccess {
        /// The created order.
        data: Order,
    },
    /// Order rejected.
    CreateOrderFail(String),

    // My orders
    /// Load the current user's orders.
    MyOrdersRequest,
    /// Orders loaded.
    MyOrdersSuccess(Vec<Order>),
    /// Orders failed to load.
    MyOrdersFail(String),

    // Order details
    /// Load one order.
    OrderDetailsRequest {
        /// Order identifier.
        id: Uuid,
    },
    /// Order loaded.
    OrderDetailsSuccess(Order),
    /// Order failed to load.
    OrderDetailsFail(String),

    /// Dismiss the error held by every slice.
    ClearErrors,

    /// Any action type this client does not know.
    #[serde(other)]
    Unknown,
}

/// Envelope of any action, known or not.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Action::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Envelope { kind, payload } = Envelope::deserialize(deserializer)?;

        // A bare foreign tag resolves to `Unknown` through `#[serde(other)]`.
        let mut tag_only = Map::new();
        tag_only.insert("type".to_string(), Value::String(kind));
        let mut full = tag_only.clone();
        if let Some(payload) = payload {
            full.insert("payload".to_string(), payload);
        }

        match Action::deserialize(Value::Object(full)) {
            Ok(action) => Ok(action),
            Err(error) => match Action::deserialize(Value::Object(tag_only)) {
                Ok(Action::Unknown) => Ok(Action::Unknown),
                _ => Err(de::Error::custom(error)),
            },
        }
    }
}

impl Action {
    /// Wire tag of the action, e.g. `CREATE_ORDER_REQUEST`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AllProductsRequest { .. } => "ALL_PRODUCTS_REQUEST",
            Self::AllProductsSuccess(_) => "ALL_PRODUCTS_SUCCESS",
            Self::AllProductsFail(_) => "ALL_PRODUCTS_FAIL",
            Self::ProductDetailsRequest { .. } => "PRODUCT_DETAILS_REQUEST",
            Self::ProductDetailsSuccess(_) => "PRODUCT_DETAILS_SUCCESS",
            Self::ProductDetailsFail(_) => "PRODUCT_DETAILS_FAIL",
            Self::AddToCart(_) => "ADD_TO_CART",
            Self::RemoveItemCart { .. } => "REMOVE_ITEM_CART",
            Self::SaveShippingInfo(_) => "SAVE_SHIPPING_INFO",
            Self::LoginRequest(_) => "LOGIN_REQUEST",
            Self::LoginSuccess(_) => "LOGIN_SUCCESS",
            Self::LoginFail(_) => "LOGIN_FAIL",
            Self::RegisterUserRequest(_) => "REGISTER_USER_REQUEST",
            Self::RegisterUserSuccess(_) => "REGISTER_USER_SUCCESS",
            Self::RegisterUserFail(_) => "REGISTER_USER_FAIL",
            Self::LoadUserRequest => "LOAD_USER_REQUEST",
            Self::LoadUserSuccess(_) => "LOAD_USER_SUCCESS",
            Self::LoadUserFail(_) => "LOAD_USER_FAIL",
            Self::LogoutRequest => "LOGOUT_REQUEST",
            Self::LogoutSuccess => "LOGOUT_SUCCESS",
            Self::LogoutFail(_) => "LOGOUT_FAIL",
            Self::CreateOrderRequest(_) => "CREATE_ORDER_REQUEST",
            Self::CreateOrderSuccess { .. } => "CREATE_ORDER_SUCCESS",
            Self::CreateOrderFail(_) => "CREATE_ORDER_FAIL",
            Self::MyOrdersRequest => "MY_ORDERS_REQUEST",
            Self::MyOrdersSuccess(_) => "MY_ORDERS_SUCCESS",
            Self::MyOrdersFail(_) => "MY_ORDERS_FAIL",
            Self::OrderDetailsRequest { .. } => "ORDER_DETAILS_REQUEST",
            Self::OrderDetailsSuccess(_) => "ORDER_DETAILS_SUCCESS",
            Self::OrderDetailsFail(_) => "ORDER_DETAILS_FAIL",
            Self::ClearErrors => "CLEAR_ERRORS",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Terminal actions end a request: every `*_SUCCESS` and `*_FAIL`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        let kind = self.kind();
        kind.ends_with("_SUCCESS") || kind.ends_with("_FAIL")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clear_errors_decodes_without_payload() {
        let action: Action = serde_json::from_value(json!({ "type": "CLEAR_ERRORS" })).unwrap();
        assert_eq!(action, Action::ClearErrors);
    }

    #[test]
    fn fail_payload_is_the_message() {
        let action: Action =
            serde_json::from_value(json!({ "type": "CREATE_ORDER_FAIL", "payload": "bad" })).unwrap();
        assert_eq!(action, Action::CreateOrderFail("bad".to_string()));
    }

    #[test]
    fn unrecognized_type_decodes_to_unknown() {
        let action: Action = serde_json::from_value(json!({ "type": "SOMETHING_ELSE" })).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn unrecognized_type_with_payload_decodes_to_unknown() {
        let action: Action =
            serde_json::from_value(json!({ "type": "ADD_TO_WISHLIST", "payload": { "id": 3 } }))
                .unwrap();
        assert_eq!(action, Action::Unknown);

        let action: Action =
            serde_json::from_value(json!({ "type": "SET_THEME", "payload": "dark" })).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn payload_may_precede_type() {
        let action: Action =
            serde_json::from_str(r#"{"payload":"x","type":"SOMETHING_ELSE"}"#).unwrap();
        assert_eq!(action, Action::Unknown);

        let action: Action =
            serde_json::from_str(r#"{"payload":"bad","type":"LOGIN_FAIL"}"#).unwrap();
        assert_eq!(action, Action::LoginFail("bad".to_string()));
    }

    #[test]
    fn known_type_with_malformed_payload_is_rejected() {
        let result: Result<Action, _> =
            serde_json::from_value(json!({ "type": "LOGIN_FAIL", "payload": { "no": "string" } }));
        assert!(result.is_err());
    }

    #[test]
    fn unit_actions_accept_null_payload() {
        let action: Action =
            serde_json::from_value(json!({ "type": "LOGOUT_REQUEST", "payload": null })).unwrap();
        assert_eq!(action, Action::LogoutRequest);
    }

    #[test]
    fn encodes_with_screaming_snake_case_tag() {
        let json = serde_json::to_value(Action::RemoveItemCart { product: Uuid::nil() }).unwrap();
        assert_eq!(json["type"], "REMOVE_ITEM_CART");
        assert_eq!(json["payload"]["product"], Uuid::nil().to_string());
    }

    #[test]
    fn kind_matches_wire_tag() {
        let action = Action::AllProductsRequest { keyword: None, page: 1 };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], action.kind());
        assert_eq!(Action::LogoutSuccess.kind(), "LOGOUT_SUCCESS");
    }

    #[test]
    fn only_outcomes_are_terminal() {
        assert!(Action::LogoutSuccess.is_terminal());
        assert!(Action::MyOrdersFail("x".to_string()).is_terminal());
        assert!(!Action::MyOrdersRequest.is_terminal());
        assert!(!Action::ClearErrors.is_terminal());
    }
}
