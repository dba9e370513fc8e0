//! Declarative macros for ergonomic effect construction
//!
//! Most storefront effects have the same shape: await one fallible API call,
//! then map `Ok` to a success action and `Err` to a failure action. The
//! macro removes the boilerplate of pinning and boxing that future.

/// Create an `Effect::Future` that awaits a fallible call and maps the outcome
/// to an action.
///
/// Both arms must produce an `Option<Action>`; `None` means nothing is fed back.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_core::async_effect;
///
/// let api = Arc::clone(&env.api);
/// async_effect! {
///     call: api.create_order(order),
///     on_success: |order| Some(Action::CreateOrderSuccess { data: order }),
///     on_error: |error| Some(Action::CreateOrderFail(error.to_string()))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    (
        call: $call:expr,
        on_success: |$success_param:ident| $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match $call.await {
                ::std::result::Result::Ok($success_param) => $success_body,
                ::std::result::Result::Err($error_param) => $error_body,
            }
        }))
    };
}
