//! Integration tests for Store action broadcasting
//!
//! Tests the observation features UI code relies on: waiting for the
//! terminal action of a request, and streaming every effect-produced action.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use storefront_runtime::{Store, StoreError};
use tokio::sync::Mutex;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum CheckoutAction {
    /// Start a checkout for a cart
    Checkout { cart: u64 },
    /// One checkout step finished (shipping, payment, order)
    StepCompleted { cart: u64, step: u32 },
    /// Order created (terminal action)
    OrderCreated { cart: u64 },
    /// Checkout failed (terminal action, never produced here)
    CheckoutFailed { cart: u64 },
    /// Add an item to the cart
    AddItem,
    /// Cart total recomputed
    CartUpdated { items: u32 },
}

#[derive(Debug, Clone, Default)]
struct CheckoutState {
    items: u32,
    steps: Vec<u32>,
}

#[derive(Clone)]
struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Checkout { cart } => smallvec![Effect::Future(Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(CheckoutAction::StepCompleted { cart, step: 1 })
            }))],
            CheckoutAction::StepCompleted { cart, step } => {
                state.steps.push(step);
                if step < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Some(CheckoutAction::StepCompleted { cart, step: step + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(CheckoutAction::OrderCreated { cart })
                    }))]
                }
            },
            CheckoutAction::AddItem => {
                state.items += 1;
                let items = state.items;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(CheckoutAction::CartUpdated { items })
                }))]
            },
            CheckoutAction::OrderCreated { .. }
            | CheckoutAction::CheckoutFailed { .. }
            | CheckoutAction::CartUpdated { .. } => smallvec![Effect::None],
        }
    }
}

fn checkout_store() -> Store<CheckoutState, CheckoutAction, (), CheckoutReducer> {
    Store::new(CheckoutState::default(), CheckoutReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_immediate() {
    let store = checkout_store();

    let result = store
        .send_and_wait_for(
            CheckoutAction::AddItem,
            |action| matches!(action, CheckoutAction::CartUpdated { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, CheckoutAction::CartUpdated { items: 1 });
}

#[tokio::test]
async fn test_send_and_wait_for_multi_step_checkout() {
    let store = checkout_store();

    let result = store
        .send_and_wait_for(
            CheckoutAction::Checkout { cart: 42 },
            |action| matches!(action, CheckoutAction::OrderCreated { cart: 42 }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, CheckoutAction::OrderCreated { cart: 42 });

    let steps = store.state(|s| s.steps.clone()).await;
    assert_eq!(steps, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = checkout_store();

    let result = store
        .send_and_wait_for(
            CheckoutAction::Checkout { cart: 99 },
            |action| matches!(action, CheckoutAction::CheckoutFailed { cart: 99 }),
            Duration::from_millis(50),
        )
        .await;

    assert_eq!(result, Err(StoreError::Timeout));
}

#[tokio::test]
async fn test_concurrent_checkouts() {
    let store = Arc::new(checkout_store());

    let mut handles = vec![];
    for cart in 1..=5 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    CheckoutAction::Checkout { cart },
                    move |action| {
                        matches!(action, CheckoutAction::OrderCreated { cart: done } if *done == cart)
                    },
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for handle in handles {
        assert!(handle.await.expect("task panicked").is_ok());
    }

    let steps = store.state(|s| s.steps.len()).await;
    assert_eq!(steps, 15);
}

#[tokio::test]
async fn test_subscribe_actions_streaming() {
    let store = checkout_store();
    let mut rx = store.subscribe_actions();

    let received = Arc::new(Mutex::new(Vec::new()));
    let collector = Arc::clone(&received);
    let task = tokio::spawn(async move {
        for _ in 0..4 {
            if let Ok(action) = rx.recv().await {
                collector.lock().await.push(action);
            }
        }
    });

    store.send(CheckoutAction::Checkout { cart: 7 }).await.unwrap();
    tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();

    let received = received.lock().await;
    assert_eq!(
        *received,
        vec![
            CheckoutAction::StepCompleted { cart: 7, step: 1 },
            CheckoutAction::StepCompleted { cart: 7, step: 2 },
            CheckoutAction::StepCompleted { cart: 7, step: 3 },
            CheckoutAction::OrderCreated { cart: 7 },
        ]
    );
}

#[tokio::test]
async fn test_cloned_store_shares_state() {
    let store = checkout_store();
    let clone = store.clone();

    let mut handle = clone.send(CheckoutAction::AddItem).await.unwrap();
    handle.wait().await;

    assert_eq!(store.state(|s| s.items).await, 1);
}
