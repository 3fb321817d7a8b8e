//! # Command Dispatcher
//!
//! Pure interpreter mapping an [`Order`] onto state transitions and response
//! deliveries. Owns no state and does no I/O: the store actor hands it the
//! basket map and routes whatever deliveries come back.
//!
//! ## Verb Table
//! ```text
//! ┌─────────┬────────────────────────────┬───────────────────────────────────┐
//! │ Verb    │ Failure (requester only)   │ Success (broadcast to everyone)   │
//! ├─────────┼────────────────────────────┼───────────────────────────────────┤
//! │ create  │ 409 basket already exists  │ 201 created basket '<id>'         │
//! │ drop    │ 404 basket does not exist  │ 204 dropped basket '<id>'         │
//! │ add     │ 404 no baskets / no basket │ 200 added a <item> to basket      │
//! │         │     / no such item type    │                                   │
//! │ checkout│ 404 no baskets / no basket │ 200 checkout basket '<id>' total  │
//! └─────────┴────────────────────────────┴───────────────────────────────────┘
//! ```

use std::collections::HashMap;

use poke_core::{Basket, CheckoutSystem, ItemKind};

use crate::protocol::{Response, Verb};
use crate::store::Order;

// =============================================================================
// Deliveries
// =============================================================================

/// Who receives a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the client that issued the order.
    Requester,
    /// Every currently-joined client, requester included.
    Everyone,
}

/// One response bound for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub scope: Scope,
    pub response: Response,
}

impl Delivery {
    fn requester(response: Response) -> Self {
        Delivery {
            scope: Scope::Requester,
            response,
        }
    }

    fn everyone(response: Response) -> Self {
        Delivery {
            scope: Scope::Everyone,
            response,
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Interprets one order against the basket map.
///
/// Mutates `baskets` for successful create/drop/add and returns the response
/// deliveries in emission order. Precondition failures never mutate state.
pub fn dispatch(
    baskets: &mut HashMap<String, Basket>,
    checkout: &CheckoutSystem,
    order: &Order,
) -> Vec<Delivery> {
    let req = &order.request;
    match req.verb {
        Verb::Create => {
            if baskets.contains_key(&req.basket_id) {
                return vec![Delivery::requester(Response::conflict(format!(
                    "basket '{}' already exists",
                    req.basket_id
                )))];
            }
            baskets.insert(req.basket_id.clone(), Basket::new(req.basket_id.clone()));
            vec![Delivery::everyone(Response::created(format!(
                "created basket '{}'",
                req.basket_id
            )))]
        }

        Verb::Drop => {
            if baskets.remove(&req.basket_id).is_none() {
                return vec![Delivery::requester(Response::not_found(format!(
                    "basket '{}' does not exist",
                    req.basket_id
                )))];
            }
            vec![Delivery::everyone(Response::no_content(format!(
                "dropped basket '{}'",
                req.basket_id
            )))]
        }

        Verb::Add => {
            if baskets.is_empty() {
                // Early return so the empty-map case yields exactly one
                // notification instead of falling through to the lookup.
                return vec![Delivery::requester(Response::not_found(
                    "there are no baskets",
                ))];
            }
            let Some(basket) = baskets.get_mut(&req.basket_id) else {
                return vec![Delivery::requester(Response::not_found(format!(
                    "basket '{}' does not exist",
                    req.basket_id
                )))];
            };
            let kind = match req.item_type.as_deref().unwrap_or("").parse::<ItemKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    return vec![Delivery::requester(Response::not_found(err.to_string()))];
                }
            };
            basket.add_item(kind, 1);
            vec![Delivery::everyone(Response::ok(format!(
                "added a {} to basket '{}'",
                kind, req.basket_id
            )))]
        }

        Verb::Checkout => {
            if baskets.is_empty() {
                return vec![Delivery::requester(Response::not_found(
                    "there are no baskets",
                ))];
            }
            let Some(basket) = baskets.get(&req.basket_id) else {
                return vec![Delivery::requester(Response::not_found(format!(
                    "basket '{}' does not exist",
                    req.basket_id
                )))];
            };
            // The basket stays open after checkout; pricing is repeatable.
            let totals = checkout.checkout(basket);
            vec![Delivery::everyone(Response::ok(format!(
                "checkout basket '{}' total {}",
                req.basket_id,
                totals.payable()
            )))]
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
