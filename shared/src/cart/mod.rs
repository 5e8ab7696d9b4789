//! Cart state engine
//!
//! A pure state-transition function governing the in-memory sale cart.
//! Every mutation flows through [`CartState::apply`], which takes the
//! current state and a [`CartAction`] and returns the next state - callers
//! never mutate a cart in place. Two invariants hold after every
//! transition:
//!
//! - at most one line per `product_id`
//! - no line with `quantity <= 0` is retained
//!
//! The engine is stock-agnostic: checking a candidate quantity against the
//! live inventory level is the calling component's responsibility.

mod validate;

pub use validate::{validate_for_submit, MAX_LINE_PRICE, MAX_LINE_QUANTITY};

use crate::error::{AppError, ErrorCode};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment method for a sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    BankTransfer,
}

impl PaymentMethod {
    /// Parse a raw payment method string.
    ///
    /// Accepts the wire spelling in any case (`cash`, `CREDIT_CARD`, ...).
    /// Unknown values are a validation error, never a silent default.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.to_ascii_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "BANK_TRANSFER" => Ok(Self::BankTransfer),
            _ => Err(AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                format!("Invalid payment method: {}", raw),
            )),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "CASH"),
            PaymentMethod::CreditCard => write!(f, "CREDIT_CARD"),
            PaymentMethod::BankTransfer => write!(f, "BANK_TRANSFER"),
        }
    }
}

/// One product-quantity-price line within a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product ID - unique key within the cart
    pub product_id: i64,
    /// Product name as currently rendered
    pub name: String,
    /// Unit label as currently rendered (kg, pcs, ...)
    pub unit: String,
    /// Quantity, always > 0 inside a cart
    pub quantity: i32,
    /// Unit price in currency unit
    pub unit_price: f64,
}

/// Cart state - what the operator intends to submit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartState {
    /// Lines in insertion order
    pub lines: Vec<CartLine>,
    /// Free-text note attached to the sale
    #[serde(default)]
    pub notes: String,
    /// Payment method (defaults to cash)
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Customer name
    #[serde(default)]
    pub customer_name: String,
    /// Customer phone, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

/// Cart transition actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add a line; merges quantity into an existing line with the same
    /// product_id, otherwise appends preserving insertion order
    AddItem(CartLine),

    /// Replace a line's quantity; `<= 0` removes the line. No-op when the
    /// product is not in the cart.
    UpdateQuantity { product_id: i64, quantity: i32 },

    /// Drop a line unconditionally
    RemoveItem { product_id: i64 },

    /// Replace the sale note
    SetNotes(String),

    /// Replace the payment method
    SetPaymentMethod(PaymentMethod),

    /// Replace the customer name
    SetCustomerName(String),

    /// Replace the customer phone
    SetCustomerPhone(Option<String>),

    /// Return to the canonical empty state
    Reset,

    /// Wholesale replacement, used when entering edit mode for a persisted
    /// sale. The source is assumed already valid.
    LoadSale(CartState),

    /// Cosmetic rewrite of a line's display strings (locale toggle).
    /// Never alters quantity, unit_price or ordering.
    UpdateDisplay {
        product_id: i64,
        name: String,
        unit: String,
    },
}

impl CartState {
    /// The canonical empty cart
    pub fn empty() -> Self {
        Self::default()
    }

    /// Apply a transition, returning the next state.
    pub fn apply(&self, action: CartAction) -> CartState {
        let mut next = self.clone();
        match action {
            CartAction::AddItem(line) => {
                match next
                    .lines
                    .iter_mut()
                    .find(|l| l.product_id == line.product_id)
                {
                    Some(existing) => existing.quantity += line.quantity,
                    None => next.lines.push(line),
                }
                next.lines.retain(|l| l.quantity > 0);
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => {
                if quantity <= 0 {
                    next.lines.retain(|l| l.product_id != product_id);
                } else if let Some(line) =
                    next.lines.iter_mut().find(|l| l.product_id == product_id)
                {
                    line.quantity = quantity;
                }
            }
            CartAction::RemoveItem { product_id } => {
                next.lines.retain(|l| l.product_id != product_id);
            }
            CartAction::SetNotes(notes) => next.notes = notes,
            CartAction::SetPaymentMethod(method) => next.payment_method = method,
            CartAction::SetCustomerName(name) => next.customer_name = name,
            CartAction::SetCustomerPhone(phone) => next.customer_phone = phone,
            CartAction::Reset => next = CartState::empty(),
            CartAction::LoadSale(state) => {
                tracing::debug!(lines = state.lines.len(), "cart hydrated for edit mode");
                next = state;
            }
            CartAction::UpdateDisplay {
                product_id,
                name,
                unit,
            } => {
                if let Some(line) = next.lines.iter_mut().find(|l| l.product_id == product_id) {
                    line.name = name;
                    line.unit = unit;
                }
            }
        }
        next
    }

    /// Whether the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by product ID
    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Cart total: sum of line quantity x unit_price.
    ///
    /// Computed with `Decimal` and rounded to 2 places half-up, then
    /// converted back to `f64` for storage/serialization.
    pub fn total(&self) -> f64 {
        let sum: Decimal = self
            .lines
            .iter()
            .map(|l| {
                Decimal::from_f64(l.unit_price).unwrap_or_default() * Decimal::from(l.quantity)
            })
            .sum();
        sum.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0)
    }
}
