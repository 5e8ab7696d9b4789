//! Sale model

use crate::cart::{CartLine, CartState, PaymentMethod};
use serde::{Deserialize, Serialize};

/// Sale line item (persisted form of a cart line)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    pub product_id: i64,
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    /// Unit price in currency unit
    pub unit_price: f64,
}

/// Sale entity (persisted sale)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i64,
    /// Human-facing sale number (e.g. SAL-20260219-0017)
    pub sale_number: String,
    pub lines: Vec<SaleLine>,
    #[serde(default)]
    pub notes: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Total amount in currency unit
    pub total: f64,
    /// Employee who recorded the sale
    pub created_by: i64,
    pub created_at: Option<String>,
}

impl Sale {
    /// Hydrate a cart from this sale for edit mode.
    pub fn to_cart(&self) -> CartState {
        CartState {
            lines: self
                .lines
                .iter()
                .map(|l| CartLine {
                    product_id: l.product_id,
                    name: l.name.clone(),
                    unit: l.unit.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
            notes: self.notes.clone(),
            payment_method: self.payment_method,
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
        }
    }
}

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub lines: Vec<SaleLine>,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Total amount in currency unit
    pub total: f64,
}

impl SaleCreate {
    /// Build a create payload from a cart. The cart is expected to have
    /// passed [`crate::cart::validate_for_submit`] already.
    pub fn from_cart(cart: &CartState) -> Self {
        Self {
            lines: cart
                .lines
                .iter()
                .map(|l| SaleLine {
                    product_id: l.product_id,
                    name: l.name.clone(),
                    unit: l.unit.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
            notes: cart.notes.clone(),
            payment_method: cart.payment_method,
            customer_name: cart.customer_name.clone(),
            customer_phone: cart.customer_phone.clone(),
            total: cart.total(),
        }
    }
}

/// Update sale payload (edit mode resubmission)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub lines: Vec<SaleLine>,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Total amount in currency unit
    pub total: f64,
}

impl From<SaleCreate> for SaleUpdate {
    fn from(create: SaleCreate) -> Self {
        Self {
            lines: create.lines,
            notes: create.notes,
            payment_method: create.payment_method,
            customer_name: create.customer_name,
            customer_phone: create.customer_phone,
            total: create.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAction;

    #[test]
    fn test_cart_round_trip() {
        let cart = CartState::empty()
            .apply(CartAction::AddItem(CartLine {
                product_id: 1,
                name: "Sourdough".to_string(),
                unit: "pcs".to_string(),
                quantity: 2,
                unit_price: 4.5,
            }))
            .apply(CartAction::SetPaymentMethod(PaymentMethod::CreditCard))
            .apply(CartAction::SetCustomerName("Maria".to_string()));

        let payload = SaleCreate::from_cart(&cart);
        assert_eq!(payload.total, 9.0);
        assert_eq!(payload.lines.len(), 1);

        let sale = Sale {
            id: 5,
            sale_number: "SAL-5".to_string(),
            lines: payload.lines.clone(),
            notes: payload.notes.clone(),
            payment_method: payload.payment_method,
            customer_name: payload.customer_name.clone(),
            customer_phone: payload.customer_phone.clone(),
            total: payload.total,
            created_by: 9,
            created_at: None,
        };
        assert_eq!(sale.to_cart(), cart);
    }
}
