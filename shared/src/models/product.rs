//! Product and inventory models

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit label (kg, pcs, ...)
    pub unit: String,
    /// Price in currency unit
    pub price: f64,
    pub department_id: i64,
    pub is_active: bool,
}

/// Live inventory level for a product.
///
/// The cart engine is stock-agnostic; callers compare a candidate quantity
/// against `current_stock` before dispatching AddItem/UpdateQuantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryLevel {
    pub product_id: i64,
    pub current_stock: i32,
    pub updated_at: Option<String>,
}

impl InventoryLevel {
    /// Whether `quantity` can be taken from stock
    pub fn covers(&self, quantity: i32) -> bool {
        quantity >= 0 && quantity <= self.current_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers() {
        let level = InventoryLevel {
            product_id: 1,
            current_stock: 5,
            updated_at: None,
        };
        assert!(level.covers(5));
        assert!(level.covers(0));
        assert!(!level.covers(6));
        assert!(!level.covers(-1));
    }
}
