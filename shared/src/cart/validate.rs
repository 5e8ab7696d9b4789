//! Pre-submit cart validation
//!
//! Invoked once, synchronously, before any network call. The guard is a
//! pure precondition check: on rejection, submission does not proceed and
//! no state is mutated.

use super::CartState;
use crate::error::{AppError, AppResult, ErrorCode};

/// Maximum allowed unit price per line
pub const MAX_LINE_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_LINE_QUANTITY: i32 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{} must be a finite number, got {}", field_name, value),
        ));
    }
    Ok(())
}

/// Loose phone-number pattern: optional leading `+`, then 9-15 digits.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (9..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a cart before submission.
///
/// Rejects:
/// - an empty cart
/// - a customer phone present but failing the loose phone pattern
/// - line quantities/prices outside their bounds (these cannot be produced
///   through [`CartState::apply`], but a wholesale-loaded sale is checked
///   the same way before resubmission)
pub fn validate_for_submit(cart: &CartState) -> AppResult<()> {
    if cart.lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    if let Some(phone) = cart.customer_phone.as_deref() {
        if !is_valid_phone(phone) {
            return Err(
                AppError::with_message(
                    ErrorCode::CartInvalidPhone,
                    format!("Customer phone is not a valid phone number: {}", phone),
                )
                .with_detail("field", "customer_phone"),
            );
        }
    }

    for line in &cart.lines {
        require_finite(line.unit_price, "unit_price")?;
        if line.unit_price < 0.0 || line.unit_price > MAX_LINE_PRICE {
            return Err(AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!(
                    "unit_price out of range for product {}: {}",
                    line.product_id, line.unit_price
                ),
            ));
        }
        if line.quantity <= 0 || line.quantity > MAX_LINE_QUANTITY {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!(
                    "quantity out of range for product {}: {}",
                    line.product_id, line.quantity
                ),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartLine};

    fn cart_with_one_line() -> CartState {
        CartState::empty().apply(CartAction::AddItem(CartLine {
            product_id: 1,
            name: "Sourdough".to_string(),
            unit: "pcs".to_string(),
            quantity: 2,
            unit_price: 4.5,
        }))
    }

    #[test]
    fn test_empty_cart_rejected_unconditionally() {
        let err = validate_for_submit(&CartState::empty()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);

        // Still rejected with customer data filled in
        let cart = CartState::empty()
            .apply(CartAction::SetCustomerName("Maria".to_string()))
            .apply(CartAction::SetCustomerPhone(Some("+34123456789".to_string())));
        let err = validate_for_submit(&cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);
    }

    #[test]
    fn test_valid_cart_accepted() {
        assert!(validate_for_submit(&cart_with_one_line()).is_ok());
    }

    #[test]
    fn test_phone_pattern() {
        let ok = [
            "123456789",        // 9 digits
            "+34123456789",     // plus prefix
            "123456789012345",  // 15 digits
        ];
        for phone in ok {
            let cart = cart_with_one_line()
                .apply(CartAction::SetCustomerPhone(Some(phone.to_string())));
            assert!(validate_for_submit(&cart).is_ok(), "expected ok: {}", phone);
        }

        let bad = [
            "12345678",          // 8 digits, too short
            "1234567890123456",  // 16 digits, too long
            "+",                 // no digits
            "12345678a",         // non-digit
            "+34 123 456 789",   // spaces
            "++34123456789",     // double plus
        ];
        for phone in bad {
            let cart = cart_with_one_line()
                .apply(CartAction::SetCustomerPhone(Some(phone.to_string())));
            let err = validate_for_submit(&cart).unwrap_err();
            assert_eq!(err.code, ErrorCode::CartInvalidPhone, "phone: {}", phone);
        }
    }

    #[test]
    fn test_absent_phone_is_accepted() {
        let cart = cart_with_one_line().apply(CartAction::SetCustomerPhone(None));
        assert!(validate_for_submit(&cart).is_ok());
    }

    #[test]
    fn test_guard_does_not_mutate() {
        let cart = CartState::empty();
        let before = cart.clone();
        let _ = validate_for_submit(&cart);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_loaded_sale_with_bad_price_rejected() {
        // A wholesale-loaded cart bypasses apply-level invariants, so the
        // guard re-checks bounds before resubmission.
        let cart = CartState {
            lines: vec![CartLine {
                product_id: 1,
                name: "Rye".to_string(),
                unit: "pcs".to_string(),
                quantity: 1,
                unit_price: f64::NAN,
            }],
            ..CartState::empty()
        };
        let err = validate_for_submit(&cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
