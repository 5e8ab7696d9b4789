//! Classification of backend rejection messages
//!
//! The backend reports domain failures as free-form message strings. The
//! dashboard maps them to error codes by pattern matching so they can be
//! localized and styled consistently. Unrecognized messages fall through to
//! [`ErrorCode::Unknown`] and are surfaced verbatim.

use super::codes::ErrorCode;

/// Classify a backend rejection message into an error code.
///
/// Matching is case-insensitive on substrings. Order matters: the most
/// specific patterns are tried first.
pub fn classify_backend_message(message: &str) -> ErrorCode {
    let msg = message.to_lowercase();

    // Employee / account conflicts
    if msg.contains("username") && (msg.contains("exists") || msg.contains("taken")) {
        return ErrorCode::EmployeeUsernameExists;
    }

    // Stock shortages
    if msg.contains("insufficient stock") || msg.contains("out of stock") {
        return ErrorCode::InsufficientStock;
    }

    // Payment method rejections
    if msg.contains("payment method") || msg.contains("invalid payment") {
        return ErrorCode::PaymentInvalidMethod;
    }

    // Workflow rejections
    if msg.contains("transition") || msg.contains("invalid status") {
        return ErrorCode::OrderInvalidTransition;
    }
    if msg.contains("not assigned") {
        return ErrorCode::ItemNotAssignedToActor;
    }
    if msg.contains("already completed") {
        return ErrorCode::ItemAlreadyCompleted;
    }
    if msg.contains("inventory") && msg.contains("processed") {
        return ErrorCode::InventoryAlreadyProcessed;
    }

    // Missing resources
    if msg.contains("order") && msg.contains("not found") {
        return ErrorCode::OrderNotFound;
    }
    if msg.contains("sale") && msg.contains("not found") {
        return ErrorCode::SaleNotFound;
    }
    if msg.contains("product") && msg.contains("not found") {
        return ErrorCode::ProductNotFound;
    }
    if msg.contains("not found") {
        return ErrorCode::NotFound;
    }

    // Access failures
    if msg.contains("permission") || msg.contains("forbidden") {
        return ErrorCode::PermissionDenied;
    }
    if msg.contains("unauthorized") || msg.contains("not authenticated") {
        return ErrorCode::NotAuthenticated;
    }

    ErrorCode::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_domain_messages() {
        assert_eq!(
            classify_backend_message("Username already exists"),
            ErrorCode::EmployeeUsernameExists
        );
        assert_eq!(
            classify_backend_message("Insufficient stock for product 12"),
            ErrorCode::InsufficientStock
        );
        assert_eq!(
            classify_backend_message("Invalid payment method: CHEQUE"),
            ErrorCode::PaymentInvalidMethod
        );
    }

    #[test]
    fn test_workflow_messages() {
        assert_eq!(
            classify_backend_message("Invalid status transition COMPLETED -> APPROVED"),
            ErrorCode::OrderInvalidTransition
        );
        assert_eq!(
            classify_backend_message("Item 3 is not assigned to user 7"),
            ErrorCode::ItemNotAssignedToActor
        );
    }

    #[test]
    fn test_not_found_specificity() {
        assert_eq!(
            classify_backend_message("Order ORD-2024-001 not found"),
            ErrorCode::OrderNotFound
        );
        assert_eq!(
            classify_backend_message("widget not found"),
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_unknown_falls_through() {
        assert_eq!(
            classify_backend_message("the kitchen is on fire"),
            ErrorCode::Unknown
        );
    }
}
