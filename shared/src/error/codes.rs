//! Unified error codes for the Ladle back office
//!
//! This module defines all error codes used across the domain engine, the
//! client and the dashboard frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Sale / cart errors
//! - 4xxx: Order workflow errors
//! - 5xxx: Inventory errors
//! - 6xxx: Product errors
//! - 7xxx: Department errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,
    /// Account is disabled
    AccountDisabled = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Sale / Cart ====================
    /// Sale not found
    SaleNotFound = 3001,
    /// Cart has no lines
    CartEmpty = 3002,
    /// Customer phone fails the loose phone pattern
    CartInvalidPhone = 3003,
    /// Payment method is not one of the accepted values
    PaymentInvalidMethod = 3004,
    /// Sale has already been submitted
    SaleAlreadySubmitted = 3005,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Requested status transition is not in the transition table
    OrderInvalidTransition = 4003,
    /// Order cannot complete while an item is not completed
    OrderItemsIncomplete = 4004,
    /// Order cannot enter production while an item is unassigned
    OrderItemsUnassigned = 4005,
    /// Order is in a terminal state
    OrderAlreadyTerminal = 4006,
    /// Item has already been completed
    ItemAlreadyCompleted = 4007,
    /// Item is not assigned to the acting user
    ItemNotAssignedToActor = 4008,
    /// Order is not in production
    OrderNotInProduction = 4009,
    /// Inventory has already been processed for this order
    InventoryAlreadyProcessed = 4010,

    // ==================== 5xxx: Inventory ====================
    /// Inventory record not found
    InventoryNotFound = 5001,
    /// Insufficient stock for the requested quantity
    InsufficientStock = 5002,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,

    // ==================== 7xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 7001,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee username already exists
    EmployeeUsernameExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Operation timed out
    TimeoutError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// A submission for this entity is already in flight
    OperationInFlight = 9005,
    /// Response belongs to a superseded request
    StaleResponse = 9006,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::AccountDisabled => "Account is disabled",

            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",

            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::CartInvalidPhone => "Customer phone number is invalid",
            ErrorCode::PaymentInvalidMethod => "Payment method is invalid",
            ErrorCode::SaleAlreadySubmitted => "Sale has already been submitted",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderInvalidTransition => "Status transition is not allowed",
            ErrorCode::OrderItemsIncomplete => "Not every item has been completed",
            ErrorCode::OrderItemsUnassigned => "Not every item has been assigned",
            ErrorCode::OrderAlreadyTerminal => "Order is in a terminal state",
            ErrorCode::ItemAlreadyCompleted => "Item has already been completed",
            ErrorCode::ItemNotAssignedToActor => "Item is assigned to a different chef",
            ErrorCode::OrderNotInProduction => "Order is not in production",
            ErrorCode::InventoryAlreadyProcessed => "Inventory has already been processed",

            ErrorCode::InventoryNotFound => "Inventory record not found",
            ErrorCode::InsufficientStock => "Insufficient stock",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price is invalid",

            ErrorCode::DepartmentNotFound => "Department not found",

            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeUsernameExists => "Username already exists",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::OperationInFlight => "A submission for this entity is already in flight",
            ErrorCode::StaleResponse => "Response belongs to a superseded request",
        }
    }

    /// Get the HTTP status code this error maps to
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self.code() {
            0 => StatusCode::OK,
            2 | 5 | 6 | 7 | 8 | 3002..=3005 => StatusCode::BAD_REQUEST,
            1001..=1999 => StatusCode::UNAUTHORIZED,
            2001..=2999 => StatusCode::FORBIDDEN,
            3 | 3001 | 4001 | 4002 | 5001 | 6001 | 7001 | 8001 => StatusCode::NOT_FOUND,
            4 | 8002 => StatusCode::CONFLICT,
            4003..=4999 | 5002 => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),
            1006 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            // Sale / Cart
            3001 => Ok(ErrorCode::SaleNotFound),
            3002 => Ok(ErrorCode::CartEmpty),
            3003 => Ok(ErrorCode::CartInvalidPhone),
            3004 => Ok(ErrorCode::PaymentInvalidMethod),
            3005 => Ok(ErrorCode::SaleAlreadySubmitted),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderItemNotFound),
            4003 => Ok(ErrorCode::OrderInvalidTransition),
            4004 => Ok(ErrorCode::OrderItemsIncomplete),
            4005 => Ok(ErrorCode::OrderItemsUnassigned),
            4006 => Ok(ErrorCode::OrderAlreadyTerminal),
            4007 => Ok(ErrorCode::ItemAlreadyCompleted),
            4008 => Ok(ErrorCode::ItemNotAssignedToActor),
            4009 => Ok(ErrorCode::OrderNotInProduction),
            4010 => Ok(ErrorCode::InventoryAlreadyProcessed),

            // Inventory
            5001 => Ok(ErrorCode::InventoryNotFound),
            5002 => Ok(ErrorCode::InsufficientStock),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),

            // Department
            7001 => Ok(ErrorCode::DepartmentNotFound),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeUsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::OperationInFlight),
            9006 => Ok(ErrorCode::StaleResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::CartEmpty.code(), 3002);
        assert_eq!(ErrorCode::OrderInvalidTransition.code(), 4003);
        assert_eq!(ErrorCode::InsufficientStock.code(), 5002);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::DepartmentNotFound.code(), 7001);
        assert_eq!(ErrorCode::EmployeeUsernameExists.code(), 8002);
        assert_eq!(ErrorCode::StaleResponse.code(), 9006);
    }

    #[test]
    fn test_round_trip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::CartInvalidPhone,
            ErrorCode::ItemNotAssignedToActor,
            ErrorCode::OperationInFlight,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_http_status_mapping() {
        use http::StatusCode;
        assert_eq!(ErrorCode::CartEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::OrderItemsIncomplete.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
