//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Sale / cart errors
/// - 4xxx: Order workflow errors
/// - 5xxx: Inventory errors
/// - 6xxx: Product errors
/// - 7xxx: Department errors
/// - 8xxx: Employee errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Sale / cart errors (3xxx)
    Sale,
    /// Order workflow errors (4xxx)
    Order,
    /// Inventory errors (5xxx)
    Inventory,
    /// Product errors (6xxx)
    Product,
    /// Department errors (7xxx)
    Department,
    /// Employee errors (8xxx)
    Employee,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Sale,
            4000..5000 => Self::Order,
            5000..6000 => Self::Inventory,
            6000..7000 => Self::Product,
            7000..8000 => Self::Department,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Determine category for an [`ErrorCode`]
    pub fn of(code: ErrorCode) -> Self {
        Self::from_code(code.code())
    }

    /// Whether errors of this category should be surfaced as a blocking
    /// banner rather than an inline notification
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Auth | Self::Permission)
    }
}
