//! Numeric error codes carried in the `code` field of failed responses
//!
//! | Range | Category |
//! |-------|----------|
//! | 1..1000 | request problems |
//! | 4000..5000 | order problems |
//! | 9000.. | server-side failures |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code, serialized as its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    ValidationFailed = 2,
    NotFound = 3,
    InvalidRequest = 5,
    MethodNotAllowed = 6,
    RequiredField = 7,
    ValueOutOfRange = 8,

    OrderNotFound = 4001,
    /// Explicit id that was handed out before
    OrderIdInUse = 4008,
    InvalidOrderStatus = 4009,

    InternalError = 9001,
    /// Request took longer than `REQUEST_TIMEOUT_MS`
    TimeoutError = 9005,
}

/// Coarse grouping of codes by numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Order,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            4000..5000 => Self::Order,
            9000.. => Self::System,
            _ => Self::Request,
        }
    }
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        Self::ValidationFailed,
        Self::NotFound,
        Self::InvalidRequest,
        Self::MethodNotAllowed,
        Self::RequiredField,
        Self::ValueOutOfRange,
        Self::OrderNotFound,
        Self::OrderIdInUse,
        Self::InvalidOrderStatus,
        Self::InternalError,
        Self::TimeoutError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Default message when no specific one is given
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotAllowed => "Method not allowed",
            Self::RequiredField => "Required field is missing",
            Self::ValueOutOfRange => "Value is out of range",
            Self::OrderNotFound => "Order not found",
            Self::OrderIdInUse => "Order id is already in use",
            Self::InvalidOrderStatus => "Invalid order status",
            Self::InternalError => "Internal server error",
            Self::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of the [`ErrorCode`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
