//! Error codes, `AppError` and the response envelope
//!
//! Server handlers return [`AppResult`]; the error side renders as an
//! [`ApiResponse`] with the status from [`ErrorCode::http_status`]. The
//! client decodes the same envelope.
//!
//! ```
//! use shared::error::{ApiResponse, AppError};
//!
//! let err = AppError::validation("Missing required fields")
//!     .with_detail("fields", vec!["total"]);
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCategory, ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
