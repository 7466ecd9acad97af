//! Order API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::core::ServerState;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{CreateOrderRequest, Order, OrderStatus, UpdateStatusRequest};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Decode a JSON body, turning every failure into an envelope error
///
/// Syntax and content-type problems are `InvalidRequest`, a status label
/// outside the lifecycle is `InvalidOrderStatus`, any other shape mismatch
/// is `ValidationFailed`.
fn json_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> AppResult<T> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::invalid_request(rejection.body_text())
    })?;

    check_status(&body)?;

    serde_json::from_value(body).map_err(|e| {
        tracing::debug!(error = %e, "Request body does not match the payload shape");
        AppError::validation(format!("Invalid payload: {e}"))
    })
}

/// Status labels are checked before decoding so the error names the status
fn check_status(body: &Value) -> AppResult<()> {
    let label = ["status", "estado"]
        .into_iter()
        .find_map(|key| body.get(key))
        .and_then(Value::as_str);

    match label {
        Some(label) => label.parse::<OrderStatus>().map(|_| ()).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidOrderStatus, e.to_string())
                .with_detail("status", label)
        }),
        None => Ok(()),
    }
}

fn order_id(path: Result<Path<u64>, PathRejection>) -> AppResult<u64> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::invalid_request(format!("Invalid order id: {}", e.body_text())))
}

/// GET /api/orders - all orders, raw array
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.orders.list())
}

/// POST /api/orders - create an order (bot webhook entry point)
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, ApiResponse<Order>)> {
    let req: CreateOrderRequest = json_body(payload)?;
    let order = state.orders.create(req)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Order received", order),
    ))
}

/// PATCH /api/orders/{id} - change the status
pub async fn update_status(
    State(state): State<ServerState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<ApiResponse<Order>> {
    let id = order_id(path)?;
    let req: UpdateStatusRequest = json_body(payload)?;
    let order = state.orders.update_status(id, req)?;
    Ok(ApiResponse::success_with_message("Order updated", order))
}

/// DELETE /api/orders/{id} - remove an order
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<u64>, PathRejection>,
) -> AppResult<ApiResponse<Order>> {
    let id = order_id(path)?;
    let order = state.orders.delete(id)?;
    Ok(ApiResponse::success_with_message("Order deleted", order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode<T: DeserializeOwned>(body: Value) -> AppResult<T> {
        json_body(Ok(Json(body)))
    }

    #[test]
    fn test_unknown_status_label() {
        let err = decode::<UpdateStatusRequest>(json!({ "status": "cancelled" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
        assert_eq!(err.details.unwrap()["status"], "cancelled");

        let err = decode::<CreateOrderRequest>(json!({ "nombre": "Ana", "estado": "perdido" }))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }

    #[test]
    fn test_status_of_wrong_type_is_validation() {
        let err = decode::<UpdateStatusRequest>(json!({ "status": 2 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_known_labels_decode() {
        let req: UpdateStatusRequest = decode(json!({ "estado": "en camino" })).unwrap();
        assert_eq!(req.status, Some(OrderStatus::EnRoute));

        let req: UpdateStatusRequest = decode(json!({ "status": null })).unwrap();
        assert_eq!(req.status, None);
    }

    #[test]
    fn test_other_shape_errors_are_validation() {
        let err = decode::<CreateOrderRequest>(json!({ "total": "twelve" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.starts_with("Invalid payload"));
    }
}
