// order-client/src/client/orders.rs
// Typed order API on top of a JSON transport

use async_trait::async_trait;
use shared::models::{CreateOrderRequest, Order, OrderStatus, UpdateStatusRequest};
use shared::ApiResponse;

use super::http::HttpClient;
use crate::{ClientError, ClientResult};

const ORDERS_PATH: &str = "/api/orders";

/// Order endpoints as seen by the dashboard
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /api/orders`
    async fn list_orders(&self) -> ClientResult<Vec<Order>>;
    /// `POST /api/orders`
    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<Order>;
    /// `PATCH /api/orders/{id}`
    async fn update_status(&self, id: u64, status: OrderStatus) -> ClientResult<Order>;
    /// `DELETE /api/orders/{id}`
    async fn delete_order(&self, id: u64) -> ClientResult<Order>;
}

/// [`OrdersApi`] over any [`HttpClient`]
#[derive(Debug, Clone)]
pub struct OrdersClient<H> {
    http: H,
}

impl<H: HttpClient> OrdersClient<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Take the order out of a success envelope
fn unwrap_envelope(resp: ApiResponse<Order>) -> ClientResult<Order> {
    if !resp.success {
        return Err(ClientError::InvalidResponse(
            resp.message
                .unwrap_or_else(|| "Unsuccessful response without message".into()),
        ));
    }
    resp.into_data()
        .ok_or_else(|| ClientError::InvalidResponse("Missing order data".into()))
}

#[async_trait]
impl<H: HttpClient> OrdersApi for OrdersClient<H> {
    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.http.get(ORDERS_PATH).await
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<Order> {
        let resp: ApiResponse<Order> = self.http.post(ORDERS_PATH, req).await?;
        unwrap_envelope(resp)
    }

    async fn update_status(&self, id: u64, status: OrderStatus) -> ClientResult<Order> {
        let body = UpdateStatusRequest::new(status);
        let resp: ApiResponse<Order> = self
            .http
            .patch(&format!("{ORDERS_PATH}/{id}"), &body)
            .await?;
        unwrap_envelope(resp)
    }

    async fn delete_order(&self, id: u64) -> ClientResult<Order> {
        let resp: ApiResponse<Order> = self.http.delete(&format!("{ORDERS_PATH}/{id}")).await?;
        unwrap_envelope(resp)
    }
}
