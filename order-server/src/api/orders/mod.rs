//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Orders are mounted twice: `/api/orders` and the bot's legacy
/// `/api/pedidos` path
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", routes())
        .nest("/api/pedidos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            patch(handler::update_status).delete(handler::delete),
        )
}
