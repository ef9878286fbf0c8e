// backend/services/orders/api/src/routes/orders.rs

use crate::error::ApiError;
use crate::state::AppState;
use crate::view::OrderView;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use orders::application::add_item_to_order::AddItemToOrderCommand;
use orders::application::create_order::CreateOrderCommand;
use serde::Deserialize;
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}/items", post(add_item))
        .route("/orders/{id}", get(get_order))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: f64,
}

/// POST /orders : crée une commande, avec id client optionnel
#[tracing::instrument(skip(state, request))]
async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let order = state
        .create_order
        .execute(CreateOrderCommand {
            order_id: request.order_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(OrderView::from_order(&order))))
}

/// POST /orders/{id}/items : ajoute (ou fusionne) une ligne
#[tracing::instrument(skip(state, request))]
async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<OrderView>, ApiError> {
    let order = state
        .add_item_to_order
        .execute(AddItemToOrderCommand {
            order_id: id,
            product_id: request.product_id,
            quantity: request.quantity,
        })
        .await?;

    Ok(Json(OrderView::from_order(&order)))
}

/// GET /orders/{id} : pas encore implémenté
async fn get_order(Path(_id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(serde_json::json!({
            "error": {
                "code": "NOT_IMPLEMENTED",
                "message": "Fetching an order is not implemented yet",
            }
        })),
    )
}
