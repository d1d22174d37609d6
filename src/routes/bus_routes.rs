use axum::{
    extract::{Path, Query, State},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::bus_controller::BusController;
use crate::controllers::reservation_controller::ReservationController;
use crate::dto::api::ApiResponse;
use crate::dto::bus_dto::{CreateBusRequest, UpdateBusRequest};
use crate::dto::reservation_dto::SeatSummary;
use crate::middleware::auth::admin_middleware;
use crate::models::bus::Bus;
use crate::models::seat::SeatView;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Mapa de assentos e ocupação são públicos (fluxo de compra); a gestão
/// da frota é restrita a administradores.
pub fn create_bus_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_bus))
        .route("/:id", put(update_bus))
        .route("/:id", delete(delete_bus))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/", get(list_buses))
        .route("/:id", get(get_bus))
        .route("/:id/assentos", get(seat_map))
        .route("/:id/ocupacao", get(seat_summary))
        .merge(admin)
}

#[derive(Debug, Deserialize)]
struct BusListQuery {
    excursao_id: Option<Uuid>,
}

async fn create_bus(
    State(state): State<AppState>,
    Json(request): Json<CreateBusRequest>,
) -> Result<Json<ApiResponse<Bus>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_buses(
    State(state): State<AppState>,
    Query(query): Query<BusListQuery>,
) -> Result<Json<Vec<Bus>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.list(query.excursao_id).await?))
}

async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Bus>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn seat_map(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SeatView>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.seat_map(id).await?))
}

async fn seat_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatSummary>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.seat_summary(id).await?))
}

async fn update_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBusRequest>,
) -> Result<Json<ApiResponse<Bus>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_bus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BusController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
