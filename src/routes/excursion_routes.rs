use axum::{
    extract::{Path, State},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::excursion_controller::ExcursionController;
use crate::controllers::reservation_controller::ReservationController;
use crate::dto::api::ApiResponse;
use crate::dto::excursion_dto::{CreateExcursionRequest, UpdateExcursionRequest};
use crate::dto::reservation_dto::BusAvailabilityView;
use crate::middleware::auth::admin_middleware;
use crate::models::excursion::Excursion;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Leitura é pública (vitrine de excursões); criação, edição e remoção
/// são restritas a administradores.
pub fn create_excursion_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_excursion))
        .route("/:id", put(update_excursion))
        .route("/:id", delete(delete_excursion))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/", get(list_excursions))
        .route("/:id", get(get_excursion))
        .route("/:id/onibus", get(buses_with_availability))
        .merge(admin)
}

async fn create_excursion(
    State(state): State<AppState>,
    Json(request): Json<CreateExcursionRequest>,
) -> Result<Json<ApiResponse<Excursion>>, AppError> {
    let controller = ExcursionController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_excursions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Excursion>>, AppError> {
    let controller = ExcursionController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_excursion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Excursion>, AppError> {
    let controller = ExcursionController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn buses_with_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BusAvailabilityView>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.buses_with_availability(id).await?))
}

async fn update_excursion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExcursionRequest>,
) -> Result<Json<ApiResponse<Excursion>>, AppError> {
    let controller = ExcursionController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_excursion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ExcursionController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
