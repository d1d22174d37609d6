use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::passenger_controller::PassengerController;
use crate::dto::api::ApiResponse;
use crate::dto::passenger_dto::UpdatePassengerRequest;
use crate::models::passenger::Passenger;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_passenger_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_passengers))
        .route("/:id", get(get_passenger))
        .route("/:id", put(update_passenger))
}

#[derive(Debug, Deserialize)]
struct PassengerListQuery {
    cpf: Option<String>,
}

async fn list_passengers(
    State(state): State<AppState>,
    Query(query): Query<PassengerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = PassengerController::new(state.pool.clone());
    match query.cpf {
        Some(cpf) => match controller.find_by_cpf(&cpf).await? {
            Some(passenger) => Ok(Json(vec![passenger]).into_response()),
            None => Ok(StatusCode::NOT_FOUND.into_response()),
        },
        None => Ok(Json(controller.list().await?).into_response()),
    }
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Passenger>, AppError> {
    let controller = PassengerController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePassengerRequest>,
) -> Result<Json<ApiResponse<Passenger>>, AppError> {
    let controller = PassengerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}
