use axum::{
    extract::{Path, Query, State},
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::api::ApiResponse;
use crate::dto::reservation_dto::{
    CreateReservationRequest, MovePassengerRequest, PresenceRequest, ReservationDetailResponse,
    ReservationListQuery,
};
use crate::middleware::auth::admin_middleware;
use crate::models::reservation::{PassengerLink, Reservation};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Criação e consulta de reservas são públicas (fluxo do viajante);
/// cancelamento, remoção, migração e presença são operações do painel
/// administrativo.
pub fn create_reservation_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/:id/cancelar", post(cancel_reservation))
        .route("/passageiros/:vinculo_id", delete(remove_passenger))
        .route("/passageiros/:vinculo_id/mover", patch(move_passenger))
        .route("/passageiros/:vinculo_id/presenca", patch(set_presence))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id", get(get_reservation))
        .merge(admin)
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDetailResponse>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.create(request).await?))
}

async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<Vec<ReservationDetailResponse>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(
        controller.list(query.excursao_id, query.onibus_id).await?,
    ))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationDetailResponse>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.cancel(id).await?))
}

async fn remove_passenger(
    State(state): State<AppState>,
    Path(vinculo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.remove_passenger(vinculo_id).await?))
}

async fn move_passenger(
    State(state): State<AppState>,
    Path(vinculo_id): Path<Uuid>,
    Json(request): Json<MovePassengerRequest>,
) -> Result<Json<ApiResponse<PassengerLink>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.move_passenger(vinculo_id, request).await?))
}

async fn set_presence(
    State(state): State<AppState>,
    Path(vinculo_id): Path<Uuid>,
    Json(request): Json<PresenceRequest>,
) -> Result<Json<ApiResponse<PassengerLink>>, AppError> {
    let controller = ReservationController::new(&state);
    Ok(Json(controller.set_presence(vinculo_id, request).await?))
}
