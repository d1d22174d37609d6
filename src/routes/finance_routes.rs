use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::finance_controller::FinanceController;
use crate::dto::api::ApiResponse;
use crate::dto::finance_dto::{
    AddInstallmentRequest, CreatePlanRequest, EditInstallmentRequest, FinanceBookingView,
    FinanceBookingsQuery, MarkPaidRequest, PlanLookupQuery, PlanResponse,
};
use crate::models::payment_plan::Installment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_finance_router() -> Router<AppState> {
    Router::new()
        .route("/reservas", get(finance_bookings))
        .route("/planos", post(create_plan))
        .route("/planos", get(find_plan))
        .route("/planos/:id", get(get_plan))
        .route("/planos/:id/parcelas", post(add_installment))
        .route("/planos/excursao/:excursao_id", get(plans_by_excursion))
        .route("/parcelas/:id/pagar", patch(mark_paid))
        .route("/parcelas/:id/estornar", patch(revert_paid))
        .route("/parcelas/:id", put(edit_installment))
}

async fn finance_bookings(
    State(state): State<AppState>,
    Query(query): Query<FinanceBookingsQuery>,
) -> Result<Json<Vec<FinanceBookingView>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.bookings(query.excursao_id).await?))
}

async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Json<ApiResponse<PlanResponse>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.create_plan(request).await?))
}

/// Busca o plano de um passageiro. 404 sem corpo de erro quando o
/// passageiro ainda não tem plano.
async fn find_plan(
    State(state): State<AppState>,
    Query(query): Query<PlanLookupQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = FinanceController::new(&state);
    match controller.find_plan(query).await? {
        Some(plan) => Ok(Json(plan).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanResponse>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.plan_by_id(id).await?))
}

async fn plans_by_excursion(
    State(state): State<AppState>,
    Path(excursao_id): Path<Uuid>,
) -> Result<Json<Vec<PlanResponse>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.plans_by_excursion(excursao_id).await?))
}

async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MarkPaidRequest>,
) -> Result<Json<ApiResponse<Installment>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.mark_paid(id, request).await?))
}

async fn revert_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Installment>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.revert_paid(id).await?))
}

async fn edit_installment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditInstallmentRequest>,
) -> Result<Json<ApiResponse<Installment>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.edit_installment(id, request).await?))
}

async fn add_installment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddInstallmentRequest>,
) -> Result<Json<ApiResponse<Installment>>, AppError> {
    let controller = FinanceController::new(&state);
    Ok(Json(controller.add_installment(id, request).await?))
}
