use uuid::Uuid;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::reservation_dto::{
    BusAvailabilityView, CreateReservationRequest, MovePassengerRequest, PresenceRequest,
    ReservationDetailResponse, SeatSummary,
};
use crate::models::reservation::{PassengerLink, Reservation};
use crate::services::{ReservationService, WebhookService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct ReservationController {
    service: ReservationService,
}

impl ReservationController {
    pub fn new(state: &AppState) -> Self {
        let webhooks = WebhookService::new(state.http_client.clone(), &state.config);
        Self {
            service: ReservationService::new(state.pool.clone(), webhooks),
        }
    }

    pub async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> AppResult<ApiResponse<ReservationDetailResponse>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let detail = self.service.create(request).await?;
        Ok(ApiResponse::success_with_message(
            detail,
            "Reserva criada com sucesso".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<ReservationDetailResponse> {
        self.service.detail(id).await
    }

    pub async fn list(
        &self,
        excursao_id: Option<Uuid>,
        onibus_id: Option<Uuid>,
    ) -> AppResult<Vec<ReservationDetailResponse>> {
        self.service.list_active(excursao_id, onibus_id).await
    }

    pub async fn cancel(&self, id: Uuid) -> AppResult<ApiResponse<Reservation>> {
        let reservation = self.service.cancel(id).await?;
        Ok(ApiResponse::success_with_message(
            reservation,
            "Reserva cancelada".to_string(),
        ))
    }

    pub async fn remove_passenger(&self, vinculo_id: Uuid) -> AppResult<ApiResponse<()>> {
        self.service.remove_passenger(vinculo_id).await?;
        Ok(ApiResponse::success_with_message(
            (),
            "Passageiro removido da reserva".to_string(),
        ))
    }

    pub async fn move_passenger(
        &self,
        vinculo_id: Uuid,
        request: MovePassengerRequest,
    ) -> AppResult<ApiResponse<PassengerLink>> {
        let link = self.service.move_passenger(vinculo_id, request).await?;
        Ok(ApiResponse::success_with_message(
            link,
            "Passageiro movido com sucesso".to_string(),
        ))
    }

    pub async fn set_presence(
        &self,
        vinculo_id: Uuid,
        request: PresenceRequest,
    ) -> AppResult<ApiResponse<PassengerLink>> {
        let link = self.service.set_presence(vinculo_id, request.presente).await?;
        Ok(ApiResponse::success(link))
    }

    pub async fn seat_summary(&self, onibus_id: Uuid) -> AppResult<SeatSummary> {
        self.service.seat_summary(onibus_id).await
    }

    pub async fn buses_with_availability(
        &self,
        excursao_id: Uuid,
    ) -> AppResult<Vec<BusAvailabilityView>> {
        self.service.buses_with_availability(excursao_id).await
    }
}
