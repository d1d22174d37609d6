use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::bus_dto::{CreateBusRequest, UpdateBusRequest};
use crate::models::bus::{Bus, BusCapacity};
use crate::models::seat::SeatView;
use crate::repositories::{BusRepository, ExcursionRepository, SeatRepository};
use crate::services::SeatInventoryService;
use crate::utils::errors::{AppError, AppResult};

pub struct BusController {
    repository: BusRepository,
    excursions: ExcursionRepository,
    seats: SeatRepository,
    inventory: SeatInventoryService,
}

impl BusController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BusRepository::new(pool.clone()),
            excursions: ExcursionRepository::new(pool.clone()),
            seats: SeatRepository::new(pool.clone()),
            inventory: SeatInventoryService::new(pool),
        }
    }

    /// Cria o ônibus e semeia o mapa de assentos completo.
    pub async fn create(&self, request: CreateBusRequest) -> AppResult<ApiResponse<Bus>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let capacity = BusCapacity::from_total(request.total_assentos).ok_or_else(|| {
            AppError::Validation(format!(
                "Capacidade inválida: {} (modelos aceitos: 30, 46, 50 ou 60 lugares)",
                request.total_assentos
            ))
        })?;

        self.excursions.require(request.excursao_id).await?;

        let bus = self
            .repository
            .create(
                request.excursao_id,
                request.nome,
                request.identificacao,
                capacity.total_seats(),
            )
            .await?;

        self.seats.seed_seats(bus.id, bus.total_assentos).await?;

        Ok(ApiResponse::success_with_message(
            bus,
            "Ônibus criado com sucesso".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Bus> {
        self.repository.require(id).await
    }

    pub async fn list(&self, excursao_id: Option<Uuid>) -> AppResult<Vec<Bus>> {
        match excursao_id {
            Some(excursao_id) => self.repository.find_by_excursion(excursao_id).await,
            None => self.repository.list_all().await,
        }
    }

    pub async fn seat_map(&self, id: Uuid) -> AppResult<Vec<SeatView>> {
        self.repository.require(id).await?;
        self.inventory.seat_map(id).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateBusRequest) -> AppResult<ApiResponse<Bus>> {
        if let Some(excursao_id) = request.excursao_id {
            self.excursions.require(excursao_id).await?;
        }

        let bus = self
            .repository
            .update(id, request.nome, request.identificacao, request.excursao_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            bus,
            "Ônibus atualizado com sucesso".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        self.repository.delete(id).await?;
        Ok(ApiResponse::success_with_message(
            (),
            "Ônibus removido".to_string(),
        ))
    }
}
