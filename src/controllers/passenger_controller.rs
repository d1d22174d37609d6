use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::api::ApiResponse;
use crate::dto::passenger_dto::UpdatePassengerRequest;
use crate::models::passenger::Passenger;
use crate::repositories::PassengerRepository;
use crate::services::PassengerRegistry;
use crate::utils::dates::parse_br_date;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::require_phone;

pub struct PassengerController {
    repository: PassengerRepository,
    registry: PassengerRegistry,
}

impl PassengerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PassengerRepository::new(pool.clone()),
            registry: PassengerRegistry::new(pool),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Passenger> {
        self.repository.require(id).await
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Passenger>> {
        self.registry.find_by_cpf(cpf).await
    }

    pub async fn list(&self) -> AppResult<Vec<Passenger>> {
        self.repository.list_all().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePassengerRequest,
    ) -> AppResult<ApiResponse<Passenger>> {
        if let Some(telefone) = request.telefone.as_deref() {
            require_phone(telefone)?;
        }

        let nascimento = match request.data_nascimento.as_deref() {
            Some(raw) => Some(
                parse_br_date(raw)
                    .ok_or_else(|| AppError::Validation("Data de nascimento inválida".to_string()))?,
            ),
            None => None,
        };

        let passenger = self
            .repository
            .update(
                id,
                request.nome.map(|n| n.trim().to_uppercase()),
                request.telefone,
                nascimento,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            passenger,
            "Passageiro atualizado".to_string(),
        ))
    }
}
