use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::excursion_dto::{CreateExcursionRequest, UpdateExcursionRequest};
use crate::models::excursion::Excursion;
use crate::repositories::ExcursionRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::require_positive;

pub struct ExcursionController {
    repository: ExcursionRepository,
}

impl ExcursionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExcursionRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateExcursionRequest,
    ) -> AppResult<ApiResponse<Excursion>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_positive(request.preco, "preço")?;

        let excursion = self
            .repository
            .create(
                request.nome,
                request.descricao,
                request.destino,
                request.data_saida,
                request.data_retorno,
                request.duracao,
                request.preco,
                request.condicoes_pagamento,
                request.inclusoes,
                request.imagem_capa_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            excursion,
            "Excursão criada com sucesso".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Excursion> {
        self.repository.require(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Excursion>> {
        self.repository.list_all().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateExcursionRequest,
    ) -> AppResult<ApiResponse<Excursion>> {
        if let Some(preco) = request.preco {
            require_positive(preco, "preço")?;
        }

        let excursion = self
            .repository
            .update(
                id,
                request.nome,
                request.descricao,
                request.destino,
                request.data_saida,
                request.data_retorno,
                request.duracao,
                request.preco,
                request.condicoes_pagamento,
                request.inclusoes,
                request.imagem_capa_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            excursion,
            "Excursão atualizada com sucesso".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        self.repository.delete(id).await?;
        Ok(ApiResponse::success_with_message(
            (),
            "Excursão removida".to_string(),
        ))
    }
}
