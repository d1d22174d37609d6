use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bus::Bus;
use crate::utils::errors::{AppError, AppResult};

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        excursao_id: Uuid,
        nome: String,
        identificacao: Option<String>,
        total_assentos: i32,
    ) -> AppResult<Bus> {
        let bus = sqlx::query_as::<_, Bus>(
            r#"
            INSERT INTO onibus (id, excursao_id, nome, identificacao, total_assentos, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(excursao_id)
        .bind(nome)
        .bind(identificacao)
        .bind(total_assentos)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(bus)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Bus>> {
        let bus = sqlx::query_as::<_, Bus>("SELECT * FROM onibus WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bus)
    }

    pub async fn require(&self, id: Uuid) -> AppResult<Bus> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ônibus não encontrado".to_string()))
    }

    pub async fn find_by_excursion(&self, excursao_id: Uuid) -> AppResult<Vec<Bus>> {
        let buses = sqlx::query_as::<_, Bus>(
            "SELECT * FROM onibus WHERE excursao_id = $1 ORDER BY criado_em ASC",
        )
        .bind(excursao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buses)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Bus>> {
        let buses = sqlx::query_as::<_, Bus>("SELECT * FROM onibus ORDER BY criado_em ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(buses)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<String>,
        identificacao: Option<String>,
        excursao_id: Option<Uuid>,
    ) -> AppResult<Bus> {
        let current = self.require(id).await?;

        let bus = sqlx::query_as::<_, Bus>(
            r#"
            UPDATE onibus
            SET nome = $2, identificacao = $3, excursao_id = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome.unwrap_or(current.nome))
        .bind(identificacao.or(current.identificacao))
        .bind(excursao_id.unwrap_or(current.excursao_id))
        .fetch_one(&self.pool)
        .await?;

        Ok(bus)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.require(id).await?;

        sqlx::query("DELETE FROM onibus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
