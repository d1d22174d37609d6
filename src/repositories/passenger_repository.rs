use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::passenger::Passenger;
use crate::utils::errors::{AppError, AppResult};

pub struct PassengerRepository {
    pool: PgPool,
}

impl PassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nome: String,
        cpf: String,
        telefone: String,
        data_nascimento: Option<NaiveDate>,
        cpf_aleatorio: bool,
    ) -> AppResult<Passenger> {
        let passenger = sqlx::query_as::<_, Passenger>(
            r#"
            INSERT INTO passageiros (id, nome, cpf, telefone, data_nascimento, cpf_aleatorio, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nome)
        .bind(cpf)
        .bind(telefone)
        .bind(data_nascimento)
        .bind(cpf_aleatorio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(passenger)
    }

    /// Busca por CPF normalizado (apenas dígitos).
    pub async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Passenger>> {
        let passenger = sqlx::query_as::<_, Passenger>("SELECT * FROM passageiros WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;

        Ok(passenger)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Passenger>> {
        let passenger = sqlx::query_as::<_, Passenger>("SELECT * FROM passageiros WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(passenger)
    }

    pub async fn require(&self, id: Uuid) -> AppResult<Passenger> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Passageiro não encontrado".to_string()))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Passenger>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let passengers =
            sqlx::query_as::<_, Passenger>("SELECT * FROM passageiros WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(passengers)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Passenger>> {
        let passengers =
            sqlx::query_as::<_, Passenger>("SELECT * FROM passageiros ORDER BY nome ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(passengers)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<String>,
        telefone: Option<String>,
        data_nascimento: Option<NaiveDate>,
    ) -> AppResult<Passenger> {
        let current = self.require(id).await?;

        let passenger = sqlx::query_as::<_, Passenger>(
            r#"
            UPDATE passageiros
            SET nome = $2, telefone = $3, data_nascimento = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nome.unwrap_or(current.nome))
        .bind(telefone.unwrap_or(current.telefone))
        .bind(data_nascimento.or(current.data_nascimento))
        .fetch_one(&self.pool)
        .await?;

        Ok(passenger)
    }
}
