use sqlx::PgPool;
use uuid::Uuid;

use crate::models::seat::{SeatRow, SeatStatus};
use crate::utils::errors::AppResult;

pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gera os assentos 1..=total de um ônibus recém-criado, todos
    /// disponíveis.
    pub async fn seed_seats(&self, onibus_id: Uuid, total: i32) -> AppResult<()> {
        for numero in 1..=total {
            sqlx::query(
                r#"
                INSERT INTO assentos_onibus (onibus_id, numero_assento, status)
                VALUES ($1, $2, 'disponivel')
                ON CONFLICT (onibus_id, numero_assento) DO NOTHING
                "#,
            )
            .bind(onibus_id)
            .bind(numero)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn list_by_bus(&self, onibus_id: Uuid) -> AppResult<Vec<SeatRow>> {
        let seats = sqlx::query_as::<_, SeatRow>(
            r#"
            SELECT onibus_id, numero_assento, status
            FROM assentos_onibus
            WHERE onibus_id = $1
            ORDER BY numero_assento ASC
            "#,
        )
        .bind(onibus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Atualização idempotente do cache de status do assento.
    pub async fn set_status(
        &self,
        onibus_id: Uuid,
        numero_assento: i32,
        status: SeatStatus,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE assentos_onibus
            SET status = $3
            WHERE onibus_id = $1 AND numero_assento = $2
            "#,
        )
        .bind(onibus_id)
        .bind(numero_assento)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn seat_exists(&self, onibus_id: Uuid, numero_assento: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM assentos_onibus
                WHERE onibus_id = $1 AND numero_assento = $2
            )
            "#,
        )
        .bind(onibus_id)
        .bind(numero_assento)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
