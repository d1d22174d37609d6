use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reservation::{PassengerLink, Reservation, ReservationStatus};
use crate::utils::errors::{AppError, AppResult};

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, excursao_id: Uuid, onibus_id: Uuid) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservas (id, excursao_id, onibus_id, status, criado_em)
            VALUES ($1, $2, $3, 'confirmada', $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(excursao_id)
        .bind(onibus_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reservation)
    }

    pub async fn require(&self, id: Uuid) -> AppResult<Reservation> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva não encontrada".to_string()))
    }

    pub async fn set_status(&self, id: Uuid, status: ReservationStatus) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservas SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Listagem administrativa: reservas não canceladas, com filtros
    /// opcionais por excursão e ônibus.
    pub async fn list_active(
        &self,
        excursao_id: Option<Uuid>,
        onibus_id: Option<Uuid>,
    ) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservas
            WHERE status <> 'cancelada'
              AND ($1::uuid IS NULL OR excursao_id = $1)
              AND ($2::uuid IS NULL OR onibus_id = $2)
            ORDER BY criado_em DESC
            "#,
        )
        .bind(excursao_id)
        .bind(onibus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn list_active_by_excursion(&self, excursao_id: Uuid) -> AppResult<Vec<Reservation>> {
        self.list_active(Some(excursao_id), None).await
    }

    /// Remoção física usada apenas pela compensação de uma criação que
    /// falhou no meio. Cancelamentos normais usam `set_status`.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM reservas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn insert_link(
        &self,
        reserva_id: Uuid,
        numero_assento: i32,
        passageiro_id: Uuid,
    ) -> AppResult<PassengerLink> {
        let link = sqlx::query_as::<_, PassengerLink>(
            r#"
            INSERT INTO passageiros_reserva (id, reserva_id, numero_assento, passageiro_id, presente)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reserva_id)
        .bind(numero_assento)
        .bind(passageiro_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    pub async fn find_link_by_id(&self, id: Uuid) -> AppResult<Option<PassengerLink>> {
        let link =
            sqlx::query_as::<_, PassengerLink>("SELECT * FROM passageiros_reserva WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(link)
    }

    pub async fn require_link(&self, id: Uuid) -> AppResult<PassengerLink> {
        self.find_link_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Passageiro da reserva não encontrado".to_string()))
    }

    pub async fn links_by_reservation(&self, reserva_id: Uuid) -> AppResult<Vec<PassengerLink>> {
        let links = sqlx::query_as::<_, PassengerLink>(
            r#"
            SELECT * FROM passageiros_reserva
            WHERE reserva_id = $1
            ORDER BY numero_assento ASC
            "#,
        )
        .bind(reserva_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    /// Vínculos ativos de um ônibus, fonte de verdade da ocupação.
    pub async fn active_links_by_bus(&self, onibus_id: Uuid) -> AppResult<Vec<PassengerLink>> {
        let links = sqlx::query_as::<_, PassengerLink>(
            r#"
            SELECT pr.*
            FROM passageiros_reserva pr
            JOIN reservas r ON r.id = pr.reserva_id
            WHERE r.onibus_id = $1 AND r.status <> 'cancelada'
            ORDER BY pr.numero_assento ASC
            "#,
        )
        .bind(onibus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    pub async fn delete_link(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM passageiros_reserva WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_links_by_reservation(&self, reserva_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM passageiros_reserva WHERE reserva_id = $1")
            .bind(reserva_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_link_seat(&self, id: Uuid, numero_assento: i32) -> AppResult<PassengerLink> {
        let link = sqlx::query_as::<_, PassengerLink>(
            "UPDATE passageiros_reserva SET numero_assento = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(numero_assento)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    /// Troca de ônibus: o vínculo migra para outra reserva junto com o
    /// novo assento.
    pub async fn update_link_reservation_and_seat(
        &self,
        id: Uuid,
        reserva_id: Uuid,
        numero_assento: i32,
    ) -> AppResult<PassengerLink> {
        let link = sqlx::query_as::<_, PassengerLink>(
            r#"
            UPDATE passageiros_reserva
            SET reserva_id = $2, numero_assento = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reserva_id)
        .bind(numero_assento)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    pub async fn set_presence(&self, id: Uuid, presente: Option<bool>) -> AppResult<PassengerLink> {
        let link = sqlx::query_as::<_, PassengerLink>(
            "UPDATE passageiros_reserva SET presente = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(presente)
        .fetch_one(&self.pool)
        .await?;

        Ok(link)
    }

    pub async fn count_links(&self, reserva_id: Uuid) -> AppResult<i64> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM passageiros_reserva WHERE reserva_id = $1")
                .bind(reserva_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Um passageiro só pode aparecer uma vez por excursão em reservas
    /// não canceladas.
    pub async fn passenger_has_active_link(
        &self,
        excursao_id: Uuid,
        passageiro_id: Uuid,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM passageiros_reserva pr
                JOIN reservas r ON r.id = pr.reserva_id
                WHERE r.excursao_id = $1
                  AND r.status <> 'cancelada'
                  AND pr.passageiro_id = $2
            )
            "#,
        )
        .bind(excursao_id)
        .bind(passageiro_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
