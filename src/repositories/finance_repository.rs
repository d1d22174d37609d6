use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment_plan::{Installment, PaymentPlan};
use crate::utils::errors::{AppError, AppResult};

pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_plan(
        &self,
        reserva_id: Uuid,
        passageiro_id: Uuid,
        excursao_id: Uuid,
        entrada_valor: Decimal,
        parcela_valor: Decimal,
        parcelas_total: i32,
        primeiro_pagamento_data: NaiveDate,
    ) -> AppResult<PaymentPlan> {
        let plan = sqlx::query_as::<_, PaymentPlan>(
            r#"
            INSERT INTO finance_payment_plans
                (id, reserva_id, passageiro_id, excursao_id, entrada_valor,
                 parcela_valor, parcelas_total, primeiro_pagamento_data, status, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'ativo', $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reserva_id)
        .bind(passageiro_id)
        .bind(excursao_id)
        .bind(entrada_valor)
        .bind(parcela_valor)
        .bind(parcelas_total)
        .bind(primeiro_pagamento_data)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn find_plan_by_id(&self, id: Uuid) -> AppResult<Option<PaymentPlan>> {
        let plan =
            sqlx::query_as::<_, PaymentPlan>("SELECT * FROM finance_payment_plans WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(plan)
    }

    pub async fn require_plan(&self, id: Uuid) -> AppResult<PaymentPlan> {
        self.find_plan_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Plano de pagamento não encontrado".to_string()))
    }

    pub async fn find_plan_by_reservation(
        &self,
        reserva_id: Uuid,
        passageiro_id: Uuid,
    ) -> AppResult<Option<PaymentPlan>> {
        let plan = sqlx::query_as::<_, PaymentPlan>(
            r#"
            SELECT * FROM finance_payment_plans
            WHERE reserva_id = $1 AND passageiro_id = $2
            ORDER BY criado_em DESC
            LIMIT 1
            "#,
        )
        .bind(reserva_id)
        .bind(passageiro_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    /// Busca alternativa pela excursão. Sobrevive à migração do
    /// passageiro para outra reserva da mesma excursão.
    pub async fn find_plan_by_excursion(
        &self,
        excursao_id: Uuid,
        passageiro_id: Uuid,
    ) -> AppResult<Option<PaymentPlan>> {
        let plan = sqlx::query_as::<_, PaymentPlan>(
            r#"
            SELECT * FROM finance_payment_plans
            WHERE excursao_id = $1 AND passageiro_id = $2
            ORDER BY criado_em DESC
            LIMIT 1
            "#,
        )
        .bind(excursao_id)
        .bind(passageiro_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn list_plans_by_excursion(&self, excursao_id: Uuid) -> AppResult<Vec<PaymentPlan>> {
        let plans = sqlx::query_as::<_, PaymentPlan>(
            "SELECT * FROM finance_payment_plans WHERE excursao_id = $1 ORDER BY criado_em ASC",
        )
        .bind(excursao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    pub async fn update_plan_totals(
        &self,
        id: Uuid,
        parcela_valor: Decimal,
        parcelas_total: i32,
    ) -> AppResult<PaymentPlan> {
        let plan = sqlx::query_as::<_, PaymentPlan>(
            r#"
            UPDATE finance_payment_plans
            SET parcela_valor = $2, parcelas_total = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(parcela_valor)
        .bind(parcelas_total)
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn insert_installment(
        &self,
        plano_id: Uuid,
        numero: i32,
        vencimento: NaiveDate,
        valor: Decimal,
        status: &str,
    ) -> AppResult<Installment> {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            INSERT INTO finance_installments
                (id, plano_id, numero, vencimento, valor, status, pago_em, metodo)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, NULL)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plano_id)
        .bind(numero)
        .bind(vencimento)
        .bind(valor)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(installment)
    }

    pub async fn list_installments(&self, plano_id: Uuid) -> AppResult<Vec<Installment>> {
        let installments = sqlx::query_as::<_, Installment>(
            "SELECT * FROM finance_installments WHERE plano_id = $1 ORDER BY numero ASC",
        )
        .bind(plano_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }

    pub async fn find_installment(&self, id: Uuid) -> AppResult<Option<Installment>> {
        let installment =
            sqlx::query_as::<_, Installment>("SELECT * FROM finance_installments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(installment)
    }

    pub async fn require_installment(&self, id: Uuid) -> AppResult<Installment> {
        self.find_installment(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parcela não encontrada".to_string()))
    }

    pub async fn max_installment_number(&self, plano_id: Uuid) -> AppResult<i32> {
        let result: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(numero) FROM finance_installments WHERE plano_id = $1")
                .bind(plano_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0.unwrap_or(0))
    }

    pub async fn mark_installment_paid(
        &self,
        id: Uuid,
        pago_em: DateTime<Utc>,
        metodo: &str,
    ) -> AppResult<Installment> {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            UPDATE finance_installments
            SET status = 'pago', pago_em = $2, metodo = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(pago_em)
        .bind(metodo)
        .fetch_one(&self.pool)
        .await?;

        Ok(installment)
    }

    /// Estorno: volta ao status derivado do vencimento e limpa os
    /// campos de pagamento.
    pub async fn revert_installment(&self, id: Uuid, status: &str) -> AppResult<Installment> {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            UPDATE finance_installments
            SET status = $2, pago_em = NULL, metodo = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(installment)
    }

    pub async fn edit_installment(
        &self,
        id: Uuid,
        vencimento: NaiveDate,
        valor: Decimal,
        status: &str,
    ) -> AppResult<Installment> {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            UPDATE finance_installments
            SET vencimento = $2, valor = $3, status = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vencimento)
        .bind(valor)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(installment)
    }
}
