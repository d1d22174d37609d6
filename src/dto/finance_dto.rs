use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payment_plan::{Installment, PaymentPlan, PlanSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanRequest {
    pub reserva_id: Uuid,
    pub passageiro_id: Uuid,
    /// Zero = plano sem entrada.
    pub entrada_valor: Decimal,
    pub parcela_valor: Decimal,
    /// Coagido para no mínimo 1.
    pub parcelas_total: i32,
    pub primeiro_pagamento_data: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    /// pix, dinheiro ou cartao.
    pub metodo: String,
}

#[derive(Debug, Deserialize)]
pub struct EditInstallmentRequest {
    pub vencimento: NaiveDate,
    pub valor: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AddInstallmentRequest {
    pub vencimento: NaiveDate,
    pub valor: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct PlanLookupQuery {
    pub reserva_id: Option<Uuid>,
    pub excursao_id: Option<Uuid>,
    pub passageiro_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plano: PaymentPlan,
    pub parcelas: Vec<Installment>,
    pub resumo: PlanSummary,
}

#[derive(Debug, Deserialize)]
pub struct FinanceBookingsQuery {
    pub excursao_id: Option<Uuid>,
}

/// Linha da listagem financeira: um passageiro de uma reserva ativa com
/// o resumo do seu plano, quando existe.
#[derive(Debug, Serialize)]
pub struct FinanceBookingView {
    pub reserva_id: Uuid,
    pub excursao_id: Uuid,
    pub onibus_id: Uuid,
    pub numero_assento: i32,
    pub passageiro: crate::models::passenger::Passenger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plano_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumo: Option<PlanSummary>,
}
