//! Modelo de Plano de Pagamento
//!
//! Mapeia as tabelas `finance_payment_plans` e `finance_installments`.
//! Um plano é entrada + N parcelas mensais; o status de cada parcela é
//! derivado do vencimento, exceto quando marcada como paga manualmente.

use chrono::{DateTime, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentPlan {
    pub id: Uuid,
    pub reserva_id: Uuid,
    pub passageiro_id: Uuid,
    pub excursao_id: Uuid,
    pub entrada_valor: Decimal,
    pub parcela_valor: Decimal,
    pub parcelas_total: i32,
    pub primeiro_pagamento_data: NaiveDate,
    pub status: String,
    pub criado_em: DateTime<Utc>,
}

/// Parcela de um plano. `numero` 0 é a entrada; 1..N são as parcelas
/// regulares, e adições avulsas continuam a sequência além de N.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Installment {
    pub id: Uuid,
    pub plano_id: Uuid,
    pub numero: i32,
    pub vencimento: NaiveDate,
    pub valor: Decimal,
    pub status: String,
    pub pago_em: Option<DateTime<Utc>>,
    pub metodo: Option<String>,
}

impl Installment {
    pub fn status_enum(&self) -> InstallmentStatus {
        InstallmentStatus::parse(&self.status)
    }
}

/// Status da parcela: `pendente` <-> `atrasado` automático pela data;
/// `pago` é manual e só sai por reversão explícita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Pendente,
    Pago,
    Atrasado,
}

impl InstallmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Pago => "pago",
            Self::Atrasado => "atrasado",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "pago" => Self::Pago,
            "atrasado" => Self::Atrasado,
            _ => Self::Pendente,
        }
    }

    /// Deriva o status pela data de vencimento: no passado -> atrasado,
    /// hoje ou futuro -> pendente.
    pub fn from_due_date(due: NaiveDate, today: NaiveDate) -> Self {
        if due < today {
            Self::Atrasado
        } else {
            Self::Pendente
        }
    }

    /// Status efetivo de uma parcela: `pago` permanece pago
    /// independentemente da data; os demais re-derivam do vencimento.
    pub fn effective(current: Self, due: NaiveDate, today: NaiveDate) -> Self {
        if current == Self::Pago {
            Self::Pago
        } else {
            Self::from_due_date(due, today)
        }
    }
}

/// Forma de pagamento registrada ao marcar uma parcela como paga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Dinheiro,
    Cartao,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::Dinheiro => "dinheiro",
            Self::Cartao => "cartao",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "pix" => Ok(Self::Pix),
            "dinheiro" => Ok(Self::Dinheiro),
            "cartao" => Ok(Self::Cartao),
            other => Err(AppError::Validation(format!(
                "forma de pagamento inválida: {}",
                other
            ))),
        }
    }
}

/// Agregados exibidos em toda superfície de progresso do financeiro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub overdue_amount: Decimal,
    pub progress_percent: i32,
    pub has_overdue: bool,
}

impl PlanSummary {
    pub fn empty() -> Self {
        Self {
            total_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            overdue_amount: Decimal::ZERO,
            progress_percent: 0,
            has_overdue: false,
        }
    }

    /// total = Σ valor, pago = Σ valor(status=pago), atrasado = Σ
    /// valor(status=atrasado); percent = round(pago/total*100) com clamp
    /// em [0, 100].
    pub fn from_installments(installments: &[Installment]) -> Self {
        let mut total = Decimal::ZERO;
        let mut paid = Decimal::ZERO;
        let mut overdue = Decimal::ZERO;
        for inst in installments {
            total += inst.valor;
            match inst.status_enum() {
                InstallmentStatus::Pago => paid += inst.valor,
                InstallmentStatus::Atrasado => overdue += inst.valor,
                InstallmentStatus::Pendente => {}
            }
        }
        let percent = if total > Decimal::ZERO {
            ((paid / total) * Decimal::from(100))
                .round()
                .to_i32()
                .unwrap_or(0)
                .clamp(0, 100)
        } else {
            0
        };
        Self {
            total_amount: total,
            paid_amount: paid,
            overdue_amount: overdue,
            progress_percent: percent,
            has_overdue: overdue > Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn installment(numero: i32, valor: i64, status: InstallmentStatus) -> Installment {
        Installment {
            id: Uuid::new_v4(),
            plano_id: Uuid::new_v4(),
            numero,
            vencimento: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            valor: Decimal::from(valor),
            status: status.as_str().to_string(),
            pago_em: None,
            metodo: None,
        }
    }

    #[test]
    fn test_status_derivation_from_due_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let yesterday = today - Duration::days(1);
        let tomorrow = today + Duration::days(1);
        assert_eq!(
            InstallmentStatus::from_due_date(yesterday, today),
            InstallmentStatus::Atrasado
        );
        assert_eq!(
            InstallmentStatus::from_due_date(today, today),
            InstallmentStatus::Pendente
        );
        assert_eq!(
            InstallmentStatus::from_due_date(tomorrow, today),
            InstallmentStatus::Pendente
        );
    }

    #[test]
    fn test_paid_stays_paid_regardless_of_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let long_overdue = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            InstallmentStatus::effective(InstallmentStatus::Pago, long_overdue, today),
            InstallmentStatus::Pago
        );
        assert_eq!(
            InstallmentStatus::effective(InstallmentStatus::Pendente, long_overdue, today),
            InstallmentStatus::Atrasado
        );
    }

    #[test]
    fn test_summary_aggregates() {
        // entrada 100 paga + 3 parcelas de 200 (uma paga, uma atrasada, uma pendente)
        let insts = vec![
            installment(0, 100, InstallmentStatus::Pago),
            installment(1, 200, InstallmentStatus::Pago),
            installment(2, 200, InstallmentStatus::Atrasado),
            installment(3, 200, InstallmentStatus::Pendente),
        ];
        let summary = PlanSummary::from_installments(&insts);
        assert_eq!(summary.total_amount, Decimal::from(700));
        assert_eq!(summary.paid_amount, Decimal::from(300));
        assert_eq!(summary.overdue_amount, Decimal::from(200));
        assert_eq!(summary.progress_percent, 43);
        assert!(summary.has_overdue);
    }

    #[test]
    fn test_summary_empty_plan() {
        let summary = PlanSummary::from_installments(&[]);
        assert_eq!(summary.progress_percent, 0);
        assert!(!summary.has_overdue);
        assert_eq!(summary, PlanSummary::empty());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("pix").unwrap(), PaymentMethod::Pix);
        assert_eq!(PaymentMethod::parse("dinheiro").unwrap(), PaymentMethod::Dinheiro);
        assert_eq!(PaymentMethod::parse("cartao").unwrap(), PaymentMethod::Cartao);
        assert!(PaymentMethod::parse("cheque").is_err());
    }
}
