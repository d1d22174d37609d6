//! Modelo de Reserva
//!
//! Mapeia as tabelas `reservas` e `passageiros_reserva`. Uma reserva
//! pertence a um único ônibus de uma excursão; os vínculos de passageiro
//! carregam o assento e o estado de presença.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub excursao_id: Uuid,
    pub onibus_id: Uuid,
    pub status: String,
    pub criado_em: DateTime<Utc>,
}

impl Reservation {
    pub fn status_enum(&self) -> ReservationStatus {
        ReservationStatus::parse(&self.status)
    }
}

/// Máquina de estados da reserva: `confirmada` -> `cancelada`, sem volta.
/// Não existe estado "pendente"; a linha só é gravada com os passageiros
/// já persistidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmada,
    Cancelada,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmada => "confirmada",
            Self::Cancelada => "cancelada",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "confirmada" => Self::Confirmada,
            _ => Self::Cancelada,
        }
    }

    /// Única transição permitida: confirmada -> cancelada (terminal).
    pub fn cancel(self) -> AppResult<Self> {
        match self {
            Self::Confirmada => Ok(Self::Cancelada),
            Self::Cancelada => Err(AppError::Conflict(
                "reserva já está cancelada".to_string(),
            )),
        }
    }
}

/// Vínculo passageiro <-> assento dentro de uma reserva.
/// `presente` é tri-estado: `None` = não avaliado, `Some(true/false)` =
/// presença confirmada/ausente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PassengerLink {
    pub id: Uuid,
    pub reserva_id: Uuid,
    pub numero_assento: i32,
    pub passageiro_id: Uuid,
    pub presente: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_one_way() {
        assert_eq!(
            ReservationStatus::Confirmada.cancel().unwrap(),
            ReservationStatus::Cancelada
        );
        assert!(ReservationStatus::Cancelada.cancel().is_err());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ReservationStatus::parse("confirmada"), ReservationStatus::Confirmada);
        assert_eq!(ReservationStatus::parse("cancelada"), ReservationStatus::Cancelada);
        assert_eq!(ReservationStatus::Confirmada.as_str(), "confirmada");
    }
}
