//! Modelo de Ônibus
//!
//! Mapeia a tabela `onibus`. A capacidade é fixada na criação a partir do
//! conjunto fechado de layouts de assentos suportados pela operação.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bus {
    pub id: Uuid,
    pub excursao_id: Uuid,
    pub nome: String,
    pub identificacao: Option<String>,
    pub total_assentos: i32,
    pub criado_em: DateTime<Utc>,
}

/// Capacidades suportadas: micro-ônibus de 30 lugares e ônibus de
/// 46/50/60. Determina os assentos gerados na criação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusCapacity {
    Micro30,
    Onibus46,
    Onibus50,
    Onibus60,
}

impl BusCapacity {
    pub fn from_total(total: i32) -> Option<Self> {
        match total {
            30 => Some(Self::Micro30),
            46 => Some(Self::Onibus46),
            50 => Some(Self::Onibus50),
            60 => Some(Self::Onibus60),
            _ => None,
        }
    }

    pub fn total_seats(self) -> i32 {
        match self {
            Self::Micro30 => 30,
            Self::Onibus46 => 46,
            Self::Onibus50 => 50,
            Self::Onibus60 => 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_closed_set() {
        assert_eq!(BusCapacity::from_total(30), Some(BusCapacity::Micro30));
        assert_eq!(BusCapacity::from_total(46), Some(BusCapacity::Onibus46));
        assert_eq!(BusCapacity::from_total(50), Some(BusCapacity::Onibus50));
        assert_eq!(BusCapacity::from_total(60), Some(BusCapacity::Onibus60));
        assert_eq!(BusCapacity::from_total(44), None);
        assert_eq!(BusCapacity::from_total(0), None);
    }

    #[test]
    fn test_capacity_roundtrip() {
        for total in [30, 46, 50, 60] {
            let cap = BusCapacity::from_total(total).unwrap();
            assert_eq!(cap.total_seats(), total);
        }
    }
}
