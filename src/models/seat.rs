//! Modelo de Assento
//!
//! Mapeia a tabela `assentos_onibus`. O status do assento é um cache
//! desnormalizado: a ocupação autoritativa é derivada dos vínculos de
//! passageiros em reservas ativas, e o cache é atualizado a cada mutação
//! de vínculo.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct SeatRow {
    pub onibus_id: Uuid,
    pub numero_assento: i32,
    pub status: String,
}

/// Status do assento no cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Disponivel,
    Ocupado,
}

impl SeatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disponivel => "disponivel",
            Self::Ocupado => "ocupado",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "ocupado" => Self::Ocupado,
            _ => Self::Disponivel,
        }
    }
}

/// Dados do ocupante exibidos no mapa de assentos
#[derive(Debug, Clone, Serialize)]
pub struct OccupantInfo {
    pub nome: String,
    pub telefone: String,
    pub data_nascimento: Option<chrono::NaiveDate>,
}

/// Visão consolidada de um assento: cache + ocupação derivada dos vínculos
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub numero: i32,
    pub status: SeatStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupant: Option<OccupantInfo>,
}
