//! Modelo de Passageiro
//!
//! Mapeia a tabela `passageiros`. A identidade é o CPF (11 dígitos, sem
//! pontuação); o mesmo passageiro pode aparecer em reservas de excursões
//! diferentes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Passenger {
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub telefone: String,
    pub data_nascimento: Option<NaiveDate>,
    pub cpf_aleatorio: bool,
    pub criado_em: DateTime<Utc>,
}
