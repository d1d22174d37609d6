//! Modelo de Excursão
//!
//! Mapeia a tabela `excursoes`. Uma excursão é o produto de viagem com
//! data, destino e preço; os ônibus pertencem a exatamente uma excursão.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Excursion {
    pub id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub destino: String,
    pub data_saida: DateTime<Utc>,
    pub data_retorno: Option<DateTime<Utc>>,
    pub duracao: Option<String>,
    pub preco: Decimal,
    pub condicoes_pagamento: Option<String>,
    pub inclusoes: Option<String>,
    pub imagem_capa_url: Option<String>,
    pub criado_em: DateTime<Utc>,
}
