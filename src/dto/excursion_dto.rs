use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExcursionRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: String,
    pub descricao: Option<String>,
    #[validate(length(min = 1, message = "O destino é obrigatório"))]
    pub destino: String,
    pub data_saida: DateTime<Utc>,
    pub data_retorno: Option<DateTime<Utc>>,
    pub duracao: Option<String>,
    pub preco: Decimal,
    pub condicoes_pagamento: Option<String>,
    pub inclusoes: Option<String>,
    pub imagem_capa_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExcursionRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub destino: Option<String>,
    pub data_saida: Option<DateTime<Utc>>,
    pub data_retorno: Option<DateTime<Utc>>,
    pub duracao: Option<String>,
    pub preco: Option<Decimal>,
    pub condicoes_pagamento: Option<String>,
    pub inclusoes: Option<String>,
    pub imagem_capa_url: Option<String>,
}
