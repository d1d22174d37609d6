use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePassengerRequest {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    /// Data de nascimento no formato brasileiro (dd/mm/aaaa).
    pub data_nascimento: Option<String>,
}
