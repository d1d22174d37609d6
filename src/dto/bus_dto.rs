use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// A capacidade só aceita os modelos da frota (30, 46, 50 ou 60 lugares);
/// a checagem fina acontece via `BusCapacity::from_total`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBusRequest {
    pub excursao_id: Uuid,
    #[validate(length(min = 1, message = "O nome do ônibus é obrigatório"))]
    pub nome: String,
    pub identificacao: Option<String>,
    pub total_assentos: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBusRequest {
    pub nome: Option<String>,
    pub identificacao: Option<String>,
    pub excursao_id: Option<Uuid>,
}
