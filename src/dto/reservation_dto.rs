use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bus::Bus;
use crate::models::passenger::Passenger;
use crate::models::reservation::Reservation;

/// Passageiro de uma nova reserva. CPF ausente ou vazio dispara a
/// geração de um CPF aleatório válido marcado como provisório.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationPassengerPayload {
    #[validate(length(min = 1, message = "O nome do passageiro é obrigatório"))]
    pub nome: String,
    pub cpf: Option<String>,
    #[validate(length(min = 1, message = "O telefone é obrigatório"))]
    pub telefone: String,
    /// Formato brasileiro (dd/mm/aaaa); inválido é descartado sem erro.
    pub data_nascimento: Option<String>,
    pub numero_assento: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub excursao_id: Uuid,
    pub onibus_id: Uuid,
    #[validate(length(min = 1, message = "A reserva precisa de pelo menos um passageiro"))]
    pub passageiros: Vec<ReservationPassengerPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MovePassengerRequest {
    /// Ausente = permanece no mesmo ônibus, só troca de assento.
    pub novo_onibus_id: Option<Uuid>,
    pub novo_assento: i32,
}

#[derive(Debug, Deserialize)]
pub struct PresenceRequest {
    /// `null` volta o vínculo ao estado não avaliado.
    pub presente: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ReservationPassengerView {
    pub vinculo_id: Uuid,
    pub numero_assento: i32,
    pub presente: Option<bool>,
    pub passageiro: Passenger,
}

#[derive(Debug, Serialize)]
pub struct ReservationDetailResponse {
    #[serde(flatten)]
    pub reserva: Reservation,
    pub passageiros: Vec<ReservationPassengerView>,
}

#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    pub excursao_id: Option<Uuid>,
    pub onibus_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SeatSummary {
    pub total: i32,
    pub ocupados: i32,
    pub disponiveis: i32,
}

/// Ônibus de uma excursão com contagem de ocupação derivada dos
/// vínculos ativos.
#[derive(Debug, Serialize)]
pub struct BusAvailabilityView {
    #[serde(flatten)]
    pub onibus: Bus,
    pub ocupados: i32,
    pub disponiveis: i32,
}
