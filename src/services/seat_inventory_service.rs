//! Inventário de assentos
//!
//! O mapa de assentos combina o cache da tabela `assentos_onibus` com a
//! ocupação derivada dos vínculos de reservas ativas. Em divergência, o
//! vínculo vence: assento com passageiro ativo aparece ocupado mesmo com
//! cache desatualizado, e vice-versa.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::passenger::Passenger;
use crate::models::reservation::PassengerLink;
use crate::models::seat::{OccupantInfo, SeatRow, SeatStatus, SeatView};
use crate::repositories::{PassengerRepository, ReservationRepository, SeatRepository};
use crate::utils::errors::{AppError, AppResult};

pub struct SeatInventoryService {
    seats: SeatRepository,
    reservations: ReservationRepository,
    passengers: PassengerRepository,
}

impl SeatInventoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            seats: SeatRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            passengers: PassengerRepository::new(pool),
        }
    }

    pub async fn seat_map(&self, onibus_id: Uuid) -> AppResult<Vec<SeatView>> {
        let seats = self.seats.list_by_bus(onibus_id).await?;
        let links = self.reservations.active_links_by_bus(onibus_id).await?;

        let passenger_ids: Vec<Uuid> = links.iter().map(|l| l.passageiro_id).collect();
        let passengers = self.passengers.find_by_ids(&passenger_ids).await?;

        Ok(merge_seat_views(&seats, &links, &passengers))
    }

    /// Garante que o assento existe e está livre segundo os vínculos.
    pub async fn ensure_available(&self, onibus_id: Uuid, numero_assento: i32) -> AppResult<()> {
        if !self.seats.seat_exists(onibus_id, numero_assento).await? {
            return Err(AppError::Validation(format!(
                "Assento {} não existe neste ônibus",
                numero_assento
            )));
        }

        let links = self.reservations.active_links_by_bus(onibus_id).await?;
        if links.iter().any(|l| l.numero_assento == numero_assento) {
            return Err(AppError::Conflict(format!(
                "Assento {} já está ocupado",
                numero_assento
            )));
        }

        Ok(())
    }

    pub async fn occupy(&self, onibus_id: Uuid, numero_assento: i32) -> AppResult<()> {
        self.seats
            .set_status(onibus_id, numero_assento, SeatStatus::Ocupado)
            .await
    }

    pub async fn release(&self, onibus_id: Uuid, numero_assento: i32) -> AppResult<()> {
        self.seats
            .set_status(onibus_id, numero_assento, SeatStatus::Disponivel)
            .await
    }
}

/// Combina cache e vínculos em uma visão por assento. Os vínculos são a
/// fonte de verdade da ocupação.
pub fn merge_seat_views(
    seats: &[SeatRow],
    links: &[PassengerLink],
    passengers: &[Passenger],
) -> Vec<SeatView> {
    let by_id: HashMap<Uuid, &Passenger> = passengers.iter().map(|p| (p.id, p)).collect();
    let by_seat: HashMap<i32, &PassengerLink> =
        links.iter().map(|l| (l.numero_assento, l)).collect();

    seats
        .iter()
        .map(|seat| {
            let occupant = by_seat.get(&seat.numero_assento).and_then(|link| {
                by_id.get(&link.passageiro_id).map(|p| OccupantInfo {
                    nome: p.nome.clone(),
                    telefone: p.telefone.clone(),
                    data_nascimento: p.data_nascimento,
                })
            });
            let status = if by_seat.contains_key(&seat.numero_assento) {
                SeatStatus::Ocupado
            } else {
                SeatStatus::Disponivel
            };
            SeatView {
                numero: seat.numero_assento,
                status,
                occupant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seat(numero: i32, status: &str) -> SeatRow {
        SeatRow {
            onibus_id: Uuid::nil(),
            numero_assento: numero,
            status: status.to_string(),
        }
    }

    fn link(numero: i32, passageiro_id: Uuid) -> PassengerLink {
        PassengerLink {
            id: Uuid::new_v4(),
            reserva_id: Uuid::new_v4(),
            numero_assento: numero,
            passageiro_id,
            presente: None,
        }
    }

    fn passenger(id: Uuid, nome: &str) -> Passenger {
        Passenger {
            id,
            nome: nome.to_string(),
            cpf: "52998224725".to_string(),
            telefone: "11999990000".to_string(),
            data_nascimento: None,
            cpf_aleatorio: false,
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn test_links_override_stale_cache() {
        let pid = Uuid::new_v4();
        // cache diz ocupado no 1 e livre no 2; vínculo real está no 2
        let seats = vec![seat(1, "ocupado"), seat(2, "disponivel")];
        let links = vec![link(2, pid)];
        let passengers = vec![passenger(pid, "MARIA SILVA")];

        let views = merge_seat_views(&seats, &links, &passengers);
        assert_eq!(views[0].status, SeatStatus::Disponivel);
        assert!(views[0].occupant.is_none());
        assert_eq!(views[1].status, SeatStatus::Ocupado);
        assert_eq!(views[1].occupant.as_ref().unwrap().nome, "MARIA SILVA");
    }

    #[test]
    fn test_occupied_without_passenger_record_has_no_occupant() {
        let seats = vec![seat(1, "disponivel")];
        let links = vec![link(1, Uuid::new_v4())];

        let views = merge_seat_views(&seats, &links, &[]);
        assert_eq!(views[0].status, SeatStatus::Ocupado);
        assert!(views[0].occupant.is_none());
    }

    #[test]
    fn test_all_free_bus() {
        let seats = vec![seat(1, "disponivel"), seat(2, "disponivel")];
        let views = merge_seat_views(&seats, &[], &[]);
        assert!(views.iter().all(|v| v.status == SeatStatus::Disponivel));
    }
}
