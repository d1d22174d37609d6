//! Motor de reservas
//!
//! Criação multi-passageiro com compensação, cancelamento com liberação
//! de assentos, remoção e migração de passageiros entre assentos e
//! ônibus. A reserva nasce `confirmada`; não existe estado intermediário.

use std::collections::HashSet;

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reservation_dto::{
    BusAvailabilityView, CreateReservationRequest, MovePassengerRequest,
    ReservationDetailResponse, ReservationPassengerView, SeatSummary,
};
use crate::models::passenger::Passenger;
use crate::models::reservation::{PassengerLink, Reservation, ReservationStatus};
use crate::repositories::{
    BusRepository, ExcursionRepository, PassengerRepository, ReservationRepository,
};
use crate::services::passenger_registry::PassengerRegistry;
use crate::services::seat_inventory_service::SeatInventoryService;
use crate::services::webhook_service::WebhookService;
use crate::utils::errors::{AppError, AppResult};

pub struct ReservationService {
    reservations: ReservationRepository,
    excursions: ExcursionRepository,
    buses: BusRepository,
    passengers: PassengerRepository,
    registry: PassengerRegistry,
    inventory: SeatInventoryService,
    webhooks: WebhookService,
}

impl ReservationService {
    pub fn new(pool: PgPool, webhooks: WebhookService) -> Self {
        Self {
            reservations: ReservationRepository::new(pool.clone()),
            excursions: ExcursionRepository::new(pool.clone()),
            buses: BusRepository::new(pool.clone()),
            passengers: PassengerRepository::new(pool.clone()),
            registry: PassengerRegistry::new(pool.clone()),
            inventory: SeatInventoryService::new(pool),
            webhooks,
        }
    }

    /// Cria uma reserva com todos os passageiros informados. Se algum
    /// vínculo falhar no meio, os vínculos já gravados e a própria
    /// reserva são removidos antes de propagar o erro.
    pub async fn create(
        &self,
        request: CreateReservationRequest,
    ) -> AppResult<ReservationDetailResponse> {
        let excursion = self.excursions.require(request.excursao_id).await?;
        let bus = self.buses.require(request.onibus_id).await?;
        if bus.excursao_id != excursion.id {
            return Err(AppError::Validation(
                "O ônibus não pertence a esta excursão".to_string(),
            ));
        }

        let mut requested_seats = HashSet::new();
        for payload in &request.passageiros {
            if !requested_seats.insert(payload.numero_assento) {
                return Err(AppError::Validation(format!(
                    "Assento {} repetido na mesma reserva",
                    payload.numero_assento
                )));
            }
            self.inventory
                .ensure_available(bus.id, payload.numero_assento)
                .await?;
        }

        // Cadastro (ou reaproveitamento) dos passageiros antes de gravar
        // a reserva, com checagem de duplicidade na excursão. CPFs
        // repetidos na própria requisição resolvem para o mesmo
        // passageiro e também contam como duplicidade.
        let mut resolved: Vec<(Passenger, i32)> = Vec::with_capacity(request.passageiros.len());
        let mut seen_passengers = HashSet::new();
        for payload in &request.passageiros {
            let passenger = self
                .registry
                .upsert_by_cpf(
                    &payload.nome,
                    payload.cpf.as_deref(),
                    &payload.telefone,
                    payload.data_nascimento.as_deref(),
                )
                .await?;

            if !seen_passengers.insert(passenger.id) {
                return Err(AppError::DuplicateBooking(format!(
                    "{} aparece mais de uma vez na mesma reserva",
                    passenger.nome
                )));
            }

            if self
                .reservations
                .passenger_has_active_link(excursion.id, passenger.id)
                .await?
            {
                return Err(AppError::DuplicateBooking(format!(
                    "{} já possui reserva ativa nesta excursão",
                    passenger.nome
                )));
            }
            resolved.push((passenger, payload.numero_assento));
        }

        let reservation = self.reservations.create(excursion.id, bus.id).await?;

        let mut links: Vec<PassengerLink> = Vec::with_capacity(resolved.len());
        for (passenger, numero_assento) in &resolved {
            match self
                .reservations
                .insert_link(reservation.id, *numero_assento, passenger.id)
                .await
            {
                Ok(link) => links.push(link),
                Err(err) => {
                    self.compensate_failed_create(reservation.id).await;
                    return Err(err);
                }
            }
        }

        for (_, numero_assento) in &resolved {
            self.inventory.occupy(bus.id, *numero_assento).await?;
        }

        tracing::info!(
            "Reserva {} criada: excursão {}, {} passageiro(s)",
            reservation.id,
            excursion.nome,
            links.len()
        );

        self.webhooks.notify_reservation(json!({
            "evento": "reserva_criada",
            "reserva_id": reservation.id,
            "excursao_id": excursion.id,
            "excursao_nome": excursion.nome,
            "onibus_id": bus.id,
            "passageiros": resolved
                .iter()
                .map(|(p, assento)| json!({
                    "nome": p.nome,
                    "telefone": p.telefone,
                    "assento": assento,
                }))
                .collect::<Vec<_>>(),
        }));
        self.emit_seat_summary(bus.id).await;

        Ok(build_detail(
            reservation,
            links,
            resolved.into_iter().map(|(p, _)| p).collect(),
        ))
    }

    async fn compensate_failed_create(&self, reserva_id: Uuid) {
        if let Err(err) = self.reservations.delete_links_by_reservation(reserva_id).await {
            tracing::error!(
                "Compensação incompleta: vínculos da reserva {} não removidos: {}",
                reserva_id,
                err
            );
            return;
        }
        if let Err(err) = self.reservations.delete(reserva_id).await {
            tracing::error!(
                "Compensação incompleta: reserva {} não removida: {}",
                reserva_id,
                err
            );
        }
    }

    /// Cancela a reserva e libera todos os assentos no cache.
    pub async fn cancel(&self, reserva_id: Uuid) -> AppResult<Reservation> {
        let reservation = self.reservations.require(reserva_id).await?;
        let next = reservation.status_enum().cancel()?;

        let links = self.reservations.links_by_reservation(reserva_id).await?;
        let updated = self.reservations.set_status(reserva_id, next).await?;

        for link in &links {
            self.inventory
                .release(reservation.onibus_id, link.numero_assento)
                .await?;
        }

        tracing::info!("Reserva {} cancelada", reserva_id);
        self.emit_seat_summary(reservation.onibus_id).await;

        Ok(updated)
    }

    /// Remove um passageiro da reserva e libera o assento. A reserva
    /// permanece, mesmo vazia; cancelar é uma decisão explícita.
    pub async fn remove_passenger(&self, vinculo_id: Uuid) -> AppResult<()> {
        let link = self.reservations.require_link(vinculo_id).await?;
        let reservation = self.reservations.require(link.reserva_id).await?;

        self.reservations.delete_link(vinculo_id).await?;
        self.inventory
            .release(reservation.onibus_id, link.numero_assento)
            .await?;

        self.emit_seat_summary(reservation.onibus_id).await;
        Ok(())
    }

    /// Move um passageiro para outro assento, no mesmo ônibus ou em
    /// outro ônibus da mesma excursão. Troca de ônibus gera uma nova
    /// reserva no destino; a origem esvaziada é cancelada.
    pub async fn move_passenger(
        &self,
        vinculo_id: Uuid,
        request: MovePassengerRequest,
    ) -> AppResult<PassengerLink> {
        let link = self.reservations.require_link(vinculo_id).await?;
        let source = self.reservations.require(link.reserva_id).await?;
        if source.status_enum() != ReservationStatus::Confirmada {
            return Err(AppError::Conflict(
                "Não é possível mover passageiro de reserva cancelada".to_string(),
            ));
        }

        let target_bus_id = request.novo_onibus_id.unwrap_or(source.onibus_id);
        let same_bus = target_bus_id == source.onibus_id;

        if same_bus && request.novo_assento == link.numero_assento {
            return Ok(link);
        }

        let target_bus = self.buses.require(target_bus_id).await?;
        if target_bus.excursao_id != source.excursao_id {
            return Err(AppError::Validation(
                "O ônibus de destino pertence a outra excursão".to_string(),
            ));
        }

        self.inventory
            .ensure_available(target_bus.id, request.novo_assento)
            .await?;

        let updated = if same_bus {
            self.reservations
                .update_link_seat(vinculo_id, request.novo_assento)
                .await?
        } else {
            let destination = self
                .reservations
                .create(source.excursao_id, target_bus.id)
                .await?;
            let moved = self
                .reservations
                .update_link_reservation_and_seat(vinculo_id, destination.id, request.novo_assento)
                .await?;

            if self.reservations.count_links(source.id).await? == 0 {
                self.reservations
                    .set_status(source.id, ReservationStatus::Cancelada)
                    .await?;
                tracing::info!("Reserva de origem {} esvaziada e cancelada", source.id);
            }
            moved
        };

        self.inventory
            .release(source.onibus_id, link.numero_assento)
            .await?;
        self.inventory
            .occupy(target_bus.id, request.novo_assento)
            .await?;

        self.emit_seat_summary(source.onibus_id).await;
        if !same_bus {
            self.emit_seat_summary(target_bus.id).await;
        }

        Ok(updated)
    }

    /// Marca presença no embarque. Tri-estado: `null` volta o vínculo
    /// ao estado não avaliado.
    pub async fn set_presence(
        &self,
        vinculo_id: Uuid,
        presente: Option<bool>,
    ) -> AppResult<PassengerLink> {
        self.reservations.require_link(vinculo_id).await?;
        self.reservations.set_presence(vinculo_id, presente).await
    }

    pub async fn detail(&self, reserva_id: Uuid) -> AppResult<ReservationDetailResponse> {
        let reservation = self.reservations.require(reserva_id).await?;
        let links = self.reservations.links_by_reservation(reserva_id).await?;
        let ids: Vec<Uuid> = links.iter().map(|l| l.passageiro_id).collect();
        let passengers = self.passengers.find_by_ids(&ids).await?;

        Ok(build_detail(reservation, links, passengers))
    }

    pub async fn list_active(
        &self,
        excursao_id: Option<Uuid>,
        onibus_id: Option<Uuid>,
    ) -> AppResult<Vec<ReservationDetailResponse>> {
        let reservations = self.reservations.list_active(excursao_id, onibus_id).await?;

        let mut details = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let links = self.reservations.links_by_reservation(reservation.id).await?;
            let ids: Vec<Uuid> = links.iter().map(|l| l.passageiro_id).collect();
            let passengers = self.passengers.find_by_ids(&ids).await?;
            details.push(build_detail(reservation, links, passengers));
        }

        Ok(details)
    }

    /// Ônibus da excursão com ocupação derivada, para a listagem
    /// administrativa.
    pub async fn buses_with_availability(
        &self,
        excursao_id: Uuid,
    ) -> AppResult<Vec<BusAvailabilityView>> {
        self.excursions.require(excursao_id).await?;
        let buses = self.buses.find_by_excursion(excursao_id).await?;

        let mut views = Vec::with_capacity(buses.len());
        for bus in buses {
            let ocupados = self.reservations.active_links_by_bus(bus.id).await?.len() as i32;
            let disponiveis = bus.total_assentos - ocupados;
            views.push(BusAvailabilityView {
                onibus: bus,
                ocupados,
                disponiveis,
            });
        }

        Ok(views)
    }

    pub async fn seat_summary(&self, onibus_id: Uuid) -> AppResult<SeatSummary> {
        let bus = self.buses.require(onibus_id).await?;
        let links = self.reservations.active_links_by_bus(onibus_id).await?;
        let ocupados = links.len() as i32;

        Ok(SeatSummary {
            total: bus.total_assentos,
            ocupados,
            disponiveis: bus.total_assentos - ocupados,
        })
    }

    async fn emit_seat_summary(&self, onibus_id: Uuid) {
        match self.seat_summary(onibus_id).await {
            Ok(summary) => self.webhooks.notify_seat_summary(json!({
                "evento": "ocupacao_atualizada",
                "onibus_id": onibus_id,
                "total": summary.total,
                "ocupados": summary.ocupados,
                "disponiveis": summary.disponiveis,
            })),
            Err(err) => {
                tracing::warn!("Resumo de assentos do ônibus {} falhou: {}", onibus_id, err)
            }
        }
    }
}

fn build_detail(
    reservation: Reservation,
    links: Vec<PassengerLink>,
    passengers: Vec<Passenger>,
) -> ReservationDetailResponse {
    let views = links
        .into_iter()
        .map(|link| {
            let passageiro = passengers
                .iter()
                .find(|p| p.id == link.passageiro_id)
                .cloned();
            (link, passageiro)
        })
        .filter_map(|(link, passageiro)| {
            passageiro.map(|passageiro| ReservationPassengerView {
                vinculo_id: link.id,
                numero_assento: link.numero_assento,
                presente: link.presente,
                passageiro,
            })
        })
        .collect();

    ReservationDetailResponse {
        reserva: reservation,
        passageiros: views,
    }
}
