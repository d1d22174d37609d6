//! Testes de fluxo contra um banco real.
//!
//! Rodam apenas com `DATABASE_URL` apontando para um Postgres com as
//! migrações aplicadas: `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use excursao_booking::config::EnvironmentConfig;
use excursao_booking::dto::finance_dto::{
    AddInstallmentRequest, CreatePlanRequest, EditInstallmentRequest, PlanLookupQuery,
};
use excursao_booking::dto::reservation_dto::{
    CreateReservationRequest, MovePassengerRequest, ReservationPassengerPayload,
};
use excursao_booking::models::seat::SeatStatus;
use excursao_booking::repositories::{
    BusRepository, ExcursionRepository, ReservationRepository, SeatRepository,
};
use excursao_booking::services::{
    PaymentPlanService, ReservationService, SeatInventoryService, WebhookService,
};
use excursao_booking::utils::cpf::generate_random_cpf;
use excursao_booking::utils::dates::today_sao_paulo;
use excursao_booking::utils::errors::AppError;

async fn test_pool() -> PgPool {
    excursao_booking::database::create_pool(None)
        .await
        .expect("DATABASE_URL deve apontar para o banco de testes")
}

fn services(pool: &PgPool) -> (ReservationService, PaymentPlanService) {
    let config = EnvironmentConfig::from_env();
    let webhooks = WebhookService::new(reqwest::Client::new(), &config);
    (
        ReservationService::new(pool.clone(), webhooks.clone()),
        PaymentPlanService::new(
            pool.clone(),
            WebhookService::new(reqwest::Client::new(), &config),
        ),
    )
}

async fn setup_excursion_with_buses(pool: &PgPool, bus_count: usize) -> (Uuid, Vec<Uuid>) {
    let excursions = ExcursionRepository::new(pool.clone());
    let buses = BusRepository::new(pool.clone());
    let seats = SeatRepository::new(pool.clone());

    let excursion = excursions
        .create(
            format!("Excursão de teste {}", Uuid::new_v4()),
            None,
            "Canoa Quebrada".to_string(),
            Utc::now() + Duration::days(30),
            None,
            None,
            Decimal::new(45000, 2),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let mut bus_ids = Vec::new();
    for i in 0..bus_count {
        let bus = buses
            .create(excursion.id, format!("Ônibus {}", i + 1), None, 46)
            .await
            .unwrap();
        seats.seed_seats(bus.id, 46).await.unwrap();
        bus_ids.push(bus.id);
    }

    (excursion.id, bus_ids)
}

fn payload(nome: &str, assento: i32) -> ReservationPassengerPayload {
    ReservationPassengerPayload {
        nome: nome.to_string(),
        cpf: Some(generate_random_cpf()),
        telefone: "(88) 99423-5525".to_string(),
        data_nascimento: Some("15/03/1990".to_string()),
        numero_assento: assento,
    }
}

#[tokio::test]
#[ignore]
async fn duplicate_passenger_in_excursion_is_rejected() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);

    let first = payload("Maria Silva", 1);
    reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![first.clone()],
        })
        .await
        .unwrap();

    // mesmo CPF, outro assento
    let mut second = first;
    second.numero_assento = 2;
    let err = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![second],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateBooking(_)));
}

#[tokio::test]
#[ignore]
async fn duplicate_passenger_within_single_request_is_rejected() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);

    // mesmo CPF duas vezes na mesma requisição, assentos distintos
    let first = payload("Maria Silva", 1);
    let mut second = first.clone();
    second.numero_assento = 2;

    let err = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![first, second],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateBooking(_)));

    // nada foi gravado: a checagem acontece antes da reserva
    let active = ReservationRepository::new(pool.clone())
        .list_active(Some(excursao_id), None)
        .await
        .unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
#[ignore]
async fn failed_link_insert_leaves_no_reservation_behind() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);
    let inventory = SeatInventoryService::new(pool.clone());

    // trigger que recusa o assento 13: o segundo vínculo da reserva
    // falha depois do primeiro já ter sido gravado
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION recusa_assento_treze() RETURNS trigger AS $$
        BEGIN
            IF NEW.numero_assento = 13 THEN
                RAISE EXCEPTION 'assento 13 recusado';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_recusa_assento_treze BEFORE INSERT ON passageiros_reserva \
         FOR EACH ROW EXECUTE FUNCTION recusa_assento_treze()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 12), payload("José Souza", 13)],
        })
        .await;

    sqlx::query("DROP TRIGGER trg_recusa_assento_treze ON passageiros_reserva")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DROP FUNCTION recusa_assento_treze()")
        .execute(&pool)
        .await
        .unwrap();

    assert!(result.is_err());

    // a compensação removeu o vínculo já gravado e a própria reserva
    let active = ReservationRepository::new(pool.clone())
        .list_active(Some(excursao_id), None)
        .await
        .unwrap();
    assert!(active.is_empty());

    let map = inventory.seat_map(bus_ids[0]).await.unwrap();
    for seat in map {
        assert_eq!(seat.status, SeatStatus::Disponivel, "assento {}", seat.numero);
    }
}

#[tokio::test]
#[ignore]
async fn occupied_seat_is_rejected() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);

    reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 5)],
        })
        .await
        .unwrap();

    let err = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("José Souza", 5)],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn cancel_releases_all_seats() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);
    let inventory = SeatInventoryService::new(pool.clone());

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 10), payload("José Souza", 11)],
        })
        .await
        .unwrap();

    reservations.cancel(detail.reserva.id).await.unwrap();

    let map = inventory.seat_map(bus_ids[0]).await.unwrap();
    for seat in map {
        assert_eq!(seat.status, SeatStatus::Disponivel, "assento {}", seat.numero);
    }

    // segundo cancelamento falha: transição terminal
    assert!(reservations.cancel(detail.reserva.id).await.is_err());
}

#[tokio::test]
#[ignore]
async fn removing_passenger_releases_seat_but_keeps_reservation() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, _) = services(&pool);
    let inventory = SeatInventoryService::new(pool.clone());

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 1)],
        })
        .await
        .unwrap();

    let vinculo_id = detail.passageiros[0].vinculo_id;
    reservations.remove_passenger(vinculo_id).await.unwrap();

    let refreshed = reservations.detail(detail.reserva.id).await.unwrap();
    assert_eq!(refreshed.reserva.status, "confirmada");
    assert!(refreshed.passageiros.is_empty());

    let map = inventory.seat_map(bus_ids[0]).await.unwrap();
    assert_eq!(map[0].status, SeatStatus::Disponivel);
}

#[tokio::test]
#[ignore]
async fn cross_bus_move_keeps_plan_reachable_by_excursion() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 2).await;
    let (reservations, finance) = services(&pool);

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 1)],
        })
        .await
        .unwrap();
    let passageiro_id = detail.passageiros[0].passageiro.id;

    finance
        .create_plan(CreatePlanRequest {
            reserva_id: detail.reserva.id,
            passageiro_id,
            entrada_valor: Decimal::new(10000, 2),
            parcela_valor: Decimal::new(11666, 2),
            parcelas_total: 3,
            primeiro_pagamento_data: today_sao_paulo() + Duration::days(30),
        })
        .await
        .unwrap();

    let moved = reservations
        .move_passenger(
            detail.passageiros[0].vinculo_id,
            MovePassengerRequest {
                novo_onibus_id: Some(bus_ids[1]),
                novo_assento: 7,
            },
        )
        .await
        .unwrap();
    assert_ne!(moved.reserva_id, detail.reserva.id);
    assert_eq!(moved.numero_assento, 7);

    // a reserva de origem esvaziada foi cancelada
    let source = reservations.detail(detail.reserva.id).await.unwrap();
    assert_eq!(source.reserva.status, "cancelada");

    // o plano some na busca pela reserva antiga, mas segue acessível
    // pela excursão
    let by_reservation = finance
        .find_plan(PlanLookupQuery {
            reserva_id: Some(detail.reserva.id),
            excursao_id: None,
            passageiro_id,
        })
        .await
        .unwrap();
    assert!(by_reservation.is_some(), "lookup direto pela reserva antiga ainda encontra o plano");

    let by_excursion = finance
        .find_plan(PlanLookupQuery {
            reserva_id: Some(moved.reserva_id),
            excursao_id: Some(excursao_id),
            passageiro_id,
        })
        .await
        .unwrap()
        .expect("plano deve ser encontrado via excursão após a migração");
    assert_eq!(by_excursion.parcelas.len(), 4);
}

#[tokio::test]
#[ignore]
async fn mark_paid_updates_summary() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, finance) = services(&pool);

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 1)],
        })
        .await
        .unwrap();
    let passageiro_id = detail.passageiros[0].passageiro.id;

    let plan = finance
        .create_plan(CreatePlanRequest {
            reserva_id: detail.reserva.id,
            passageiro_id,
            entrada_valor: Decimal::new(10000, 2),
            parcela_valor: Decimal::new(20000, 2),
            parcelas_total: 2,
            primeiro_pagamento_data: today_sao_paulo() + Duration::days(30),
        })
        .await
        .unwrap();
    assert_eq!(plan.parcelas.len(), 3);
    assert_eq!(plan.resumo.progress_percent, 0);

    let entrada = plan.parcelas.iter().find(|p| p.numero == 0).unwrap();
    let paid = finance.mark_paid(entrada.id, "pix").await.unwrap();
    assert_eq!(paid.status, "pago");
    assert_eq!(paid.metodo.as_deref(), Some("pix"));

    // pagar duas vezes é conflito
    assert!(finance.mark_paid(entrada.id, "pix").await.is_err());

    let refreshed = finance.plan_by_id(plan.plano.id).await.unwrap();
    assert_eq!(refreshed.resumo.paid_amount, Decimal::new(10000, 2));
    assert_eq!(refreshed.resumo.progress_percent, 20);

    // estorno volta ao status derivado do vencimento (hoje -> pendente)
    let reverted = finance.revert_paid(entrada.id).await.unwrap();
    assert_eq!(reverted.status, "pendente");
    assert!(reverted.pago_em.is_none());
}

#[tokio::test]
#[ignore]
async fn paid_installment_cannot_be_edited() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, finance) = services(&pool);

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 1)],
        })
        .await
        .unwrap();

    let plan = finance
        .create_plan(CreatePlanRequest {
            reserva_id: detail.reserva.id,
            passageiro_id: detail.passageiros[0].passageiro.id,
            entrada_valor: Decimal::new(10000, 2),
            parcela_valor: Decimal::new(20000, 2),
            parcelas_total: 2,
            primeiro_pagamento_data: today_sao_paulo() + Duration::days(30),
        })
        .await
        .unwrap();

    let entrada = plan.parcelas.iter().find(|p| p.numero == 0).unwrap();
    finance.mark_paid(entrada.id, "dinheiro").await.unwrap();

    let err = finance
        .edit_installment(
            entrada.id,
            EditInstallmentRequest {
                vencimento: today_sao_paulo() + Duration::days(10),
                valor: Decimal::new(15000, 2),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // depois do estorno a edição passa e o status re-deriva da nova data
    finance.revert_paid(entrada.id).await.unwrap();
    let edited = finance
        .edit_installment(
            entrada.id,
            EditInstallmentRequest {
                vencimento: today_sao_paulo() + Duration::days(10),
                valor: Decimal::new(15000, 2),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.status, "pendente");
    assert_eq!(edited.valor, Decimal::new(15000, 2));
}

#[tokio::test]
#[ignore]
async fn added_installment_extends_numbering_and_plan_totals() {
    let pool = test_pool().await;
    let (excursao_id, bus_ids) = setup_excursion_with_buses(&pool, 1).await;
    let (reservations, finance) = services(&pool);

    let detail = reservations
        .create(CreateReservationRequest {
            excursao_id,
            onibus_id: bus_ids[0],
            passageiros: vec![payload("Maria Silva", 1)],
        })
        .await
        .unwrap();

    let plan = finance
        .create_plan(CreatePlanRequest {
            reserva_id: detail.reserva.id,
            passageiro_id: detail.passageiros[0].passageiro.id,
            entrada_valor: Decimal::new(10000, 2),
            parcela_valor: Decimal::new(20000, 2),
            parcelas_total: 2,
            primeiro_pagamento_data: today_sao_paulo() + Duration::days(30),
        })
        .await
        .unwrap();

    let added = finance
        .add_installment(
            plan.plano.id,
            AddInstallmentRequest {
                vencimento: today_sao_paulo() + Duration::days(90),
                valor: Decimal::new(5000, 2),
            },
        )
        .await
        .unwrap();
    assert_eq!(added.numero, 3);
    assert_eq!(added.status, "pendente");

    // o plano exibe o valor da parcela adicionada e o novo total
    let refreshed = finance.plan_by_id(plan.plano.id).await.unwrap();
    assert_eq!(refreshed.plano.parcelas_total, 3);
    assert_eq!(refreshed.plano.parcela_valor, Decimal::new(5000, 2));
    assert_eq!(refreshed.parcelas.len(), 4);
}
