//! Motor financeiro
//!
//! Planos de pagamento por passageiro: entrada + parcelas mensais no
//! mesmo dia do mês, com clamp para meses curtos. O status de cada
//! parcela é derivado do vencimento em toda leitura; `pago` é manual e
//! só sai por estorno explícito.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::finance_dto::{
    AddInstallmentRequest, CreatePlanRequest, EditInstallmentRequest, FinanceBookingView,
    PlanLookupQuery, PlanResponse,
};
use crate::models::excursion::Excursion;
use crate::models::passenger::Passenger;
use crate::models::payment_plan::{
    Installment, InstallmentStatus, PaymentMethod, PaymentPlan, PlanSummary,
};
use crate::repositories::{
    ExcursionRepository, FinanceRepository, PassengerRepository, ReservationRepository,
};
use crate::services::webhook_service::WebhookService;
use crate::utils::dates::{month_add_same_day, today_sao_paulo};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::require_positive;

/// Entrada do cronograma gerado na criação do plano.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub numero: i32,
    pub vencimento: NaiveDate,
    pub valor: Decimal,
}

/// Cronograma completo: número 0 é a entrada com vencimento hoje,
/// omitida quando não há entrada; 1..=total são as parcelas mensais a
/// partir da data do primeiro pagamento, sempre no mesmo dia do mês.
pub fn build_schedule(
    entrada_valor: Decimal,
    parcela_valor: Decimal,
    parcelas_total: i32,
    primeiro_pagamento: NaiveDate,
    today: NaiveDate,
) -> Vec<ScheduleEntry> {
    let mut schedule = Vec::with_capacity(parcelas_total as usize + 1);
    if entrada_valor > Decimal::ZERO {
        schedule.push(ScheduleEntry {
            numero: 0,
            vencimento: today,
            valor: entrada_valor,
        });
    }
    for i in 1..=parcelas_total {
        schedule.push(ScheduleEntry {
            numero: i,
            vencimento: month_add_same_day(primeiro_pagamento, (i - 1) as u32),
            valor: parcela_valor,
        });
    }
    schedule
}

/// Reescreve o status armazenado pelo status efetivo da data de hoje.
pub fn with_effective_status(mut installments: Vec<Installment>, today: NaiveDate) -> Vec<Installment> {
    for inst in &mut installments {
        let effective = InstallmentStatus::effective(inst.status_enum(), inst.vencimento, today);
        inst.status = effective.as_str().to_string();
    }
    installments
}

/// Payload da notificação de parcela paga: identifica o passageiro, a
/// excursão e o assento, e lista as parcelas ainda em aberto.
fn payment_webhook_payload(
    plan: &PaymentPlan,
    paid: &Installment,
    passenger: Option<&Passenger>,
    excursion: Option<&Excursion>,
    numero_assento: Option<i32>,
    installments: &[Installment],
    summary: &PlanSummary,
) -> serde_json::Value {
    let restantes: Vec<_> = installments
        .iter()
        .filter(|inst| inst.status_enum() != InstallmentStatus::Pago)
        .map(|inst| {
            json!({
                "numero": inst.numero,
                "vencimento": inst.vencimento,
                "valor": inst.valor,
                "status": inst.status,
            })
        })
        .collect();

    json!({
        "evento": "parcela_paga",
        "plano_id": plan.id,
        "reserva_id": plan.reserva_id,
        "excursao_id": plan.excursao_id,
        "excursao_nome": excursion.map(|e| e.nome.clone()),
        "passageiro_id": plan.passageiro_id,
        "passageiro_nome": passenger.map(|p| p.nome.clone()),
        "passageiro_telefone": passenger.map(|p| p.telefone.clone()),
        "assento": numero_assento,
        "parcela": {
            "numero": paid.numero,
            "valor": paid.valor,
            "metodo": paid.metodo,
            "pago_em": paid.pago_em,
        },
        "parcelas_restantes": restantes,
        "total": summary.total_amount,
        "pago": summary.paid_amount,
        "restante": summary.total_amount - summary.paid_amount,
    })
}

pub struct PaymentPlanService {
    finance: FinanceRepository,
    reservations: ReservationRepository,
    passengers: PassengerRepository,
    excursions: ExcursionRepository,
    webhooks: WebhookService,
}

impl PaymentPlanService {
    pub fn new(pool: PgPool, webhooks: WebhookService) -> Self {
        Self {
            finance: FinanceRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            passengers: PassengerRepository::new(pool.clone()),
            excursions: ExcursionRepository::new(pool),
            webhooks,
        }
    }

    /// Cria o plano e grava o cronograma completo de parcelas. Plano
    /// sem entrada é aceito; o total de parcelas é coagido para >= 1.
    pub async fn create_plan(&self, request: CreatePlanRequest) -> AppResult<PlanResponse> {
        require_positive(request.parcela_valor, "valor da parcela")?;
        let parcelas_total = request.parcelas_total.max(1);

        let reservation = self.reservations.require(request.reserva_id).await?;

        if self
            .finance
            .find_plan_by_reservation(request.reserva_id, request.passageiro_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Passageiro já possui plano de pagamento nesta reserva".to_string(),
            ));
        }

        let plan = self
            .finance
            .insert_plan(
                request.reserva_id,
                request.passageiro_id,
                reservation.excursao_id,
                request.entrada_valor,
                request.parcela_valor,
                parcelas_total,
                request.primeiro_pagamento_data,
            )
            .await?;

        let today = today_sao_paulo();
        let schedule = build_schedule(
            request.entrada_valor,
            request.parcela_valor,
            parcelas_total,
            request.primeiro_pagamento_data,
            today,
        );
        for entry in &schedule {
            let status = InstallmentStatus::from_due_date(entry.vencimento, today);
            self.finance
                .insert_installment(
                    plan.id,
                    entry.numero,
                    entry.vencimento,
                    entry.valor,
                    status.as_str(),
                )
                .await?;
        }

        tracing::info!(
            "Plano {} criado: entrada + {} parcela(s)",
            plan.id,
            parcelas_total
        );

        self.plan_response(plan).await
    }

    /// Localiza o plano pela reserva ou, na ausência, pela excursão. A
    /// busca pela excursão sobrevive à migração do passageiro para outra
    /// reserva.
    pub async fn find_plan(&self, query: PlanLookupQuery) -> AppResult<Option<PlanResponse>> {
        let plan = match (query.reserva_id, query.excursao_id) {
            (Some(reserva_id), _) => {
                match self
                    .finance
                    .find_plan_by_reservation(reserva_id, query.passageiro_id)
                    .await?
                {
                    Some(plan) => Some(plan),
                    None => match query.excursao_id {
                        Some(excursao_id) => {
                            self.finance
                                .find_plan_by_excursion(excursao_id, query.passageiro_id)
                                .await?
                        }
                        None => None,
                    },
                }
            }
            (None, Some(excursao_id)) => {
                self.finance
                    .find_plan_by_excursion(excursao_id, query.passageiro_id)
                    .await?
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "Informe reserva_id ou excursao_id".to_string(),
                ))
            }
        };

        match plan {
            Some(plan) => Ok(Some(self.plan_response(plan).await?)),
            None => Ok(None),
        }
    }

    pub async fn plan_by_id(&self, id: Uuid) -> AppResult<PlanResponse> {
        let plan = self.finance.require_plan(id).await?;
        self.plan_response(plan).await
    }

    /// Marca uma parcela como paga com a forma de pagamento informada.
    pub async fn mark_paid(&self, installment_id: Uuid, metodo: &str) -> AppResult<Installment> {
        let method = PaymentMethod::parse(metodo)?;
        let installment = self.finance.require_installment(installment_id).await?;
        if installment.status_enum() == InstallmentStatus::Pago {
            return Err(AppError::Conflict("Parcela já está paga".to_string()));
        }

        let updated = self
            .finance
            .mark_installment_paid(installment_id, Utc::now(), method.as_str())
            .await?;

        let plan = self.finance.require_plan(updated.plano_id).await?;
        let installments =
            with_effective_status(self.finance.list_installments(plan.id).await?, today_sao_paulo());
        let summary = PlanSummary::from_installments(&installments);

        let passenger = self.passengers.find_by_id(plan.passageiro_id).await?;
        let excursion = self.excursions.find_by_id(plan.excursao_id).await?;
        let numero_assento = self
            .reservations
            .links_by_reservation(plan.reserva_id)
            .await?
            .into_iter()
            .find(|link| link.passageiro_id == plan.passageiro_id)
            .map(|link| link.numero_assento);

        self.webhooks.notify_payment(payment_webhook_payload(
            &plan,
            &updated,
            passenger.as_ref(),
            excursion.as_ref(),
            numero_assento,
            &installments,
            &summary,
        ));

        Ok(updated)
    }

    /// Estorna um pagamento: o status volta a ser derivado do vencimento
    /// e os campos de pagamento são limpos.
    pub async fn revert_paid(&self, installment_id: Uuid) -> AppResult<Installment> {
        let installment = self.finance.require_installment(installment_id).await?;
        if installment.status_enum() != InstallmentStatus::Pago {
            return Err(AppError::Conflict("Parcela não está paga".to_string()));
        }

        let status = InstallmentStatus::from_due_date(installment.vencimento, today_sao_paulo());
        self.finance
            .revert_installment(installment_id, status.as_str())
            .await
    }

    /// Edita vencimento e valor de uma parcela em aberto. Parcela paga
    /// exige estorno antes de qualquer edição.
    pub async fn edit_installment(
        &self,
        installment_id: Uuid,
        request: EditInstallmentRequest,
    ) -> AppResult<Installment> {
        require_positive(request.valor, "valor da parcela")?;

        let installment = self.finance.require_installment(installment_id).await?;
        if installment.status_enum() == InstallmentStatus::Pago {
            return Err(AppError::Conflict(
                "Parcela paga não pode ser editada".to_string(),
            ));
        }

        let status = InstallmentStatus::from_due_date(request.vencimento, today_sao_paulo());
        self.finance
            .edit_installment(installment_id, request.vencimento, request.valor, status.as_str())
            .await
    }

    /// Acrescenta uma parcela avulsa ao fim do cronograma. O plano passa
    /// a exibir o valor da parcela adicionada e o novo total.
    pub async fn add_installment(
        &self,
        plan_id: Uuid,
        request: AddInstallmentRequest,
    ) -> AppResult<Installment> {
        require_positive(request.valor, "valor da parcela")?;

        self.finance.require_plan(plan_id).await?;
        let numero = self.finance.max_installment_number(plan_id).await? + 1;
        let status = InstallmentStatus::from_due_date(request.vencimento, today_sao_paulo());

        let installment = self
            .finance
            .insert_installment(plan_id, numero, request.vencimento, request.valor, status.as_str())
            .await?;

        // numeração sequencial: o maior número é a contagem de parcelas
        self.finance
            .update_plan_totals(plan_id, request.valor, numero)
            .await?;

        Ok(installment)
    }

    /// Listagem financeira: cada passageiro de reserva ativa com o
    /// resumo do seu plano. O plano é casado pela reserva e, na falta,
    /// pela excursão (cobre passageiros movidos de reserva).
    pub async fn finance_bookings(
        &self,
        excursao_id: Option<Uuid>,
    ) -> AppResult<Vec<FinanceBookingView>> {
        let reservations = self.reservations.list_active(excursao_id, None).await?;
        let today = today_sao_paulo();

        let mut rows = Vec::new();
        for reservation in reservations {
            let links = self.reservations.links_by_reservation(reservation.id).await?;
            let ids: Vec<Uuid> = links.iter().map(|l| l.passageiro_id).collect();
            let passengers = self.passengers.find_by_ids(&ids).await?;

            for link in links {
                let Some(passenger) = passengers
                    .iter()
                    .find(|p| p.id == link.passageiro_id)
                    .cloned()
                else {
                    continue;
                };

                let plan = match self
                    .finance
                    .find_plan_by_reservation(reservation.id, link.passageiro_id)
                    .await?
                {
                    Some(plan) => Some(plan),
                    None => {
                        self.finance
                            .find_plan_by_excursion(reservation.excursao_id, link.passageiro_id)
                            .await?
                    }
                };

                let (plano_id, resumo) = match plan {
                    Some(plan) => {
                        let installments = with_effective_status(
                            self.finance.list_installments(plan.id).await?,
                            today,
                        );
                        (
                            Some(plan.id),
                            Some(PlanSummary::from_installments(&installments)),
                        )
                    }
                    None => (None, None),
                };

                rows.push(FinanceBookingView {
                    reserva_id: reservation.id,
                    excursao_id: reservation.excursao_id,
                    onibus_id: reservation.onibus_id,
                    numero_assento: link.numero_assento,
                    passageiro: passenger,
                    plano_id,
                    resumo,
                });
            }
        }

        Ok(rows)
    }

    pub async fn plans_by_excursion(&self, excursao_id: Uuid) -> AppResult<Vec<PlanResponse>> {
        let plans = self.finance.list_plans_by_excursion(excursao_id).await?;
        let mut responses = Vec::with_capacity(plans.len());
        for plan in plans {
            responses.push(self.plan_response(plan).await?);
        }
        Ok(responses)
    }

    async fn plan_response(&self, plan: PaymentPlan) -> AppResult<PlanResponse> {
        let installments =
            with_effective_status(self.finance.list_installments(plan.id).await?, today_sao_paulo());
        let resumo = PlanSummary::from_installments(&installments);

        Ok(PlanResponse {
            plano: plan,
            parcelas: installments,
            resumo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_schedule_entrada_hoje_e_parcelas_mensais() {
        let today = d(2025, 3, 10);
        let schedule = build_schedule(
            Decimal::from(100),
            Decimal::from(200),
            3,
            d(2025, 4, 5),
            today,
        );

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].numero, 0);
        assert_eq!(schedule[0].vencimento, today);
        assert_eq!(schedule[0].valor, Decimal::from(100));

        assert_eq!(schedule[1].vencimento, d(2025, 4, 5));
        assert_eq!(schedule[2].vencimento, d(2025, 5, 5));
        assert_eq!(schedule[3].vencimento, d(2025, 6, 5));
        assert!(schedule[1..].iter().all(|e| e.valor == Decimal::from(200)));
    }

    #[test]
    fn test_schedule_without_entrada() {
        let schedule = build_schedule(
            Decimal::ZERO,
            Decimal::from(150),
            2,
            d(2025, 4, 5),
            d(2025, 3, 10),
        );

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].numero, 1);
        assert_eq!(schedule[0].vencimento, d(2025, 4, 5));
        assert_eq!(schedule[1].vencimento, d(2025, 5, 5));
    }

    #[test]
    fn test_schedule_clamps_short_months() {
        // primeiro pagamento em 31/01: fevereiro clampa para 28/29
        let schedule = build_schedule(
            Decimal::from(50),
            Decimal::from(100),
            3,
            d(2025, 1, 31),
            d(2025, 1, 15),
        );

        assert_eq!(schedule[1].vencimento, d(2025, 1, 31));
        assert_eq!(schedule[2].vencimento, d(2025, 2, 28));
        assert_eq!(schedule[3].vencimento, d(2025, 3, 31));
    }

    #[test]
    fn test_effective_status_rewrite() {
        let today = d(2025, 6, 10);
        let mk = |venc: NaiveDate, status: &str| Installment {
            id: Uuid::new_v4(),
            plano_id: Uuid::new_v4(),
            numero: 1,
            vencimento: venc,
            valor: Decimal::from(100),
            status: status.to_string(),
            pago_em: None,
            metodo: None,
        };

        let rewritten = with_effective_status(
            vec![
                mk(d(2025, 5, 1), "pendente"),
                mk(d(2025, 5, 1), "pago"),
                mk(d(2025, 7, 1), "atrasado"),
            ],
            today,
        );

        assert_eq!(rewritten[0].status, "atrasado");
        assert_eq!(rewritten[1].status, "pago");
        assert_eq!(rewritten[2].status, "pendente");
    }

    #[test]
    fn test_payment_webhook_payload_lists_remaining_installments() {
        let plan = PaymentPlan {
            id: Uuid::new_v4(),
            reserva_id: Uuid::new_v4(),
            passageiro_id: Uuid::new_v4(),
            excursao_id: Uuid::new_v4(),
            entrada_valor: Decimal::from(100),
            parcela_valor: Decimal::from(200),
            parcelas_total: 2,
            primeiro_pagamento_data: d(2025, 4, 5),
            status: "ativo".to_string(),
            criado_em: Utc::now(),
        };
        let mk = |numero: i32, status: &str| Installment {
            id: Uuid::new_v4(),
            plano_id: plan.id,
            numero,
            vencimento: d(2025, 4, 5),
            valor: Decimal::from(200),
            status: status.to_string(),
            pago_em: None,
            metodo: None,
        };
        let installments = vec![mk(0, "pago"), mk(1, "pendente"), mk(2, "atrasado")];
        let passenger = Passenger {
            id: plan.passageiro_id,
            nome: "MARIA SILVA".to_string(),
            cpf: "52998224725".to_string(),
            telefone: "88994235525".to_string(),
            data_nascimento: None,
            cpf_aleatorio: false,
            criado_em: Utc::now(),
        };
        let summary = PlanSummary::from_installments(&installments);

        let payload = payment_webhook_payload(
            &plan,
            &installments[0],
            Some(&passenger),
            None,
            Some(7),
            &installments,
            &summary,
        );

        assert_eq!(payload["passageiro_nome"], "MARIA SILVA");
        assert_eq!(payload["assento"], 7);
        assert_eq!(payload["parcela"]["numero"], 0);

        // apenas as parcelas em aberto entram na lista de restantes
        let restantes = payload["parcelas_restantes"].as_array().unwrap();
        assert_eq!(restantes.len(), 2);
        assert_eq!(restantes[0]["numero"], 1);
        assert_eq!(restantes[1]["numero"], 2);
    }
}
