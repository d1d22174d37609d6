use uuid::Uuid;
use validator::Validate;

use crate::dto::api::ApiResponse;
use crate::dto::finance_dto::{
    AddInstallmentRequest, CreatePlanRequest, EditInstallmentRequest, FinanceBookingView,
    MarkPaidRequest, PlanLookupQuery, PlanResponse,
};
use crate::models::payment_plan::Installment;
use crate::services::{PaymentPlanService, WebhookService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct FinanceController {
    service: PaymentPlanService,
}

impl FinanceController {
    pub fn new(state: &AppState) -> Self {
        let webhooks = WebhookService::new(state.http_client.clone(), &state.config);
        Self {
            service: PaymentPlanService::new(state.pool.clone(), webhooks),
        }
    }

    pub async fn create_plan(
        &self,
        request: CreatePlanRequest,
    ) -> AppResult<ApiResponse<PlanResponse>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let plan = self.service.create_plan(request).await?;
        Ok(ApiResponse::success_with_message(
            plan,
            "Plano de pagamento criado".to_string(),
        ))
    }

    pub async fn find_plan(&self, query: PlanLookupQuery) -> AppResult<Option<PlanResponse>> {
        self.service.find_plan(query).await
    }

    pub async fn plan_by_id(&self, id: Uuid) -> AppResult<PlanResponse> {
        self.service.plan_by_id(id).await
    }

    pub async fn plans_by_excursion(&self, excursao_id: Uuid) -> AppResult<Vec<PlanResponse>> {
        self.service.plans_by_excursion(excursao_id).await
    }

    pub async fn bookings(
        &self,
        excursao_id: Option<Uuid>,
    ) -> AppResult<Vec<FinanceBookingView>> {
        self.service.finance_bookings(excursao_id).await
    }

    pub async fn mark_paid(
        &self,
        installment_id: Uuid,
        request: MarkPaidRequest,
    ) -> AppResult<ApiResponse<Installment>> {
        let installment = self.service.mark_paid(installment_id, &request.metodo).await?;
        Ok(ApiResponse::success_with_message(
            installment,
            "Parcela marcada como paga".to_string(),
        ))
    }

    pub async fn revert_paid(&self, installment_id: Uuid) -> AppResult<ApiResponse<Installment>> {
        let installment = self.service.revert_paid(installment_id).await?;
        Ok(ApiResponse::success_with_message(
            installment,
            "Pagamento estornado".to_string(),
        ))
    }

    pub async fn edit_installment(
        &self,
        installment_id: Uuid,
        request: EditInstallmentRequest,
    ) -> AppResult<ApiResponse<Installment>> {
        let installment = self.service.edit_installment(installment_id, request).await?;
        Ok(ApiResponse::success_with_message(
            installment,
            "Parcela atualizada".to_string(),
        ))
    }

    pub async fn add_installment(
        &self,
        plan_id: Uuid,
        request: AddInstallmentRequest,
    ) -> AppResult<ApiResponse<Installment>> {
        let installment = self.service.add_installment(plan_id, request).await?;
        Ok(ApiResponse::success_with_message(
            installment,
            "Parcela adicionada ao plano".to_string(),
        ))
    }
}
