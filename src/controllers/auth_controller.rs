use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(state.pool.clone(), &state.config),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.service.login(request).await
    }
}
