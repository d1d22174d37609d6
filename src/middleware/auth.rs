//! Middleware de autenticação JWT
//!
//! Extrai o token Bearer do header Authorization, valida a assinatura e
//! injeta o usuário autenticado como extension da request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::auth::UserRole;
use crate::services::JwtService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Usuário autenticado injetado nas requests protegidas.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorização requerido".to_string()))?;

    let claims = JwtService::new(&state.config).validate_token(token)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email.clone(),
        role: claims.role_enum(),
    });

    Ok(next.run(request).await)
}

/// Variante que além de autenticar exige perfil admin.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorização requerido".to_string()))?;

    let claims = JwtService::new(&state.config).validate_token(token)?;
    if claims.role_enum() != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Acesso restrito a administradores".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
