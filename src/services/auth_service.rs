//! Autenticação administrativa
//!
//! Login por e-mail e senha (bcrypt) contra `user_access_profiles`,
//! emitindo tokens JWT HS256 validados pelo middleware.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::models::auth::{AccessProfile, JwtClaims};
use crate::repositories::AuthRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    pub fn generate_token(&self, profile: &AccessProfile) -> AppResult<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: profile.id.to_string(),
            email: profile.email.clone(),
            role: profile.profile_type.clone(),
            exp: (now + self.expiration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Erro ao gerar token: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Token inválido ou expirado".to_string()))
    }
}

pub struct AuthService {
    repository: AuthRepository,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: AuthRepository::new(pool),
            jwt: JwtService::new(config),
        }
    }

    /// Garante o perfil admin inicial a partir de `ADMIN_EMAIL` e
    /// `ADMIN_PASSWORD`. Sem as variáveis, nada acontece.
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        let (Ok(email), Ok(senha)) = (
            std::env::var("ADMIN_EMAIL"),
            std::env::var("ADMIN_PASSWORD"),
        ) else {
            return Ok(());
        };

        if self.repository.find_by_email(&email).await?.is_some() {
            return Ok(());
        }

        let senha_hash = hash(&senha, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Erro ao gerar hash de senha: {}", e)))?;
        self.repository
            .create(email.clone(), senha_hash, "admin".to_string())
            .await?;
        tracing::info!("Perfil admin inicial criado: {}", email);

        Ok(())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let profile = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciais inválidas".to_string()))?;

        let valid = verify(&request.senha, &profile.senha_hash)
            .map_err(|e| AppError::Internal(format!("Erro ao verificar senha: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciais inválidas".to_string()));
        }

        let token = self.jwt.generate_token(&profile)?;
        tracing::info!("Login bem-sucedido: {}", profile.email);

        Ok(LoginResponse {
            token,
            email: profile.email,
            role: profile.profile_type,
        })
    }
}
