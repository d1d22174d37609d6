//! Modelo de autenticação
//!
//! Perfis de acesso (`user_access_profiles`) e claims JWT. O papel é
//! resolvido pelo perfil: `admin` libera o painel administrativo, todo o
//! resto é `normal`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AccessProfile {
    pub id: Uuid,
    pub email: String,
    pub senha_hash: String,
    pub profile_type: String,
    pub criado_em: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Normal,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Normal => "normal",
        }
    }

    /// Qualquer valor que não seja exatamente "admin" resolve para normal.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Normal
        }
    }
}

/// Claims do token de sessão
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    pub fn role_enum(&self) -> UserRole {
        UserRole::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_defaults_to_normal() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::parse("normal"), UserRole::Normal);
        assert_eq!(UserRole::parse(""), UserRole::Normal);
        assert_eq!(UserRole::parse("root"), UserRole::Normal);
    }
}
