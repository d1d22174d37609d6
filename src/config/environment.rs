//! Configuração de variáveis de ambiente
//!
//! Este módulo centraliza a configuração do serviço. Os webhooks são
//! opcionais: sem URL configurada, a notificação é simplesmente pulada.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    // Webhooks de notificação (n8n), fire-and-forget
    pub reservation_webhook_url: Option<String>,
    pub payment_webhook_url: Option<String>,
    pub seat_summary_webhook_url: Option<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
            reservation_webhook_url: env::var("RESERVATION_WEBHOOK_URL").ok(),
            payment_webhook_url: env::var("PAYMENT_WEBHOOK_URL").ok(),
            seat_summary_webhook_url: env::var("SEAT_SUMMARY_WEBHOOK_URL").ok(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
