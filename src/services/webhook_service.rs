//! Notificações de automação
//!
//! Dispara webhooks para o n8n em eventos de reserva e pagamento. Os
//! envios são fire-and-forget: falha de entrega gera log de warning e
//! nunca derruba a operação que a originou.

use reqwest::Client;
use serde_json::Value;

use crate::config::EnvironmentConfig;

#[derive(Clone)]
pub struct WebhookService {
    client: Client,
    reservation_url: Option<String>,
    payment_url: Option<String>,
    seat_summary_url: Option<String>,
}

impl WebhookService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            client,
            reservation_url: config.reservation_webhook_url.clone(),
            payment_url: config.payment_webhook_url.clone(),
            seat_summary_url: config.seat_summary_webhook_url.clone(),
        }
    }

    pub fn notify_reservation(&self, payload: Value) {
        Self::dispatch(self.client.clone(), self.reservation_url.clone(), payload);
    }

    pub fn notify_payment(&self, payload: Value) {
        Self::dispatch(self.client.clone(), self.payment_url.clone(), payload);
    }

    pub fn notify_seat_summary(&self, payload: Value) {
        Self::dispatch(self.client.clone(), self.seat_summary_url.clone(), payload);
    }

    fn dispatch(client: Client, url: Option<String>, payload: Value) {
        let Some(url) = url else {
            tracing::debug!("Webhook sem URL configurada, evento descartado");
            return;
        };

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("Webhook entregue: {}", url);
                }
                Ok(response) => {
                    tracing::warn!("Webhook {} respondeu {}", url, response.status());
                }
                Err(err) => {
                    tracing::warn!("Falha ao entregar webhook {}: {}", url, err);
                }
            }
        });
    }
}
