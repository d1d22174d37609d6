//! Guardas de autorização das rotas administrativas.
//!
//! Não tocam o banco: o middleware rejeita a request antes de qualquer
//! handler rodar, então um pool lazy nunca conecta.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use excursao_booking::config::EnvironmentConfig;
use excursao_booking::models::auth::AccessProfile;
use excursao_booking::routes;
use excursao_booking::services::JwtService;
use excursao_booking::state::AppState;

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "development".to_string(),
        port: 3000,
        host: "127.0.0.1".to_string(),
        jwt_secret: "segredo-de-teste".to_string(),
        jwt_expiration_hours: 1,
        reservation_webhook_url: None,
        payment_webhook_url: None,
        seat_summary_webhook_url: None,
    }
}

fn test_app(config: &EnvironmentConfig) -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/excursao_booking_test")
        .expect("URL de teste válida");
    let state = AppState::new(pool, config.clone());

    Router::new()
        .nest(
            "/api/excursoes",
            routes::excursion_routes::create_excursion_router(&state),
        )
        .nest("/api/onibus", routes::bus_routes::create_bus_router(&state))
        .nest(
            "/api/reservas",
            routes::reservation_routes::create_reservation_router(&state),
        )
        .with_state(state)
}

fn token_with_role(config: &EnvironmentConfig, role: &str) -> String {
    let profile = AccessProfile {
        id: Uuid::new_v4(),
        email: "viajante@exemplo.com".to_string(),
        senha_hash: String::new(),
        profile_type: role.to_string(),
        criado_em: Utc::now(),
    };
    JwtService::new(config)
        .generate_token(&profile)
        .expect("token de teste")
}

fn admin_routes() -> Vec<(&'static str, String)> {
    vec![
        ("POST", "/api/excursoes".to_string()),
        ("PUT", format!("/api/excursoes/{}", Uuid::new_v4())),
        ("DELETE", format!("/api/excursoes/{}", Uuid::new_v4())),
        ("POST", "/api/onibus".to_string()),
        ("PUT", format!("/api/onibus/{}", Uuid::new_v4())),
        ("DELETE", format!("/api/onibus/{}", Uuid::new_v4())),
        ("POST", format!("/api/reservas/{}/cancelar", Uuid::new_v4())),
        (
            "DELETE",
            format!("/api/reservas/passageiros/{}", Uuid::new_v4()),
        ),
        (
            "PATCH",
            format!("/api/reservas/passageiros/{}/mover", Uuid::new_v4()),
        ),
        (
            "PATCH",
            format!("/api/reservas/passageiros/{}/presenca", Uuid::new_v4()),
        ),
    ]
}

#[tokio::test]
async fn mutating_routes_require_token() {
    let config = test_config();
    let app = test_app(&config);

    for (method, uri) in admin_routes() {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(&uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} deveria exigir token",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn mutating_routes_reject_non_admin_token() {
    let config = test_config();
    let app = test_app(&config);
    let token = token_with_role(&config, "normal");

    for (method, uri) in admin_routes() {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(&uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{} {} deveria ser restrito a administradores",
            method,
            uri
        );
    }
}
