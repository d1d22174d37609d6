use std::net::SocketAddr;

use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use excursao_booking::config::EnvironmentConfig;
use excursao_booking::database::create_pool;
use excursao_booking::middleware::auth::{admin_middleware, auth_middleware};
use excursao_booking::middleware::cors::cors_middleware;
use excursao_booking::routes;
use excursao_booking::services::AuthService;
use excursao_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Excursão Booking - API de Reservas");
    info!("=====================================");

    let config = EnvironmentConfig::from_env();

    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Erro conectando ao banco de dados: {}", e);
            return Err(e);
        }
    };
    info!("✅ Banco de dados conectado");

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(pool, config);

    if let Err(e) = AuthService::new(app_state.pool.clone(), &app_state.config)
        .ensure_default_admin()
        .await
    {
        error!("⚠️ Falha ao garantir o admin inicial: {}", e);
    }

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        // leitura pública; escrita restrita a administradores
        .nest(
            "/api/excursoes",
            routes::excursion_routes::create_excursion_router(&app_state),
        )
        .nest(
            "/api/onibus",
            routes::bus_routes::create_bus_router(&app_state),
        )
        .nest(
            "/api/passageiros",
            routes::passenger_routes::create_passenger_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_middleware),
            ),
        )
        .nest(
            "/api/reservas",
            routes::reservation_routes::create_reservation_router(&app_state),
        )
        // financeiro é restrito a administradores
        .nest(
            "/api/financeiro",
            routes::finance_routes::create_finance_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), admin_middleware),
            ),
        )
        .layer(cors_middleware())
        .with_state(app_state);

    info!("🌐 Servidor iniciando em http://{}", addr);
    info!("🔍 Endpoints disponíveis:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login administrativo");
    info!("🏝️ Excursões:");
    info!("   POST /api/excursoes - Criar excursão");
    info!("   GET  /api/excursoes - Listar excursões");
    info!("🚌 Ônibus:");
    info!("   POST /api/onibus - Criar ônibus (gera assentos)");
    info!("   GET  /api/onibus/:id/assentos - Mapa de assentos");
    info!("   GET  /api/onibus/:id/ocupacao - Resumo de ocupação");
    info!("🎫 Reservas:");
    info!("   POST /api/reservas - Criar reserva multi-passageiro");
    info!("   POST /api/reservas/:id/cancelar - Cancelar reserva");
    info!("   PATCH /api/reservas/passageiros/:id/mover - Mover passageiro");
    info!("   PATCH /api/reservas/passageiros/:id/presenca - Marcar presença");
    info!("💰 Financeiro:");
    info!("   POST /api/financeiro/planos - Criar plano de pagamento");
    info!("   PATCH /api/financeiro/parcelas/:id/pagar - Marcar parcela paga");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "excursao-booking",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Falha ao instalar handler de Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Falha ao instalar handler de SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Recebido Ctrl+C, encerrando"),
        _ = terminate => info!("Recebido SIGTERM, encerrando"),
    }
}
