//! Camada de serviços
//!
//! Regras de negócio que cruzam mais de um repositório: o motor de
//! reservas, o inventário de assentos, o cadastro de passageiros, o
//! financeiro e os disparos de webhooks.

pub mod auth_service;
pub mod passenger_registry;
pub mod payment_plan_service;
pub mod reservation_service;
pub mod seat_inventory_service;
pub mod webhook_service;

pub use auth_service::{AuthService, JwtService};
pub use passenger_registry::PassengerRegistry;
pub use payment_plan_service::PaymentPlanService;
pub use reservation_service::ReservationService;
pub use seat_inventory_service::SeatInventoryService;
pub use webhook_service::WebhookService;
