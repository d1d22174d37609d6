//! Camada de acesso a dados
//!
//! Cada repositório encapsula as queries SQL de uma tabela e devolve
//! modelos tipados. Nenhuma regra de negócio vive aqui.

pub mod auth_repository;
pub mod bus_repository;
pub mod excursion_repository;
pub mod finance_repository;
pub mod passenger_repository;
pub mod reservation_repository;
pub mod seat_repository;

pub use auth_repository::AuthRepository;
pub use bus_repository::BusRepository;
pub use excursion_repository::ExcursionRepository;
pub use finance_repository::FinanceRepository;
pub use passenger_repository::PassengerRepository;
pub use reservation_repository::ReservationRepository;
pub use seat_repository::SeatRepository;
