pub mod auth;
pub mod bus;
pub mod excursion;
pub mod passenger;
pub mod payment_plan;
pub mod reservation;
pub mod seat;
