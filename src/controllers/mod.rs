pub mod auth_controller;
pub mod bus_controller;
pub mod excursion_controller;
pub mod finance_controller;
pub mod passenger_controller;
pub mod reservation_controller;
