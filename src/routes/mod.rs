pub mod auth_routes;
pub mod bus_routes;
pub mod excursion_routes;
pub mod finance_routes;
pub mod passenger_routes;
pub mod reservation_routes;
