pub mod api;
pub mod auth_dto;
pub mod bus_dto;
pub mod excursion_dto;
pub mod finance_dto;
pub mod passenger_dto;
pub mod reservation_dto;
