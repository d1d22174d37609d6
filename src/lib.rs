//! Backend de reservas de excursões
//!
//! API administrativa para excursões rodoviárias: inventário de
//! assentos por ônibus, reservas multi-passageiro, cadastro de
//! passageiros por CPF e planos de pagamento parcelados.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
