//! Utilidades de validação
//!
//! Funções helper de validação usadas pelos controllers, complementando
//! as anotações `validator` dos DTOs.

use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Valida que um texto não está vazio (após trim).
pub fn require_not_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} é obrigatório", field)));
    }
    Ok(())
}

/// Valida que um valor monetário é estritamente positivo.
pub fn require_positive(value: Decimal, field: &str) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "{} deve ser maior que zero",
            field
        )));
    }
    Ok(())
}

/// Validação básica de telefone: 10 a 15 dígitos.
pub fn require_phone(value: &str) -> AppResult<()> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 || digits.len() > 15 {
        return Err(AppError::Validation("telefone inválido".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_not_empty() {
        assert!(require_not_empty("Excursão Canoa Quebrada", "nome").is_ok());
        assert!(require_not_empty("   ", "nome").is_err());
        assert!(require_not_empty("", "nome").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(Decimal::new(15000, 2), "valor da parcela").is_ok());
        assert!(require_positive(Decimal::ZERO, "valor da parcela").is_err());
        assert!(require_positive(Decimal::new(-1000, 2), "valor da parcela").is_err());
    }

    #[test]
    fn test_require_phone() {
        assert!(require_phone("(88) 99423-5525").is_ok());
        assert!(require_phone("123").is_err());
        assert!(require_phone("1234567890123456").is_err());
    }
}
