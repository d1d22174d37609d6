//! Cadastro de passageiros
//!
//! O CPF normalizado (apenas dígitos) é a identidade do passageiro. O
//! upsert reaproveita cadastros existentes e gera um CPF aleatório
//! válido, marcado como provisório, quando o documento não é informado.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::passenger::Passenger;
use crate::repositories::PassengerRepository;
use crate::utils::cpf::{generate_random_cpf, strip_cpf, validate_cpf};
use crate::utils::dates::parse_br_date;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{require_not_empty, require_phone};

pub struct PassengerRegistry {
    repository: PassengerRepository,
}

impl PassengerRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PassengerRepository::new(pool),
        }
    }

    /// Localiza pelo CPF ou cria um novo cadastro. Nome é normalizado
    /// para maiúsculas; data de nascimento inválida é descartada.
    pub async fn upsert_by_cpf(
        &self,
        nome: &str,
        cpf: Option<&str>,
        telefone: &str,
        data_nascimento: Option<&str>,
    ) -> AppResult<Passenger> {
        require_not_empty(nome, "nome")?;
        require_phone(telefone)?;

        let (cpf_digits, cpf_aleatorio) = match cpf.map(strip_cpf).filter(|c| !c.is_empty()) {
            Some(digits) => {
                if !validate_cpf(&digits) {
                    return Err(AppError::Validation("CPF inválido".to_string()));
                }
                (digits, false)
            }
            None => (strip_cpf(&generate_random_cpf()), true),
        };

        if let Some(existing) = self.repository.find_by_cpf(&cpf_digits).await? {
            return Ok(existing);
        }

        let nascimento = data_nascimento.and_then(parse_br_date);

        self.repository
            .create(
                nome.trim().to_uppercase(),
                cpf_digits,
                strip_phone(telefone),
                nascimento,
                cpf_aleatorio,
            )
            .await
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Passenger>> {
        let digits = strip_cpf(cpf);
        if !validate_cpf(&digits) {
            return Err(AppError::Validation("CPF inválido".to_string()));
        }
        self.repository.find_by_cpf(&digits).await
    }

    pub async fn require(&self, id: Uuid) -> AppResult<Passenger> {
        self.repository.require(id).await
    }
}

fn strip_phone(telefone: &str) -> String {
    telefone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_phone() {
        assert_eq!(strip_phone("(11) 99999-0000"), "11999990000");
        assert_eq!(strip_phone("11999990000"), "11999990000");
    }
}
