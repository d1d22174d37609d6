pub mod cpf;
pub mod dates;
pub mod errors;
pub mod validation;
