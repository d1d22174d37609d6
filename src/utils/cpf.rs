//! Primitivas de CPF
//!
//! Validação por dígitos verificadores, formatação incremental e geração
//! de CPF sintético para reservas de balcão. Funções puras, sem efeitos.

use rand::Rng;

/// Remove tudo que não for dígito
pub fn strip_cpf(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formata um CPF (parcial ou completo) com separadores `.`/`.`/`-`.
/// Aceita entrada parcial para uso em máscaras de formulário.
pub fn format_cpf(raw: &str) -> String {
    let digits: Vec<char> = strip_cpf(raw).chars().take(11).collect();
    let part = |a: usize, b: usize| -> String { digits[a.min(digits.len())..b.min(digits.len())].iter().collect() };
    let p1 = part(0, 3);
    let p2 = part(3, 6);
    let p3 = part(6, 9);
    let p4 = part(9, 11);
    let mut out = String::new();
    if !p1.is_empty() {
        out = p1;
    }
    if !p2.is_empty() {
        out = format!("{}.{}", out, p2);
    }
    if !p3.is_empty() {
        out = format!("{}.{}", out, p3);
    }
    if !p4.is_empty() {
        out = format!("{}-{}", out, p4);
    }
    out
}

/// Dígito verificador: soma ponderada, `(soma * 10) % 11`, com 10 -> 0.
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    let d = (sum * 10) % 11;
    if d == 10 {
        0
    } else {
        d
    }
}

/// Valida um CPF pelos dois dígitos verificadores.
/// Rejeita comprimento diferente de 11 e sequências de dígitos idênticos.
pub fn validate_cpf(value: &str) -> bool {
    let cpf = strip_cpf(value);
    if cpf.len() != 11 {
        return false;
    }
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }
    let d1 = check_digit(&digits[0..9], 10);
    if d1 != digits[9] {
        return false;
    }
    let d2 = check_digit(&digits[0..10], 11);
    d2 == digits[10]
}

/// Gera um CPF sintaticamente válido (não verificado em cadastro oficial),
/// já formatado. Usado quando o passageiro não informa o documento.
pub fn generate_random_cpf() -> String {
    let mut rng = rand::thread_rng();
    let mut digits: Vec<u32> = (0..9).map(|_| rng.gen_range(0..=9)).collect();
    let d1 = check_digit(&digits, 10);
    digits.push(d1);
    let d2 = check_digit(&digits, 11);
    digits.push(d2);
    let raw: String = digits.iter().map(|d| char::from_digit(*d, 10).unwrap()).collect();
    format_cpf(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_vectors() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("111.444.777-35"));
        assert!(!validate_cpf("529.982.247-26"));
        assert!(!validate_cpf("111.444.777-34"));
    }

    #[test]
    fn test_rejects_identical_digits() {
        for d in 0..=9 {
            let cpf: String = std::iter::repeat(char::from_digit(d, 10).unwrap())
                .take(11)
                .collect();
            assert!(!validate_cpf(&cpf), "CPF {} deveria ser inválido", cpf);
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("5299822472"));
        assert!(!validate_cpf("529982247255"));
    }

    #[test]
    fn test_format_full() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
    }

    #[test]
    fn test_format_partial() {
        assert_eq!(format_cpf(""), "");
        assert_eq!(format_cpf("52"), "52");
        assert_eq!(format_cpf("5299"), "529.9");
        assert_eq!(format_cpf("5299822"), "529.982.2");
        assert_eq!(format_cpf("5299822472"), "529.982.247-2");
    }

    #[test]
    fn test_format_truncates_extra_digits() {
        assert_eq!(format_cpf("529982247259999"), "529.982.247-25");
    }

    #[test]
    fn test_random_cpf_is_always_valid() {
        for _ in 0..200 {
            let cpf = generate_random_cpf();
            assert!(validate_cpf(&cpf), "CPF gerado inválido: {}", cpf);
            assert_eq!(strip_cpf(&cpf).len(), 11);
        }
    }
}
