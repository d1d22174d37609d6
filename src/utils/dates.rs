//! Utilidades de datas
//!
//! Datas de vencimento e nascimento circulam como `NaiveDate` (ISO no
//! banco) e `dd/mm/aaaa` nas superfícies de exibição. O "hoje" usa o fuso
//! de São Paulo para manter consistência com o cron do banco.

use chrono::{Datelike, FixedOffset, NaiveDate, Utc};

const SAO_PAULO_OFFSET_SECS: i32 = 3 * 3600;

/// Data corrente no fuso America/Sao_Paulo (UTC-3, sem horário de verão).
pub fn today_sao_paulo() -> NaiveDate {
    let offset = FixedOffset::west_opt(SAO_PAULO_OFFSET_SECS).expect("offset fixo válido");
    Utc::now().with_timezone(&offset).date_naive()
}

/// Último dia do mês de (ano, mês).
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Soma meses preservando o dia do mês, com clamp para o último dia
/// válido do mês de destino (31/01 + 1 mês -> 28/02 ou 29/02).
pub fn month_add_same_day(date: NaiveDate, add_months: u32) -> NaiveDate {
    let month0 = date.month0() + add_months;
    let year = date.year() + (month0 / 12) as i32;
    let month = (month0 % 12) + 1;
    let day = date.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Converte `dd/mm/aaaa` para `NaiveDate`. Falha fechada: qualquer
/// entrada fora do formato retorna `None`, nunca uma data adivinhada.
pub fn parse_br_date(value: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    if year < 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formata uma data como `dd/mm/aaaa`.
pub fn format_br_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_add_same_day_leap_year() {
        assert_eq!(month_add_same_day(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(month_add_same_day(d(2024, 1, 31), 2), d(2024, 3, 31));
    }

    #[test]
    fn test_month_add_same_day_non_leap() {
        assert_eq!(month_add_same_day(d(2025, 1, 31), 1), d(2025, 2, 28));
        assert_eq!(month_add_same_day(d(2025, 1, 30), 3), d(2025, 4, 30));
    }

    #[test]
    fn test_month_add_crosses_year() {
        assert_eq!(month_add_same_day(d(2024, 11, 15), 3), d(2025, 2, 15));
        assert_eq!(month_add_same_day(d(2024, 12, 31), 2), d(2025, 2, 28));
    }

    #[test]
    fn test_month_add_zero() {
        assert_eq!(month_add_same_day(d(2025, 1, 15), 0), d(2025, 1, 15));
    }

    #[test]
    fn test_parse_br_date() {
        assert_eq!(parse_br_date("15/01/2025"), Some(d(2025, 1, 15)));
        assert_eq!(parse_br_date("29/02/2024"), Some(d(2024, 2, 29)));
        assert_eq!(parse_br_date("29/02/2025"), None);
        assert_eq!(parse_br_date("2025-01-15"), None);
        assert_eq!(parse_br_date("15/01"), None);
        assert_eq!(parse_br_date("15/01/1899"), None);
        assert_eq!(parse_br_date(""), None);
    }

    #[test]
    fn test_format_br_date() {
        assert_eq!(format_br_date(d(2025, 1, 15)), "15/01/2025");
    }
}
