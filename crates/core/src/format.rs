//! Display formatting shared by every front-end

use chrono::{Datelike, NaiveDate};

use crate::i18n::Language;

/// Share of a whole: whole numbers without decimals, otherwise one decimal.
/// Non-finite input renders as `0%`.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    if value.fract() == 0.0 {
        format!("{}%", value as i64)
    } else {
        format!("{:.1}%", value)
    }
}

/// Global unlock rate with two decimals, `--` when unknown
pub fn format_rarity(percent: Option<f64>) -> String {
    match percent {
        Some(p) if p.is_finite() => format!("{:.2}%", p),
        _ => "--".to_string(),
    }
}

/// Integer with thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Hours rounded to the nearest whole hour with separators
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0".to_string();
    }
    format_count(hours.round() as u64)
}

pub fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return "0.0".to_string();
    }
    format!("{:.1}", value)
}

/// `15 JUN 2015` with the month abbreviated in `language`
pub fn format_date(date: NaiveDate, language: Language) -> String {
    let month = language.month_abbreviations()[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_drops_trailing_zero() {
        assert_eq!(format_percent(40.0), "40%");
        assert_eq!(format_percent(24.5), "24.5%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn rarity_has_two_decimals() {
        assert_eq!(format_rarity(Some(0.5)), "0.50%");
        assert_eq!(format_rarity(None), "--");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_hours(1234.6), "1,235");
        assert_eq!(format_hours(-3.0), "0");
    }

    #[test]
    fn date_uses_localized_month() {
        let date = NaiveDate::from_ymd_opt(2015, 6, 5).unwrap();
        assert_eq!(format_date(date, Language::En), "05 JUN 2015");
        assert_eq!(format_date(date, Language::It), "05 GIU 2015");
    }
}
