use lazy_regex::regex_is_match;
use thiserror::Error;

/// The two cities the service launched in. Matching is exact (trim only):
/// the mini-app submits these values from a fixed `<select>`, so anything
/// else is a broken or hand-crafted request.
pub const ALLOWED_CITIES: [&str; 2] = ["Москва", "Санкт-Петербург"];

/// Validation failures, carrying the user-facing message the mini-app
/// shows verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Неверный телефон (слишком короткий).")]
    InvalidPhone,
    #[error("Выберите город: Москва или Санкт-Петербург.")]
    InvalidCity,
    #[error("Неверный формат даты. Используйте календарь.")]
    InvalidDate,
}

/// Normalize a phone number to `[+]digits`. Keeps a leading `+` if the
/// input had one, drops every other character, and rejects anything that
/// decodes to fewer than 10 digits.
pub fn normalize_phone(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 10 {
        return Err(ValidationError::InvalidPhone);
    }
    if trimmed.starts_with('+') {
        Ok(format!("+{digits}"))
    } else {
        Ok(digits)
    }
}

/// Exact allow-list check; returns the canonical `&'static str` so the
/// stored value is always one of [`ALLOWED_CITIES`].
pub fn validate_city(input: &str) -> Result<&'static str, ValidationError> {
    let trimmed = input.trim();
    ALLOWED_CITIES
        .into_iter()
        .find(|c| *c == trimmed)
        .ok_or(ValidationError::InvalidCity)
}

/// Syntactic `YYYY-MM-DD` check. Deliberately no calendar validation
/// (`2024-13-99` passes): the mini-app submits values from a native date
/// picker, and the listing only ever does exact string matches on them.
pub fn is_calendar_date(input: &str) -> bool {
    regex_is_match!(r"^\d{4}-\d{2}-\d{2}$", input)
}

/// Validate a list of availability dates. Any malformed entry fails the
/// whole call; the result is trimmed, de-duplicated and ascending.
pub fn validate_dates(input: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut dates = Vec::with_capacity(input.len());
    for raw in input {
        let date = raw.trim();
        if !is_calendar_date(date) {
            return Err(ValidationError::InvalidDate);
        }
        dates.push(date.to_string());
    }
    dates.sort();
    dates.dedup();
    Ok(dates)
}

/// Lenient experience parser: `"3+"` → 3, `"5"` → 5, anything unparseable
/// → 0. Experience is a soft ranking signal, so a malformed value must
/// not fail the request the way a bad phone does.
pub fn coerce_experience(input: &str) -> i64 {
    let cleaned = input.trim();
    let cleaned = cleaned.strip_suffix('+').unwrap_or(cleaned).trim();
    cleaned.parse().unwrap_or(0)
}

/// Lenient hourly-rate parser: tolerates a decimal point, truncates to
/// whole rubles. Empty and unparseable both come back as `None` — the
/// filter layer cannot tell "no rate given" from "garbage rate", which
/// is accepted: both are excluded by a rate ceiling.
pub fn coerce_rate(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "nan"/"inf" parse as f64; treat them as absent like any other
    // garbage instead of letting the cast saturate to a real number.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
        .map(|rate| rate as i64)
}
