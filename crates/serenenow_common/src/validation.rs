//! Pure, side-effect-free validators over primitive strings and numbers.
//!
//! These gate user input before a request object is even constructed:
//! failing validation must prevent the network call entirely rather than
//! letting the backend reject it.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// An invite code is exactly six ASCII digits.
pub fn is_valid_client_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Minimal structural email check: one `@`, non-empty local part, and a
/// dotted domain with no whitespace. Anything stricter is the backend's call.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs an interior dot: "a.b" is fine, ".b" and "a." are not.
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Phone numbers are 8-15 digits with an optional leading `+`, ignoring
/// spaces, dashes and parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let normalized = normalize_phone(phone);
    let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
    (8..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Strips formatting characters from a phone number, keeping digits and a
/// leading `+`.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .enumerate()
        .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
        .map(|(_, c)| c)
        .collect()
}

/// Parses a booking date in `YYYY-MM-DD` form.
pub fn parse_booking_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Parses a booking start time in `HH:MM` form.
pub fn parse_booking_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// True when `name` is a known IANA timezone (e.g. "Asia/Kolkata").
pub fn is_valid_timezone(name: &str) -> bool {
    Tz::from_str(name).is_ok()
}

/// Inclusive numeric range check, used for price and duration sanity.
pub fn is_within(value: i64, min: i64, max: i64) -> bool {
    (min..=max).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn client_code_must_be_six_digits() {
        assert!(is_valid_client_code("123456"));
        assert!(!is_valid_client_code("12345"));
        assert!(!is_valid_client_code("1234567"));
        assert!(!is_valid_client_code("12345a"));
        assert!(!is_valid_client_code(""));
        assert!(!is_valid_client_code("12 456"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("client@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("client@nodot"));
        assert!(!is_valid_email("client@.com"));
        assert!(!is_valid_email("has space@example.com"));
    }

    #[test]
    fn phone_shape_and_normalization() {
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("98765 43210"));
        assert!(is_valid_phone("(022) 4000-1234"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("not a number"));
        assert_eq!(normalize_phone("+91 98765-43210"), "+919876543210");
    }

    #[test]
    fn date_and_time_parsing() {
        assert!(parse_booking_date("2024-12-01").is_some());
        assert!(parse_booking_date("2024-13-01").is_none());
        assert!(parse_booking_date("01/12/2024").is_none());
        assert!(parse_booking_time("10:00").is_some());
        assert!(parse_booking_time("24:00").is_none());
        assert!(parse_booking_time("10:00:00").is_none());
    }

    #[test]
    fn timezone_names() {
        assert!(is_valid_timezone("Asia/Kolkata"));
        assert!(is_valid_timezone("UTC"));
        assert!(!is_valid_timezone("Mars/OlympusMons"));
    }

    #[test]
    fn numeric_range() {
        assert!(is_within(30, 15, 120));
        assert!(is_within(15, 15, 120));
        assert!(!is_within(121, 15, 120));
    }

    proptest! {
        // Any six-digit string is accepted, and padding it breaks it.
        #[test]
        fn six_digit_codes_accepted(code in "[0-9]{6}") {
            prop_assert!(is_valid_client_code(&code));
            let padded = format!("{code}0");
            prop_assert!(!is_valid_client_code(&padded));
        }

        // Any string of the wrong length is rejected regardless of content.
        #[test]
        fn wrong_length_codes_rejected(code in "[0-9]{0,5}|[0-9]{7,12}") {
            prop_assert!(!is_valid_client_code(&code));
        }

        // A single non-digit anywhere poisons an otherwise valid code.
        #[test]
        fn non_digit_codes_rejected(
            prefix in "[0-9]{0,5}",
            bad in "[^0-9]",
        ) {
            let mut code = prefix.clone();
            code.push_str(&bad);
            while code.len() < 6 {
                code.push('1');
            }
            let code: String = code.chars().take(6).collect();
            prop_assert!(!is_valid_client_code(&code));
        }

        // Normalizing a phone number never invents digits.
        #[test]
        fn normalize_phone_is_digit_preserving(phone in "\\+?[0-9 ()-]{0,20}") {
            let normalized = normalize_phone(&phone);
            let digits_in: Vec<char> =
                phone.chars().filter(|c| c.is_ascii_digit()).collect();
            let digits_out: Vec<char> =
                normalized.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits_in, digits_out);
        }
    }
}
