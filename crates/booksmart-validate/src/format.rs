#![forbid(unsafe_code)]

//! Input normalisers applied before validation.
//!
//! Each formatter maps raw keystroke input to the shape its pattern expects.
//! Formatters never validate; a formatted value can still be rejected.

/// A named input normaliser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formatter {
    /// [`name`].
    Name,
    /// [`uppercase`], for CURP.
    Curp,
    /// [`uppercase`], for RFC.
    Rfc,
    /// [`column`].
    Column,
    /// [`row`].
    Row,
    /// [`phone`].
    Phone,
    /// [`verification_code`].
    VerificationCode,
    /// [`date`].
    Date,
}

impl Formatter {
    /// Apply this formatter.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::Name => name(input),
            Self::Curp | Self::Rfc => uppercase(input),
            Self::Column => column(input),
            Self::Row => row(input),
            Self::Phone => phone(input),
            Self::VerificationCode => verification_code(input),
            Self::Date => date(input),
        }
    }
}

/// Title-case every space-separated word.
#[must_use]
pub fn name(input: &str) -> String {
    input
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the whole value.
#[must_use]
pub fn uppercase(input: &str) -> String {
    input.to_uppercase()
}

/// First character only, uppercased.
#[must_use]
pub fn column(input: &str) -> String {
    input
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// ASCII digits only, at most two.
#[must_use]
pub fn row(input: &str) -> String {
    digits(input, 2)
}

/// ASCII digits only, at most ten.
#[must_use]
pub fn phone(input: &str) -> String {
    digits(input, 10)
}

/// ASCII digits only, at most six.
#[must_use]
pub fn verification_code(input: &str) -> String {
    digits(input, 6)
}

/// Zero-pad a `Y-M-D` or `Y/M/D` date into `YYYY-MM-DD`.
///
/// Input that is not three numeric parts is returned unchanged.
#[must_use]
pub fn date(input: &str) -> String {
    fn numeric(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }

    let parts: Vec<&str> = input.trim().split(['-', '/']).collect();
    match parts.as_slice() {
        [y, m, d] if numeric(y) && numeric(m) && numeric(d) => {
            match (y.parse::<u32>(), m.parse::<u32>(), d.parse::<u32>()) {
                (Ok(y), Ok(m), Ok(d)) => format!("{y:04}-{m:02}-{d:02}"),
                _ => input.to_string(),
            }
        }
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PatternKey, matches};

    #[test]
    fn name_title_cases_words() {
        assert_eq!(name("mARÍA josé"), "María José");
        assert_eq!(name("juan  pérez"), "Juan  Pérez");
        assert!(matches(&name("ángel"), PatternKey::Name));
    }

    #[test]
    fn documents_are_uppercased() {
        assert_eq!(Formatter::Curp.apply("abcd123456hmnedf01"), "ABCD123456HMNEDF01");
        assert_eq!(Formatter::Rfc.apply("ñañ561231gr8"), "ÑAÑ561231GR8");
    }

    #[test]
    fn column_keeps_first_char() {
        assert_eq!(column("bc"), "B");
        assert_eq!(column(""), "");
    }

    #[test]
    fn phone_strips_and_caps() {
        assert_eq!(phone("(55) 1234-5678 ext 9"), "5512345678");
        assert_eq!(verification_code("12a34-5678"), "123456");
        assert_eq!(row("fila 12b"), "12");
    }

    #[test]
    fn date_pads_components() {
        assert_eq!(date("2024-5-7"), "2024-05-07");
        assert_eq!(date("2024/12/31"), "2024-12-31");
        assert_eq!(date("mañana"), "mañana");
        assert_eq!(date("2024-05"), "2024-05");
    }
}
