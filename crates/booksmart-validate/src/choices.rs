#![forbid(unsafe_code)]

//! Closed option lists offered by select inputs.

use crate::pattern::PatternKey;

/// Accepted gender values.
pub const GENDERS: &[&str] = &["Masculino", "Femenino"];

/// Accepted book availability values.
pub const BOOK_STATUSES: &[&str] = &["Disponible", "No disponible", "Prestado"];

/// Accepted loan status values.
pub const LOAN_STATUSES: &[&str] = &["Activo", "Entregado", "Atrasado", "Perdido"];

/// Shelf columns `A` through `Z`.
pub const COLUMNS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

/// A named option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// [`GENDERS`].
    Gender,
    /// [`BOOK_STATUSES`].
    BookStatus,
    /// [`LOAN_STATUSES`].
    LoanStatus,
    /// [`COLUMNS`].
    Column,
}

impl Choice {
    /// The literal options, in display order.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Gender => GENDERS,
            Self::BookStatus => BOOK_STATUSES,
            Self::LoanStatus => LOAN_STATUSES,
            Self::Column => COLUMNS,
        }
    }

    /// The registry pattern describing the same set.
    #[must_use]
    pub const fn pattern(self) -> PatternKey {
        match self {
            Self::Gender => PatternKey::Gender,
            Self::BookStatus => PatternKey::BookStatus,
            Self::LoanStatus => PatternKey::LoanStatus,
            Self::Column => PatternKey::Column,
        }
    }

    /// Exact, case-sensitive membership.
    #[must_use]
    pub fn contains(self, value: &str) -> bool {
        self.options().contains(&value)
    }

    /// Violation message, shared with the matching pattern.
    #[must_use]
    pub fn message(self) -> &'static str {
        self.pattern().message()
    }

    /// `(value, label)` pairs for a select input. Labels equal values.
    pub fn select_options(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.options().iter().map(|option| (*option, *option))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches;

    #[test]
    fn options_agree_with_patterns() {
        for choice in [Choice::Gender, Choice::BookStatus, Choice::LoanStatus, Choice::Column] {
            for option in choice.options() {
                assert!(matches(option, choice.pattern()), "{option} rejected");
            }
        }
    }

    #[test]
    fn columns_cover_the_alphabet() {
        assert_eq!(COLUMNS.len(), 26);
        assert_eq!(COLUMNS.first(), Some(&"A"));
        assert_eq!(COLUMNS.last(), Some(&"Z"));
    }

    #[test]
    fn membership_is_exact() {
        assert!(Choice::BookStatus.contains("Prestado"));
        assert!(!Choice::BookStatus.contains("prestado"));
        assert!(!Choice::BookStatus.contains("Prestado "));
    }

    #[test]
    fn select_labels_mirror_values() {
        let pairs: Vec<_> = Choice::Gender.select_options().collect();
        assert_eq!(pairs, vec![("Masculino", "Masculino"), ("Femenino", "Femenino")]);
    }
}
