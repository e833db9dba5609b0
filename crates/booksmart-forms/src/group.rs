#![forbid(unsafe_code)]

//! Fixed groups of related pattern fields.

use booksmart_validate::PatternKey;
use booksmart_validate::format::Formatter;

use crate::field::FormattedField;

/// CURP and RFC, both uppercased as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFields {
    /// Clave Única de Registro de Población.
    pub curp: FormattedField,
    /// Registro Federal de Contribuyentes.
    pub rfc: FormattedField,
}

impl Default for DocumentFields {
    fn default() -> Self {
        Self {
            curp: FormattedField::new(Formatter::Curp, PatternKey::Curp),
            rfc: FormattedField::new(Formatter::Rfc, PatternKey::Rfc),
        }
    }
}

impl DocumentFields {
    /// Both fields empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Both documents are well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.curp.field().is_valid() && self.rfc.field().is_valid()
    }

    /// Blur both fields.
    pub fn touch_all(&mut self) {
        self.curp.on_blur();
        self.rfc.on_blur();
    }

    /// Clear both fields.
    pub fn reset(&mut self) {
        self.curp.reset();
        self.rfc.reset();
    }
}

/// Shelf row and column of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfLocationFields {
    /// Row number, 1 to 99.
    pub row: FormattedField,
    /// Column letter, A to Z.
    pub column: FormattedField,
}

impl Default for ShelfLocationFields {
    fn default() -> Self {
        // Row keeps up to two digits; the pattern rejects zero-padding.
        Self {
            row: FormattedField::new(Formatter::Row, PatternKey::Row),
            column: FormattedField::new(Formatter::Column, PatternKey::Column),
        }
    }
}

impl ShelfLocationFields {
    /// Both fields empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Row and column are both well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.row.field().is_valid() && self.column.field().is_valid()
    }

    /// `<column><row>`, e.g. `B12`, or `None` while either part is invalid.
    #[must_use]
    pub fn location_code(&self) -> Option<String> {
        self.is_valid()
            .then(|| format!("{}{}", self.column.value(), self.row.value()))
    }

    /// Blur both fields.
    pub fn touch_all(&mut self) {
        self.row.on_blur();
        self.column.on_blur();
    }

    /// Clear both fields.
    pub fn reset(&mut self) {
        self.row.reset();
        self.column.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_uppercase_and_validate() {
        let mut docs = DocumentFields::new();
        docs.curp.on_change("abcd123456hmnedf01");
        docs.rfc.on_change("gode561231gr8");
        assert!(docs.is_valid());
        docs.rfc.on_change("gode");
        assert!(!docs.is_valid());
        docs.touch_all();
        assert_eq!(docs.rfc.field().error(), Some(PatternKey::Rfc.message()));
        assert_eq!(docs.curp.field().error(), None);
        docs.reset();
        assert_eq!(docs.curp.value(), "");
    }

    #[test]
    fn location_code_requires_both_parts() {
        let mut shelf = ShelfLocationFields::new();
        assert_eq!(shelf.location_code(), None);
        shelf.row.on_change("12");
        shelf.column.on_change("b");
        assert_eq!(shelf.location_code().as_deref(), Some("B12"));
        shelf.row.on_change("0");
        assert_eq!(shelf.location_code(), None);
    }

    #[test]
    fn row_input_is_digits_only() {
        let mut shelf = ShelfLocationFields::new();
        shelf.row.on_change("fila 7");
        assert_eq!(shelf.row.value(), "7");
        shelf.row.on_change("123");
        assert_eq!(shelf.row.value(), "12");
    }
}
