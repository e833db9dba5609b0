#![forbid(unsafe_code)]

//! The pattern registry: one anchored expression and one message per field kind.
//!
//! Keys form a closed set. Looking up a [`PatternKey`] always succeeds; the
//! only fallible step is turning an arbitrary identifier into a key, which
//! yields [`UnknownKey`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::UnknownKey;

// ---------------------------------------------------------------------------
// PatternKey
// ---------------------------------------------------------------------------

/// Semantic identifier of a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKey {
    /// Person first or last name. Uppercase initial, letters and spaces, 2–50 chars.
    Name,
    /// `local@domain.tld`, TLD of at least two letters.
    Email,
    /// Exactly ten ASCII digits.
    Phone,
    /// `Masculino` or `Femenino`.
    Gender,
    /// At least 8 chars with an uppercase letter, a digit and one of `@$!%#?&`.
    Password,
    /// Alphanumeric secret of at least 16 chars.
    TwoFa,
    /// Mexican CURP shape (18 chars).
    Curp,
    /// Mexican RFC shape with homoclave.
    Rfc,
    /// Book availability status.
    BookStatus,
    /// Loan status.
    LoanStatus,
    /// Shelf row `1`..`99`.
    Row,
    /// Shelf column `A`..`Z`.
    Column,
    /// `YYYY-MM-DD` shape. Calendar validity is not checked.
    Date,
    /// Book title, author or publisher.
    BookName,
    /// Free-form address or location text.
    Location,
    /// Six-digit verification code.
    VerificationCode,
}

impl PatternKey {
    /// Every key, in registry order.
    pub const ALL: [Self; 16] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Gender,
        Self::Password,
        Self::TwoFa,
        Self::Curp,
        Self::Rfc,
        Self::BookStatus,
        Self::LoanStatus,
        Self::Row,
        Self::Column,
        Self::Date,
        Self::BookName,
        Self::Location,
        Self::VerificationCode,
    ];

    /// Stable upper-snake identifier (`"NAME"`, `"BOOK_STATUS"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Gender => "GENDER",
            Self::Password => "PASSWORD",
            Self::TwoFa => "TWO_FA",
            Self::Curp => "CURP",
            Self::Rfc => "RFC",
            Self::BookStatus => "BOOK_STATUS",
            Self::LoanStatus => "LOAN_STATUS",
            Self::Row => "ROW",
            Self::Column => "COLUMN",
            Self::Date => "DATE",
            Self::BookName => "BOOK_NAME",
            Self::Location => "LOCATION",
            Self::VerificationCode => "VERIFICATION_CODE",
        }
    }

    /// Position of this key inside [`PatternKey::ALL`].
    const fn index(self) -> usize {
        self as usize
    }

    /// The registered entry for this key.
    #[must_use]
    pub fn entry(self) -> &'static PatternEntry {
        PatternRegistry::global().entry(self)
    }

    /// The human-readable violation message for this key.
    #[must_use]
    pub fn message(self) -> &'static str {
        definition(self).message
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKey::pattern(s))
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Source text of one registry entry.
struct Definition {
    expression: &'static str,
    /// Unanchored probes that must each find a match somewhere in the value.
    requires: &'static [&'static str],
    message: &'static str,
}

fn definition(key: PatternKey) -> &'static Definition {
    match key {
        PatternKey::Name => &Definition {
            expression: r"^[A-ZÁÉÍÓÚÑ][a-záéíóúñA-ZÁÉÍÓÚÑ ]{1,49}$",
            requires: &[],
            message: "El nombre debe iniciar con mayúscula, solo contener letras y espacios, máximo 50 caracteres",
        },
        PatternKey::Email => &Definition {
            expression: r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
            requires: &[],
            message: "Debe ser un correo electrónico válido",
        },
        PatternKey::Phone => &Definition {
            expression: r"^[0-9]{10}$",
            requires: &[],
            message: "El celular debe tener exactamente 10 dígitos",
        },
        PatternKey::Gender => &Definition {
            expression: r"^(?:Masculino|Femenino)$",
            requires: &[],
            message: "El género debe ser \"Masculino\" o \"Femenino\"",
        },
        PatternKey::Password => &Definition {
            expression: r"^[A-Za-z0-9@$!%#?&]{8,}$",
            requires: &[r"[A-Z]", r"[0-9]", r"[@$!%#?&]"],
            message: "La contraseña debe tener mínimo 8 caracteres, al menos una mayúscula, un número y un carácter especial (@$!%#?&)",
        },
        PatternKey::TwoFa => &Definition {
            expression: r"^[A-Za-z0-9]{16,}$",
            requires: &[],
            message: "La clave 2FA debe ser alfanumérica con mínimo 16 caracteres",
        },
        PatternKey::Curp => &Definition {
            expression: r"^[A-Z]{4}[0-9]{6}[HM][A-Z]{5}[A-Z0-9][0-9]$",
            requires: &[],
            message: "CURP debe seguir el formato oficial mexicano",
        },
        PatternKey::Rfc => &Definition {
            expression: r"^[A-ZÑ&]{3,4}[0-9]{6}[A-Z0-9]{3}$",
            requires: &[],
            message: "RFC debe seguir el formato oficial con homoclave",
        },
        PatternKey::BookStatus => &Definition {
            expression: r"^(?:Disponible|No disponible|Prestado)$",
            requires: &[],
            message: "El estado debe ser: Disponible, No disponible o Prestado",
        },
        PatternKey::LoanStatus => &Definition {
            expression: r"^(?:Activo|Entregado|Atrasado|Perdido)$",
            requires: &[],
            message: "El estado debe ser: Activo, Entregado, Atrasado o Perdido",
        },
        PatternKey::Row => &Definition {
            expression: r"^[1-9][0-9]?$",
            requires: &[],
            message: "La fila debe ser un número del 1 al 99",
        },
        PatternKey::Column => &Definition {
            expression: r"^[A-Z]$",
            requires: &[],
            message: "La columna debe ser una letra mayúscula (A-Z)",
        },
        PatternKey::Date => &Definition {
            expression: r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
            requires: &[],
            message: "La fecha debe tener formato YYYY-MM-DD",
        },
        PatternKey::BookName => &Definition {
            expression: r"^[A-Za-z0-9_ÁÉÍÓÚáéíóúÑñ\s.,\-']{1,100}$",
            requires: &[],
            message: "Nombre debe contener solo letras, números, espacios y signos básicos, máximo 100 caracteres",
        },
        PatternKey::Location => &Definition {
            expression: r"^[A-Za-z0-9_ÁÉÍÓÚáéíóúÑñ\s.,#\-]{1,100}$",
            requires: &[],
            message: "La ubicación debe contener caracteres válidos para direcciones, máximo 100 caracteres",
        },
        PatternKey::VerificationCode => &Definition {
            expression: r"^[0-9]{6}$",
            requires: &[],
            message: "El código debe tener 6 dígitos",
        },
    }
}

// ---------------------------------------------------------------------------
// PatternEntry
// ---------------------------------------------------------------------------

/// A compiled registry entry.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    key: PatternKey,
    expression: Regex,
    requires: Vec<Regex>,
    message: &'static str,
}

impl PatternEntry {
    fn compile(key: PatternKey) -> Result<Self, regex::Error> {
        let def = definition(key);
        let requires = def
            .requires
            .iter()
            .map(|probe| Regex::new(probe))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            key,
            expression: Regex::new(def.expression)?,
            requires,
            message: def.message,
        })
    }

    /// The key this entry is registered under.
    #[must_use]
    pub fn key(&self) -> PatternKey {
        self.key
    }

    /// The anchored shape expression.
    #[must_use]
    pub fn expression(&self) -> &Regex {
        &self.expression
    }

    /// The violation message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Raw regex test: the whole value matches the shape and every required
    /// character class occurs at least once.
    ///
    /// Unlike [`crate::matches`], this does not reject empty input on its own.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.expression.is_match(value) && self.requires.iter().all(|probe| probe.is_match(value))
    }
}

// ---------------------------------------------------------------------------
// PatternRegistry
// ---------------------------------------------------------------------------

static GLOBAL_REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();

/// The compiled table of every [`PatternKey`].
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

impl PatternRegistry {
    /// Compile every built-in pattern.
    pub fn new() -> Result<Self, regex::Error> {
        let entries = PatternKey::ALL
            .into_iter()
            .map(PatternEntry::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// The process-wide registry, compiled on first use.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(|| {
            tracing::debug!(patterns = PatternKey::ALL.len(), "compiling pattern registry");
            Self::new().expect("built-in patterns are valid regular expressions")
        })
    }

    /// Look up the entry for `key`.
    #[must_use]
    pub fn entry(&self, key: PatternKey) -> &PatternEntry {
        &self.entries[key.index()]
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternEntry> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
