#![forbid(unsafe_code)]

//! Declarative form schemas.
//!
//! A [`Schema`] is plain `'static` data: an ordered list of [`FieldRule`]s,
//! each pairing a form field name with a [`Rule`]. One interpreter,
//! [`Rule::evaluate`], handles every rule kind, and [`Schema::validate`]
//! always evaluates every field so callers can show all violations at once.
//!
//! ```
//! use booksmart_validate::{Payload, SchemaName, run_schema};
//!
//! let mut payload = Payload::new();
//! payload.insert("email".into(), "admin@booksmart.com".into());
//! payload.insert("password".into(), "password".into());
//! assert!(run_schema(&payload, SchemaName::Login).is_empty());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::UnknownKey;
use crate::choices::Choice;
use crate::pattern::PatternKey;
use crate::validators::{
    ERROR_CODE_MISMATCH, MaxLength, OneOf, Range, Required, ValidationError, ValidationResult,
    Validator,
};

/// Raw form input keyed by field name.
pub type Payload = BTreeMap<String, String>;

/// Per-field violation messages. Empty means every field is valid.
pub type FieldErrors = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// FieldValues
// ---------------------------------------------------------------------------

/// Read access to the current value of each form field.
///
/// Missing fields read as the empty string.
pub trait FieldValues {
    /// Current value of `field`.
    fn value(&self, field: &str) -> &str;
}

impl FieldValues for BTreeMap<String, String> {
    fn value(&self, field: &str) -> &str {
        self.get(field).map_or("", String::as_str)
    }
}

impl<S: std::hash::BuildHasher> FieldValues for HashMap<String, String, S> {
    fn value(&self, field: &str) -> &str {
        self.get(field).map_or("", String::as_str)
    }
}

impl FieldValues for [(&str, &str)] {
    fn value(&self, field: &str) -> &str {
        self.iter()
            .find(|(name, _)| *name == field)
            .map_or("", |(_, value)| *value)
    }
}

impl<const N: usize> FieldValues for [(&str, &str); N] {
    fn value(&self, field: &str) -> &str {
        self.as_slice().value(field)
    }
}

// ---------------------------------------------------------------------------
// Check / Relation / Rule
// ---------------------------------------------------------------------------

/// A single-value test applied once a value is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Full match against a registry pattern.
    Pattern(PatternKey),
    /// Exact membership in an option list.
    OneOf(Choice),
    /// Any non-empty value.
    Present,
    /// Character count cap.
    MaxLength(MaxLength),
    /// Integer bounds.
    Range(Range),
}

impl Check {
    /// Run the check against a non-empty value.
    #[must_use]
    pub fn evaluate(&self, value: &str) -> ValidationResult {
        match self {
            Self::Pattern(key) => key.validate(value),
            Self::OneOf(choice) => OneOf(*choice).validate(value),
            Self::Present => ValidationResult::Valid,
            Self::MaxLength(v) => v.validate(value),
            Self::Range(v) => v.validate(value),
        }
    }
}

/// Message reported when a cross-field equality fails.
pub const MISMATCH_MESSAGE: &str = "Las contraseñas no coinciden";

/// How a dependent field relates to the field it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The two values must be identical.
    Equals,
}

impl Relation {
    /// Whether `value` stands in this relation to `other`.
    ///
    /// Independent of whether either value satisfies any pattern.
    #[must_use]
    pub fn holds(self, value: &str, other: &str) -> bool {
        match self {
            Self::Equals => value == other,
        }
    }

    /// Violation message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Equals => MISMATCH_MESSAGE,
        }
    }
}

/// What a field must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Empty is an error; otherwise the check must pass.
    Required(Check),
    /// Empty is fine; otherwise the check must pass.
    OptionalIfEmpty(Check),
    /// Required, and must stand in `relation` to the value of `other`.
    CrossField {
        /// Referenced field name.
        other: &'static str,
        /// Relation that must hold.
        relation: Relation,
    },
}

impl Rule {
    /// Evaluate this rule for `value`, reading referenced fields from `values`.
    pub fn evaluate(
        &self,
        value: &str,
        required_message: &'static str,
        values: &(impl FieldValues + ?Sized),
    ) -> ValidationResult {
        match self {
            Self::Required(check) => {
                let required = Required::with_message(required_message).validate(value);
                if required.is_invalid() {
                    return required;
                }
                check.evaluate(value)
            }
            Self::OptionalIfEmpty(check) => {
                if value.is_empty() {
                    ValidationResult::Valid
                } else {
                    check.evaluate(value)
                }
            }
            Self::CrossField { other, relation } => {
                let required = Required::with_message(required_message).validate(value);
                if required.is_invalid() {
                    return required;
                }
                if relation.holds(value, values.value(other)) {
                    ValidationResult::Valid
                } else {
                    ValidationResult::Invalid(
                        ValidationError::new(ERROR_CODE_MISMATCH, relation.message())
                            .with_param("other", other),
                    )
                }
            }
        }
    }

    /// The field this rule reads besides its own, if any.
    #[must_use]
    pub fn references(&self) -> Option<&'static str> {
        match self {
            Self::CrossField { other, .. } => Some(*other),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// A form field name bound to its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Form field name.
    pub name: &'static str,
    /// Rule applied to the field's value.
    pub rule: Rule,
    /// Message for an empty required value.
    pub required_message: &'static str,
}

impl FieldRule {
    /// Required field matching a registry pattern.
    #[must_use]
    pub const fn pattern(name: &'static str, key: PatternKey, required: &'static str) -> Self {
        Self {
            name,
            rule: Rule::Required(Check::Pattern(key)),
            required_message: required,
        }
    }

    /// Optional field that must match `key` when filled in.
    #[must_use]
    pub const fn optional(name: &'static str, key: PatternKey) -> Self {
        Self {
            name,
            rule: Rule::OptionalIfEmpty(Check::Pattern(key)),
            required_message: crate::validators::DEFAULT_REQUIRED_MESSAGE,
        }
    }

    /// Required field with an arbitrary check.
    #[must_use]
    pub const fn required(name: &'static str, check: Check, required: &'static str) -> Self {
        Self {
            name,
            rule: Rule::Required(check),
            required_message: required,
        }
    }

    /// Required field that must equal `other`.
    #[must_use]
    pub const fn equals(name: &'static str, other: &'static str, required: &'static str) -> Self {
        Self {
            name,
            rule: Rule::CrossField {
                other,
                relation: Relation::Equals,
            },
            required_message: required,
        }
    }

    /// Evaluate this field against `values`.
    pub fn evaluate(&self, values: &(impl FieldValues + ?Sized)) -> ValidationResult {
        self.rule
            .evaluate(values.value(self.name), self.required_message, values)
    }

    /// Evaluate this field with an explicit value for the field itself.
    pub fn evaluate_value(
        &self,
        value: &str,
        values: &(impl FieldValues + ?Sized),
    ) -> ValidationResult {
        self.rule.evaluate(value, self.required_message, values)
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A named, ordered set of field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    name: &'static str,
    fields: &'static [FieldRule],
}

impl Schema {
    /// Create a schema from static rule data.
    #[must_use]
    pub const fn new(name: &'static str, fields: &'static [FieldRule]) -> Self {
        Self { name, fields }
    }

    /// Schema identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Field rules in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Rule for `field`, if declared.
    #[must_use]
    pub fn rule(&self, field: &str) -> Option<&'static FieldRule> {
        self.fields.iter().find(|rule| rule.name == field)
    }

    /// Rules that read `field` through a cross-field relation.
    pub fn dependents<'a>(&self, field: &'a str) -> impl Iterator<Item = &'static FieldRule> + 'a {
        self.fields
            .iter()
            .filter(move |rule| rule.rule.references() == Some(field))
    }

    /// Message for one field, or `None` when it is valid.
    ///
    /// # Errors
    ///
    /// [`UnknownKey`] when `field` is not declared by this schema.
    pub fn validate_field(
        &self,
        field: &str,
        values: &(impl FieldValues + ?Sized),
    ) -> Result<Option<String>, UnknownKey> {
        let rule = self
            .rule(field)
            .ok_or_else(|| UnknownKey::field(self.name, field))?;
        Ok(rule.evaluate(values).error_message())
    }

    /// Evaluate every field. No short-circuit.
    #[must_use]
    pub fn validate(&self, values: &(impl FieldValues + ?Sized)) -> FieldErrors {
        let errors: FieldErrors = self
            .fields
            .iter()
            .filter_map(|rule| {
                rule.evaluate(values)
                    .error_message()
                    .map(|message| (rule.name.to_string(), message))
            })
            .collect();
        tracing::debug!(
            schema = self.name,
            fields = self.fields.len(),
            errors = errors.len(),
            "schema evaluated"
        );
        errors
    }

    /// `Ok` when every field passes, otherwise the full error map.
    pub fn certify<P: FieldValues + ?Sized>(&self, values: &P) -> Result<(), FieldErrors> {
        let errors = self.validate(values);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// ---------------------------------------------------------------------------
// Built-in schemas
// ---------------------------------------------------------------------------

const fn first_name() -> FieldRule {
    FieldRule::pattern("firstName", PatternKey::Name, "El nombre es requerido")
}

const fn last_name() -> FieldRule {
    FieldRule::pattern("lastName", PatternKey::Name, "El apellido es requerido")
}

const fn email() -> FieldRule {
    FieldRule::pattern(
        "email",
        PatternKey::Email,
        "El correo electrónico es requerido",
    )
}

const fn phone() -> FieldRule {
    FieldRule::pattern("phone", PatternKey::Phone, "El celular es requerido")
}

const fn curp() -> FieldRule {
    FieldRule::pattern("curp", PatternKey::Curp, "El CURP es requerido")
}

const fn rfc() -> FieldRule {
    FieldRule::pattern("rfc", PatternKey::Rfc, "El RFC es requerido")
}

const fn strong_password(name: &'static str) -> FieldRule {
    FieldRule::pattern(name, PatternKey::Password, "La contraseña es requerida")
}

const fn book_text(name: &'static str, required: &'static str) -> FieldRule {
    FieldRule::pattern(name, PatternKey::BookName, required)
}

/// New-user sign-up.
pub const REGISTRATION: Schema = Schema {
    name: "registration",
    fields: &[
        first_name(),
        last_name(),
        email(),
        phone(),
        curp(),
        rfc(),
        strong_password("password"),
        FieldRule::equals("confirmPassword", "password", "Confirma tu contraseña"),
    ],
};

/// Sign-in. The password is only required, not strength-checked.
pub const LOGIN: Schema = Schema {
    name: "login",
    fields: &[
        email(),
        FieldRule::required("password", Check::Present, "La contraseña es requerida"),
    ],
};

/// Full user profile.
pub const USER_PROFILE: Schema = Schema {
    name: "user-profile",
    fields: &[
        first_name(),
        last_name(),
        email(),
        phone(),
        FieldRule::required("gender", Check::OneOf(Choice::Gender), "El género es requerido"),
        curp(),
        rfc(),
    ],
};

/// Admin user create/edit form. Contact and identity documents are optional.
pub const USER_EDIT: Schema = Schema {
    name: "user-edit",
    fields: &[
        FieldRule::pattern("name", PatternKey::Name, "El nombre es requerido"),
        FieldRule::pattern("email", PatternKey::Email, "El email es requerido"),
        FieldRule::required(
            "age",
            Check::Range(Range {
                min: 18,
                max: 100,
                below: "La edad debe ser mayor a 18 años",
                above: "La edad debe ser menor a 100 años",
            }),
            "La edad es requerida",
        ),
        FieldRule::optional("phone", PatternKey::Phone),
        FieldRule::optional("gender", PatternKey::Gender),
        FieldRule::optional("curp", PatternKey::Curp),
        FieldRule::optional("rfc", PatternKey::Rfc),
    ],
};

/// Book create/edit form.
pub const BOOK: Schema = Schema {
    name: "book",
    fields: &[
        book_text("title", "El título es requerido"),
        book_text("author", "El autor es requerido"),
        book_text("editorial", "La editorial es requerida"),
        FieldRule::pattern("status", PatternKey::BookStatus, "El estado es requerido"),
        FieldRule::pattern("location", PatternKey::Location, "La ubicación es requerida"),
        FieldRule::pattern("row", PatternKey::Row, "La fila es requerida"),
        FieldRule::pattern("column", PatternKey::Column, "La columna es requerida"),
    ],
};

/// Book loan.
pub const LOAN: Schema = Schema {
    name: "loan",
    fields: &[
        FieldRule::required("userId", Check::Present, "El usuario es requerido"),
        FieldRule::required("bookId", Check::Present, "El libro es requerido"),
        FieldRule::pattern("loanDate", PatternKey::Date, "La fecha es requerida"),
        FieldRule::pattern("returnDate", PatternKey::Date, "La fecha es requerida"),
        FieldRule::required("status", Check::OneOf(Choice::LoanStatus), "El estado es requerido"),
        FieldRule {
            name: "notes",
            rule: Rule::OptionalIfEmpty(Check::MaxLength(MaxLength {
                max: 500,
                message: "Las observaciones no pueden exceder {max} caracteres",
            })),
            required_message: crate::validators::DEFAULT_REQUIRED_MESSAGE,
        },
    ],
};

/// Password change for a signed-in user.
pub const PASSWORD_CHANGE: Schema = Schema {
    name: "password-change",
    fields: &[
        FieldRule::required(
            "currentPassword",
            Check::Present,
            "La contraseña actual es requerida",
        ),
        strong_password("newPassword"),
        FieldRule::equals(
            "confirmNewPassword",
            "newPassword",
            "Confirma tu nueva contraseña",
        ),
    ],
};

/// Two-factor enrolment. The secret may be left for the server to generate.
pub const TWO_FACTOR_SETUP: Schema = Schema {
    name: "two-factor-setup",
    fields: &[
        FieldRule::optional("secret", PatternKey::TwoFa),
        FieldRule::pattern(
            "code",
            PatternKey::VerificationCode,
            "El código de verificación es requerido",
        ),
    ],
};

// ---------------------------------------------------------------------------
// SchemaName
// ---------------------------------------------------------------------------

/// Identifier of a built-in schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    /// [`REGISTRATION`].
    Registration,
    /// [`LOGIN`].
    Login,
    /// [`USER_PROFILE`].
    UserProfile,
    /// [`USER_EDIT`].
    UserEdit,
    /// [`BOOK`].
    Book,
    /// [`LOAN`].
    Loan,
    /// [`PASSWORD_CHANGE`].
    PasswordChange,
    /// [`TWO_FACTOR_SETUP`].
    TwoFactorSetup,
}

impl SchemaName {
    /// Every built-in schema name.
    pub const ALL: [Self; 8] = [
        Self::Registration,
        Self::Login,
        Self::UserProfile,
        Self::UserEdit,
        Self::Book,
        Self::Loan,
        Self::PasswordChange,
        Self::TwoFactorSetup,
    ];

    /// The schema this name refers to.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Registration => &REGISTRATION,
            Self::Login => &LOGIN,
            Self::UserProfile => &USER_PROFILE,
            Self::UserEdit => &USER_EDIT,
            Self::Book => &BOOK,
            Self::Loan => &LOAN,
            Self::PasswordChange => &PASSWORD_CHANGE,
            Self::TwoFactorSetup => &TWO_FACTOR_SETUP,
        }
    }

    /// Kebab-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.schema().name()
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownKey::schema(s))
    }
}

/// Validate `payload` against the named schema.
#[must_use]
pub fn run_schema(payload: &(impl FieldValues + ?Sized), name: SchemaName) -> FieldErrors {
    name.schema().validate(payload)
}

/// Validate `payload` against a schema named by string.
///
/// An unrecognised name is an [`UnknownKey`] error, never an empty or
/// populated error map.
pub fn run_schema_named(
    payload: &(impl FieldValues + ?Sized),
    name: &str,
) -> Result<FieldErrors, UnknownKey> {
    let name: SchemaName = name.parse()?;
    Ok(run_schema(payload, name))
}

// ---------------------------------------------------------------------------
// Field groups
// ---------------------------------------------------------------------------

fn group(pairs: &[(&str, &str, PatternKey)]) -> FieldErrors {
    pairs
        .iter()
        .filter_map(|(field, value, key)| {
            crate::describe(value, *key).map(|message| ((*field).to_string(), message.to_string()))
        })
        .collect()
}

/// First and last name.
#[must_use]
pub fn full_name(first: &str, last: &str) -> FieldErrors {
    group(&[
        ("firstName", first, PatternKey::Name),
        ("lastName", last, PatternKey::Name),
    ])
}

/// Email and strong password.
#[must_use]
pub fn credentials(email: &str, password: &str) -> FieldErrors {
    group(&[
        ("email", email, PatternKey::Email),
        ("password", password, PatternKey::Password),
    ])
}

/// CURP and RFC.
#[must_use]
pub fn mexican_documents(curp: &str, rfc: &str) -> FieldErrors {
    group(&[("curp", curp, PatternKey::Curp), ("rfc", rfc, PatternKey::Rfc)])
}

/// Shelf row and column.
#[must_use]
pub fn shelf_location(row: &str, column: &str) -> FieldErrors {
    group(&[("row", row, PatternKey::Row), ("column", column, PatternKey::Column)])
}

/// Title, author and publisher.
#[must_use]
pub fn book_info(title: &str, author: &str, editorial: &str) -> FieldErrors {
    group(&[
        ("title", title, PatternKey::BookName),
        ("author", author, PatternKey::BookName),
        ("editorial", editorial, PatternKey::BookName),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyKind;
    use pretty_assertions::assert_eq;

    fn registration() -> Payload {
        [
            ("firstName", "Juan"),
            ("lastName", "Pérez"),
            ("email", "juan@example.com"),
            ("phone", "5512345678"),
            ("curp", "ABCD123456HMNEDF01"),
            ("rfc", "GODE561231GR8"),
            ("password", "Password123!"),
            ("confirmPassword", "Password123!"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn valid_registration_has_no_errors() {
        assert_eq!(run_schema(&registration(), SchemaName::Registration), FieldErrors::new());
    }

    #[test]
    fn changing_confirmation_flags_only_confirmation() {
        let mut payload = registration();
        payload.insert("confirmPassword".into(), "Password123?".into());
        let errors = run_schema(&payload, SchemaName::Registration);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirmPassword").map(String::as_str), Some(MISMATCH_MESSAGE));
    }

    #[test]
    fn empty_payload_reports_every_required_field() {
        let errors = run_schema(&Payload::new(), SchemaName::Registration);
        assert_eq!(errors.len(), REGISTRATION.fields().len());
        assert_eq!(errors["firstName"], "El nombre es requerido");
        assert_eq!(errors["confirmPassword"], "Confirma tu contraseña");
    }

    #[test]
    fn required_and_pattern_messages_differ() {
        let mut payload = registration();
        payload.insert("rfc".into(), String::new());
        assert_eq!(run_schema(&payload, SchemaName::Registration)["rfc"], "El RFC es requerido");
        payload.insert("rfc".into(), "XYZ".into());
        assert_eq!(
            run_schema(&payload, SchemaName::Registration)["rfc"],
            PatternKey::Rfc.message()
        );
    }

    #[test]
    fn login_password_is_presence_only() {
        let payload = [("email", "admin@booksmart.com"), ("password", "x")];
        assert!(run_schema(&payload, SchemaName::Login).is_empty());
        let payload = [("email", "admin@booksmart.com"), ("password", "")];
        assert_eq!(
            run_schema(&payload, SchemaName::Login)["password"],
            "La contraseña es requerida"
        );
    }

    #[test]
    fn optional_fields_only_checked_when_filled() {
        let mut payload: Payload = [("name", "Ana"), ("email", "ana@example.com"), ("age", "30")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(run_schema(&payload, SchemaName::UserEdit).is_empty());

        payload.insert("phone".into(), "123".into());
        let errors = run_schema(&payload, SchemaName::UserEdit);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["phone"], PatternKey::Phone.message());
    }

    #[test]
    fn user_edit_age_bounds() {
        let base = [("name", "Ana"), ("email", "ana@example.com")];
        let with_age = |age: &'static str| {
            let mut p: Payload = base
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            p.insert("age".into(), age.into());
            run_schema(&p, SchemaName::UserEdit)
        };
        assert!(with_age("18").is_empty());
        assert_eq!(with_age("17")["age"], "La edad debe ser mayor a 18 años");
        assert_eq!(with_age("101")["age"], "La edad debe ser menor a 100 años");
        assert_eq!(with_age("")["age"], "La edad es requerida");
    }

    #[test]
    fn loan_notes_are_capped() {
        let notes = "x".repeat(501);
        let payload = [
            ("userId", "1"),
            ("bookId", "7"),
            ("loanDate", "2024-01-10"),
            ("returnDate", "2024-01-24"),
            ("status", "Activo"),
            ("notes", notes.as_str()),
        ];
        let errors = run_schema(&payload, SchemaName::Loan);
        assert_eq!(
            errors.get("notes").map(String::as_str),
            Some("Las observaciones no pueden exceder 500 caracteres")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn two_factor_secret_is_optional() {
        assert!(run_schema(&[("code", "123456")], SchemaName::TwoFactorSetup).is_empty());
        let errors = run_schema(&[("secret", "short"), ("code", "12345")], SchemaName::TwoFactorSetup);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn password_change_cross_field() {
        let payload = [
            ("currentPassword", "old"),
            ("newPassword", "Password123!"),
            ("confirmNewPassword", "Password123!"),
        ];
        assert!(run_schema(&payload, SchemaName::PasswordChange).is_empty());
    }

    #[test]
    fn dependents_follow_references() {
        let deps: Vec<_> = REGISTRATION.dependents("password").map(|r| r.name).collect();
        assert_eq!(deps, vec!["confirmPassword"]);
        assert_eq!(REGISTRATION.dependents("email").count(), 0);
    }

    #[test]
    fn relation_equals_is_plain_equality() {
        assert!(Relation::Equals.holds("weak", "weak"));
        assert!(!Relation::Equals.holds("Password123!", "Password123"));
    }

    #[test]
    fn schema_names_round_trip() {
        for name in SchemaName::ALL {
            assert_eq!(name.as_str().parse::<SchemaName>(), Ok(name));
        }
    }

    #[test]
    fn unknown_schema_name_is_an_error() {
        let err = run_schema_named(&Payload::new(), "checkout").unwrap_err();
        assert_eq!(err.kind, KeyKind::Schema);
        assert_eq!(err.to_string(), "unknown schema key `checkout`");
    }

    #[test]
    fn named_and_typed_runs_agree() {
        let payload = registration();
        assert_eq!(
            run_schema_named(&payload, "registration").unwrap(),
            run_schema(&payload, SchemaName::Registration)
        );
    }

    #[test]
    fn field_groups() {
        assert!(full_name("Juan", "Pérez").is_empty());
        assert_eq!(full_name("juan", "Pérez").len(), 1);
        assert_eq!(credentials("bad", "bad").len(), 2);
        assert!(mexican_documents("ABCD123456HMNEDF01", "GODE561231GR8").is_empty());
        assert_eq!(
            shelf_location("0", "A").get("row").map(String::as_str),
            Some(PatternKey::Row.message())
        );
        assert!(book_info("Cien años de soledad", "Gabriel García Márquez", "Sudamericana").is_empty());
    }

    #[test]
    fn certify_passes_or_returns_all_errors() {
        assert!(REGISTRATION.certify(&registration()).is_ok());
        let errs = LOGIN.certify(&Payload::new()).unwrap_err();
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn validate_field_on_undeclared_field_is_an_error() {
        let err = REGISTRATION
            .validate_field("confirmPasword", &registration())
            .unwrap_err();
        assert_eq!(err.kind, KeyKind::Field);
        assert_eq!(err.name, "confirmPasword");
    }

    #[test]
    fn validate_field_reports_declared_field() {
        let mut payload = registration();
        assert_eq!(REGISTRATION.validate_field("confirmPassword", &payload), Ok(None));
        payload.insert("confirmPassword".into(), "Different1!".into());
        assert!(matches!(
            REGISTRATION.validate_field("confirmPassword", &payload),
            Ok(Some(_))
        ));
    }

    #[test]
    fn cross_field_rules_reference_declared_fields() {
        for name in SchemaName::ALL {
            let schema = name.schema();
            for rule in schema.fields() {
                if let Some(other) = rule.rule.references() {
                    assert!(
                        schema.rule(other).is_some(),
                        "{name}: `{}` references undeclared `{other}`",
                        rule.name
                    );
                }
            }
        }
    }
}
