#![forbid(unsafe_code)]

//! Whole-form validation state.
//!
//! A [`FormValidation`] holds one [`FieldState`] per field of a `'static`
//! [`Schema`] and drives each through [`FieldState::transition`] with the
//! schema rule as verdict. Fields that reference another field through a
//! cross-field rule are re-checked whenever the referenced field changes, so
//! a confirmation error appears or clears as the password is edited.
//!
//! # Invariants
//!
//! 1. After [`FormValidation::validate_all`], [`FormValidation::errors`]
//!    equals `schema.validate(values)`.
//! 2. [`FormValidation::is_form_valid`] depends only on the current values,
//!    never on touched flags.
//! 3. [`FormValidation::reset`] restores the construction-time values with
//!    every field untouched and no errors shown.

use booksmart_validate::{
    FieldErrors, FieldRule, FieldValues, Payload, Schema, SchemaName, UnknownKey,
};

use crate::field::{FieldEvent, FieldPhase, FieldState};

// ---------------------------------------------------------------------------
// FieldView
// ---------------------------------------------------------------------------

/// Read-only snapshot of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldView<'a> {
    /// Declared field name.
    pub name: &'static str,
    /// Current value.
    pub value: &'a str,
    /// Message currently shown, if any.
    pub error: Option<&'a str>,
    /// Whether the field has been blurred or force-touched.
    pub touched: bool,
    /// Whether the current value passes the field rule.
    pub is_valid: bool,
    /// Whether the value differs from the construction-time value.
    pub dirty: bool,
}

impl FieldView<'_> {
    /// Lifecycle phase of the field.
    #[must_use]
    pub fn phase(&self) -> FieldPhase {
        match (self.touched, self.error) {
            (false, _) => FieldPhase::Untouched,
            (true, None) => FieldPhase::TouchedValid,
            (true, Some(_)) => FieldPhase::TouchedInvalid,
        }
    }
}

// ---------------------------------------------------------------------------
// FormValidation
// ---------------------------------------------------------------------------

/// Validation state for every field of one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    schema: &'static Schema,
    initial: Vec<String>,
    fields: Vec<FieldState>,
}

impl FormValidation {
    /// All fields empty and untouched.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self::with_initial(schema, &Payload::new())
    }

    /// Fields seeded from `initial`; undeclared keys are ignored.
    #[must_use]
    pub fn with_initial(schema: &'static Schema, initial: &(impl FieldValues + ?Sized)) -> Self {
        debug_assert!(
            schema
                .fields()
                .iter()
                .filter_map(|rule| rule.rule.references())
                .all(|other| schema.rule(other).is_some()),
            "cross-field rule in `{}` references an undeclared field",
            schema.name()
        );
        let initial: Vec<String> = schema
            .fields()
            .iter()
            .map(|rule| initial.value(rule.name).to_string())
            .collect();
        let fields = initial.iter().cloned().map(FieldState::new).collect();
        tracing::debug!(schema = schema.name(), fields = initial.len(), "form created");
        Self {
            schema,
            initial,
            fields,
        }
    }

    /// Empty form for a built-in schema.
    #[must_use]
    pub fn for_schema(name: SchemaName) -> Self {
        Self::new(name.schema())
    }

    /// Schema driving this form.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.schema.fields().iter().position(|rule| rule.name == field)
    }

    fn index(&self, field: &str) -> Result<usize, UnknownKey> {
        self.position(field)
            .ok_or_else(|| UnknownKey::field(self.schema.name(), field))
    }

    fn verdict<'s>(&'s self, rule: &'static FieldRule) -> impl Fn(&str) -> Option<String> + 's {
        move |value| rule.evaluate_value(value, self).error_message()
    }

    // --- events ------------------------------------------------------------

    /// Apply `event` to `field`.
    ///
    /// On a form, [`FieldEvent::Reset`] restores the field's construction-time
    /// value rather than clearing it. Value changes and resets re-check every
    /// touched field that references `field`.
    ///
    /// # Errors
    ///
    /// [`UnknownKey`] when the schema does not declare `field`.
    pub fn apply(&mut self, field: &str, event: FieldEvent) -> Result<(), UnknownKey> {
        let index = self.index(field)?;
        let rule = &self.schema.fields()[index];
        let value_changed = matches!(event, FieldEvent::ValueChanged(_) | FieldEvent::Reset);
        tracing::trace!(schema = self.schema.name(), field = rule.name, ?event, "form event");

        let current = std::mem::take(&mut self.fields[index]);
        let next = if event == FieldEvent::Reset {
            FieldState::new(self.initial[index].clone())
        } else {
            current.transition(event, self.verdict(rule))
        };
        self.fields[index] = next;

        if value_changed {
            self.revalidate_dependents(rule.name);
        }
        Ok(())
    }

    fn revalidate_dependents(&mut self, field: &str) {
        let schema = self.schema;
        let dependents: Vec<(usize, &'static FieldRule)> = schema
            .dependents(field)
            .filter_map(|rule| self.position(rule.name).map(|index| (index, rule)))
            .collect();
        for (index, rule) in dependents {
            let current = std::mem::take(&mut self.fields[index]);
            let next = current.revalidate(self.verdict(rule));
            self.fields[index] = next;
        }
    }

    /// Pure form of [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// [`UnknownKey`] when the schema does not declare `field`.
    pub fn transition(mut self, field: &str, event: FieldEvent) -> Result<Self, UnknownKey> {
        self.apply(field, event)?;
        Ok(self)
    }

    /// The user edited `field`.
    ///
    /// # Errors
    ///
    /// [`UnknownKey`] when the schema does not declare `field`.
    pub fn on_change(&mut self, field: &str, value: impl Into<String>) -> Result<(), UnknownKey> {
        self.apply(field, FieldEvent::ValueChanged(value.into()))
    }

    /// `field` lost focus.
    ///
    /// # Errors
    ///
    /// [`UnknownKey`] when the schema does not declare `field`.
    pub fn on_blur(&mut self, field: &str) -> Result<(), UnknownKey> {
        self.apply(field, FieldEvent::Blurred)
    }

    /// Touch every field and compute every error. Returns form validity.
    pub fn validate_all(&mut self) -> bool {
        for (index, rule) in self.schema.fields().iter().enumerate() {
            let current = std::mem::take(&mut self.fields[index]);
            let next = current.transition(FieldEvent::ValidateAll, self.verdict(rule));
            self.fields[index] = next;
        }
        let errors = self.fields.iter().filter(|f| f.error.is_some()).count();
        tracing::debug!(schema = self.schema.name(), errors, "form validated");
        errors == 0
    }

    /// Restore construction-time values; untouch everything.
    pub fn reset(&mut self) {
        self.fields = self.initial.iter().cloned().map(FieldState::new).collect();
        tracing::debug!(schema = self.schema.name(), "form reset");
    }

    /// Validate everything and hand back the payload if it is clean.
    ///
    /// # Errors
    ///
    /// Every field error when any field fails.
    pub fn submit(&mut self) -> Result<Payload, FieldErrors> {
        if self.validate_all() {
            tracing::debug!(schema = self.schema.name(), "form submitted");
            Ok(self.values())
        } else {
            Err(self.errors())
        }
    }

    // --- queries -----------------------------------------------------------

    /// Snapshot of `field`, or `None` when undeclared.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<FieldView<'_>> {
        let index = self.position(field)?;
        let rule = &self.schema.fields()[index];
        let state = &self.fields[index];
        Some(FieldView {
            name: rule.name,
            value: &state.value,
            error: state.error.as_deref(),
            touched: state.touched,
            is_valid: rule.evaluate(self).is_valid(),
            dirty: state.value != self.initial[index],
        })
    }

    /// Snapshots of every field in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> + '_ {
        self.schema
            .fields()
            .iter()
            .filter_map(|rule| self.field(rule.name))
    }

    /// Whether every field passes its rule, shown errors aside.
    #[must_use]
    pub fn is_form_valid(&self) -> bool {
        self.schema
            .fields()
            .iter()
            .all(|rule| rule.evaluate(self).is_valid())
    }

    /// Messages currently shown, keyed by field.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .filter_map(|(rule, state)| {
                state
                    .error
                    .as_ref()
                    .map(|message| (rule.name.to_string(), message.clone()))
            })
            .collect()
    }

    /// Current values keyed by field.
    #[must_use]
    pub fn values(&self) -> Payload {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|(rule, state)| (rule.name.to_string(), state.value.clone()))
            .collect()
    }

    /// Whether any field has been touched.
    #[must_use]
    pub fn any_touched(&self) -> bool {
        self.fields.iter().any(|f| f.touched)
    }

    /// Whether any value differs from its construction-time value.
    #[must_use]
    pub fn any_dirty(&self) -> bool {
        self.fields
            .iter()
            .zip(&self.initial)
            .any(|(state, initial)| state.value != *initial)
    }
}

impl FieldValues for FormValidation {
    fn value(&self, field: &str) -> &str {
        self.position(field)
            .map_or("", |index| self.fields[index].value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
