#![forbid(unsafe_code)]

//! Per-field validation state.
//!
//! [`FieldState::transition`] is the whole state machine. It is a pure
//! function of the previous state, the event, and a verdict closure that
//! maps a value to its error message. The owner of the field decides what
//! the verdict is: a registry pattern for [`FieldValidation`], a schema rule
//! for a form.

use booksmart_validate::format::Formatter;
use booksmart_validate::{PatternKey, describe, matches};

// ---------------------------------------------------------------------------
// FieldPhase / FieldEvent
// ---------------------------------------------------------------------------

/// Where a field sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPhase {
    /// Never blurred; no error is shown.
    Untouched,
    /// Blurred at least once and currently valid.
    TouchedValid,
    /// Blurred at least once and currently invalid.
    TouchedInvalid,
}

/// An input event for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The user edited the value.
    ValueChanged(String),
    /// The input lost focus.
    Blurred,
    /// Discard value, error and touched flag.
    Reset,
    /// Force-touch and validate, as on a submit attempt.
    ValidateAll,
}

// ---------------------------------------------------------------------------
// FieldState
// ---------------------------------------------------------------------------

/// Value, touched flag and shown error of one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    /// Current raw value.
    pub value: String,
    /// Whether the field has been blurred (or force-touched) at least once.
    pub touched: bool,
    /// Message currently shown, if any.
    pub error: Option<String>,
}

impl FieldState {
    /// An untouched field holding `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            touched: false,
            error: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FieldPhase {
        match (self.touched, &self.error) {
            (false, _) => FieldPhase::Untouched,
            (true, None) => FieldPhase::TouchedValid,
            (true, Some(_)) => FieldPhase::TouchedInvalid,
        }
    }

    /// Apply `event`, using `verdict` to compute the error for a value.
    ///
    /// Edits before the first blur do not compute an error. After the first
    /// blur every edit recomputes it.
    #[must_use]
    pub fn transition<F>(self, event: FieldEvent, verdict: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let next = match event {
            FieldEvent::ValueChanged(value) => {
                let error = if self.touched {
                    verdict(&value)
                } else {
                    self.error
                };
                Self {
                    value,
                    touched: self.touched,
                    error,
                }
            }
            FieldEvent::Blurred | FieldEvent::ValidateAll => {
                let error = verdict(&self.value);
                Self {
                    value: self.value,
                    touched: true,
                    error,
                }
            }
            FieldEvent::Reset => Self::default(),
        };
        tracing::trace!(phase = ?next.phase(), "field transition");
        next
    }

    /// Recompute the shown error if the field is touched.
    ///
    /// Used when a field this one depends on has changed.
    #[must_use]
    pub fn revalidate<F>(self, verdict: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.touched {
            return self;
        }
        let error = verdict(&self.value);
        Self { error, ..self }
    }
}

// ---------------------------------------------------------------------------
// FieldValidation
// ---------------------------------------------------------------------------

fn pattern_verdict(key: PatternKey) -> impl Fn(&str) -> Option<String> {
    move |value| describe(value, key).map(str::to_string)
}

/// A standalone input validated against one registry pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    key: PatternKey,
    state: FieldState,
}

impl FieldValidation {
    /// An empty, untouched field.
    #[must_use]
    pub fn new(key: PatternKey) -> Self {
        Self::with_value(key, "")
    }

    /// An untouched field with a default value.
    #[must_use]
    pub fn with_value(key: PatternKey, value: impl Into<String>) -> Self {
        Self {
            key,
            state: FieldState::new(value),
        }
    }

    /// Pattern this field is checked against.
    #[must_use]
    pub fn key(&self) -> PatternKey {
        self.key
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.state.value
    }

    /// Message currently shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Whether the field has been blurred.
    #[must_use]
    pub fn touched(&self) -> bool {
        self.state.touched
    }

    /// Whether the current value satisfies the pattern.
    ///
    /// Derived from the value alone, so it is accurate even while no error
    /// is displayed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches(&self.state.value, self.key)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FieldPhase {
        self.state.phase()
    }

    /// Underlying state.
    #[must_use]
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Apply any field event.
    pub fn apply(&mut self, event: FieldEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.transition(event, pattern_verdict(self.key));
    }

    /// The user edited the value.
    pub fn on_change(&mut self, value: impl Into<String>) {
        self.apply(FieldEvent::ValueChanged(value.into()));
    }

    /// The input lost focus.
    pub fn on_blur(&mut self) {
        self.apply(FieldEvent::Blurred);
    }

    /// Force-touch and validate. Returns the resulting validity.
    pub fn validate(&mut self) -> bool {
        self.apply(FieldEvent::ValidateAll);
        self.state.error.is_none()
    }

    /// Back to untouched with an empty value.
    pub fn reset(&mut self) {
        self.apply(FieldEvent::Reset);
    }
}

// ---------------------------------------------------------------------------
// FormattedField
// ---------------------------------------------------------------------------

/// A [`FieldValidation`] whose input is normalised on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedField {
    formatter: Formatter,
    field: FieldValidation,
}

impl FormattedField {
    /// An empty formatted field.
    #[must_use]
    pub fn new(formatter: Formatter, key: PatternKey) -> Self {
        Self {
            formatter,
            field: FieldValidation::new(key),
        }
    }

    /// Normalise `raw` and apply it as a value change.
    pub fn on_change(&mut self, raw: &str) {
        self.field.on_change(self.formatter.apply(raw));
    }

    /// The input lost focus.
    pub fn on_blur(&mut self) {
        self.field.on_blur();
    }

    /// Back to untouched with an empty value.
    pub fn reset(&mut self) {
        self.field.reset();
    }

    /// The wrapped field.
    #[must_use]
    pub fn field(&self) -> &FieldValidation {
        &self.field
    }

    /// The formatted value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.field.value()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn always(msg: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |_| msg.map(str::to_string)
    }

    #[test]
    fn new_field_is_untouched() {
        let state = FieldState::new("x");
        assert_eq!(state.phase(), FieldPhase::Untouched);
        assert_eq!(state.error, None);
    }

    #[test]
    fn change_before_blur_does_not_validate() {
        let state = FieldState::default()
            .transition(FieldEvent::ValueChanged("bad".into()), always(Some("nope")));
        assert_eq!(state.value, "bad");
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), FieldPhase::Untouched);
    }

    #[test]
    fn blur_touches_and_validates() {
        let state = FieldState::new("bad").transition(FieldEvent::Blurred, always(Some("nope")));
        assert_eq!(state.phase(), FieldPhase::TouchedInvalid);
        assert_eq!(state.error.as_deref(), Some("nope"));

        let state = FieldState::new("ok").transition(FieldEvent::Blurred, always(None));
        assert_eq!(state.phase(), FieldPhase::TouchedValid);
    }

    #[test]
    fn change_after_blur_revalidates_each_keystroke() {
        let verdict = |v: &str| (v.len() < 3).then(|| "corto".to_string());
        let state = FieldState::new("a").transition(FieldEvent::Blurred, verdict);
        assert_eq!(state.phase(), FieldPhase::TouchedInvalid);
        let state = state.transition(FieldEvent::ValueChanged("abc".into()), verdict);
        assert_eq!(state.phase(), FieldPhase::TouchedValid);
        let state = state.transition(FieldEvent::ValueChanged("ab".into()), verdict);
        assert_eq!(state.error.as_deref(), Some("corto"));
    }

    #[test]
    fn reset_clears_everything() {
        let state = FieldState::new("x")
            .transition(FieldEvent::Blurred, always(Some("nope")))
            .transition(FieldEvent::Reset, always(Some("nope")));
        assert_eq!(state, FieldState::default());
    }

    #[test]
    fn validate_all_force_touches() {
        let state = FieldState::default().transition(FieldEvent::ValidateAll, always(Some("req")));
        assert!(state.touched);
        assert_eq!(state.error.as_deref(), Some("req"));
    }

    #[test]
    fn revalidate_skips_untouched() {
        let state = FieldState::new("x").revalidate(always(Some("nope")));
        assert_eq!(state.error, None);
    }

    #[test]
    fn pattern_field_surface() {
        let mut name = FieldValidation::new(PatternKey::Name);
        name.on_change("juan");
        assert!(!name.is_valid());
        assert_eq!(name.error(), None);
        name.on_blur();
        assert_eq!(name.error(), Some(PatternKey::Name.message()));
        name.on_change("Juan");
        assert!(name.is_valid());
        assert_eq!(name.error(), None);
        assert_eq!(name.phase(), FieldPhase::TouchedValid);
        name.reset();
        assert_eq!(name.value(), "");
        assert!(!name.touched());
    }

    #[test]
    fn validate_reports_validity() {
        let mut phone = FieldValidation::with_value(PatternKey::Phone, "5512345678");
        assert!(phone.validate());
        phone.on_change("55");
        assert!(!phone.validate());
    }

    #[test]
    fn formatted_field_normalises_input() {
        let mut curp = FormattedField::new(Formatter::Curp, PatternKey::Curp);
        curp.on_change("abcd123456hmnedf01");
        assert_eq!(curp.value(), "ABCD123456HMNEDF01");
        assert!(curp.field().is_valid());

        let mut phone = FormattedField::new(Formatter::Phone, PatternKey::Phone);
        phone.on_change("55 1234 5678 99");
        assert_eq!(phone.value(), "5512345678");
        phone.on_blur();
        assert_eq!(phone.field().error(), None);
        phone.reset();
        assert_eq!(phone.value(), "");
    }
}
