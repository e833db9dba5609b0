//! Property-based invariant tests for the primitive validators and schemas.
//!
//! 1. `matches` agrees with the raw registry expression on non-empty input.
//! 2. `describe` is `None` exactly when `matches` holds.
//! 3. `describe` is deterministic.
//! 4. Generated well-formed values are accepted.
//! 5. The equality relation holds iff the two strings are identical,
//!    regardless of password strength.
//! 6. Breaking one registration field reports that field, plus its
//!    cross-field dependents, and nothing else.

use booksmart_validate::schema::REGISTRATION;
use booksmart_validate::{
    MISMATCH_MESSAGE, Payload, PatternKey, Relation, SchemaName, describe, matches, run_schema,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn any_key() -> impl Strategy<Value = PatternKey> {
    proptest::sample::select(PatternKey::ALL.to_vec())
}

fn valid_registration() -> impl Strategy<Value = Payload> {
    (
        "[A-Z][a-z]{1,20}",
        "[A-Z][a-z]{1,20}",
        "[a-z]{1,10}@[a-z]{1,10}\\.[a-z]{2,4}",
        "[0-9]{10}",
        "[A-Z]{4}[0-9]{6}[HM][A-Z]{5}[A-Z0-9][0-9]",
        "[A-Z]{3,4}[0-9]{6}[A-Z0-9]{3}",
        "[A-Z][a-z]{5,10}[0-9][!@#]",
    )
        .prop_map(|(first, last, email, phone, curp, rfc, password)| {
            [
                ("firstName", first),
                ("lastName", last),
                ("email", email),
                ("phone", phone),
                ("curp", curp),
                ("rfc", rfc),
                ("confirmPassword", password.clone()),
                ("password", password),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn matches_agrees_with_registry(key in any_key(), value in "\\PC{1,24}") {
        prop_assert_eq!(matches(&value, key), key.entry().is_match(&value));
    }

    #[test]
    fn describe_is_none_iff_matches(key in any_key(), value in "\\PC{0,24}") {
        prop_assert_eq!(describe(&value, key).is_none(), matches(&value, key));
    }

    #[test]
    fn describe_is_deterministic(key in any_key(), value in "\\PC{0,24}") {
        prop_assert_eq!(describe(&value, key), describe(&value, key));
    }

    #[test]
    fn generated_rows_are_accepted(row in 1u32..=99) {
        prop_assert!(matches(&row.to_string(), PatternKey::Row));
    }

    #[test]
    fn generated_curps_are_accepted(curp in "[A-Z]{4}[0-9]{6}[HM][A-Z]{5}[A-Z0-9][0-9]") {
        prop_assert!(matches(&curp, PatternKey::Curp));
    }

    #[test]
    fn equality_relation_is_string_equality(p in "\\PC{0,16}", c in "\\PC{0,16}") {
        prop_assert_eq!(Relation::Equals.holds(&p, &c), p == c);
    }

    #[test]
    fn weak_but_equal_passwords_satisfy_confirmation(p in "[a-z]{1,6}") {
        let mut payload = Payload::new();
        payload.insert("password".into(), p.clone());
        payload.insert("confirmPassword".into(), p);
        let errors = run_schema(&payload, SchemaName::Registration);
        prop_assert!(errors.contains_key("password"));
        prop_assert!(!errors.contains_key("confirmPassword"));
    }

    #[test]
    fn valid_registration_is_clean(payload in valid_registration()) {
        prop_assert!(run_schema(&payload, SchemaName::Registration).is_empty());
    }

    #[test]
    fn single_flip_is_isolated(
        payload in valid_registration(),
        idx in 0usize..REGISTRATION.fields().len(),
    ) {
        let field = REGISTRATION.fields()[idx].name;
        let mut broken = payload.clone();
        broken.insert(field.to_string(), "?".to_string());

        let errors = run_schema(&broken, SchemaName::Registration);
        let mut expected: Vec<&str> = vec![field];
        expected.extend(REGISTRATION.dependents(field).map(|rule| rule.name));
        expected.sort_unstable();

        let actual: Vec<&str> = errors.keys().map(String::as_str).collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn confirmation_mismatch_message() {
    let mut payload = Payload::new();
    payload.insert("password".into(), "Password123!".into());
    payload.insert("confirmPassword".into(), "Password123".into());
    let errors = run_schema(&payload, SchemaName::Registration);
    assert_eq!(errors.get("confirmPassword").map(String::as_str), Some(MISMATCH_MESSAGE));
}
