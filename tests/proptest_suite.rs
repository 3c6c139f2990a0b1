//! Property-based tests for unified_errors
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use proptest::prelude::*;
use std::collections::HashSet;
use std::io;
use unified_errors::{
    args, definitions, DataAccessFault, DispatchPolicy, Environment, Failure, InMemoryCatalog,
    MessageArg, MessageArgs, MessageResolver, ResponseEnvelope, TransportCategory, TransportFault,
    ValidationFailure, Violation,
};

fn resolver() -> MessageResolver {
    MessageResolver::new(InMemoryCatalog::with_default_templates("en"), "en")
}

fn policy(production: bool) -> DispatchPolicy {
    let environment = if production {
        Environment::Production
    } else {
        Environment::parse("dev")
    };
    DispatchPolicy::new(resolver()).with_environment(environment)
}

fn any_kind() -> impl Strategy<Value = &'static unified_errors::ErrorKind> {
    let kinds: Vec<_> = definitions::registry().collect();
    prop::sample::select(kinds)
}

fn any_category() -> impl Strategy<Value = TransportCategory> {
    prop::sample::select(TransportCategory::REGISTERED.to_vec())
}

fn to_args(values: &[String]) -> MessageArgs {
    values.iter().map(MessageArg::from).collect()
}

// ============================================================================
// REGISTRY PROPERTIES
// ============================================================================

#[test]
fn full_codes_are_unique() {
    let mut seen = HashSet::new();
    for kind in definitions::registry() {
        assert!(seen.insert(kind.full_code()), "{} registered twice", kind);
    }
    assert!(definitions::validate().is_ok());
}

#[test]
fn every_kind_resolves_from_default_templates() {
    let resolver = resolver();
    for kind in definitions::registry() {
        assert_eq!(resolver.resolve_kind(kind, &[]), kind.default_message());
    }
}

// ============================================================================
// RESOLUTION PROPERTIES
// ============================================================================

proptest! {
    /// Resolution is total: unknown keys come back verbatim, never empty.
    #[test]
    fn resolution_is_total(key in "[a-zA-Z0-9._]{0,64}", values in prop::collection::vec("\\PC{0,16}", 0..4)) {
        let resolver = MessageResolver::new(InMemoryCatalog::new("en"), "en");
        let out = resolver.resolve(&key, &to_args(&values));
        prop_assert!(!out.is_empty());
        if key.is_empty() {
            prop_assert_eq!(out, unified_errors::MESSAGE_KEY_PREFIX);
        } else {
            prop_assert_eq!(out, key);
        }
    }

    /// Substitution places every argument whose placeholder exists.
    #[test]
    fn substitution_uses_every_argument(values in prop::collection::vec("[a-z0-9]{1,12}", 1..6)) {
        let template: String = (0..values.len()).map(|i| format!("<{{{}}}>", i)).collect();
        let expected: String = values.iter().map(|v| format!("<{}>", v)).collect();
        prop_assert_eq!(unified_errors::format_template(&template, &to_args(&values)), expected);
    }

    /// Templates without placeholders never change.
    #[test]
    fn plain_templates_are_untouched(template in "[^{}]{0,64}", values in prop::collection::vec("\\PC{0,8}", 0..3)) {
        prop_assert_eq!(unified_errors::format_template(&template, &to_args(&values)), template);
    }
}

// ============================================================================
// DISPATCH PROPERTIES
// ============================================================================

proptest! {
    /// Unclassified errors are redacted in production and shown otherwise.
    #[test]
    fn redaction(text in "\\PC{1,200}") {
        let err = io::Error::other(text.clone());

        let prod = policy(true).classify(&err);
        prop_assert_eq!(prod.full_code(), "COM-SYS-500");
        prop_assert_eq!(prod.message(), definitions::INTERNAL_SERVER_ERROR.default_message());

        let dev = policy(false).classify(&err);
        prop_assert_eq!(dev.full_code(), "COM-SYS-500");
        prop_assert_eq!(dev.message(), text.as_str());
    }

    /// Business failures keep their code and message in every environment.
    #[test]
    fn business_safety(kind in any_kind(), values in prop::collection::vec("[a-z]{1,8}", 0..3), production in any::<bool>()) {
        let policy = policy(production);
        let failure = kind.new_failure(policy.resolver(), to_args(&values));
        let expected = failure.message().to_owned();

        let envelope = policy.classify(&failure);
        prop_assert_eq!(envelope.full_code(), kind.full_code());
        prop_assert_eq!(envelope.message(), expected.as_str());
        prop_assert!(!envelope.message().is_empty());
    }

    /// Validation messages keep reporting order and field prefixes.
    #[test]
    fn validation_merge(entries in prop::collection::vec((prop::option::of("[a-z]{1,8}"), "[a-z ]{1,16}"), 1..6)) {
        let report: ValidationFailure = entries
            .iter()
            .map(|(field, message)| match field {
                Some(field) => Violation::field(field.clone(), message.clone()),
                None => Violation::object(message.clone()),
            })
            .collect();

        let expected = entries
            .iter()
            .map(|(field, message)| match field {
                Some(field) => format!("{}: {}", field, message),
                None => message.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let envelope = policy(true).classify(&report);
        prop_assert_eq!(envelope.full_code(), "COM-SRV-800");
        prop_assert_eq!(envelope.message(), expected.as_str());
    }

    /// Duplicate-key faults never leak the driver message.
    #[test]
    fn duplicate_key_scenario(driver in "\\PC{1,120}", production in any::<bool>()) {
        let envelope = policy(production).classify(&DataAccessFault::duplicate_key(driver));
        prop_assert_eq!(envelope.full_code(), "COM-DB-601");
        prop_assert_eq!(envelope.message(), "Duplicated key found");
    }

    /// Registered transport faults stay in the SERVLET module.
    #[test]
    fn transport_faults_are_servlet_kinds(category in any_category(), message in "\\PC{0,40}") {
        let envelope = policy(true).classify(&TransportFault::new(category, message.clone()));
        prop_assert!(envelope.full_code().starts_with("COM-SERVLET-"));
        if !message.is_empty() {
            prop_assert_eq!(envelope.message(), message.as_str());
        }
        prop_assert!(!envelope.message().is_empty());
    }
}

// ============================================================================
// ENVELOPE PROPERTIES
// ============================================================================

proptest! {
    /// Building an envelope twice from the same inputs gives equal values.
    #[test]
    fn envelope_idempotence(kind in any_kind(), values in prop::collection::vec("[a-z0-9]{0,8}", 0..3), data in any::<Option<u32>>()) {
        let resolver = resolver();
        let first = ResponseEnvelope::failed(&resolver, kind, data, to_args(&values));
        let second = ResponseEnvelope::failed(&resolver, kind, data, to_args(&values));
        prop_assert_eq!(first, second);
    }

    /// Envelopes survive a JSON round trip.
    #[test]
    fn envelope_json_round_trip(kind in any_kind(), data in any::<Option<i64>>()) {
        let envelope = ResponseEnvelope::failed(&resolver(), kind, data, args![]);
        let json = serde_json::to_string(&envelope).unwrap();
        let back: ResponseEnvelope<i64> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, envelope);
    }
}

// ============================================================================
// ASSERTION PROPERTIES
// ============================================================================

proptest! {
    /// A guard fails exactly when its condition is false, with its own kind.
    #[test]
    fn assertion_contract(kind in any_kind(), condition in any::<bool>(), values in prop::collection::vec("[a-z]{1,6}", 0..3)) {
        let resolver = resolver();
        let result = resolver.guard(kind).assert_true(condition, to_args(&values));

        prop_assert_eq!(result.is_ok(), condition);
        if let Err(failure) = result {
            prop_assert!(failure.is_business());
            prop_assert!(std::ptr::eq(failure.kind(), kind));
            let args: Vec<&str> = failure.args().iter().map(MessageArg::as_str).collect();
            prop_assert_eq!(args, values.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(failure.message(), resolver.resolve_kind(kind, &to_args(&values)));
        }
    }

    /// Failures render without panicking whatever their message.
    #[test]
    fn failure_log_is_bounded(message in "\\PC{0,5000}") {
        let failure = Failure::new(&definitions::SERVER_ERROR, args![], message);
        let mut line = String::new();
        failure.failure_log().write_to(&mut line).unwrap();
        prop_assert!(line.len() < unified_errors::MAX_FIELD_OUTPUT_LEN + 64);
    }
}

// ============================================================================
// CONCURRENCY PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// One policy can classify from many threads at once.
    #[test]
    fn concurrent_classification(threads in 2usize..8) {
        let policy = policy(true);
        std::thread::scope(|scope| {
            for i in 0..threads {
                let policy = &policy;
                scope.spawn(move || {
                    let err = io::Error::other(format!("worker {i}"));
                    let envelope = policy.classify(&err);
                    assert_eq!(envelope.full_code(), "COM-SYS-500");
                    assert_eq!(envelope.message(), "Internal server error");
                });
            }
        });
    }
}
