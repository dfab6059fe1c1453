//! Property-based tests for fieldcheck-validator.

use fieldcheck_validator::{Instruction, Instructions, validate_value};
use proptest::prelude::*;

// ============================================================================
// NUMERIC COMPARISON: agrees with the native comparison
// ============================================================================

proptest! {
    #[test]
    fn gte_agrees_with_native(value in any::<i32>(), limit in -1000i32..1000) {
        let ok = validate_value(&value, &format!("gte={limit}")).is_ok();
        prop_assert_eq!(ok, value >= limit);
    }

    #[test]
    fn lt_agrees_with_native(value in any::<u16>(), limit in 0u16..2000) {
        let ok = validate_value(&value, &format!("lt={limit}")).is_ok();
        prop_assert_eq!(ok, value < limit);
    }

    #[test]
    fn comparison_on_strings_is_never_a_violation(s in ".*") {
        let err = validate_value(s.as_str(), "gt=0").unwrap_err();
        prop_assert!(!err.is_violation());
    }
}

// ============================================================================
// DIVE: one failure per zero element, in element order
// ============================================================================

proptest! {
    #[test]
    fn dive_required_reports_each_zero(items in prop::collection::vec(0u8..4, 0..20)) {
        let zeros: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| format!("[{i}]"))
            .collect();

        match validate_value(&items, "dive,required") {
            Ok(()) => prop_assert!(zeros.is_empty()),
            Err(err) => {
                let reported: Vec<String> = err
                    .violations()
                    .unwrap()
                    .iter()
                    .map(|e| e.field.clone())
                    .collect();
                prop_assert_eq!(reported, zeros);
            }
        }
    }

    #[test]
    fn omitempty_accepts_every_zero_or_valid_value(value in any::<Option<u8>>()) {
        let ok = validate_value(&value, "omitempty,gte=10").is_ok();
        let expected = match value {
            None | Some(0) => true,
            Some(v) => v >= 10,
        };
        prop_assert_eq!(ok, expected);
    }
}

// ============================================================================
// PARSER: escaped parameters survive parsing
// ============================================================================

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, ',' | '=' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn escaped_params_round_trip(name in "[a-z_]{1,12}", params in ".{0,40}") {
        let annotation = format!("{name}={}", escape(&params));
        let parsed = Instructions::parse(&annotation);

        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(
            &parsed[0],
            &Instruction::Call { name, params }
        );
    }

    #[test]
    fn parse_never_panics(annotation in ".{0,80}") {
        let parsed = Instructions::parse(&annotation);
        prop_assert!(parsed.len() <= annotation.split(',').count());
    }
}
