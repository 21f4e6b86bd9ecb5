//! Scalar comparison.

use differ_types::ScalarValue;

/// Returns `true` when two scalars differ.
///
/// Numbers compare within their signedness class only; a signed and an
/// unsigned integer are always different, as are a number and a string.
/// Floats follow IEEE semantics, so a NaN on either side is a change.
pub fn compare_scalars(before: &ScalarValue, after: &ScalarValue) -> bool {
    use ScalarValue::*;

    match (before, after) {
        (Signed(a), Signed(b)) => a != b,
        (Unsigned(a), Unsigned(b)) => a != b,
        (Float(a), Float(b)) => a != b,
        (String(a), String(b)) => a != b,
        (Bool(a), Bool(b)) => a != b,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_within_a_class() {
        assert!(!compare_scalars(&ScalarValue::Signed(-4), &ScalarValue::Signed(-4)));
        assert!(!compare_scalars(&ScalarValue::Unsigned(9), &ScalarValue::Unsigned(9)));
        assert!(!compare_scalars(&ScalarValue::Float(0.5), &ScalarValue::Float(0.5)));
        assert!(!compare_scalars(
            &ScalarValue::String("a".into()),
            &ScalarValue::String("a".into())
        ));
        assert!(!compare_scalars(&ScalarValue::Bool(true), &ScalarValue::Bool(true)));
    }

    #[test]
    fn different_values_within_a_class() {
        assert!(compare_scalars(&ScalarValue::Signed(1), &ScalarValue::Signed(2)));
        assert!(compare_scalars(&ScalarValue::Unsigned(1), &ScalarValue::Unsigned(2)));
        assert!(compare_scalars(&ScalarValue::Float(1.0), &ScalarValue::Float(1.5)));
        assert!(compare_scalars(&ScalarValue::Bool(true), &ScalarValue::Bool(false)));
    }

    #[test]
    fn signed_never_equals_unsigned() {
        assert!(compare_scalars(&ScalarValue::Signed(1), &ScalarValue::Unsigned(1)));
        assert!(compare_scalars(
            &ScalarValue::Signed(-1),
            &ScalarValue::Unsigned(u64::MAX)
        ));
    }

    #[test]
    fn number_never_equals_string() {
        assert!(compare_scalars(
            &ScalarValue::Signed(5),
            &ScalarValue::String("5".into())
        ));
        assert!(compare_scalars(&ScalarValue::Float(1.0), &ScalarValue::Signed(1)));
    }

    #[test]
    fn nan_is_always_a_change() {
        assert!(compare_scalars(
            &ScalarValue::Float(f64::NAN),
            &ScalarValue::Float(f64::NAN)
        ));
        assert!(compare_scalars(&ScalarValue::Float(f64::NAN), &ScalarValue::Float(1.0)));
    }

    #[test]
    fn signed_zero_floats_are_equal() {
        assert!(!compare_scalars(&ScalarValue::Float(0.0), &ScalarValue::Float(-0.0)));
    }
}
