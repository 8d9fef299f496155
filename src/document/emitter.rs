//! Serialization of value trees back to YAML text, plus the scalar
//! string-form conventions shared by queries, iteration, and display.

use serde_yaml::{Number, Value};

/// Serializes a value tree to YAML text.
///
/// The exact whitespace is whatever `serde_yaml` produces; collections end
/// with a trailing newline. Serialization failures yield an empty string.
pub fn emit(value: &Value) -> String {
    serde_yaml::to_string(value).unwrap_or_default()
}

/// Canonical string form of a scalar, used symmetrically on both sides of
/// `==`/`!=`/`%` query comparisons and for mapping keys.
///
/// Conventions: `null` for nulls, `true`/`false` for booleans, integers
/// without a decimal point, floats via their shortest display form.
/// Collections serialize with trailing whitespace trimmed; comparing
/// against them is rarely meaningful but stays well-defined.
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) => emit(value).trim_end().to_string(),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
    }
}

/// Integer-preserving string form of a YAML number.
pub fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().unwrap_or(0.0).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_document;

    #[test]
    fn test_emit_sequence() {
        let tree = parse_document("- a\n- b").unwrap();
        let text = emit(&tree);
        assert_eq!(text, "- a\n- b\n");
    }

    #[test]
    fn test_emit_roundtrip() {
        let tree = parse_document("name: Alice\nage: 30").unwrap();
        let reparsed = parse_document(&emit(&tree)).unwrap();
        assert_eq!(tree, reparsed);
    }

    #[test]
    fn test_scalar_string_conventions() {
        assert_eq!(scalar_string(&Value::Null), "null");
        assert_eq!(scalar_string(&Value::Bool(true)), "true");
        assert_eq!(scalar_string(&Value::String("hi".to_string())), "hi");
    }

    #[test]
    fn test_number_string_integers_have_no_point() {
        assert_eq!(scalar_string(&parse_document("44").unwrap()), "44");
        assert_eq!(scalar_string(&parse_document("-10").unwrap()), "-10");
        assert_eq!(scalar_string(&parse_document("3.14").unwrap()), "3.14");
    }

    #[test]
    fn test_number_string_large_u64() {
        let tree = parse_document("18446744073709551615").unwrap();
        assert_eq!(scalar_string(&tree), "18446744073709551615");
    }
}
