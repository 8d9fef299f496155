//! Evaluation of `#(...)` query predicates against array elements.
//!
//! A query body has the shape `<key> <op> <value>`. The key may be empty
//! (the element itself is the operand), a dotted path descended through
//! mappings, or a sub-path containing a nested query, in which case the
//! traversal engine is re-entered. A body with no operator at all is an
//! existence test when it nests a query, and matches nothing otherwise.

use crate::document::emitter::scalar_string;
use crate::engine;
use crate::path::parser::parse_path;
use crate::path::pattern;
use serde_yaml::Value as Yaml;

// Two-character operators come first so that `<=` is never split as `<`.
const OPERATORS: [&str; 8] = ["==", "!=", "<=", ">=", "<", ">", "!%", "%"];

/// Returns true if `element` satisfies the query `body`.
pub(crate) fn matches(element: &Yaml, body: &str, depth: usize) -> bool {
    match split_operator(body) {
        Some((key, op, value)) => {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            let operand = resolve_key(element, key.trim(), depth);
            compare(operand.as_ref(), op, value)
        }
        None => {
            // No operator: a body that nests a query is an existence test,
            // anything else matches nothing.
            body.contains("#(")
                && engine::eval_components(element, &parse_path(body), depth + 1).is_some()
        }
    }
}

// Finds the first operator (in OPERATORS order) that occurs outside any
// parentheses, so a nested `#(...)` never splits the outer query.
fn split_operator(body: &str) -> Option<(&str, &'static str, &str)> {
    for op in OPERATORS {
        if let Some(idx) = find_top_level(body, op) {
            return Some((&body[..idx], op, &body[idx + op.len()..]));
        }
    }
    None
}

fn find_top_level(body: &str, op: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(op.as_bytes()) => return Some(i),
            _ => {}
        }
    }
    None
}

// Resolves the left-hand key against the element. An empty key selects the
// element itself; a key nesting a query re-enters the traversal engine; a
// plain dotted key descends through mappings only.
fn resolve_key(element: &Yaml, key: &str, depth: usize) -> Option<Yaml> {
    if key.is_empty() {
        return Some(element.clone());
    }
    if key.contains("#(") {
        return engine::eval_components(element, &parse_path(key), depth + 1);
    }
    let mut current = element;
    for part in key.split('.') {
        let Yaml::Mapping(map) = engine::untag(current) else {
            return None;
        };
        current = engine::lookup(map, part)?;
    }
    Some(current.clone())
}

fn compare(operand: Option<&Yaml>, op: &str, value: &str) -> bool {
    match op {
        "==" => operand_string(operand) == value,
        "!=" => operand_string(operand) != value,
        "%" => pattern::is_match(&operand_string(operand), value),
        "!%" => !pattern::is_match(&operand_string(operand), value),
        "<" | "<=" | ">" | ">=" => compare_numeric(operand, op, value),
        _ => false,
    }
}

fn operand_string(operand: Option<&Yaml>) -> String {
    match operand {
        Some(value) => scalar_string(value),
        None => "null".to_string(),
    }
}

// Both sides must parse as f64; anything else fails the comparison.
fn compare_numeric(operand: Option<&Yaml>, op: &str, value: &str) -> bool {
    let left = match operand.map(engine::untag) {
        Some(Yaml::Number(n)) => match n.as_f64() {
            Some(f) => f,
            None => return false,
        },
        Some(Yaml::String(s)) => match s.parse::<f64>() {
            Ok(f) => f,
            Err(_) => return false,
        },
        _ => return false,
    };
    let Ok(right) = value.parse::<f64>() else {
        return false;
    };
    match op {
        "<" => left < right,
        "<=" => left <= right,
        ">" => left > right,
        ">=" => left >= right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_document;

    fn element(yaml: &str) -> Yaml {
        parse_document(yaml).unwrap()
    }

    #[test]
    fn test_equality_on_key() {
        let el = element("first: Dale\nlast: Murphy");
        assert!(matches(&el, r#"last=="Murphy""#, 0));
        assert!(!matches(&el, r#"last=="Craig""#, 0));
    }

    #[test]
    fn test_equality_on_element_itself() {
        assert!(matches(&element("fb"), r#"=="fb""#, 0));
        assert!(!matches(&element("tw"), r#"=="fb""#, 0));
    }

    #[test]
    fn test_inequality() {
        let el = element("last: Murphy");
        assert!(matches(&el, r#"last!="Craig""#, 0));
        assert!(!matches(&el, r#"last!="Murphy""#, 0));
    }

    #[test]
    fn test_numeric_comparisons() {
        let el = element("age: 44");
        assert!(matches(&el, "age>40", 0));
        assert!(matches(&el, "age>=44", 0));
        assert!(matches(&el, "age<=44", 0));
        assert!(!matches(&el, "age>45", 0));
        assert!(!matches(&el, "age<44", 0));
    }

    #[test]
    fn test_numeric_comparison_requires_numbers() {
        let el = element("age: unknown");
        assert!(!matches(&el, "age>40", 0));
        assert!(!matches(&el, "age<40", 0));
    }

    #[test]
    fn test_pattern_operators() {
        let el = element("first: Dale");
        assert!(matches(&el, r#"first%"D*""#, 0));
        assert!(!matches(&el, r#"first!%"D*""#, 0));
        assert!(matches(&el, r#"first!%"R*""#, 0));
    }

    #[test]
    fn test_dotted_key_descends_mappings() {
        let el = element("name:\n  first: Tom\n  last: Anderson");
        assert!(matches(&el, r#"name.last=="Anderson""#, 0));
        assert!(!matches(&el, r#"name.middle=="Anderson""#, 0));
    }

    #[test]
    fn test_missing_key_compares_as_null() {
        let el = element("first: Dale");
        assert!(matches(&el, "middle==null", 0));
        assert!(!matches(&el, "middle!=null", 0));
    }

    #[test]
    fn test_boolean_and_integer_stringification() {
        assert!(matches(&element("active: true"), "active==true", 0));
        assert!(matches(&element("age: 44"), "age==44", 0));
    }

    #[test]
    fn test_no_operator_matches_nothing() {
        assert!(!matches(&element("first: Dale"), "first", 0));
        assert!(!matches(&element("first: Dale"), "", 0));
    }

    #[test]
    fn test_nested_query_existence() {
        let dale = element("first: Dale\nnets:\n  - ig\n  - fb\n  - tw");
        let jane = element("first: Jane\nnets:\n  - ig\n  - tw");
        assert!(matches(&dale, r#"nets.#(=="fb")"#, 0));
        assert!(!matches(&jane, r#"nets.#(=="fb")"#, 0));
    }

    #[test]
    fn test_single_quotes_trimmed() {
        assert!(matches(&element("first: Dale"), "first=='Dale'", 0));
    }

    #[test]
    fn test_unquoted_value() {
        assert!(matches(&element("first: Dale"), "first==Dale", 0));
    }
}
