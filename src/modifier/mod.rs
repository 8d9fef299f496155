//! The modifier registry and pipe dispatcher.
//!
//! A modifier is a named transformation on YAML text, invoked in a path as
//! `|@name` or `|@name:arg`. The registry is process-wide: built-ins are
//! seeded on first use and [`add_modifier`] replaces entries by name, last
//! writer wins. Register custom modifiers before spawning concurrent
//! queries; the registry is reader/writer locked, so late registration is
//! safe but its timing relative to in-flight queries is unspecified.

mod builtin;

use crate::document::parser::parse_document;
use crate::engine;
use crate::result::Value;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

type ModifierFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<String, ModifierFn>>> = Lazy::new(|| {
    let mut map: HashMap<String, ModifierFn> = HashMap::new();
    map.insert("reverse".to_string(), Box::new(builtin::reverse));
    map.insert("flatten".to_string(), Box::new(builtin::flatten));
    map.insert("join".to_string(), Box::new(builtin::join));
    map.insert("keys".to_string(), Box::new(builtin::keys));
    map.insert("values".to_string(), Box::new(builtin::values));
    map.insert("this".to_string(), Box::new(builtin::this));
    map.insert("valid".to_string(), Box::new(builtin::valid));
    map.insert("ugly".to_string(), Box::new(builtin::ugly));
    map.insert("pretty".to_string(), Box::new(builtin::pretty));
    RwLock::new(map)
});

/// Registers a custom modifier, replacing any existing one with the same
/// name.
///
/// The function receives the current YAML text and the argument text (the
/// part after `:` in `@name:arg`, empty when absent) and returns the
/// transformed YAML text.
///
/// # Example
///
/// ```
/// yamlsift::add_modifier("shout", |yaml, _arg| yaml.to_uppercase());
/// let value = yamlsift::get("greeting: hi", "greeting|@shout");
/// assert_eq!(value.to_string(), "HI");
/// ```
pub fn add_modifier<F>(name: &str, f: F)
where
    F: Fn(&str, &str) -> String + Send + Sync + 'static,
{
    if let Ok(mut registry) = REGISTRY.write() {
        registry.insert(name.to_string(), Box::new(f));
    }
}

/// Runs a pipe tail against `text`.
///
/// A tail starting with `@` is a modifier invocation: the name runs to the
/// first `:`, `|`, or end; a `:` introduces an argument running to the next
/// top-level `|`. Unknown names pass the text through unchanged. Whatever
/// remains after a `|` is dispatched recursively against the modifier's
/// output, which lets chains mix further modifiers with ordinary paths. A
/// tail that does not start with `@` is itself a path, evaluated against
/// the current text.
pub(crate) fn dispatch(text: &str, tail: &str) -> Value {
    let Some(rest) = tail.strip_prefix('@') else {
        return crate::get(text, tail);
    };

    let name_end = rest.find([':', '|']).unwrap_or(rest.len());
    let name = &rest[..name_end];
    let (arg, remainder) = match rest[name_end..].chars().next() {
        Some(':') => {
            let after = &rest[name_end + 1..];
            match find_top_level_pipe(after) {
                Some(p) => (&after[..p], Some(&after[p + 1..])),
                None => (after, None),
            }
        }
        Some('|') => ("", Some(&rest[name_end + 1..])),
        _ => ("", None),
    };

    let output = apply(name, text, arg);
    match remainder {
        Some(next) => dispatch(&output, next),
        None => match parse_document(&output) {
            Ok(tree) => engine::wrap(&tree),
            Err(_) => Value::default(),
        },
    }
}

fn apply(name: &str, text: &str, arg: &str) -> String {
    match REGISTRY.read() {
        Ok(registry) => match registry.get(name) {
            Some(f) => f(text, arg),
            None => text.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

fn find_top_level_pipe(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'|' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Kind;

    #[test]
    fn test_dispatch_reverse() {
        let value = dispatch("- a\n- b\n- c\n", "@reverse");
        let items = value.array();
        assert_eq!(items[0].to_string(), "c");
        assert_eq!(items[2].to_string(), "a");
    }

    #[test]
    fn test_dispatch_unknown_passes_through() {
        let value = dispatch("- a\n- b\n", "@nonsense");
        assert_eq!(value.array().len(), 2);
    }

    #[test]
    fn test_dispatch_chain() {
        let value = dispatch("- a\n- b\n- c\n", "@reverse|@reverse");
        let items = value.array();
        assert_eq!(items[0].to_string(), "a");
    }

    #[test]
    fn test_dispatch_path_tail() {
        let value = dispatch("- a\n- b\n- c\n", "@reverse|0");
        assert_eq!(value.to_string(), "c");
    }

    #[test]
    fn test_dispatch_bare_path() {
        let value = dispatch("name: Tom\n", "name");
        assert_eq!(value.to_string(), "Tom");
    }

    #[test]
    fn test_dispatch_valid_produces_bool() {
        assert_eq!(dispatch("a: 1\n", "@valid").kind(), Kind::True);
    }

    #[test]
    fn test_custom_modifier_replaces() {
        add_modifier("upper_test", |yaml, _| yaml.to_uppercase());
        assert_eq!(dispatch("x\n", "@upper_test").to_string(), "X");
        add_modifier("upper_test", |_, _| "replaced".to_string());
        assert_eq!(dispatch("x\n", "@upper_test").to_string(), "replaced");
    }

    #[test]
    fn test_modifier_argument_passed() {
        add_modifier("suffix_test", |yaml, arg| {
            format!("{}{}", yaml.trim_end(), arg)
        });
        let value = dispatch("abc", "@suffix_test:xyz");
        assert_eq!(value.to_string(), "abcxyz");
    }

    #[test]
    fn test_modifier_argument_stops_at_pipe() {
        add_modifier("arg_probe", |_, arg| format!("\"{}\"", arg));
        let value = dispatch("x", "@arg_probe:one|@this");
        assert_eq!(value.to_string(), "one");
    }
}
