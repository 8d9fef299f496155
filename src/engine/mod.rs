//! The traversal engine: walks tokenized path components over a parsed
//! value tree and wraps the outcome as a [`Value`].
//!
//! All failure is modeled by absence. A missing key, an out-of-range
//! index, a type mismatch, or an unparseable document each produce a
//! non-existent result; nothing here returns an error.

pub mod fast;

use crate::document::{emitter, parser};
use crate::modifier;
use crate::path::ast::Component;
use crate::path::parser::parse_path;
use crate::path::pattern;
use crate::query;
use crate::result::{Kind, Value};
use serde_yaml::{Mapping, Value as Yaml};

// Nested queries re-enter the engine; beyond this depth they match nothing.
const MAX_QUERY_DEPTH: usize = 32;

/// Parses `yaml` and evaluates `path` against the tree.
pub(crate) fn search(yaml: &str, path: &str) -> Value {
    let Ok(tree) = parser::parse_document(yaml) else {
        return Value::default();
    };
    eval_path(&tree, path, yaml)
}

/// Lines mode: each non-empty line of `yaml` becomes one element of a
/// synthesized sequence, and `rest` is evaluated against that sequence.
pub(crate) fn search_lines(yaml: &str, rest: &str) -> Value {
    let tree = Yaml::Sequence(parser::parse_lines(yaml));
    eval_path(&tree, rest, yaml)
}

fn eval_path(tree: &Yaml, path: &str, source: &str) -> Value {
    if path.is_empty() || path == "@this" {
        return wrap(tree);
    }
    if path.starts_with('@') {
        return modifier::dispatch(source, path);
    }
    let components = parse_path(path);
    if components.is_empty() {
        return wrap(tree);
    }
    match eval_components(tree, &components, 0) {
        Some(result) => wrap(&result),
        None => Value::default(),
    }
}

/// Applies `components` to `value`, returning the resulting subtree.
///
/// `None` means nothing matched. An explicit YAML null resolves to `None`
/// as well: null values and missing paths are indistinguishable, matching
/// the `exists()` contract.
pub(crate) fn eval_components(value: &Yaml, components: &[Component], depth: usize) -> Option<Yaml> {
    if depth > MAX_QUERY_DEPTH {
        return None;
    }
    let current = untag(value);
    let Some((component, rest)) = components.split_first() else {
        return none_if_null(current.clone());
    };
    match component {
        Component::Key { name, wild } => match current {
            Yaml::Mapping(map) => {
                if *wild {
                    let mut hits: Vec<Yaml> = map
                        .iter()
                        .filter(|(k, _)| pattern::is_match(&emitter::scalar_string(k), name))
                        .map(|(_, v)| v.clone())
                        .collect();
                    if hits.len() == 1 {
                        let only = hits.pop()?;
                        eval_components(&only, rest, depth)
                    } else {
                        eval_components(&Yaml::Sequence(hits), rest, depth)
                    }
                } else {
                    eval_components(lookup(map, name)?, rest, depth)
                }
            }
            // A key applied to a sequence projects over its elements,
            // collecting the value from every mapping element that has it.
            Yaml::Sequence(items) => {
                let hits: Vec<Yaml> = items
                    .iter()
                    .filter_map(|item| match untag(item) {
                        Yaml::Mapping(map) => lookup(map, name).cloned(),
                        _ => None,
                    })
                    .collect();
                if hits.is_empty() {
                    return None;
                }
                eval_components(&Yaml::Sequence(hits), rest, depth)
            }
            _ => None,
        },
        Component::Index(i) => match current {
            Yaml::Sequence(items) => eval_components(items.get(*i)?, rest, depth),
            _ => None,
        },
        Component::Count => {
            if rest.is_empty() {
                return Some(count_value(current));
            }
            // `#` with a trailing sub-path projects it over every element,
            // eliding the ones that do not resolve.
            match current {
                Yaml::Sequence(items) => {
                    let results: Vec<Yaml> = items
                        .iter()
                        .filter_map(|item| eval_components(item, rest, depth))
                        .collect();
                    Some(Yaml::Sequence(results))
                }
                _ => None,
            }
        }
        Component::Query { body, all } => match current {
            Yaml::Sequence(items) => {
                let matched: Vec<&Yaml> = items
                    .iter()
                    .filter(|item| query::matches(untag(item), body, depth))
                    .collect();
                if *all {
                    if rest.is_empty() {
                        Some(Yaml::Sequence(matched.into_iter().cloned().collect()))
                    } else {
                        let results: Vec<Yaml> = matched
                            .into_iter()
                            .filter_map(|item| eval_components(item, rest, depth))
                            .collect();
                        Some(Yaml::Sequence(results))
                    }
                } else {
                    eval_components(matched.into_iter().next()?, rest, depth)
                }
            }
            _ => None,
        },
        Component::Pipe(tail) => {
            let piped = wrap(current);
            modifier::dispatch(&piped.raw, tail).into_tree()
        }
    }
}

fn none_if_null(value: Yaml) -> Option<Yaml> {
    if matches!(value, Yaml::Null) {
        None
    } else {
        Some(value)
    }
}

fn count_value(current: &Yaml) -> Yaml {
    let n = match current {
        Yaml::Sequence(items) => items.len(),
        Yaml::Mapping(map) => map.len(),
        _ => 0,
    };
    Yaml::Number((n as u64).into())
}

/// Looks up a mapping entry by the string form of its key, so that numeric
/// and boolean keys are addressable from path text.
pub(crate) fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Yaml> {
    map.iter()
        .find(|(k, _)| match k {
            Yaml::String(s) => s == key,
            other => emitter::scalar_string(other) == key,
        })
        .map(|(_, v)| v)
}

/// Unwraps tagged values (`!tag v`) so traversal sees the payload.
pub(crate) fn untag(mut value: &Yaml) -> &Yaml {
    while let Yaml::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// Wraps a subtree as a typed [`Value`]. Scalars become their typed
/// variants; sequences and mappings are re-serialized and carried raw.
pub(crate) fn wrap(value: &Yaml) -> Value {
    match untag(value) {
        Yaml::Null => Value::default(),
        Yaml::Bool(true) => Value {
            kind: Kind::True,
            raw: "true".to_string(),
            ..Default::default()
        },
        Yaml::Bool(false) => Value {
            kind: Kind::False,
            raw: "false".to_string(),
            ..Default::default()
        },
        Yaml::Number(n) => Value {
            kind: Kind::Number,
            num: n.as_f64().unwrap_or(0.0),
            raw: emitter::number_string(n),
            ..Default::default()
        },
        Yaml::String(s) => Value {
            kind: Kind::String,
            text: s.clone(),
            raw: s.clone(),
            ..Default::default()
        },
        other => Value {
            kind: Kind::Yaml,
            raw: emitter::emit(other),
            ..Default::default()
        },
    }
}
