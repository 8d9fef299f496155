//! Built-in modifiers.
//!
//! Every modifier takes the current YAML text plus an argument string and
//! returns YAML text. Inputs that fail to parse, or that have the wrong
//! shape for the transformation, pass through unchanged.

use crate::document::emitter::emit;
use crate::document::parser::parse_document;
use serde_yaml::{Mapping, Value as Yaml};

/// `@reverse` - reverses a sequence; mappings re-serialize unchanged.
pub(super) fn reverse(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(Yaml::Sequence(mut items)) => {
            items.reverse();
            emit(&Yaml::Sequence(items))
        }
        Ok(tree @ Yaml::Mapping(_)) => emit(&tree),
        _ => yaml.to_string(),
    }
}

/// `@flatten` - recursively flattens nested sequences into one.
pub(super) fn flatten(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(Yaml::Sequence(items)) => emit(&Yaml::Sequence(flatten_items(items))),
        _ => yaml.to_string(),
    }
}

fn flatten_items(items: Vec<Yaml>) -> Vec<Yaml> {
    let mut out = Vec::new();
    for item in items {
        match item {
            Yaml::Sequence(inner) => out.extend(flatten_items(inner)),
            other => out.push(other),
        }
    }
    out
}

/// `@join` - merges a sequence of mappings into one; later keys override
/// earlier ones.
pub(super) fn join(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(Yaml::Sequence(items)) => {
            let mut joined = Mapping::new();
            for item in items {
                if let Yaml::Mapping(map) = item {
                    for (k, v) in map {
                        joined.insert(k, v);
                    }
                }
            }
            emit(&Yaml::Mapping(joined))
        }
        _ => yaml.to_string(),
    }
}

/// `@keys` - the keys of a mapping as a sequence.
pub(super) fn keys(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(Yaml::Mapping(map)) => {
            let keys: Vec<Yaml> = map.into_iter().map(|(k, _)| k).collect();
            emit(&Yaml::Sequence(keys))
        }
        _ => yaml.to_string(),
    }
}

/// `@values` - the values of a mapping as a sequence.
pub(super) fn values(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(Yaml::Mapping(map)) => {
            let values: Vec<Yaml> = map.into_iter().map(|(_, v)| v).collect();
            emit(&Yaml::Sequence(values))
        }
        _ => yaml.to_string(),
    }
}

/// `@this` - identity.
pub(super) fn this(yaml: &str, _arg: &str) -> String {
    yaml.to_string()
}

/// `@valid` - `"true"` if the text parses as YAML, else `"false"`.
pub(super) fn valid(yaml: &str, _arg: &str) -> String {
    if crate::valid(yaml) {
        "true".to_string()
    } else {
        "false".to_string()
    }
}

/// `@ugly` - re-serializes with surrounding whitespace trimmed.
pub(super) fn ugly(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(tree) => emit(&tree).trim().to_string(),
        _ => yaml.to_string(),
    }
}

/// `@pretty` - a clean re-serialization pass.
pub(super) fn pretty(yaml: &str, _arg: &str) -> String {
    match parse_document(yaml) {
        Ok(tree) => emit(&tree),
        _ => yaml.to_string(),
    }
}
