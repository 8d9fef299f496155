//! yamlsift - read-only path queries over YAML documents.
//!
//! A query takes a document and a compact path expression and returns a
//! single typed [`Value`]. The engine never raises on malformed input:
//! bad documents and bad paths both produce a non-existent result, and
//! [`Value::exists`] is the canonical test.
//!
//! # Path syntax
//!
//! A path is a series of keys separated by dots, with a few operators:
//!
//! | Path | Meaning |
//! |---|---|
//! | `name.last` | nested key lookup |
//! | `children.1` | array index |
//! | `child*.2` | wildcard key (`*` any run, `?` one byte) |
//! | `fav\.movie` | escaped literal dot |
//! | `children.#` | array length |
//! | `friends.#.first` | project a sub-path over every element |
//! | `friends.#(age>45)#.last` | query: all matches |
//! | `friends.#(last=="Murphy").first` | query: first match |
//! | `children\|@reverse` | modifier pipe |
//! | `..0.name` | lines mode: the document as one value per line |
//!
//! Query operators are `==`, `!=`, `<`, `<=`, `>`, `>=`, and the pattern
//! operators `%` / `!%`. A query body may nest another query, e.g.
//! `friends.#(nets.#(=="fb"))#.first`.
//!
//! # Example
//!
//! ```
//! const DOC: &str = "
//! name:
//!   first: Tom
//!   last: Anderson
//! children:
//!   - Sara
//!   - Alex
//!   - Jack
//! ";
//!
//! assert_eq!(yamlsift::get(DOC, "name.last").to_string(), "Anderson");
//! assert_eq!(yamlsift::get(DOC, "children.#").i64(), 3);
//! assert_eq!(yamlsift::get(DOC, "children.1").to_string(), "Alex");
//! assert!(!yamlsift::get(DOC, "name.middle").exists());
//! ```

pub mod config;
pub mod document;
mod engine;
pub mod file;
pub mod modifier;
pub mod path;
mod query;
pub mod result;

pub use modifier::add_modifier;
pub use result::{Kind, Value};

/// Searches `yaml` for the specified path and returns the result.
///
/// An empty path returns the whole document as a raw block. A leading `.`
/// is stripped; a leading `..` switches to lines mode, where each non-empty
/// line is parsed independently and the rest of the path runs against the
/// resulting sequence. Simple scalar paths are resolved directly from the
/// text without building a tree; everything else parses the document and
/// walks it.
///
/// # Example
///
/// ```
/// let value = yamlsift::get("a:\n  b: hi\n", "a.b");
/// assert_eq!(value.to_string(), "hi");
/// assert!(!yamlsift::get("not: relevant", "missing").exists());
/// ```
pub fn get(yaml: &str, path: &str) -> Value {
    if path.starts_with("..") {
        return engine::search_lines(yaml, &path[2..]);
    }
    if path.is_empty() {
        return Value {
            kind: Kind::Yaml,
            raw: yaml.to_string(),
            ..Default::default()
        };
    }
    let path = path.strip_prefix('.').unwrap_or(path);
    if let Some(value) = engine::fast::fast_get(yaml, path) {
        return value;
    }
    engine::search(yaml, path)
}

/// [`get`] over a byte buffer. Buffers that are not valid UTF-8 yield a
/// non-existent result.
pub fn get_bytes(yaml: &[u8], path: &str) -> Value {
    match std::str::from_utf8(yaml) {
        Ok(text) => get(text, path),
        Err(_) => Value::default(),
    }
}

/// Evaluates several paths and returns one raw result whose text is the
/// bracketed, comma-joined list of the constituent raw fragments.
///
/// # Example
///
/// ```
/// let doc = "name: Tom\nage: 37\n";
/// let values = yamlsift::get_many(doc, &["name", "age"]).array();
/// assert_eq!(values[0].to_string(), "Tom");
/// assert_eq!(values[1].to_string(), "37");
/// ```
pub fn get_many(yaml: &str, paths: &[&str]) -> Value {
    let mut raw = String::from("[");
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            raw.push(',');
        }
        raw.push_str(&get(yaml, path).raw);
    }
    raw.push(']');
    Value {
        kind: Kind::Yaml,
        raw,
        ..Default::default()
    }
}

/// [`get_many`] over a byte buffer.
pub fn get_many_bytes(yaml: &[u8], paths: &[&str]) -> Value {
    match std::str::from_utf8(yaml) {
        Ok(text) => get_many(text, paths),
        Err(_) => Value::default(),
    }
}

/// Wraps `yaml` as a raw result without parsing it. Sub-queries via
/// [`Value::get`] evaluate lazily against the wrapped text.
pub fn parse(yaml: &str) -> Value {
    Value {
        kind: Kind::Yaml,
        raw: yaml.to_string(),
        ..Default::default()
    }
}

/// [`parse`] over a byte buffer.
pub fn parse_bytes(yaml: &[u8]) -> Value {
    match std::str::from_utf8(yaml) {
        Ok(text) => parse(text),
        Err(_) => Value::default(),
    }
}

/// True if `yaml` parses as a YAML document and is not all whitespace.
///
/// # Example
///
/// ```
/// assert!(yamlsift::valid("a: 1"));
/// assert!(!yamlsift::valid(""));
/// assert!(!yamlsift::valid("a: [unclosed"));
/// ```
pub fn valid(yaml: &str) -> bool {
    if yaml.trim().is_empty() {
        return false;
    }
    document::parser::parse_document(yaml).is_ok()
}

/// [`valid`] over a byte buffer.
pub fn valid_bytes(yaml: &[u8]) -> bool {
    match std::str::from_utf8(yaml) {
        Ok(text) => valid(text),
        Err(_) => false,
    }
}

/// Invokes `f` with each non-empty line of `yaml` wrapped as a raw result,
/// trimmed of surrounding whitespace. Iteration stops when `f` returns
/// `false`.
pub fn for_each_line<F>(yaml: &str, mut f: F)
where
    F: FnMut(Value) -> bool,
{
    for line in yaml.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !f(parse(line)) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_returns_whole_document() {
        let doc = "a: 1\nb: 2\n";
        let value = get(doc, "");
        assert_eq!(value.kind(), Kind::Yaml);
        assert_eq!(value.raw(), doc);
        assert_eq!(value.index(), 0);
    }

    #[test]
    fn test_leading_dot_is_stripped() {
        let doc = "a:\n  b: hi\n";
        assert_eq!(get(doc, ".a.b").to_string(), get(doc, "a.b").to_string());
    }

    #[test]
    fn test_malformed_document_is_absent() {
        assert!(!get("a: [unclosed", "a").exists());
    }

    #[test]
    fn test_get_bytes() {
        assert_eq!(get_bytes(b"name: Tom\n", "name").to_string(), "Tom");
        assert!(!get_bytes(&[0xff, 0xfe], "x").exists());
    }

    #[test]
    fn test_parse_wraps_without_parsing() {
        let value = parse("definitely: [not: valid");
        assert_eq!(value.kind(), Kind::Yaml);
        assert_eq!(value.raw(), "definitely: [not: valid");
    }

    #[test]
    fn test_valid() {
        assert!(valid("a: 1"));
        assert!(valid("42"));
        assert!(!valid(""));
        assert!(!valid("   \n  "));
        assert!(!valid("a: [unclosed"));
    }

    #[test]
    fn test_get_many_raw_shape() {
        let doc = "name: Tom\nage: 37\n";
        let value = get_many(doc, &["name", "age", "missing"]);
        assert_eq!(value.raw(), "[Tom,37,]");
    }

    #[test]
    fn test_for_each_line_stops_early() {
        let mut seen = 0;
        for_each_line("a: 1\n\nb: 2\nc: 3\n", |_| {
            seen += 1;
            seen < 2
        });
        assert_eq!(seen, 2);
    }
}
