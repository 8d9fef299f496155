//! The query outcome type.
//!
//! Every query returns a [`Value`]: a six-kinded result carrying the raw
//! textual fragment it came from plus decoded scalar payloads. Absence is a
//! value too - a missing path yields a `Null` kind with an empty raw, and
//! [`Value::exists`] is the canonical test. Conversion helpers never fail;
//! they return zero values on mismatch.

use crate::document::emitter;
use crate::document::parser;
use crate::engine;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_yaml::Value as Yaml;
use std::fmt;

/// The kind of a [`Value`].
///
/// The declaration order is the comparison order used by [`Value::less`]:
/// `Null < False < Number < String < True < Yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Kind {
    /// A YAML null, or a path that matched nothing.
    #[default]
    Null,
    /// The boolean false.
    False,
    /// A YAML number.
    Number,
    /// A YAML string.
    String,
    /// The boolean true.
    True,
    /// A raw block of YAML: any sequence or mapping, or an unparsed
    /// document.
    Yaml,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "Null",
            Kind::False => "False",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::True => "True",
            Kind::Yaml => "YAML",
        })
    }
}

/// A single query result.
///
/// Values are immutable once constructed. Scalar accessors return defaulted
/// values on kind mismatch rather than failing.
///
/// # Example
///
/// ```
/// let value = yamlsift::get("age: 37", "age");
/// assert!(value.exists());
/// assert_eq!(value.i64(), 37);
/// assert_eq!(value.to_string(), "37");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Value {
    pub(crate) kind: Kind,
    pub(crate) raw: String,
    pub(crate) text: String,
    pub(crate) num: f64,
    pub(crate) index: usize,
    pub(crate) indexes: Vec<usize>,
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The raw textual fragment behind this value. Empty for synthesized
    /// results; re-serialized YAML for collections.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Byte offset of [`raw`](Self::raw) within the source text; `0` means
    /// the offset is unknown (synthesized or slow-path results).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Per-match source offsets for projection results, when known.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// True if the path matched something. A value exists when its kind is
    /// not `Null`, or when it carries raw text.
    pub fn exists(&self) -> bool {
        self.kind != Kind::Null || !self.raw.is_empty()
    }

    /// True if this is a raw block holding a YAML sequence.
    pub fn is_array(&self) -> bool {
        self.kind == Kind::Yaml
            && !self.raw.is_empty()
            && (self.raw.starts_with('[') || self.raw.trim_start().starts_with("- "))
    }

    /// True if this is a raw block holding a YAML mapping.
    pub fn is_object(&self) -> bool {
        self.kind == Kind::Yaml
            && !self.raw.is_empty()
            && (self.raw.starts_with('{') || self.raw.contains(": "))
    }

    /// True for either boolean kind.
    pub fn is_bool(&self) -> bool {
        self.kind == Kind::True || self.kind == Kind::False
    }

    /// Boolean form: `true` for `True`, string truth for strings
    /// (`"1"`, `"t"`, `"true"`, any case), nonzero for numbers.
    pub fn bool(&self) -> bool {
        match self.kind {
            Kind::True => true,
            Kind::String => matches!(
                self.text.to_ascii_lowercase().as_str(),
                "1" | "t" | "true"
            ),
            Kind::Number => self.num != 0.0,
            _ => false,
        }
    }

    /// Signed integer form. Number results preserve the full 64-bit range:
    /// the float payload is used when it represents the value exactly,
    /// otherwise the raw token is parsed.
    pub fn i64(&self) -> i64 {
        match self.kind {
            Kind::True => 1,
            Kind::String => self.text.parse().unwrap_or(0),
            Kind::Number => {
                if let Some(i) = safe_i64(self.num) {
                    return i;
                }
                if let Ok(i) = self.raw.parse::<i64>() {
                    return i;
                }
                self.num as i64
            }
            _ => 0,
        }
    }

    /// Unsigned integer form, with the same 64-bit preservation as
    /// [`i64`](Self::i64). Negative inputs saturate to zero.
    pub fn u64(&self) -> u64 {
        match self.kind {
            Kind::True => 1,
            Kind::String => self.text.parse().unwrap_or(0),
            Kind::Number => {
                if let Some(i) = safe_i64(self.num) {
                    if i >= 0 {
                        return i as u64;
                    }
                }
                if let Ok(u) = self.raw.parse::<u64>() {
                    return u;
                }
                self.num as u64
            }
            _ => 0,
        }
    }

    /// Floating-point form.
    pub fn f64(&self) -> f64 {
        match self.kind {
            Kind::True => 1.0,
            Kind::String => self.text.parse().unwrap_or(0.0),
            Kind::Number => self.num,
            _ => 0.0,
        }
    }

    /// RFC 3339 timestamp form; the Unix epoch when the value does not
    /// parse as one.
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.to_string())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// The elements of an array result.
    ///
    /// Non-existent results yield an empty vector; a non-array value yields
    /// a one-element vector holding itself.
    pub fn array(&self) -> Vec<Value> {
        if self.kind == Kind::Null {
            return Vec::new();
        }
        if !self.is_array() {
            return vec![self.clone()];
        }
        match parser::parse_document(&self.raw) {
            Ok(Yaml::Sequence(items)) => items.iter().map(engine::wrap).collect(),
            _ => Vec::new(),
        }
    }

    /// The entries of an object result, keyed by the string form of each
    /// key. Non-objects yield an empty map. Iteration follows the
    /// document's key order.
    pub fn map(&self) -> IndexMap<String, Value> {
        let mut out = IndexMap::new();
        if self.kind != Kind::Yaml {
            return out;
        }
        if let Ok(Yaml::Mapping(mapping)) = parser::parse_document(&self.raw) {
            for (k, v) in &mapping {
                out.insert(emitter::scalar_string(k), engine::wrap(v));
            }
        }
        out
    }

    /// Runs a sub-query against this value's raw text.
    ///
    /// Source offsets accumulate additively, so an `index` on the returned
    /// value still points into the original document.
    ///
    /// # Example
    ///
    /// ```
    /// let doc = yamlsift::parse("name:\n  first: Tom\n");
    /// assert_eq!(doc.get("name.first").to_string(), "Tom");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let mut result = crate::get(&self.raw, path);
        if result.indexes.is_empty() {
            result.index += self.index;
        } else {
            for idx in &mut result.indexes {
                *idx += self.index;
            }
        }
        result
    }

    /// Iterates the value. Objects yield `(key, value)` pairs with
    /// String-kind keys; arrays yield `(index, value)` pairs with
    /// Number-kind indexes; a raw scalar yields one `(Null, self)` call;
    /// non-existent values yield nothing. Return `false` to stop.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Value, Value) -> bool,
    {
        if !self.exists() {
            return;
        }
        if self.kind != Kind::Yaml {
            f(Value::default(), self.clone());
            return;
        }
        let Ok(tree) = parser::parse_document(&self.raw) else {
            return;
        };
        match tree {
            Yaml::Mapping(mapping) => {
                for (k, v) in &mapping {
                    let name = emitter::scalar_string(k);
                    let key = Value {
                        kind: Kind::String,
                        text: name.clone(),
                        raw: name,
                        ..Default::default()
                    };
                    if !f(key, engine::wrap(v)) {
                        return;
                    }
                }
            }
            Yaml::Sequence(items) => {
                for (i, v) in items.iter().enumerate() {
                    let key = Value {
                        kind: Kind::Number,
                        num: i as f64,
                        ..Default::default()
                    };
                    if !f(key, engine::wrap(v)) {
                        return;
                    }
                }
            }
            _ => {
                f(Value::default(), self.clone());
            }
        }
    }

    /// Orders two values: by kind first (`Null < False < Number < String <
    /// True < Yaml`), then strings lexicographically (ASCII case-folded
    /// unless `case_sensitive`), numbers numerically, and anything else by
    /// raw text.
    pub fn less(&self, other: &Value, case_sensitive: bool) -> bool {
        if self.kind != other.kind {
            return self.kind < other.kind;
        }
        match self.kind {
            Kind::String => {
                if case_sensitive {
                    self.text < other.text
                } else {
                    string_less_insensitive(&self.text, &other.text)
                }
            }
            Kind::Number => self.num < other.num,
            _ => self.raw < other.raw,
        }
    }

    /// Untyped projection into a generic YAML tree. Raw blocks are parsed;
    /// an unparseable block projects to null.
    pub fn value(&self) -> Yaml {
        match self.kind {
            Kind::Null => Yaml::Null,
            Kind::False => Yaml::Bool(false),
            Kind::True => Yaml::Bool(true),
            Kind::Number => Yaml::Number(serde_yaml::Number::from(self.num)),
            Kind::String => Yaml::String(self.text.clone()),
            Kind::Yaml => parser::parse_document(&self.raw).unwrap_or(Yaml::Null),
        }
    }

    // Converts back into a tree for pipe dispatch inside the engine. Null
    // and unparseable results disappear, consistent with exists().
    pub(crate) fn into_tree(self) -> Option<Yaml> {
        let tree = match self.kind {
            Kind::Null => return None,
            Kind::False => Yaml::Bool(false),
            Kind::True => Yaml::Bool(true),
            Kind::Number => {
                if let Ok(i) = self.raw.parse::<i64>() {
                    Yaml::Number(i.into())
                } else {
                    Yaml::Number(serde_yaml::Number::from(self.num))
                }
            }
            Kind::String => Yaml::String(self.text),
            Kind::Yaml => parser::parse_document(&self.raw).ok()?,
        };
        if matches!(tree, Yaml::Null) {
            None
        } else {
            Some(tree)
        }
    }
}

impl fmt::Display for Value {
    /// The canonical string form: strings decode, booleans spell
    /// themselves, numbers prefer an integer-looking raw token over float
    /// formatting, raw blocks print verbatim, and null prints nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Number => {
                if !self.raw.is_empty() && raw_is_integer(&self.raw) {
                    f.write_str(&self.raw)
                } else {
                    write!(f, "{}", self.num)
                }
            }
            Kind::String => f.write_str(&self.text),
            Kind::Yaml => f.write_str(&self.raw),
            Kind::True => f.write_str("true"),
            Kind::False => f.write_str("false"),
            Kind::Null => Ok(()),
        }
    }
}

// True when the float represents an integer exactly within the range where
// f64 holds every integer.
fn safe_i64(f: f64) -> Option<i64> {
    if !(-9007199254740991.0..=9007199254740991.0).contains(&f) {
        return None;
    }
    let i = f as i64;
    if i as f64 == f {
        Some(i)
    } else {
        None
    }
}

fn raw_is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// Bytewise comparison folding only ASCII A-Z.
fn string_less_insensitive(a: &str, b: &str) -> bool {
    for (x, y) in a.bytes().zip(b.bytes()) {
        let x = x.to_ascii_lowercase();
        let y = y.to_ascii_lowercase();
        if x != y {
            return x < y;
        }
    }
    a.len() < b.len()
}
