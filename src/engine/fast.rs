//! Text-level scalar extraction that bypasses tree construction.
//!
//! The fast path serves plain key/index descent to a scalar leaf, the
//! common shape of real queries (`name.last`, `age`, `children.0`). It
//! scans the source line by line, tracking indentation, and resolves each
//! component against verbatim subslices of the document, so a hit reports
//! the true byte offset of its fragment.
//!
//! Its correctness obligation is one-sided: it must never answer
//! differently from the traversal engine. Whenever the text is ambiguous
//! (collections, block scalars, folded continuations, trailing comments,
//! quoting with escapes, dialect-dependent scalars), it declines and the
//! caller falls back to the parsed tree.

use crate::result::{Kind, Value};

/// Attempts to resolve `path` directly against the source text.
///
/// Returns `None` when the path needs the traversal engine, either because
/// it uses operators the fast path does not understand or because the text
/// could not be resolved unambiguously.
pub(crate) fn fast_get(yaml: &str, path: &str) -> Option<Value> {
    if path.is_empty() {
        return Some(Value {
            kind: Kind::Yaml,
            raw: yaml.to_string(),
            ..Default::default()
        });
    }
    if has_complex_features(path) {
        return None;
    }
    let parts = split_path(path);
    if parts.is_empty() {
        return None;
    }
    let value = descend(yaml, Some(0), &parts, 0)?;
    match value.kind() {
        // Collections and nulls go to the slow path, which owns their
        // serialization and existence semantics.
        Kind::Yaml | Kind::Null => None,
        _ => Some(value),
    }
}

// Wildcards, modifiers, pipes, and queries always take the slow path.
fn has_complex_features(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| match b {
        b'*' | b'?' | b'@' | b'|' => true,
        b'#' => bytes.get(i + 1) == Some(&b'('),
        _ => false,
    })
}

// Dot-splitting with backslash escapes; empty components are dropped.
fn split_path(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in path.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '.' => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

// `text` is the region under inspection; `base` is its byte offset within
// the original document, or None once the region is no longer a verbatim
// subslice (offsets are then reported as unknown).
fn descend(text: &str, base: Option<usize>, parts: &[String], depth: usize) -> Option<Value> {
    let Some(part) = parts.get(depth) else {
        return extract_value(text, base);
    };
    if let Ok(index) = part.parse::<i64>() {
        if index < 0 {
            return None;
        }
        return descend_index(text, base, parts, depth, index as usize);
    }
    if part == "#" {
        if depth + 1 < parts.len() {
            // `#` projections need the traversal engine
            return None;
        }
        let elements = array_elements(text)?;
        if elements.is_empty() {
            // no `- ` items: could be a mapping or a scalar
            return None;
        }
        let count = elements.len();
        return Some(Value {
            kind: Kind::Number,
            num: count as f64,
            raw: count.to_string(),
            ..Default::default()
        });
    }
    descend_key(text, base, parts, depth, part)
}

fn descend_key(
    text: &str,
    base: Option<usize>,
    parts: &[String],
    depth: usize,
    key: &str,
) -> Option<Value> {
    let lines = line_spans(text);
    let target_indent = base_indent(&lines)?;
    let final_part = depth == parts.len() - 1;
    let mut found: Option<usize> = None;

    for (li, &(_, line)) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        let trimmed = stripped.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - stripped.len();
        if line[..indent].contains('\t') {
            // tabs never indent well-formed YAML
            return None;
        }
        if indent != target_indent {
            continue;
        }
        if trimmed
            .strip_prefix(key)
            .and_then(|r| r.strip_prefix(':'))
            .is_some()
        {
            if found.is_some() {
                // duplicate key at this level; the tree parser rejects it
                return None;
            }
            found = Some(li);
        }
    }

    let li = found?;
    let (line_start, line) = lines[li];
    let stripped = line.trim_start();
    let indent = line.len() - stripped.len();
    let rest = &stripped.trim_end()[key.len() + 1..];
    let value_part = rest.trim_start();
    let value_col = indent + key.len() + 1 + (rest.len() - value_part.len());

    if !value_part.is_empty() {
        if final_part {
            if risky_scalar(value_part) {
                return None;
            }
            // A deeper next line that is not itself structure (a mapping
            // entry or sequence item) is a folded scalar continuation, and
            // the value spans lines.
            if let Some((next_indent, next)) = next_content_line(&lines[li + 1..]) {
                let structural =
                    next.contains(": ") || next.ends_with(':') || next.starts_with("- ");
                if next_indent > indent && !structural {
                    return None;
                }
            }
            return extract_value(value_part, base.map(|b| b + line_start + value_col));
        }
        return descend(value_part, base.map(|b| b + line_start + value_col), parts, depth + 1);
    }

    // value lives on the following, deeper-indented lines
    let (block_start, block_end) = block_span(&lines[li + 1..], indent)?;
    let block = &text[block_start..block_end];
    let block_base = base.map(|b| b + block_start);
    if !final_part {
        return descend(block, block_base, parts, depth + 1);
    }

    // final component: only a single unambiguous scalar line is extractable
    let mut content = Vec::new();
    for (off, block_line) in line_spans(block) {
        let t = block_line.trim();
        if !t.is_empty() && !t.starts_with('#') {
            content.push((off, block_line));
        }
    }
    if content.len() != 1 {
        return None;
    }
    let (off, only) = content[0];
    let only_stripped = only.trim_start();
    let t = only_stripped.trim_end();
    if risky_scalar(t) {
        return None;
    }
    extract_value(t, block_base.map(|b| b + off + (only.len() - only_stripped.len())))
}

fn descend_index(
    text: &str,
    base: Option<usize>,
    parts: &[String],
    depth: usize,
    index: usize,
) -> Option<Value> {
    let elements = array_elements(text)?;
    let &(start, end) = elements.get(index)?;
    let element = &text[start..end];
    let element_base = base.map(|b| b + start);
    if depth == parts.len() - 1 {
        return extract_element(element, element_base);
    }
    descend(element, element_base, parts, depth + 1)
}

// Splits a sequence region into per-element byte ranges. Elements begin at
// `- ` markers pinned to the indent of the first content line; deeper lines
// extend the current element. Returns None when the region does not look
// like a block sequence the text scan can segment safely.
fn array_elements(text: &str) -> Option<Vec<(usize, usize)>> {
    let mut elements: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut base_indent: Option<usize> = None;
    let mut element_indent = 0usize;

    for (off, line) in line_spans(text) {
        let stripped = line.trim_start();
        let trimmed = stripped.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - stripped.len();
        if line[..indent].contains('\t') {
            return None;
        }
        let bi = *base_indent.get_or_insert(indent);
        if indent == bi && trimmed == "-" {
            // an item with its value on the next line; segmentation by
            // `- ` markers would miscount
            return None;
        }
        if stripped.starts_with("- ") && indent == bi {
            if let Some(span) = current.take() {
                elements.push(span);
            }
            element_indent = indent;
            current = Some((off + indent + 2, off + line.len()));
        } else if current.is_none() {
            // region does not open with a sequence item
            return None;
        } else if indent > element_indent {
            if let Some(span) = current.as_mut() {
                span.1 = off + line.len();
            }
        }
        // lines at or above the element indent that are not new items are
        // left alone; key search inside the element will decline on them
    }

    if let Some(span) = current {
        elements.push(span);
    }
    Some(elements)
}

// A terminal array element is extractable only when it is a single plain
// scalar line.
fn extract_element(element: &str, base: Option<usize>) -> Option<Value> {
    let (first_line, tail) = match element.split_once('\n') {
        Some((first, tail)) => (first, Some(tail)),
        None => (element, None),
    };
    if let Some(tail) = tail {
        let has_more = tail.lines().any(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        });
        if has_more {
            return None;
        }
    }
    let stripped = first_line.trim_start();
    let t = stripped.trim_end();
    if t.is_empty() || risky_scalar(t) {
        return None;
    }
    extract_value(t, base.map(|b| b + (first_line.len() - stripped.len())))
}

// Anything that might not be a plain one-line scalar: flow collections,
// mapping-ish colons, block scalar indicators, anchors, tags, sequence
// markers, and possible trailing comments.
fn risky_scalar(s: &str) -> bool {
    s.starts_with(['{', '[', '|', '>', '&', '!'])
        || s.starts_with("- ")
        || s.contains(':')
        || s.contains('#')
}

// Classifies a trimmed scalar token. `base`, when known, is the byte offset
// of `text` in the original document; the reported index points at the
// token itself.
fn extract_value(text: &str, base: Option<usize>) -> Option<Value> {
    let token = text.trim();
    if token.is_empty() {
        return None;
    }
    let lead = text.len() - text.trim_start().len();
    let index = base.map(|b| b + lead).unwrap_or(0);

    for quote in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
            let inner = &token[1..token.len() - 1];
            if inner.contains('\\') || inner.contains(quote) {
                // escape decoding belongs to the real parser
                return None;
            }
            return Some(Value {
                kind: Kind::String,
                text: inner.to_string(),
                raw: token.to_string(),
                index,
                ..Default::default()
            });
        }
    }

    // boolean and null spellings follow the YAML core schema exactly;
    // other casings are plain strings
    if matches!(token, "true" | "True" | "TRUE") {
        return Some(Value {
            kind: Kind::True,
            raw: token.to_string(),
            index,
            ..Default::default()
        });
    }
    if matches!(token, "false" | "False" | "FALSE") {
        return Some(Value {
            kind: Kind::False,
            raw: token.to_string(),
            index,
            ..Default::default()
        });
    }
    if matches!(
        token.to_ascii_lowercase().as_str(),
        "yes" | "no" | "on" | "off"
    ) {
        // bool in YAML 1.1, string in 1.2; the tree parser decides
        return None;
    }
    if matches!(token, "~" | "null" | "Null" | "NULL") {
        return Some(Value {
            kind: Kind::Null,
            raw: token.to_string(),
            index,
            ..Default::default()
        });
    }

    if token.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.')) {
        // numeric-looking tokens must parse exactly; hex, octal,
        // underscores, and `.inf` forms fall back to the tree parser
        let exotic = token
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'));
        return match token.parse::<f64>() {
            Ok(num) if !exotic => Some(Value {
                kind: Kind::Number,
                num,
                raw: token.to_string(),
                index,
                ..Default::default()
            }),
            _ => None,
        };
    }

    Some(Value {
        kind: Kind::String,
        text: token.to_string(),
        raw: token.to_string(),
        index,
        ..Default::default()
    })
}

// Byte offset of each line within `text`, excluding the newline itself.
fn line_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        spans.push((start, line));
        start += line.len() + 1;
    }
    spans
}

// Indent of the first non-blank, non-comment line.
fn base_indent(lines: &[(usize, &str)]) -> Option<usize> {
    lines.iter().find_map(|&(_, line)| {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            None
        } else {
            Some(line.len() - line.trim_start().len())
        }
    })
}

// The first non-blank, non-comment line, as (indent, trimmed text).
fn next_content_line<'a>(lines: &[(usize, &'a str)]) -> Option<(usize, &'a str)> {
    lines.iter().find_map(|&(_, line)| {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            None
        } else {
            Some((line.len() - line.trim_start().len(), t))
        }
    })
}

// The byte range spanned by the lines nested under a parent at
// `parent_indent`, stopping at the first content line back at or above it.
fn block_span(lines: &[(usize, &str)], parent_indent: usize) -> Option<(usize, usize)> {
    let mut start: Option<usize> = None;
    let mut end = 0usize;
    for &(off, line) in lines {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        if indent <= parent_indent {
            break;
        }
        if start.is_none() {
            start = Some(off);
        }
        end = off + line.len();
    }
    start.map(|s| (s, end))
}
