//! Path expression tokenizer.
//!
//! Splits a path string into an ordered sequence of [`Component`]s. The
//! tokenizer never fails: any input produces a best-effort component list,
//! and ill-formed paths simply match nothing during traversal.

use super::ast::Component;

/// Tokenizes a path expression.
///
/// Rules:
/// - `\` escapes the next character, making it literal.
/// - `.` separates components at the top level; inside `#(...)` it is
///   literal.
/// - `#` immediately followed by `(` opens a query; the body tracks
///   parenthesis depth, and a `#` directly after the closing `)` marks the
///   query as select-all. A query left open at end of input closes there.
/// - `|` at the top level terminates the path; the remaining text becomes a
///   single [`Component::Pipe`].
/// - A component that parses as a nonnegative integer becomes an index;
///   one containing `*` or `?` becomes a wildcard key.
pub fn parse_path(path: &str) -> Vec<Component> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_query = false;
    let mut query_depth = 0usize;
    let mut escaped = false;
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }

        if in_query {
            match ch {
                '(' => query_depth += 1,
                ')' => {
                    query_depth -= 1;
                    if query_depth == 0 {
                        let all = chars.peek() == Some(&'#');
                        if all {
                            chars.next();
                        }
                        parts.push(Component::Query {
                            body: std::mem::take(&mut current),
                            all,
                        });
                        in_query = false;
                        continue;
                    }
                }
                _ => {}
            }
            current.push(ch);
            continue;
        }

        match ch {
            '#' if chars.peek() == Some(&'(') => {
                chars.next();
                flush(&mut current, &mut parts);
                in_query = true;
                query_depth = 1;
            }
            '#' => {
                flush(&mut current, &mut parts);
                parts.push(Component::Count);
            }
            '.' => flush(&mut current, &mut parts),
            '|' => {
                flush(&mut current, &mut parts);
                parts.push(Component::Pipe(chars.collect()));
                return parts;
            }
            _ => current.push(ch),
        }
    }

    if in_query {
        // unbalanced query: close at end of input with the accumulated body
        parts.push(Component::Query {
            body: current,
            all: false,
        });
    } else {
        flush(&mut current, &mut parts);
    }
    parts
}

fn flush(current: &mut String, parts: &mut Vec<Component>) {
    if !current.is_empty() {
        parts.push(parse_component(&std::mem::take(current)));
    }
}

fn parse_component(s: &str) -> Component {
    if s.contains(['*', '?']) {
        return Component::Key {
            name: s.to_string(),
            wild: true,
        };
    }
    if let Ok(index) = s.parse::<usize>() {
        return Component::Index(index);
    }
    Component::Key {
        name: s.to_string(),
        wild: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Component {
        Component::Key {
            name: name.to_string(),
            wild: false,
        }
    }

    #[test]
    fn test_parse_single_key() {
        assert_eq!(parse_path("age"), vec![key("age")]);
    }

    #[test]
    fn test_parse_dotted_keys() {
        assert_eq!(parse_path("name.last"), vec![key("name"), key("last")]);
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(
            parse_path("children.1"),
            vec![key("children"), Component::Index(1)]
        );
    }

    #[test]
    fn test_negative_index_stays_key() {
        assert_eq!(parse_path("items.-1"), vec![key("items"), key("-1")]);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(
            parse_path("children.#"),
            vec![key("children"), Component::Count]
        );
    }

    #[test]
    fn test_parse_count_projection() {
        assert_eq!(
            parse_path("friends.#.first"),
            vec![key("friends"), Component::Count, key("first")]
        );
    }

    #[test]
    fn test_parse_wildcard_key() {
        assert_eq!(
            parse_path("child*.2"),
            vec![
                Component::Key {
                    name: "child*".to_string(),
                    wild: true
                },
                Component::Index(2)
            ]
        );
    }

    #[test]
    fn test_escaped_dot_is_literal() {
        assert_eq!(parse_path("fav\\.movie"), vec![key("fav.movie")]);
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_path(r#"friends.#(last=="Murphy").first"#),
            vec![
                key("friends"),
                Component::Query {
                    body: r#"last=="Murphy""#.to_string(),
                    all: false
                },
                key("first")
            ]
        );
    }

    #[test]
    fn test_parse_query_all() {
        assert_eq!(
            parse_path(r#"friends.#(last=="Murphy")#.first"#),
            vec![
                key("friends"),
                Component::Query {
                    body: r#"last=="Murphy""#.to_string(),
                    all: true
                },
                key("first")
            ]
        );
    }

    #[test]
    fn test_nested_query_keeps_inner_parens() {
        assert_eq!(
            parse_path(r#"friends.#(nets.#(=="fb"))#.first"#),
            vec![
                key("friends"),
                Component::Query {
                    body: r#"nets.#(=="fb")"#.to_string(),
                    all: true
                },
                key("first")
            ]
        );
    }

    #[test]
    fn test_dot_inside_query_is_literal() {
        assert_eq!(
            parse_path("arr.#(a.b==1)"),
            vec![
                key("arr"),
                Component::Query {
                    body: "a.b==1".to_string(),
                    all: false
                }
            ]
        );
    }

    #[test]
    fn test_unbalanced_query_closes_at_end() {
        assert_eq!(
            parse_path("arr.#(a==1"),
            vec![
                key("arr"),
                Component::Query {
                    body: "a==1".to_string(),
                    all: false
                }
            ]
        );
    }

    #[test]
    fn test_pipe_terminates_path() {
        assert_eq!(
            parse_path("children|@reverse|0"),
            vec![key("children"), Component::Pipe("@reverse|0".to_string())]
        );
    }

    #[test]
    fn test_empty_components_are_skipped() {
        assert_eq!(parse_path("a..b"), vec![key("a"), key("b")]);
        assert_eq!(parse_path("a."), vec![key("a")]);
    }

    #[test]
    fn test_empty_path() {
        assert!(parse_path("").is_empty());
    }
}
