//! Integration tests for lines mode (`..` paths) and line iteration.

use yamlsift::{for_each_line, get, Kind};

const LINES: &str = r#"{name: Gilbert, age: 61}
{name: Alexa, age: 34}

{name: May, age: 57}
{name: Deloise, age: 44}
"#;

#[test]
fn test_lines_count() {
    assert_eq!(get(LINES, "..#").i64(), 4);
}

#[test]
fn test_lines_index() {
    assert_eq!(get(LINES, "..1.name").to_string(), "Alexa");
    assert_eq!(get(LINES, "..3.name").to_string(), "Deloise");
    assert!(!get(LINES, "..9.name").exists());
}

#[test]
fn test_lines_projection() {
    let names: Vec<String> = get(LINES, "..#.name")
        .array()
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(names, vec!["Gilbert", "Alexa", "May", "Deloise"]);
}

#[test]
fn test_lines_query() {
    assert_eq!(get(LINES, "..#(age>50).name").to_string(), "Gilbert");
    let over_50: Vec<String> = get(LINES, "..#(age>50)#.name")
        .array()
        .iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(over_50, vec!["Gilbert", "May"]);
}

#[test]
fn test_lines_empty_rest_returns_sequence() {
    let value = get(LINES, "..");
    assert_eq!(value.kind(), Kind::Yaml);
    assert_eq!(value.array().len(), 4);
}

#[test]
fn test_lines_skip_garbage() {
    let mixed = "{a: 1}\n{broken: [\n{a: 3}\n";
    assert_eq!(get(mixed, "..#").i64(), 2);
}

#[test]
fn test_lines_of_scalars() {
    let doc = "10\n20\n30\n";
    assert_eq!(get(doc, "..#").i64(), 3);
    assert_eq!(get(doc, "..1").i64(), 20);
}

#[test]
fn test_for_each_line() {
    let mut names = Vec::new();
    for_each_line(LINES, |line| {
        names.push(line.get("name").to_string());
        true
    });
    assert_eq!(names, vec!["Gilbert", "Alexa", "May", "Deloise"]);
}

#[test]
fn test_for_each_line_raw_is_trimmed_line() {
    let mut raws = Vec::new();
    for_each_line("  {a: 1}  \n{b: 2}\n", |line| {
        raws.push(line.raw().to_string());
        true
    });
    assert_eq!(raws, vec!["{a: 1}", "{b: 2}"]);
}

#[test]
fn test_for_each_line_stops_early() {
    let mut count = 0;
    for_each_line(LINES, |_| {
        count += 1;
        count < 2
    });
    assert_eq!(count, 2);
}
