mod common;
use common::run_source;

#[test]
fn strings_print_without_surrounding_quotes() {
    let (stdout, stderr) = run_source("print \"hello\";\n");
    assert_eq!(stdout, "hello\n");
    assert_eq!(stderr, "");
}

#[test]
fn strings_can_span_multiple_source_lines() {
    let (stdout, stderr) = run_source("print \"line one\nline two\";\n");
    assert_eq!(stdout, "line one\nline two\n");
    assert_eq!(stderr, "");
}

#[test]
fn an_unterminated_string_is_a_lexical_error() {
    let (_stdout, stderr) = run_source("print \"never closed;\n");
    assert!(stderr.contains("Unterminated string"), "stderr was: {stderr}");
}

#[test]
fn string_equality_compares_contents() {
    let (stdout, stderr) = run_source(
        r#"
        print "abc" == "abc";
        print "abc" == "abd";
        "#,
    );
    assert_eq!(stdout, "true\nfalse\n");
    assert_eq!(stderr, "");
}
