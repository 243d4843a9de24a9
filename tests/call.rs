mod common;
use common::run_source;

#[test]
fn calling_a_number_is_a_runtime_error() {
    let (_stdout, stderr) = run_source("var x = 1;\nx();\n");
    assert!(stderr.contains("Can only call functions and classes."), "stderr was: {stderr}");
}

#[test]
fn calling_a_string_is_a_runtime_error() {
    let (_stdout, stderr) = run_source("\"not a function\"();\n");
    assert!(stderr.contains("Can only call functions and classes."), "stderr was: {stderr}");
}

#[test]
fn calling_nil_is_a_runtime_error() {
    let (_stdout, stderr) = run_source("nil();\n");
    assert!(stderr.contains("Can only call functions and classes."), "stderr was: {stderr}");
}

#[test]
fn wrong_arity_reports_expected_and_actual_counts() {
    let (_stdout, stderr) = run_source(
        r#"
        fun add(a, b) { return a + b; }
        add(1, 2, 3, 4);
        "#,
    );
    assert!(stderr.contains("Expected 2 argument(s) but got 4."), "stderr was: {stderr}");
}

#[test]
fn calling_with_too_few_arguments_is_also_an_arity_error() {
    let (_stdout, stderr) = run_source(
        r#"
        fun add(a, b) { return a + b; }
        add(1);
        "#,
    );
    assert!(stderr.contains("Expected 2 argument(s) but got 1."), "stderr was: {stderr}");
}
