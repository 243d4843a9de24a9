mod common;
use common::run_source;

#[test]
fn assigning_returns_the_assigned_value() {
    let (stdout, stderr) = run_source(
        r#"
        var a = 1;
        print a = 2;
        "#,
    );
    assert_eq!(stdout, "2\n");
    assert_eq!(stderr, "");
}

#[test]
fn global_assignment_is_visible_after_the_statement() {
    let (stdout, stderr) = run_source(
        r#"
        var a = "before";
        print a;
        a = "after";
        print a;
        "#,
    );
    assert_eq!(stdout, "before\nafter\n");
    assert_eq!(stderr, "");
}

#[test]
fn assigning_to_a_non_variable_target_is_a_parse_error() {
    let (_stdout, stderr) = run_source("1 + 2 = 3;\n");
    assert!(stderr.contains("Invalid assignment target."), "stderr was: {stderr}");
}

#[test]
fn assigning_to_an_undefined_name_is_a_runtime_error() {
    let (_stdout, stderr) = run_source("unknown = 1;\n");
    assert!(stderr.contains("Undefined variable 'unknown'"), "stderr was: {stderr}");
}
