mod common;
use common::run_source;

#[test]
fn booleans_print_as_true_and_false() {
    let (stdout, stderr) = run_source("print true;\nprint false;\n");
    assert_eq!(stdout, "true\nfalse\n");
    assert_eq!(stderr, "");
}

#[test]
fn booleans_support_equality_against_each_other() {
    let (stdout, stderr) = run_source(
        r#"
        print true == true;
        print true == false;
        print true != false;
        "#,
    );
    assert_eq!(stdout, "true\nfalse\ntrue\n");
    assert_eq!(stderr, "");
}

#[test]
fn booleans_are_never_equal_to_other_kinds() {
    let (stdout, stderr) = run_source(
        r#"
        print true == 1;
        print false == 0;
        print true == "true";
        "#,
    );
    assert_eq!(stdout, "false\nfalse\nfalse\n");
    assert_eq!(stderr, "");
}
