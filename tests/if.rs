mod common;
use common::run_source;

#[test]
fn true_branch_runs_when_condition_is_truthy() {
    let (stdout, stderr) = run_source("if (true) print \"then\"; else print \"else\";\n");
    assert_eq!(stdout, "then\n");
    assert_eq!(stderr, "");
}

#[test]
fn else_branch_runs_when_condition_is_falsey() {
    let (stdout, stderr) = run_source("if (false) print \"then\"; else print \"else\";\n");
    assert_eq!(stdout, "else\n");
    assert_eq!(stderr, "");
}

#[test]
fn a_missing_else_is_fine_when_the_condition_is_false() {
    let (stdout, stderr) = run_source("if (false) print \"then\";\nprint \"after\";\n");
    assert_eq!(stdout, "after\n");
    assert_eq!(stderr, "");
}

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    let (stdout, stderr) = run_source(
        r#"
        if (true) if (false) print "inner"; else print "dangling";
        "#,
    );
    assert_eq!(stdout, "dangling\n");
    assert_eq!(stderr, "");
}

#[test]
fn nonzero_integers_are_truthy_and_zero_is_not() {
    let (stdout, stderr) = run_source(
        r#"
        if (0) print "zero is truthy"; else print "zero is falsey";
        if (1) print "one is truthy"; else print "one is falsey";
        "#,
    );
    assert_eq!(stdout, "zero is falsey\none is truthy\n");
    assert_eq!(stderr, "");
}
