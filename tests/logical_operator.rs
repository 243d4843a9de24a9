mod common;
use common::run_source;

#[test]
fn and_returns_the_first_falsey_operand_or_the_last() {
    let (stdout, stderr) = run_source(
        r#"
        print false and "unreachable";
        print true and "reached";
        print 1 and 2 and 3;
        "#,
    );
    assert_eq!(stdout, "false\nreached\n3\n");
    assert_eq!(stderr, "");
}

#[test]
fn or_returns_the_first_truthy_operand_or_the_last() {
    let (stdout, stderr) = run_source(
        r#"
        print true or "unreachable";
        print false or "reached";
        print false or false or 3;
        "#,
    );
    assert_eq!(stdout, "true\nreached\n3\n");
    assert_eq!(stderr, "");
}

#[test]
fn and_short_circuits_and_never_evaluates_the_right_side() {
    let (stdout, stderr) = run_source(
        r#"
        fun explode() {
            print "should not run";
            return true;
        }
        print false and explode();
        "#,
    );
    assert_eq!(stdout, "false\n");
    assert_eq!(stderr, "");
}
