mod common;
use common::run_source;

#[test]
fn the_body_runs_while_the_condition_stays_truthy() {
    let (stdout, stderr) = run_source(
        r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }
        "#,
    );
    assert_eq!(stdout, "0\n1\n2\n");
    assert_eq!(stderr, "");
}

#[test]
fn a_false_condition_skips_the_body_entirely() {
    let (stdout, stderr) = run_source("while (false) print \"never\";\nprint \"after\";\n");
    assert_eq!(stdout, "after\n");
    assert_eq!(stderr, "");
}

#[test]
fn return_can_break_out_of_a_while_loop() {
    let (stdout, stderr) = run_source(
        r#"
        fun countTo(n) {
            var i = 1;
            while (true) {
                if (i >= n) {
                    return i;
                }
                i = i + 1;
            }
        }
        print countTo(5);
        "#,
    );
    assert_eq!(stdout, "5\n");
    assert_eq!(stderr, "");
}
