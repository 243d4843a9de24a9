mod common;
use common::run_source;

#[test]
fn integer_literals_stay_integers() {
    let (stdout, stderr) = run_source("print 3;\nprint 0;\n");
    assert_eq!(stdout, "3\n0\n");
    assert_eq!(stderr, "");
}

#[test]
fn float_literals_print_with_their_fractional_part() {
    let (stdout, stderr) = run_source("print 3.25;\n");
    assert_eq!(stdout, "3.25\n");
    assert_eq!(stderr, "");
}

#[test]
fn a_trailing_dot_with_no_following_digit_is_its_own_token() {
    // `1.` is not a valid float literal here: the bare dot is its own DOT
    // token, so this parses as the expression statement `1 . foo` -- which
    // is a parse error since there is no property access grammar.
    let (_stdout, stderr) = run_source("1.foo;\n");
    assert!(!stderr.is_empty());
}

#[test]
fn mixed_integer_and_float_arithmetic_promotes_to_float() {
    let (stdout, stderr) = run_source("print 1 + 1.5;\n");
    assert_eq!(stdout, "2.5\n");
    assert_eq!(stderr, "");
}

#[test]
fn an_integer_literal_that_overflows_i64_is_a_lexical_error_not_a_panic() {
    let (_stdout, stderr) = run_source("print 99999999999999999999;\n");
    assert!(stderr.contains("out of range"), "stderr was: {stderr}");
}
