mod common;
use common::run_source;

#[test]
fn an_uninitialized_variable_defaults_to_nil() {
    let (stdout, stderr) = run_source("var a;\nprint a;\n");
    assert_eq!(stdout, "nil\n");
    assert_eq!(stderr, "");
}

#[test]
fn reading_an_undefined_variable_is_a_runtime_error() {
    let (_stdout, stderr) = run_source("print notDefined;\n");
    assert!(stderr.contains("Undefined variable 'notDefined'"), "stderr was: {stderr}");
}

#[test]
fn a_variable_cannot_read_itself_in_its_own_initializer() {
    let (_stdout, stderr) = run_source("var a = 1;\n{ var a = a; }\n");
    assert!(stderr.contains("Can't read local variable in its own initializer."), "stderr was: {stderr}");
}

#[test]
fn redeclaring_a_name_in_the_same_local_scope_is_a_resolve_error() {
    let (_stdout, stderr) = run_source("{ var a = 1; var a = 2; }\n");
    assert!(stderr.contains("Already a variable with this name in this scope"), "stderr was: {stderr}");
}

#[test]
fn redeclaring_a_global_is_allowed() {
    let (stdout, stderr) = run_source("var a = 1;\nvar a = 2;\nprint a;\n");
    assert_eq!(stdout, "2\n");
    assert_eq!(stderr, "");
}
