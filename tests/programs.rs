use bulang::error::RuntimeError;
use bulang::{Error, Value};
use pretty_assertions::assert_eq;

use std::fs;
use std::path::Path;
use std::str;

fn run(source: &str) -> (Result<Value, Error>, String) {
    let mut out = Vec::new();
    let result = bulang::run(source, &mut out);
    let out = str::from_utf8(&out)
        .expect("invalid UTF-8 in output")
        .to_string();
    (result, out)
}

fn output_of(source: &str) -> String {
    let (result, out) = run(source);
    if let Err(e) = result {
        panic!("script failed: {}\n{}", e, source);
    }
    out
}

fn runtime_error(source: &str) -> RuntimeError {
    match run(source).0 {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(
        output_of("int x = 10; int y = 20; int result = x + y * 2; print(result);"),
        "50\n"
    );
    assert_eq!(output_of("print(2 + 3 * 4);"), "14\n");
    assert_eq!(output_of("print((2 + 3) * 4);"), "20\n");
    assert_eq!(output_of("print(1 - 2 - 3);"), "-4\n");
    assert_eq!(output_of("print(1 / 4);"), "0.25\n");
}

#[test]
fn prints_strings_verbatim() {
    assert_eq!(
        output_of("string message = \"Hello\"; print(message);"),
        "Hello\n"
    );
}

#[test]
fn negative_zero_prints_as_zero() {
    assert_eq!(output_of("print(-0);"), "0\n");
    assert_eq!(output_of("print(0 * -1);"), "0\n");
    assert_eq!(output_of("print(-0.5);"), "-0.5\n");
}

#[test]
fn if_selects_one_branch() {
    let program = "int age = AGE; if (age >= 18) { print(\"Adult\"); } else { print(\"Minor\"); }";
    assert_eq!(output_of(&program.replace("AGE", "18")), "Adult\n");
    assert_eq!(output_of(&program.replace("AGE", "17")), "Minor\n");
}

#[test]
fn while_counts_up() {
    assert_eq!(
        output_of("int i = 0; while (i < 5) { print(i); i = i + 1; }"),
        "0\n1\n2\n3\n4\n"
    );
}

#[test]
fn while_with_false_condition_never_runs() {
    let (result, out) = run("int i = 10; while (i < 5) { print(i); }");
    assert_eq!(result.unwrap(), Value::Null);
    assert_eq!(out, "");
}

#[test]
fn shadowing_ends_with_the_block() {
    assert_eq!(
        output_of("int x = 1; { int x = 2; x = 3; print(x); } print(x);"),
        "3\n1\n"
    );
    assert_eq!(
        output_of("int x = 1; { x = 5; } print(x);"),
        "5\n"
    );
}

#[test]
fn block_locals_are_gone_after_exit() {
    let err = runtime_error("{ int inner = 1; } print(inner);");
    assert!(matches!(err, RuntimeError::NameError { ref name, .. } if name == "inner"));
}

#[test]
fn division_by_zero_fails() {
    assert!(matches!(
        runtime_error("int a = 5 / 0;"),
        RuntimeError::ArithmeticError { .. }
    ));
}

#[test]
fn assigning_undeclared_name_fails() {
    let err = runtime_error("x = 1;");
    assert!(matches!(err, RuntimeError::NameError { ref name, line: 1 } if name == "x"));
    assert_eq!(err.to_string(), "[line 1] NameError: undefined variable 'x'");
}

#[test]
fn output_before_a_failure_is_kept() {
    let (result, out) = run("print(1);\nprint(2 / 0);\nprint(3);");
    assert!(matches!(
        result,
        Err(Error::Runtime(RuntimeError::ArithmeticError { line: 2 }))
    ));
    assert_eq!(out, "1\n");
}

#[test]
fn lex_and_parse_errors_print_nothing() {
    let (result, out) = run("print(1);\nprint(\"never);");
    assert!(matches!(result, Err(Error::Lex(ref e)) if e.line == 2));
    assert_eq!(out, "");

    let (result, out) = run("print(1);\nfor (;;) {}");
    assert!(matches!(result, Err(Error::Parse(ref e)) if e.line == 2));
    assert_eq!(out, "");
}

#[test]
fn demos_produce_expected_output() {
    let mut count = 0;
    let mut entries: Vec<_> = fs::read_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("demos"))
        .expect("missing demos directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "bl"))
        .collect();
    entries.sort();

    for path in entries {
        let source = fs::read_to_string(&path).unwrap();
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("no expected output for {:?}: {}", path, e));
        assert_eq!(output_of(&source), expected, "{:?}", path);
        count += 1;
    }
    assert!(count > 0, "no demos found");
}
