extern crate graphblas;

use graphblas::init_subscriber;
use graphblas::register_all_translations;
use graphblas::translate;
use graphblas::TranslateOptions;
use graphblas::TranslationRegistry;
use indoc::indoc;
use std::panic::Location;
use tracing::info;

fn init_tracing() {
    match init_subscriber(tracing::Level::INFO) {
        Ok(_) => (),
        Err(_e) => (),
    }
}

/// Check whether the expected lines are present in the actual output.
///
/// The actual output may contain additional lines that are not in the expected output.
fn check_lines_contain(actual: &str, expected: &str, caller: &Location<'_>) {
    let mut actual_lines = actual.lines().map(|line| line.trim());
    for line in expected.lines().map(|line| line.trim()) {
        if line.is_empty() {
            continue;
        }
        if !actual_lines.any(|actual_line| actual_line == line) {
            panic!("Line `{line}` is missing (in order) from output:\n{actual}\ncalled from {caller}");
        }
    }
}

fn test_translate(translation: &'static str, src: &str) -> anyhow::Result<String> {
    init_tracing();
    let mut registry = TranslationRegistry::new();
    register_all_translations(&mut registry)?;
    let options = TranslateOptions::new(translation);
    info!("\nBefore --{translation}:\n{src}");
    let actual = translate(&registry, &options, src)?;
    info!("\nAfter --{translation}:\n{actual}");
    Ok(actual)
}

#[test]
fn test_mlir_to_llvmir() {
    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    "#};
    let actual = test_translate("mlir-to-llvmir", src).unwrap();
    assert!(actual.contains("define i32 @main"));
    assert!(actual.contains("ret i32 1"));
}

#[test]
fn test_mlir_to_mlir() {
    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    "#};
    let expected = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    "#};
    let actual = test_translate("mlir-to-mlir", src).unwrap();
    check_lines_contain(&actual, expected, Location::caller());
}

#[test]
fn test_unregistered_operation() {
    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = graphblas.matrix_multiply %a, %b : i32
        return %0 : i32
    }
    "#};
    for translation in ["mlir-to-llvmir", "mlir-to-mlir"] {
        let err = test_translate(translation, src).unwrap_err();
        let err = err.to_string();
        assert!(err.contains("operation 'graphblas.matrix_multiply' is not registered"));
    }
}

#[test]
fn test_split_input_file() {
    init_tracing();
    let mut registry = TranslationRegistry::new();
    register_all_translations(&mut registry).unwrap();
    let mut options = TranslateOptions::new("mlir-to-llvmir");
    options.split_input_file = true;

    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    // -----
    func.func @main() -> i32 {
        %0 = arith.constant 2 : i32
        return %0 : i32
    }
    "#};
    let actual = translate(&registry, &options, src).unwrap();
    let expected = indoc! {r#"
    define i32 @main
    ret i32 1
    // -----
    define i32 @main
    ret i32 2
    "#};
    let actual = actual
        .lines()
        .map(|line| {
            // `define i32 @main() {` is matched on its prefix.
            if line.starts_with("define i32 @main") {
                "define i32 @main"
            } else {
                line
            }
        })
        .collect::<Vec<&str>>()
        .join("\n");
    check_lines_contain(&actual, expected, Location::caller());

    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    // -----
    "graphblas.foo"() : () -> ()
    "#};
    let err = translate(&registry, &options, src).unwrap_err();
    assert_eq!(err.to_string(), "1 of 2 chunks failed to translate");

    let src = indoc! {r#"
    func.func @main() -> i32 {
        %0 = arith.constant 1 : i32
        return %0 : i32
    }
    // -----
    "#};
    let actual = translate(&registry, &options, src).unwrap();
    assert!(actual.contains("define i32 @main"));
    assert!(!actual.contains("// -----"));
}

#[test]
fn test_blank_input() {
    for translation in ["mlir-to-llvmir", "mlir-to-mlir"] {
        let err = test_translate(translation, "").unwrap_err();
        assert!(err.to_string().contains("does not contain any operations"));
    }
}
