use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use syntax_tblgen::{Action, Category, Generator, GeneratorConfig, RecordKeeper, Target};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/syntax.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_syntax-tblgen"))
        .arg(fixture())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

#[test]
fn prints_the_same_source_as_the_library() {
    let output = run(&["--action", "implementation", "--category", "Expr"]);
    assert!(output.status.success(), "{output:?}");

    let records = RecordKeeper::load(&fixture()).expect("valid fixture");
    let expected = Generator::new(&records, GeneratorConfig::default())
        .generate(Action::Implementation, Target::Syntax(Category::Expr))
        .expect("generates");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn writes_to_the_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("decl_interface.rs");
    let output = run(&[
        "--action",
        "interface",
        "--category",
        "Decl",
        "--runtime-crate",
        "crate::syntax",
        "-o",
        path.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&path).expect("output written");
    assert!(written.contains("use crate::syntax::prelude::*;"), "{written}");
    assert!(written.contains("pub struct LetDecl"), "{written}");
}

#[test]
fn unknown_category_fails_without_output() {
    let output = run(&["--action", "interface", "--category", "Nonsense"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nonsense is an unknown category"), "{stderr}");
}

#[test]
fn missing_action_fails_without_output() {
    let output = run(&["--category", "Stmt"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_action_fails_without_output() {
    let output = run(&["--action", "header", "--category", "Stmt"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn token_category_is_generated() {
    let output = run(&["--action", "implementation", "--category", "Token"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("// KwIf Data"), "{stdout}");
    assert!(!stdout.contains("AnyToken"), "{stdout}");
}

#[test]
fn factory_and_rewriter_are_not_implemented() {
    for category in ["SyntaxFactory", "SyntaxRewriter"] {
        let output = run(&["--action", "interface", "--category", category]);
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not implemented"), "{stderr}");
    }
}

#[test]
fn unreadable_schema_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_syntax-tblgen"))
        .args(["does/not/exist.json", "--action", "interface", "--category", "Stmt"])
        .output()
        .expect("binary runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read schema"), "{stderr}");
}

#[test]
fn failed_run_leaves_no_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("factory.rs");
    let output = run(&[
        "--action",
        "implementation",
        "--category",
        "SyntaxFactory",
        "--output",
        path.to_str().expect("utf-8 path"),
    ]);
    assert!(!output.status.success());
    assert!(!path.exists());
}
