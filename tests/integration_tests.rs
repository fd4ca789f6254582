//! Integration tests for the Lark compiler front end

use std::fs;
use std::path::Path;

use lark::pipeline::{self, Stage, UnitReport};

/// Run the full pipeline on a fixture file.
fn compile_fixture(path: &Path) -> UnitReport {
    pipeline::compile_file(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn fixtures(dir: &str) -> Vec<std::path::PathBuf> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map(|e| e == "lark").unwrap_or(false))
        .collect();
    paths.sort();
    paths
}

/// The code named on a fixture's `# expect: CODE` first line.
fn expected_code(path: &Path) -> String {
    let source = fs::read_to_string(path).unwrap();
    let first = source.lines().next().unwrap_or_default();
    first
        .strip_prefix("# expect: ")
        .unwrap_or_else(|| panic!("{} has no `# expect:` header", path.display()))
        .trim()
        .to_string()
}

/// Test that all valid fixtures compile successfully
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("tests/fixtures/valid");
    assert!(!paths.is_empty());

    for path in paths {
        let report = compile_fixture(&path);
        assert!(
            report.succeeded(),
            "Expected {} to compile successfully, got:\n{}",
            path.display(),
            report.diagnostics.render_all()
        );
        assert!(!report.diagnostics.has_errors());
    }
}

/// Test that invalid fixtures fail with the code they announce
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("tests/fixtures/invalid");
    assert!(!paths.is_empty());

    for path in paths {
        let report = compile_fixture(&path);
        assert!(
            !report.succeeded(),
            "Expected {} to fail compilation, but it succeeded",
            path.display()
        );
        let first = report
            .diagnostics
            .iter()
            .find(|d| d.severity >= lark_core::diagnostics::Severity::Error)
            .unwrap_or_else(|| panic!("{} failed without an error", path.display()));
        assert_eq!(first.code.to_string(), expected_code(&path), "{}", path.display());
    }
}

/// Behaviour of whole units through the public API
mod pipeline_tests {
    use super::*;
    use lark_core::diagnostics::DiagnosticCode;

    #[test]
    fn test_fail_fast_parser_produces_no_tree() {
        let report = pipeline::compile_source("ff.lark", "if true\n  1 +\nend\nx = 1");
        assert_eq!(report.failed_stage(), Some(Stage::Parse));
        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = report.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.code, DiagnosticCode::ExpectedExpression);
        assert_eq!((diagnostic.location.line, diagnostic.location.column), (3, 0));
    }

    #[test]
    fn test_semantic_pass_reports_every_undeclared_name() {
        let report = pipeline::compile_source("many.lark", "a = b\nc = d + e\nf = routine() g end");
        assert_eq!(report.failed_stage(), Some(Stage::Resolve));
        assert_eq!(report.diagnostics.error_count(), 4);
    }

    #[test]
    fn test_rendered_diagnostics_carry_unit_name_and_location() {
        let report = pipeline::compile_source("where.lark", "x = 1\ny = zed");
        assert_eq!(
            report.diagnostics.render_all(),
            "where.lark:2:4: error[E3501]: use of undeclared identifier\n  = note: `zed` is not declared in this scope"
        );
    }

    #[test]
    fn test_closure_assigns_outer_variable_instead_of_shadowing() {
        let report = pipeline::compile_source(
            "closure.lark",
            "counter = 0\nbump = routine() counter = counter + 1 end\nbump()",
        );
        let compiled = report.outcome.expect("compiled");
        let routine = compiled.scopes.get(1).unwrap();
        assert!(routine.declarations().is_empty());
    }

    #[test]
    fn test_parameter_shadows_outer_variable() {
        let report = pipeline::compile_source(
            "shadow.lark",
            "counter = 0\nbump = routine(counter) counter = counter + 1 end",
        );
        let compiled = report.outcome.expect("compiled");
        assert!(compiled.scopes.get(1).unwrap().declares("counter"));
        assert!(compiled.scopes.root().declares("counter"));
    }

    #[test]
    fn test_nested_routines_see_every_enclosing_scope() {
        let source = "\
a = 1
outer = routine(b)
  inner = routine(c) return a + b + c end
  return inner(b)
end";
        let report = pipeline::compile_source("nested.lark", source);
        assert!(report.succeeded(), "{}", report.diagnostics.render_all());
        let compiled = report.outcome.unwrap();
        assert_eq!(compiled.scopes.render(), "unit 1:0: a, outer\n  routine 2:8: b, inner\n    routine 3:10: c");
    }

    #[test]
    fn test_utf16_source_compiles() {
        let path = std::env::temp_dir().join(format!("lark_it_utf16_{}.lark", std::process::id()));
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "x = 1\ny = x".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();
        let report = pipeline::compile_file(&path);
        let _ = fs::remove_file(&path);
        assert!(report.unwrap().succeeded());
    }
}

/// AST dumps of whole programs
mod dump_tests {
    use insta::assert_snapshot;
    use lark::diagnostics::Diagnostics;
    use lark::parser;
    use lark_syntax::dump::dump;

    #[test]
    fn test_dump_small_program() {
        let source = "\
total = 0
foreach n in [1, 2] do
  total = total + n * 2
end
return total";
        let mut diags = Diagnostics::new("dump.lark");
        let unit = parser::parse_source(source, &mut diags).unwrap();
        assert_snapshot!(dump(&unit), @r"
        (assign total 0)
        (foreach n (array 1 2) (block (assign total (additive + total (multiplicative * n 2)))))
        (return total)
        ");
    }
}
