//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use lark_syntax::diagnostics::Diagnostics;
use lark_syntax::{dump, parser, scanner};

use crate::errors::FatalError;
use crate::frontend::scope;
use crate::pipeline::{self, UnitReport};
use crate::source;

use super::{CliError, CliResult, ExitCode, render_fatal};

/// Stack size for compile workers; parser recursion follows source nesting.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

// ============================================================================
// Debug commands
// ============================================================================

/// Tokenize and display tokens.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let chars = source::load(path)?;
    let mut diagnostics = Diagnostics::new(path.display().to_string());
    let tokens = scanner::lex(&chars, &mut diagnostics).map_err(|_| failure(&diagnostics))?;

    print_warnings(&diagnostics);
    for tok in &tokens {
        println!("{}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the tree.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let chars = source::load(path)?;
    let mut diagnostics = Diagnostics::new(path.display().to_string());
    let unit = parser::parse(&chars, &mut diagnostics).map_err(|_| failure(&diagnostics))?;

    print_warnings(&diagnostics);
    println!("{}", dump::dump(&unit));
    Ok(ExitCode::SUCCESS)
}

/// Parse, resolve and display the scope tree.
pub fn scopes_file(path: &Path) -> CliResult<ExitCode> {
    let chars = source::load(path)?;
    let mut diagnostics = Diagnostics::new(path.display().to_string());
    let unit = parser::parse(&chars, &mut diagnostics).map_err(|_| failure(&diagnostics))?;
    let scopes = scope::resolve(&unit, &mut diagnostics).map_err(|_| failure(&diagnostics))?;

    print_warnings(&diagnostics);
    println!("{}", scopes.render());
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Full pipeline
// ============================================================================

/// Compile every file and report each unit in input order.
///
/// Units are independent, so they are compiled on a small pool of worker threads. Output is
/// collected first and printed afterwards so it does not interleave.
pub fn compile_files(paths: &[PathBuf]) -> CliResult<ExitCode> {
    if paths.is_empty() {
        return Err(FatalError::NoInputFile.into());
    }

    let results = compile_parallel(paths)?;
    let mut failed = 0usize;
    for result in results {
        match result {
            Ok(report) => {
                print_report(&report);
                if !report.succeeded() {
                    failed += 1;
                }
            }
            Err(fatal) => {
                eprintln!("{}", render_fatal(fatal));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        if paths.len() > 1 {
            eprintln!("{failed} of {} units failed", paths.len());
        }
        Ok(ExitCode::FAILURE)
    }
}

fn compile_parallel(paths: &[PathBuf]) -> CliResult<Vec<Result<UnitReport, FatalError>>> {
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(paths.len())
        .max(1);
    tracing::debug!(units = paths.len(), workers, "compiling");

    let next = AtomicUsize::new(0);
    let next = &next;
    let mut slots: Vec<Option<Result<UnitReport, FatalError>>> = (0..paths.len()).map(|_| None).collect();

    thread::scope(|s| -> CliResult<()> {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let handle = thread::Builder::new()
                .name(format!("lark-worker-{worker}"))
                .stack_size(WORKER_STACK_SIZE)
                .spawn_scoped(s, move || {
                    let mut done = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = paths.get(index) else {
                            break;
                        };
                        done.push((index, pipeline::compile_file(path)));
                    }
                    done
                })
                .map_err(|e| CliError::failure(format!("cannot start compiler thread: {e}")))?;
            handles.push(handle);
        }

        for handle in handles {
            let done = handle
                .join()
                .map_err(|_| CliError::failure("internal error: a compiler thread panicked"))?;
            for (index, result) in done {
                slots[index] = Some(result);
            }
        }
        Ok(())
    })?;

    Ok(slots.into_iter().flatten().collect())
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_report(report: &UnitReport) {
    if !report.diagnostics.is_empty() {
        eprintln!("{}", report.diagnostics.render_all());
    }
    match report.failed_stage() {
        None => println!("✓ {}", report.name()),
        Some(stage) => eprintln!(
            "✗ {}: {} failed with {} error(s)",
            report.name(),
            stage,
            report.diagnostics.error_count()
        ),
    }
}

fn print_warnings(diagnostics: &Diagnostics) {
    if !diagnostics.is_empty() {
        eprintln!("{}", diagnostics.render_all());
    }
}

/// All diagnostics of a failed debug command as the error message.
fn failure(diagnostics: &Diagnostics) -> CliError {
    CliError::failure(diagnostics.render_all())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_unit(tag: &str, source: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!("lark_cli_{tag}_{}_{ts}.lark", std::process::id()));
        std::fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn compile_files_requires_input() {
        let err = compile_files(&[]).unwrap_err();
        assert!(err.message.starts_with("F1001"));
    }

    #[test]
    fn compile_files_keeps_input_order_and_verdicts() {
        let good = temp_unit("good", "x = 1\ny = x");
        let bad = temp_unit("bad", "y = x");
        let paths = vec![good.clone(), bad.clone(), PathBuf::from("/no/such/unit.lark")];

        let results = compile_parallel(&paths).unwrap();
        let _ = std::fs::remove_file(&good);
        let _ = std::fs::remove_file(&bad);

        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().succeeded());
        assert_eq!(results[0].as_ref().unwrap().name(), good.display().to_string());
        assert_eq!(
            results[1].as_ref().unwrap().failed_stage(),
            Some(pipeline::Stage::Resolve)
        );
        assert!(matches!(results[2], Err(FatalError::CannotOpen { .. })));
    }

    #[test]
    fn compile_files_exit_code_reflects_failures() {
        let bad = temp_unit("exit", "if true\n  1 +\nend");
        let code = compile_files(std::slice::from_ref(&bad)).unwrap();
        let _ = std::fs::remove_file(&bad);
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn parse_file_reports_diagnostics_as_error() {
        let bad = temp_unit("parse", "x = (1");
        let err = parse_file(&bad).unwrap_err();
        let _ = std::fs::remove_file(&bad);
        assert!(err.message.contains("error[E3006]"), "{}", err.message);
    }
}
