//! The compilation pipeline for one source unit.
//!
//! Stages run in a fixed order and the first failing stage ends the unit:
//!
//! 1. [`Stage::Parse`]: scanner and parser (fail-fast on the first syntax error)
//! 2. [`Stage::Resolve`]: scope tree and identifier checks
//! 3. [`Stage::WellFormedness`]: required children present
//! 4. [`Stage::StaticCheck`]: static checking scaffold
//!
//! Every stage reports into the unit's own [`Diagnostics`]; a finished [`UnitReport`] carries them
//! together with either the checked tree or the stage that failed. Units share nothing, so callers
//! may compile several on different threads.

use std::fmt;
use std::path::Path;

use lark_syntax::ast::Block;
use lark_syntax::diagnostics::Diagnostics;
use lark_syntax::parser;

use crate::errors::FatalError;
use crate::frontend::scope::{self, ScopeTree};
use crate::frontend::{static_check, wellformed};
use crate::source;

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Resolve,
    WellFormedness,
    StaticCheck,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Parse => "parse",
            Stage::Resolve => "scope resolution",
            Stage::WellFormedness => "well-formedness check",
            Stage::StaticCheck => "static check",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a unit that passed every stage.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub unit: Block,
    pub scopes: ScopeTree,
}

/// Everything the pipeline has to say about one unit.
#[derive(Debug)]
pub struct UnitReport {
    pub diagnostics: Diagnostics,
    pub outcome: Result<Compiled, Stage>,
}

impl UnitReport {
    pub fn name(&self) -> &str {
        self.diagnostics.source_name()
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The stage that stopped the unit, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        self.outcome.as_ref().err().copied()
    }
}

/// Run the semantic stages over an already-parsed unit.
pub fn analyze(unit: Block, diagnostics: &mut Diagnostics) -> Result<Compiled, Stage> {
    let scopes = scope::resolve(&unit, diagnostics).map_err(|_| Stage::Resolve)?;
    wellformed::check(&unit, diagnostics).map_err(|_| Stage::WellFormedness)?;
    static_check::check(&unit, diagnostics).map_err(|_| Stage::StaticCheck)?;
    Ok(Compiled { unit, scopes })
}

/// Compile decoded code points.
#[tracing::instrument(skip_all, fields(unit = name, chars = chars.len()))]
pub fn compile_chars(name: &str, chars: &[char]) -> UnitReport {
    let mut diagnostics = Diagnostics::new(name);
    let outcome = parser::parse(chars, &mut diagnostics)
        .map_err(|_| Stage::Parse)
        .and_then(|unit| analyze(unit, &mut diagnostics));

    match &outcome {
        Ok(_) => tracing::debug!(warnings = diagnostics.warning_count(), "unit compiled"),
        Err(stage) => tracing::debug!(%stage, errors = diagnostics.error_count(), "unit failed"),
    }
    UnitReport { diagnostics, outcome }
}

/// Compile source text.
pub fn compile_source(name: &str, source: &str) -> UnitReport {
    let chars: Vec<char> = source.chars().collect();
    compile_chars(name, &chars)
}

/// Load, decode and compile a file. I/O and decoding problems are fatal for the unit.
pub fn compile_file(path: &Path) -> Result<UnitReport, FatalError> {
    let chars = source::load(path)?;
    Ok(compile_chars(&path.display().to_string(), &chars))
}
