//! Fatal errors: conditions that abort a whole compilation unit.
//!
//! Recoverable problems (lexical, syntactic, semantic) are [`lark_syntax::diagnostics::Diagnostic`]s
//! and never show up here. A [`FatalError`] means no AST was built for the unit at all.

use std::io;
use std::path::PathBuf;

use lark_core::diagnostics::FatalCode;
use miette::Diagnostic;
use thiserror::Error;

/// Unit-level failure, rendered through `miette` by the CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum FatalError {
    #[error("no input file")]
    #[diagnostic(code(lark::no_input_file), help("pass one or more `.lark` files, e.g. `lark main.lark`"))]
    NoInputFile,

    #[error("cannot open `{}`", .path.display())]
    #[diagnostic(code(lark::cannot_open))]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read `{name}`: {reason}")]
    #[diagnostic(code(lark::cannot_read))]
    CannotRead { name: String, reason: String },

    #[error("out of memory while loading `{name}` ({bytes} bytes)")]
    #[diagnostic(code(lark::out_of_memory), help("source files are limited to 100 MB"))]
    OutOfMemory { name: String, bytes: u64 },
}

impl FatalError {
    /// The catalog code for this failure.
    pub fn code(&self) -> FatalCode {
        match self {
            FatalError::NoInputFile => FatalCode::NoInputFile,
            FatalError::CannotOpen { .. } => FatalCode::CannotOpen,
            FatalError::CannotRead { .. } => FatalCode::CannotRead,
            FatalError::OutOfMemory { .. } => FatalCode::OutOfMemory,
        }
    }

    pub(crate) fn cannot_read(name: &str, reason: impl ToString) -> Self {
        FatalError::CannotRead {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_memory(name: &str, bytes: u64) -> Self {
        FatalError::OutOfMemory {
            name: name.to_string(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_fatal_catalog() {
        assert_eq!(FatalError::NoInputFile.code().number(), 1001);
        assert_eq!(FatalError::cannot_read("a.lark", "bad").code(), FatalCode::CannotRead);
        assert_eq!(FatalError::out_of_memory("a.lark", 1).code().to_string(), "F1005");
    }

    #[test]
    fn messages_name_the_unit() {
        let err = FatalError::cannot_read("demo.lark", "invalid UTF-8 at byte 3");
        assert_eq!(err.to_string(), "cannot read `demo.lark`: invalid UTF-8 at byte 3");
    }
}
