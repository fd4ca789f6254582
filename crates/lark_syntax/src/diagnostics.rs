//! Diagnostics produced while compiling one source unit.
//!
//! Every pass reports into a [`Diagnostics`] collector owned by the unit being compiled. The
//! collector knows the unit's name, so individual diagnostics only carry a [`Location`].
//!
//! Passes signal "I already reported why" by returning [`Reported`]; callers propagate it with `?`
//! instead of reporting again.

use std::fmt;

use lark_core::diagnostics::{DiagnosticCode, Severity};

use crate::location::Location;

/// Marker error: the failure has already been recorded in a [`Diagnostics`] collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errors were reported")
    }
}

impl std::error::Error for Reported {}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub location: Location,
    /// Extra context lines (e.g. the offending identifier).
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, location: Location) -> Self {
        Self {
            code,
            severity: code.severity(),
            location,
            notes: Vec::new(),
        }
    }

    /// Add a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn message(&self) -> &'static str {
        self.code.message()
    }
}

/// Ordered collection of diagnostics for one source unit.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    source_name: String,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            items: Vec::new(),
        }
    }

    /// Name of the unit these diagnostics belong to (usually its path).
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Record a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = %diagnostic.code,
            line = diagnostic.location.line,
            column = diagnostic.location.column,
            "diagnostic reported"
        );
        self.items.push(diagnostic);
    }

    /// Record an error for `code` at `location`.
    pub fn error(&mut self, location: Location, code: DiagnosticCode) {
        self.report(Diagnostic::new(code, location));
    }

    /// Record an error carrying one note.
    pub fn error_with(&mut self, location: Location, code: DiagnosticCode, note: impl Into<String>) {
        self.report(Diagnostic::new(code, location).with_note(note));
    }

    /// Record a warning for `code` at `location`.
    pub fn warn(&mut self, location: Location, code: DiagnosticCode) {
        self.report(Diagnostic::new(code, location));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.severity >= Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Codes in reporting order (handy for assertions).
    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.items.iter().map(|d| d.code).collect()
    }

    /// Render one diagnostic as `name:line:column: severity[CODE]: message`, followed by its notes.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = format!(
            "{}:{}: {}[{}]: {}",
            self.source_name,
            diagnostic.location,
            diagnostic.severity,
            diagnostic.code,
            diagnostic.message()
        );
        for note in &diagnostic.notes {
            out.push_str("\n  = note: ");
            out.push_str(note);
        }
        out
    }

    /// Render every diagnostic, one per line, in reporting order.
    pub fn render_all(&self) -> String {
        self.items
            .iter()
            .map(|d| self.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
