//! Source positions.

use std::fmt;

/// A line/column cursor into one source unit.
///
/// The scanner advances a `Location` as it consumes code points and copies it into every token;
/// the parser copies token locations into AST nodes. Once a node owns a location it never changes.
///
/// ## Notes
/// - `line` starts at 1, `column` at 0. Both only grow within a single scan (the column resets to 0
///   on each new line).
/// - Columns count code points, not bytes.
/// - The name of the source unit is not stored here; the unit's [`Diagnostics`] carries it.
///
/// [`Diagnostics`]: crate::diagnostics::Diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Position of the first code point of a unit.
    pub const START: Location = Location { line: 1, column: 0 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Move right by `width` code points on the current line.
    pub fn advance(&mut self, width: u32) {
        self.column += width;
    }

    /// Move to the start of the next line.
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
