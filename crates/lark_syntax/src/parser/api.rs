/// Parse a buffer of code points into the unit's top-level [`Block`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Errors
/// Returns [`Reported`] after recording the first syntax error (or any lexical error) in
/// `diagnostics`.
#[tracing::instrument(skip_all, fields(source_len = chars.len()))]
pub fn parse(chars: &[char], diagnostics: &mut Diagnostics) -> Result<Block, Reported> {
    Parser::new(chars, diagnostics).parse()
}

/// Convenience wrapper around [`parse`] for source held in a `str`.
pub fn parse_source(source: &str, diagnostics: &mut Diagnostics) -> Result<Block, Reported> {
    let chars: Vec<char> = source.chars().collect();
    parse(&chars, diagnostics)
}
