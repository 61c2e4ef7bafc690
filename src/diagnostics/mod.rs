use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lexer::token::TokenKind;

/// A fatal scan failure. Scanning stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Line: {line} - Unterminated comment")]
    UnterminatedComment { line: usize },

    #[error("Line: {line} - Unterminated String")]
    UnterminatedString { line: usize },

    #[error("Line: {line} - Unexpected character.")]
    UnexpectedCharacter { line: usize },

    #[error("Line: {line} - Unexpected token: {found}")]
    UnexpectedToken { line: usize, found: TokenKind },

    #[error("Line: {line} - Expected {expected}, found: {found}")]
    ExpectedToken { line: usize, expected: TokenKind, found: TokenKind },

    #[error("Line: {line} - Expected Identifier after keyword `{keyword}`, found {found}")]
    MissingIdentifier { line: usize, keyword: &'static str, found: TokenKind },

    #[error("Line: {line} - Found namespace nested inside type.")]
    NestedNamespaceInType { line: usize },

    #[error("Line: {line} - Expected {{ after {construct}, found EOF")]
    UnexpectedEof { line: usize, construct: &'static str },

    #[error("Reached EOF with missing close curly brackets.")]
    UnbalancedBraces,
}

impl ScanError {
    /// The 1-based line the error is anchored to; `None` for structural
    /// end-of-input failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScanError::UnterminatedComment { line }
            | ScanError::UnterminatedString { line }
            | ScanError::UnexpectedCharacter { line }
            | ScanError::UnexpectedToken { line, .. }
            | ScanError::ExpectedToken { line, .. }
            | ScanError::MissingIdentifier { line, .. }
            | ScanError::NestedNamespaceInType { line }
            | ScanError::UnexpectedEof { line, .. } => Some(*line),
            ScanError::UnbalancedBraces => None,
        }
    }
}

/// Failure to turn a file on disk into a declaration list.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error(
        "File '{}' contains invalid unicode (utf-8), so it was not loaded. Please ensure that scripts are saved in valid utf-8 unicode.",
        .path.display()
    )]
    InvalidUtf8 { path: PathBuf },

    #[error("{source}")]
    Scan { path: PathBuf, source: ScanError },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn path(&self) -> &Path {
        match self {
            SourceError::Io { path, .. }
            | SourceError::InvalidUtf8 { path }
            | SourceError::Scan { path, .. } => path,
        }
    }
}

/// Render a ScanError with ariadne for terminal output.
pub fn render_error(source: &str, filename: &str, err: &ScanError) -> std::io::Result<()> {
    write_error(source, filename, err, true, std::io::stderr())
}

/// Write the ariadne report for `err` into `out`. The label covers the
/// whole offending line, or the end of input for unanchored errors.
pub fn write_error<W: Write>(
    source: &str,
    filename: &str,
    err: &ScanError,
    color: bool,
    out: W,
) -> std::io::Result<()> {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let span = match err.line() {
        Some(line) => line_span(source, line),
        None => {
            let end = source.chars().count();
            end..end
        }
    };

    Report::build(ReportKind::Error, filename, span.start)
        .with_config(Config::default().with_color(color))
        .with_message("scan error")
        .with_label(Label::new((filename, span)).with_message(err.to_string()))
        .finish()
        .write((filename, Source::from(source.to_string())), out)
}

/// Char range of the 1-based `line`, clamped to end of input.
fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut start = 0;
    for (index, text) in source.split('\n').enumerate() {
        let len = text.chars().count();
        if index + 1 == line {
            return start..start + len;
        }
        start += len + 1;
    }
    let end = source.chars().count();
    end..end
}
