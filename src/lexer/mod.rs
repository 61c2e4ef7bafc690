pub mod token;

use logos::Logos;

use crate::diagnostics::ScanError;
use token::{RawToken, Token, TokenKind};

/// Position of the lexer: byte offset just past the last token, and the
/// current 1-based line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCursor {
    pub offset: usize,
    pub line: usize,
}

/// Saved lexer state. Restoring it rewinds offset and line together.
#[derive(Clone)]
pub struct Checkpoint<'src>(logos::Lexer<'src, RawToken>);

/// Pull-based tokenizer. Produces one token per call and never buffers.
pub struct Lexer<'src> {
    raw: logos::Lexer<'src, RawToken>,
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    /// A NUL character ends the input; anything after it is ignored.
    pub fn new(source: &'src str) -> Self {
        let source = source.split('\0').next().unwrap_or_default();
        Self { raw: RawToken::lexer_with_extras(source, 1), exhausted: false }
    }

    pub fn line(&self) -> usize {
        self.raw.extras
    }

    pub fn cursor(&self) -> ScanCursor {
        ScanCursor { offset: self.raw.span().end, line: self.raw.extras }
    }

    pub fn checkpoint(&self) -> Checkpoint<'src> {
        Checkpoint(self.raw.clone())
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint<'src>) {
        self.raw = checkpoint.0;
    }

    /// Returns the next significant token. End of input yields
    /// [`Token::Eof`] on every call.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        loop {
            let raw = match self.raw.next() {
                None => return Ok(Token::Eof),
                Some(Ok(raw)) => raw,
                Some(Err(fault)) => return Err(fault.at_line(self.line())),
            };
            // Skip comments
            if let Some(token) = raw.cook() {
                return Ok(token);
            }
        }
    }

    /// True if the next token has kind `expected`. Consumes nothing.
    pub fn probe(&mut self, expected: TokenKind) -> bool {
        self.probe_sequence(&[expected])
    }

    /// True if the next tokens have exactly the kinds in `expected`, in
    /// order. Consumes nothing, whether or not the probe matches.
    pub fn probe_sequence(&mut self, expected: &[TokenKind]) -> bool {
        let saved = self.checkpoint();
        let matched = expected
            .iter()
            .all(|&kind| matches!(self.next_token(), Ok(token) if token.kind() == kind));
        self.rewind(saved);
        matched
    }

    /// Looks at the raw character right after the last token, with no
    /// whitespace or comment skipping.
    pub fn next_char_is(&self, c: char) -> bool {
        self.raw.remainder().starts_with(c)
    }
}

/// Yields tokens up to (not including) end of input, stopping after the
/// first error.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Ok(Token::Eof) => {
                self.exhausted = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.exhausted = true;
                Some(Err(err))
            }
        }
    }
}
