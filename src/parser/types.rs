//! Type syntax that the scanner reads past without keeping: generic argument
//! lists, tuple types, array and nullable suffixes, and `where` clauses.

use crate::diagnostics::ScanError;
use crate::lexer::token::{Token, TokenKind};

use super::Scanner;

/// Deepest `<`/`(` nesting accepted inside a type before scanning fails.
pub(crate) const MAX_TYPE_NESTING: usize = 256;

/// The two bracketed type lists. They share one grammar and differ only in
/// the closing token and in what an element may look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeList {
    /// `<A, B.C<D>[], E?>`; slots may be empty, as in `Dictionary<,>`.
    Generic,
    /// `(int a, (B, C)? b)`; every element is a type, optionally labelled.
    Tuple,
}

impl TypeList {
    fn open(self) -> TokenKind {
        match self {
            TypeList::Generic => TokenKind::Less,
            TypeList::Tuple => TokenKind::ParenOpen,
        }
    }

    fn close(self) -> TokenKind {
        match self {
            TypeList::Generic => TokenKind::Greater,
            TypeList::Tuple => TokenKind::ParenClose,
        }
    }

    fn allows_labels(self) -> bool {
        self == TypeList::Tuple
    }

    fn allows_empty_slots(self) -> bool {
        self == TypeList::Generic
    }
}

impl Scanner<'_> {
    /// Skips a type list whose opening `<` or `(` was already consumed,
    /// through its closing token and an optional trailing `?`.
    ///
    /// Lists nested deeper than [`MAX_TYPE_NESTING`] are rejected at the
    /// opening token.
    pub(crate) fn skip_type_list(&mut self, list: TypeList) -> Result<(), ScanError> {
        if self.type_nesting == MAX_TYPE_NESTING {
            return Err(ScanError::UnexpectedToken { line: self.lexer.line(), found: list.open() });
        }
        self.type_nesting += 1;
        let result = self.skip_type_list_items(list);
        self.type_nesting -= 1;
        result
    }

    fn skip_type_list_items(&mut self, list: TypeList) -> Result<(), ScanError> {
        loop {
            let mut token = self.advance()?;

            let has_type = match token {
                Token::ParenOpen => {
                    self.skip_type_list(TypeList::Tuple)?;
                    token = self.advance()?;
                    true
                }
                Token::Identifier(_) => {
                    token = self.skip_qualified_rest()?;
                    true
                }
                _ => false,
            };

            if has_type {
                token = self.skip_type_suffixes(token)?;
                if list.allows_labels() && token.kind() == TokenKind::Identifier {
                    token = self.advance()?;
                }
            } else if !list.allows_empty_slots() {
                return Err(self.unexpected(&token));
            }

            if token.kind() == list.close() {
                if self.lexer.probe(TokenKind::Question) {
                    self.advance()?;
                }
                return Ok(());
            }
            if token != Token::Comma {
                return Err(self.unexpected(&token));
            }
        }
    }

    /// After a type's first identifier: `.Segment`s, then an optional
    /// generic argument list. Returns the first token past them.
    fn skip_qualified_rest(&mut self) -> Result<Token, ScanError> {
        let mut token = self.advance()?;
        while token == Token::Period {
            match self.advance()? {
                Token::Identifier(_) => {}
                other => return Err(self.expected(TokenKind::Identifier, &other)),
            }
            token = self.advance()?;
        }
        if token == Token::Less {
            self.skip_type_list(TypeList::Generic)?;
            token = self.advance()?;
        }
        Ok(token)
    }

    /// Array ranks (`[]`) and nullable markers (`?`) in any order.
    fn skip_type_suffixes(&mut self, mut token: Token) -> Result<Token, ScanError> {
        loop {
            match token {
                Token::BracketOpen => match self.advance()? {
                    Token::BracketClose => {}
                    other => return Err(self.expected(TokenKind::BracketClose, &other)),
                },
                Token::Question => {}
                other => return Ok(other),
            }
            token = self.advance()?;
        }
    }

    /// Reads a possibly qualified, possibly generic type name into `out`,
    /// e.g. `Godot.Collections.Array<int>` becomes `Godot.Collections.Array`.
    ///
    /// A segment continues only when the character right after the previous
    /// token is `.`.
    pub(crate) fn parse_full_type_name(&mut self, out: &mut String) -> Result<(), ScanError> {
        loop {
            match self.advance()? {
                Token::Identifier(name) => out.push_str(&name),
                other => return Err(self.expected(TokenKind::Identifier, &other)),
            }

            if self.lexer.probe(TokenKind::Less) {
                self.advance()?;
                self.skip_type_list(TypeList::Generic)?;
            }

            if !self.lexer.next_char_is('.') {
                return Ok(());
            }
            self.advance()?;
            out.push('.');
        }
    }

    /// Parses `T : A, B.C<D>, new() [where U : ...]` after a `where` keyword,
    /// up to and including the `{` that opens the body.
    pub(crate) fn parse_type_constraints(&mut self) -> Result<(), ScanError> {
        'clause: loop {
            let token = self.advance()?;
            if token.kind() != TokenKind::Identifier {
                return Err(self.unexpected(&token));
            }
            let token = self.advance()?;
            if token != Token::Colon {
                return Err(self.unexpected(&token));
            }

            loop {
                let token = match self.advance()? {
                    word if word.is_word("where") => continue 'clause,
                    Token::Identifier(_) => self.skip_constraint_rest()?,
                    other => return Err(self.expected(TokenKind::Identifier, &other)),
                };

                match token {
                    Token::Comma => {}
                    Token::CurlyOpen => return Ok(()),
                    word if word.is_word("where") => continue 'clause,
                    other => return Err(self.unexpected(&other)),
                }
            }
        }
    }

    /// Rest of one constraint: qualification, generic arguments, the `()` of
    /// `new()` and a nullable marker as in `class?`.
    fn skip_constraint_rest(&mut self) -> Result<Token, ScanError> {
        let mut token = self.skip_qualified_rest()?;
        if token == Token::ParenOpen {
            token = self.advance()?;
            if token != Token::ParenClose {
                return Err(self.unexpected(&token));
            }
            token = self.advance()?;
        }
        if token == Token::Question {
            token = self.advance()?;
        }
        Ok(token)
    }
}
