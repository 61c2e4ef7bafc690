pub mod decl;
pub mod scope;
mod types;

use tracing::{debug, trace};

use crate::diagnostics::ScanError;
use crate::lexer::Lexer;
use crate::lexer::token::{Token, TokenKind};
pub use decl::ClassDecl;
use scope::{Scope, ScopeStack};
use types::TypeList;

/// Recognizes `class`, `struct` and `namespace` headers in a token stream and
/// tracks brace nesting to name what it finds. Everything else is skipped.
pub struct Scanner<'src> {
    lexer: Lexer<'src>,
    scopes: ScopeStack,
    classes: Vec<ClassDecl>,
    /// Open `<`/`(` lists inside the type being skipped.
    type_nesting: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            scopes: ScopeStack::new(),
            classes: Vec::new(),
            type_nesting: 0,
        }
    }

    /// Scans the whole input, returning the non-generic classes in source
    /// order, or the first error.
    pub fn scan(mut self) -> Result<Vec<ClassDecl>, ScanError> {
        let mut token = self.advance()?;
        loop {
            let next = match &token {
                Token::Eof => break,
                // `where T : class` must be consumed before `class` is seen
                word if word.is_word("where") => {
                    self.standalone_constraints()?;
                    self.advance()?
                }
                word if word.is_word("class") => match self.advance()? {
                    Token::Identifier(name) => {
                        self.class_declaration(name)?;
                        self.advance()?
                    }
                    // not a declaration; look at this token again
                    other => other,
                },
                word if word.is_word("struct") => {
                    self.struct_declaration()?;
                    self.advance()?
                }
                word if word.is_word("namespace") => {
                    self.namespace_declaration()?;
                    self.advance()?
                }
                Token::CurlyOpen => {
                    self.scopes.push(Scope::Block);
                    self.advance()?
                }
                Token::CurlyClose => {
                    self.close_scope()?;
                    self.advance()?
                }
                _ => self.advance()?,
            };
            token = next;
        }

        if !self.scopes.is_empty() {
            return Err(ScanError::UnbalancedBraces);
        }
        Ok(self.classes)
    }

    fn advance(&mut self) -> Result<Token, ScanError> {
        self.lexer.next_token()
    }

    fn unexpected(&self, found: &Token) -> ScanError {
        ScanError::UnexpectedToken { line: self.lexer.line(), found: found.kind() }
    }

    fn expected(&self, expected: TokenKind, found: &Token) -> ScanError {
        ScanError::ExpectedToken { line: self.lexer.line(), expected, found: found.kind() }
    }

    /// A `where` outside any class header, e.g. on a generic method. The
    /// `{` it ends on opens an ordinary block.
    fn standalone_constraints(&mut self) -> Result<(), ScanError> {
        let shape = [TokenKind::Identifier, TokenKind::Colon, TokenKind::Identifier];
        if self.lexer.probe_sequence(&shape) {
            self.parse_type_constraints()?;
            self.scopes.push(Scope::Block);
        }
        Ok(())
    }

    /// Parses a class header after its name, through the `{` of its body.
    /// Generic classes are parsed and scoped like any other but not kept.
    fn class_declaration(&mut self, name: String) -> Result<(), ScanError> {
        let (namespace, qualified) = self.scopes.qualify(&name);
        let mut decl = ClassDecl {
            namespace,
            name: qualified,
            base: Vec::new(),
            nested: self.scopes.in_type(),
        };
        let mut generic = false;

        loop {
            match self.advance()? {
                Token::Colon => {
                    self.parse_class_base(&mut decl.base)?;
                    break;
                }
                Token::CurlyOpen => break,
                Token::Less if !generic => {
                    generic = true;
                    self.skip_type_list(TypeList::Generic)?;
                }
                // consumes the opening `{`
                word if word.is_word("where") => {
                    self.parse_type_constraints()?;
                    break;
                }
                other => return Err(self.unexpected(&other)),
            }
        }

        trace!(name = %name, depth = self.scopes.depth(), "enter class body");
        self.scopes.push(Scope::Type(name));

        if generic {
            debug!(class = %decl.full_name(), "ignoring generic class declaration");
        } else {
            self.classes.push(decl);
        }
        Ok(())
    }

    /// `: Base, Other<T>.Nested [where ...] {`, with the colon consumed.
    fn parse_class_base(&mut self, bases: &mut Vec<String>) -> Result<(), ScanError> {
        loop {
            let mut name = String::new();
            self.parse_full_type_name(&mut name)?;
            bases.push(name);

            match self.advance()? {
                Token::Comma => {}
                Token::CurlyOpen => return Ok(()),
                word if word.is_word("where") => return self.parse_type_constraints(),
                other => return Err(self.unexpected(&other)),
            }
        }
    }

    /// Structs are only scoped, never reported. The first identifier after
    /// the keyword is the name; everything else up to `{` is ignored.
    fn struct_declaration(&mut self) -> Result<(), ScanError> {
        let mut name = None;
        let name = loop {
            match self.advance()? {
                Token::Identifier(word) if name.is_none() => name = Some(word),
                Token::CurlyOpen => match name.take() {
                    Some(name) => break name,
                    None => {
                        return Err(ScanError::MissingIdentifier {
                            line: self.lexer.line(),
                            keyword: "struct",
                            found: TokenKind::CurlyOpen,
                        });
                    }
                },
                Token::Eof => {
                    return Err(ScanError::UnexpectedEof {
                        line: self.lexer.line(),
                        construct: "struct decl",
                    });
                }
                _ => {}
            }
        };

        trace!(name = %name, depth = self.scopes.depth(), "enter struct body");
        self.scopes.push(Scope::Type(name));
        Ok(())
    }

    fn namespace_declaration(&mut self) -> Result<(), ScanError> {
        if self.scopes.in_type() {
            return Err(ScanError::NestedNamespaceInType { line: self.lexer.line() });
        }
        let name = self.parse_namespace_name()?;
        trace!(name = %name, depth = self.scopes.depth(), "enter namespace");
        self.scopes.push(Scope::Namespace(name));
        Ok(())
    }

    /// `A.B.C {`, returning `A.B.C` with the brace consumed.
    fn parse_namespace_name(&mut self) -> Result<String, ScanError> {
        let mut name = String::new();
        loop {
            match self.advance()? {
                Token::Identifier(segment) => name.push_str(&segment),
                other => return Err(self.unexpected(&other)),
            }
            match self.advance()? {
                Token::Period => name.push('.'),
                Token::CurlyOpen => return Ok(name),
                other => return Err(self.unexpected(&other)),
            }
        }
    }

    fn close_scope(&mut self) -> Result<(), ScanError> {
        match self.scopes.pop() {
            Some(scope) => {
                trace!(?scope, depth = self.scopes.depth(), "leave scope");
                Ok(())
            }
            None => Err(ScanError::UnexpectedToken {
                line: self.lexer.line(),
                found: TokenKind::CurlyClose,
            }),
        }
    }
}
