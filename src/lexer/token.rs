use logos::{Lexer, Logos, Skip};

use crate::diagnostics::ScanError;

/// A token handed to the declaration scanner.
///
/// Comments, directives and whitespace never reach this type; the lexer
/// drops them on the way out.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    ParenOpen,
    ParenClose,
    Period,
    Question,
    Colon,
    Comma,
    Less,
    Greater,
    /// Any other punctuation character, carried as written.
    Symbol(char),
    /// Identifier text, including a leading `@` escape marker when present.
    Identifier(String),
    /// Decoded contents of a string or character literal.
    Str(String),
    Number(f64),
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::BracketOpen => TokenKind::BracketOpen,
            Token::BracketClose => TokenKind::BracketClose,
            Token::CurlyOpen => TokenKind::CurlyOpen,
            Token::CurlyClose => TokenKind::CurlyClose,
            Token::ParenOpen => TokenKind::ParenOpen,
            Token::ParenClose => TokenKind::ParenClose,
            Token::Period => TokenKind::Period,
            Token::Question => TokenKind::Question,
            Token::Colon => TokenKind::Colon,
            Token::Comma => TokenKind::Comma,
            Token::Less => TokenKind::Less,
            Token::Greater => TokenKind::Greater,
            Token::Symbol(_) => TokenKind::Symbol,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Str(_) => TokenKind::Str,
            Token::Number(_) => TokenKind::Number,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// True when this is the identifier `word`. An `@`-escaped identifier
    /// such as `@class` never matches its bare keyword.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Token::Identifier(text) if text == word)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Symbol(c) => write!(f, "Symbol '{c}'"),
            Token::Identifier(name) => write!(f, "Identifier '{name}'"),
            Token::Str(value) => write!(f, "String {value:?}"),
            Token::Number(n) => write!(f, "Number {n}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Payload-free token category, used for lookahead probes and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    ParenOpen,
    ParenClose,
    Period,
    Question,
    Colon,
    Comma,
    Symbol,
    Identifier,
    Str,
    Number,
    Less,
    Greater,
    Eof,
    Error,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::BracketOpen => "[",
            TokenKind::BracketClose => "]",
            TokenKind::CurlyOpen => "{",
            TokenKind::CurlyClose => "}",
            TokenKind::ParenOpen => "(",
            TokenKind::ParenClose => ")",
            TokenKind::Period => ".",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Symbol => "Symbol",
            TokenKind::Identifier => "Identifier",
            TokenKind::Str => "String",
            TokenKind::Number => "Number",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "Error",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lexical failure raised inside a logos callback. The line is attached by
/// the wrapping lexer, which owns the line counter at the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    #[default]
    UnexpectedCharacter,
    UnterminatedComment,
    UnterminatedString,
}

impl LexFault {
    pub fn at_line(self, line: usize) -> ScanError {
        match self {
            LexFault::UnexpectedCharacter => ScanError::UnexpectedCharacter { line },
            LexFault::UnterminatedComment => ScanError::UnterminatedComment { line },
            LexFault::UnterminatedString => ScanError::UnterminatedString { line },
        }
    }
}

/// Raw logos token set. `extras` is the current 1-based line.
///
/// The symbol class is the reserved punctuation band (`!`..`'`, `*`..`/`,
/// `:`..`>`, `[`..`^`, `` ` ``, `{`..DEL) minus everything matched by a more
/// specific rule. `-` sits inside the band, so numbers always start with a digit.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = usize)]
#[logos(error = LexFault)]
#[logos(skip r"[\x01-\x09\x0B-\x20]+")]
pub(crate) enum RawToken {
    #[token("\n", newline)]
    Newline,

    #[token("/*", block_comment)]
    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    Comment,

    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    CurlyOpen,
    #[token("}")]
    CurlyClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(".")]
    Period,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[token("/", |_| '/')]
    #[regex(r"[!$%&*+\-;=\\^`|~\x7F]", first_char)]
    Symbol(char),

    #[regex(r"[0-9]", number)]
    Number(f64),

    #[regex(r"[_a-zA-Z\x{80}-\x{10FFFF}][_a-zA-Z0-9\x{80}-\x{10FFFF}]*", |lex| lex.slice().to_owned())]
    #[regex(r"@[_a-zA-Z0-9\x{80}-\x{10FFFF}]*", |lex| lex.slice().to_owned())]
    Identifier(String),

    #[token("\"", quoted)]
    #[token("'", quoted)]
    #[token("@\"", verbatim)]
    Str(String),
}

impl RawToken {
    /// Converts to the scanner-facing token, or `None` for trivia.
    pub(crate) fn cook(self) -> Option<Token> {
        let token = match self {
            RawToken::Newline | RawToken::Comment => return None,
            RawToken::BracketOpen => Token::BracketOpen,
            RawToken::BracketClose => Token::BracketClose,
            RawToken::CurlyOpen => Token::CurlyOpen,
            RawToken::CurlyClose => Token::CurlyClose,
            RawToken::ParenOpen => Token::ParenOpen,
            RawToken::ParenClose => Token::ParenClose,
            RawToken::Period => Token::Period,
            RawToken::Question => Token::Question,
            RawToken::Colon => Token::Colon,
            RawToken::Comma => Token::Comma,
            RawToken::Less => Token::Less,
            RawToken::Greater => Token::Greater,
            RawToken::Symbol(c) => Token::Symbol(c),
            RawToken::Number(n) => Token::Number(n),
            RawToken::Identifier(name) => Token::Identifier(name),
            RawToken::Str(value) => Token::Str(value),
        };
        Some(token)
    }
}

fn newline(lex: &mut Lexer<RawToken>) -> Skip {
    lex.extras += 1;
    Skip
}

fn first_char(lex: &mut Lexer<RawToken>) -> Option<char> {
    lex.slice().chars().next()
}

fn block_comment(lex: &mut Lexer<RawToken>) -> Result<(), LexFault> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.extras += rest[..end].matches('\n').count();
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.extras += rest.matches('\n').count();
            lex.bump(rest.len());
            Err(LexFault::UnterminatedComment)
        }
    }
}

/// Extends the single matched digit to the longest numeric lexeme:
/// `digits [. digits] [(e|E) [+|-] digits]`.
fn number(lex: &mut Lexer<RawToken>) -> Option<f64> {
    let rest = lex.remainder().as_bytes();
    let digits_from = |start: usize| {
        rest[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut len = digits_from(0);
    if rest.get(len) == Some(&b'.') {
        len += 1 + digits_from(len + 1);
    }
    if matches!(rest.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(rest.get(len + 1), Some(b'+' | b'-')));
        let exponent = digits_from(len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
        }
    }

    lex.bump(len);
    lex.slice().parse().ok()
}

fn quoted(lex: &mut Lexer<RawToken>) -> Result<String, LexFault> {
    let start = lex.span().start;
    let verbatim = lex.source()[..start].ends_with('@');
    let delimiter = if lex.slice() == "'" { '\'' } else { '"' };
    string_body(lex, delimiter, verbatim)
}

fn verbatim(lex: &mut Lexer<RawToken>) -> Result<String, LexFault> {
    string_body(lex, '"', true)
}

fn string_body(
    lex: &mut Lexer<RawToken>,
    delimiter: char,
    verbatim: bool,
) -> Result<String, LexFault> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == delimiter {
            // `""` inside a verbatim literal is one escaped delimiter
            if verbatim && chars.peek().is_some_and(|&(_, next)| next == delimiter) {
                chars.next();
                value.push(delimiter);
                continue;
            }
            lex.bump(i + c.len_utf8());
            return Ok(value);
        }

        if c == '\\' && !verbatim {
            let Some((_, escaped)) = chars.next() else {
                break;
            };
            if escaped == '\n' {
                lex.extras += 1;
            }
            value.push(match escaped {
                'b' => '\u{8}',
                't' => '\t',
                'n' => '\n',
                'f' => '\u{c}',
                'r' => '\r',
                other => other,
            });
            continue;
        }

        if c == '\n' {
            lex.extras += 1;
        }
        value.push(c);
    }

    lex.bump(rest.len());
    Err(LexFault::UnterminatedString)
}
