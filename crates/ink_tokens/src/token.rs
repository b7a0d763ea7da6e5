//! A lexical token from an ink source file

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// A lexical token from a source file
#[derive(Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<Literal>,
    line: usize,
}

impl Token {
    /// Creates a new token
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: impl Into<Option<Literal>>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: literal.into(),
            line,
        }
    }

    /// Creates the synthetic token that terminates every token stream
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", None, line)
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text of this token
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The literal value, only present on string and number tokens
    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    /// The line this token starts on, starting at 1
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind, self.lexeme, self.line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "{}", self.kind),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// The literal value carried by string and number tokens
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The raw text between the quotes, escapes left untouched
    String(String),
    Number(f64),
}

/// The kind for a token.
///
/// Every kind displays as the source text it is scanned from, which is also what
/// [`FromStr`] accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr,
)]
pub enum TokenKind {
    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,
    #[strum(serialize = "{")]
    LBrace,
    #[strum(serialize = "}")]
    RBrace,
    #[strum(serialize = "[")]
    LBracket,
    #[strum(serialize = "]")]
    RBracket,
    #[strum(serialize = ":")]
    Colon,
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = ".")]
    Dot,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = ";")]
    Semicolon,
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "@")]
    At,

    #[strum(serialize = "!")]
    Bang,
    #[strum(serialize = "!=")]
    BangEqual,
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = "==")]
    EqualEqual,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEqual,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEqual,
    #[strum(serialize = "->")]
    Arrow,

    #[strum(serialize = "identifier")]
    Identifier,
    #[strum(serialize = "string literal")]
    String,
    #[strum(serialize = "number literal")]
    Number,

    #[strum(serialize = "var")]
    Var,
    #[strum(serialize = "record")]
    Record,
    #[strum(serialize = "enum")]
    Enum,
    #[strum(serialize = "function")]
    Function,
    #[strum(serialize = "expose")]
    Expose,
    #[strum(serialize = "async")]
    Async,
    #[strum(serialize = "await")]
    Await,
    #[strum(serialize = "if")]
    If,
    #[strum(serialize = "else")]
    Else,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "for")]
    For,
    #[strum(serialize = "while")]
    While,
    #[strum(serialize = "return")]
    Return,
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "from")]
    From,
    #[strum(serialize = "to")]
    To,
    #[strum(serialize = "true")]
    True,
    #[strum(serialize = "false")]
    False,
    #[strum(serialize = "null")]
    Null,

    /// will only appear at the end of a token stream
    #[strum(serialize = "end of file")]
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lexeme: &'static str = self.into();
        f.write_str(lexeme)
    }
}

impl TokenKind {
    /// Checks if this kind is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Record
                | TokenKind::Enum
                | TokenKind::Function
                | TokenKind::Expose
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::In
                | TokenKind::From
                | TokenKind::To
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Classifies a scanned word as either a keyword or an identifier
    pub fn word(word: &str) -> TokenKind {
        TokenKind::from_str(word)
            .ok()
            .filter(TokenKind::is_keyword)
            .unwrap_or(TokenKind::Identifier)
    }
}
