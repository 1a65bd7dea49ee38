//! Lexer for the interface-description language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. This keeps the token stream manageable for malformed input.

use std::ops::Range;

use logos::Logos;

use crate::diagnostics::Span;

/// All token kinds. Keywords are defined before `Id` so they take precedence.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("->")]
    Arrow,

    /// `_` placeholder for the unit payload of `expected`
    #[token("_")]
    Underscore,

    #[token("use")]
    KwUse,

    #[token("from")]
    KwFrom,

    #[token("as")]
    KwAs,

    #[token("record")]
    KwRecord,

    #[token("variant")]
    KwVariant,

    #[token("enum")]
    KwEnum,

    #[token("flags")]
    KwFlags,

    #[token("union")]
    KwUnion,

    #[token("type")]
    KwType,

    #[token("resource")]
    KwResource,

    #[token("static")]
    KwStatic,

    #[token("func")]
    KwFunc,

    /// Kebab-case identifier. A leading `%` escapes keywords (`%type`).
    #[regex(r"%?[a-zA-Z][a-zA-Z0-9]*(-[a-zA-Z0-9]+)*")]
    Id,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"///[^\n]*", allow_greedy = true)]
    DocComment,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
}

impl SyntaxKind {
    /// Trivia is skipped by the parser. Doc comments are not trivia: they attach to items.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::KwUse
                | Self::KwFrom
                | Self::KwAs
                | Self::KwRecord
                | Self::KwVariant
                | Self::KwEnum
                | Self::KwFlags
                | Self::KwUnion
                | Self::KwType
                | Self::KwResource
                | Self::KwStatic
                | Self::KwFunc
        )
    }

    /// Human-readable form used in "expected X, found Y" messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::BraceOpen => "`{`",
            Self::BraceClose => "`}`",
            Self::AngleOpen => "`<`",
            Self::AngleClose => "`>`",
            Self::Comma => "`,`",
            Self::Colon => "`:`",
            Self::Equals => "`=`",
            Self::Arrow => "`->`",
            Self::Underscore => "`_`",
            Self::KwUse => "`use`",
            Self::KwFrom => "`from`",
            Self::KwAs => "`as`",
            Self::KwRecord => "`record`",
            Self::KwVariant => "`variant`",
            Self::KwEnum => "`enum`",
            Self::KwFlags => "`flags`",
            Self::KwUnion => "`union`",
            Self::KwType => "`type`",
            Self::KwResource => "`resource`",
            Self::KwStatic => "`static`",
            Self::KwFunc => "`func`",
            Self::Id => "identifier",
            Self::Whitespace => "whitespace",
            Self::DocComment => "doc comment",
            Self::LineComment | Self::BlockComment => "comment",
            Self::Garbage => "unrecognized input",
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        Self { kind, span }
    }
}

fn to_span(range: Range<usize>) -> Span {
    Span::from(range)
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Consecutive lexer errors are coalesced into single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(SyntaxKind::Garbage, to_span(start..end)));
                }
                tokens.push(Token::new(kind, to_span(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        to_span(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.range()]
}
