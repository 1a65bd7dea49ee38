//! Parser state machine and low-level operations.

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};

use super::ast::{Docs, Ident};
use super::lexer::{SyntaxKind, Token, token_text};

/// Types nested deeper than this are rejected instead of recursing further.
pub const MAX_TYPE_DEPTH: u32 = 64;

/// Recursive-descent parser over the non-trivia tokens of one document.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    last_diagnostic_pos: Option<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
        }
    }

    pub(super) fn finish(self) -> Diagnostics {
        self.diagnostics
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + lookahead).map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_span(), |t| t.span)
    }

    pub(super) fn eof_span(&self) -> Span {
        Span::empty(self.source.len() as u32)
    }

    /// Span of the most recently consumed token.
    pub(super) fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::empty(0), |t| t.span)
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report what was found instead.
    pub(super) fn expect(&mut self, kind: SyntaxKind) -> Option<Token> {
        if self.at(kind) {
            return Some(self.bump());
        }
        let detail = format!("expected {}, found {}", kind.describe(), self.found());
        self.error_at_current(DiagnosticKind::UnexpectedToken, detail);
        None
    }

    /// Description of the current token for "found ..." messages.
    pub(super) fn found(&self) -> String {
        match self.current() {
            None => "end of input".to_string(),
            Some(SyntaxKind::Id) => format!("`{}`", self.current_text()),
            Some(kind) => kind.describe().to_string(),
        }
    }

    pub(super) fn error_at_current(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        let span = self.current_span();
        self.error_at(kind, span, detail);
    }

    /// Report a diagnostic, dropping it when another one already points at the same offset.
    pub(super) fn error_at(&mut self, kind: DiagnosticKind, span: Span, detail: impl Into<String>) {
        if self.last_diagnostic_pos == Some(span.start) {
            return;
        }
        self.last_diagnostic_pos = Some(span.start);
        self.diagnostics.report(kind, span).message(detail).emit();
    }

    /// Report a delimiter left open, pointing back at where it was opened.
    pub(super) fn unclosed(&mut self, kind: DiagnosticKind, open: Span) {
        let span = self.current_span();
        if self.last_diagnostic_pos == Some(span.start) {
            return;
        }
        self.last_diagnostic_pos = Some(span.start);
        self.diagnostics
            .report(kind, span)
            .related_to("opened here", open)
            .emit();
    }

    /// Collect consecutive `///` lines.
    pub(super) fn parse_docs(&mut self) -> Docs {
        let mut docs = Docs::default();
        while self.at(SyntaxKind::DocComment) {
            let token = self.bump();
            let text = token_text(self.source, &token);
            let line = text.trim_start_matches('/');
            let line = line.strip_prefix(' ').unwrap_or(line);
            docs.lines.push(line.trim_end().to_string());
        }
        docs
    }

    /// Consume an identifier, stripping a `%` escape.
    pub(super) fn expect_ident(&mut self, what: &str) -> Option<Ident> {
        match self.current() {
            Some(SyntaxKind::Id) => {
                let token = self.bump();
                let raw = token_text(self.source, &token);
                let name = raw.strip_prefix('%').unwrap_or(raw);
                if !is_valid_identifier(name) {
                    self.error_at(DiagnosticKind::InvalidIdentifier, token.span, name);
                }
                Some(Ident {
                    name: name.to_string(),
                    span: token.span,
                })
            }
            Some(kind) if kind.is_keyword() => {
                let text = self.current_text();
                let detail = format!("{what}, found keyword `{text}` (escape it as `%{text}`)");
                self.error_at_current(DiagnosticKind::ExpectedIdentifier, detail);
                None
            }
            _ => {
                let detail = format!("{what}, found {}", self.found());
                self.error_at_current(DiagnosticKind::ExpectedIdentifier, detail);
                None
            }
        }
    }

    /// Skip to the next token that can start an item, outside any braces.
    ///
    /// A stray `}` is consumed without going below depth zero: it most
    /// likely closes the item whose body failed to parse.
    pub(super) fn recover_to_item(&mut self) {
        let mut depth = 0u32;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::BraceOpen => depth += 1,
                SyntaxKind::BraceClose => depth = depth.saturating_sub(1),
                _ if depth == 0 && self.at_item_start() => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip to the `,` or closing delimiter that ends a list element.
    pub(super) fn recover_to_list_end(&mut self, close: SyntaxKind) {
        let mut nesting = 0u32;
        while let Some(kind) = self.current() {
            match kind {
                SyntaxKind::ParenOpen | SyntaxKind::AngleOpen | SyntaxKind::BraceOpen => {
                    nesting += 1
                }
                SyntaxKind::ParenClose | SyntaxKind::AngleClose | SyntaxKind::BraceClose
                    if nesting > 0 =>
                {
                    nesting -= 1
                }
                _ if nesting == 0 && (kind == close || kind == SyntaxKind::Comma) => return,
                SyntaxKind::BraceClose => return,
                _ => {}
            }
            self.bump();
        }
    }

    pub(super) fn at_item_start(&self) -> bool {
        match self.current() {
            Some(
                SyntaxKind::KwUse
                | SyntaxKind::KwRecord
                | SyntaxKind::KwVariant
                | SyntaxKind::KwEnum
                | SyntaxKind::KwFlags
                | SyntaxKind::KwUnion
                | SyntaxKind::KwType
                | SyntaxKind::KwResource
                | SyntaxKind::DocComment,
            ) => true,
            Some(SyntaxKind::Id) => self.nth(1) == Some(SyntaxKind::Colon),
            _ => false,
        }
    }
}

/// Kebab-case: words of lowercase letters and digits (or all-uppercase
/// acronyms) joined by single hyphens, starting with a letter.
pub fn is_valid_identifier(name: &str) -> bool {
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return false;
    }
    name.split('-').all(|word| {
        !word.is_empty()
            && word.chars().all(|c| c.is_ascii_alphanumeric())
            && (word
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                || word
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()))
    })
}
