//! Parser for the interface-description language.
//!
//! # Architecture
//!
//! - `lexer`: logos-derived tokens with byte spans, errors coalesced into `Garbage`
//! - `core`: token cursor, diagnostics, recovery helpers
//! - `grammar`: recursive-descent productions building the [`ast`]
//!
//! # Recovery Strategy
//!
//! The parser always produces a document. Broken list elements are skipped
//! up to the next `,`; broken items are skipped up to the next token that can
//! start an item. Only one diagnostic is kept per source offset, which keeps
//! cascades out of the report.

pub mod ast;
pub mod lexer;

mod core;
mod grammar;


pub use self::core::{MAX_TYPE_DEPTH, Parser, is_valid_identifier};

use crate::diagnostics::Diagnostics;
use ast::Document;
use lexer::lex;

/// Parse result: the document is always complete, diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Main entry point.
pub fn parse(source: &str) -> ParseResult {
    let mut parser = Parser::new(source, lex(source));
    let document = parser.parse_document();
    ParseResult {
        document,
        diagnostics: parser.finish(),
    }
}
