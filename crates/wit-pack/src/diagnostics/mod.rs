//! Diagnostics collected while parsing and resolving interface source.
//!
//! Parser and resolver never bail on the first problem: they report into a
//! [`Diagnostics`] collection and keep going, so one run shows every error.
//! [`Diagnostics::into_error`] turns a non-empty collection into the
//! structured [`Error`](crate::Error) handed to callers.

mod message;
mod printer;
mod span;


pub use message::{DiagnosticKind, DiagnosticMessage};
pub use printer::DiagnosticsPrinter;
pub use span::{LineCol, LineIndex, Span};

use message::RelatedInfo;

use crate::{Error, ErrorKind};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.messages.iter().any(|m| m.kind.is_syntax_error())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Error kind for the whole collection: syntax problems win over resolution ones.
    pub fn error_kind(&self) -> ErrorKind {
        if self.has_syntax_errors() {
            ErrorKind::ParseError
        } else {
            ErrorKind::ResolutionError
        }
    }

    /// Convert collected diagnostics into a structured error.
    ///
    /// Returns `None` when nothing was reported.
    pub fn into_error(self, label: &str, source: &str) -> Option<Error> {
        if self.is_empty() {
            return None;
        }
        let kind = self.error_kind();
        let headline = match kind {
            ErrorKind::ParseError => format!("failed to parse \"{label}\""),
            _ => format!("failed to resolve \"{label}\""),
        };
        let printer = self.printer().source(source).path(label);
        let verbose = format!("{headline}\n{}\n\n{}", printer.summary(), printer.render());
        Some(Error::new(kind, verbose.trim_end()))
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, span: Span) -> Self {
        self.message.related.push(RelatedInfo::new(span, msg));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
