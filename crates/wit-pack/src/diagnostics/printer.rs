//! Human-readable output for a [`Diagnostics`] collection.
//!
//! Two shapes: [`render`](DiagnosticsPrinter::render) draws annotated source
//! snippets, [`summary`](DiagnosticsPrinter::summary) prints one compiler-style
//! location line per diagnostic. Both fall back to the plain `Display` form
//! when no source text was supplied.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::{DiagnosticMessage, Diagnostics, LineIndex, Span};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Source text the spans point into.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Label shown next to each location, usually the file path.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Annotated snippets separated by blank lines.
    pub fn render(&self) -> String {
        let Some(source) = self.source else {
            return self.plain();
        };
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        self.diagnostics
            .iter()
            .map(|diag| self.snippet_report(&renderer, source, diag))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `path:line:col: message` per diagnostic, with notes and hints indented below.
    pub fn summary(&self) -> String {
        let Some(source) = self.source else {
            return self.plain();
        };
        let index = LineIndex::new(source);
        let path = self.path.unwrap_or("<input>");
        let at = |span: Span| {
            let pos = index.line_col(span.start);
            format!("{path}:{}:{}", pos.line, pos.col)
        };

        let mut lines = Vec::new();
        for diag in self.diagnostics.iter() {
            lines.push(format!("{}: {}", at(diag.span), diag.message));
            for related in &diag.related {
                lines.push(format!("  note: {} ({})", related.message, at(related.span)));
            }
            for hint in &diag.hints {
                lines.push(format!("  help: {hint}"));
            }
        }
        lines.join("\n")
    }

    fn snippet_report(&self, renderer: &Renderer, source: &str, diag: &DiagnosticMessage) -> String {
        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(clamp(diag.span, source.len()))
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(clamp(related.span, source.len()))
                    .label(&related.message),
            );
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&diag.message).element(snippet)];
        let mut out = renderer.render(&report).to_string();
        for hint in &diag.hints {
            out.push_str(&format!("\n  = help: {hint}"));
        }
        out.push('\n');
        out
    }

    fn plain(&self) -> String {
        self.diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Keep spans inside the source and give empty ones a one-byte caret.
fn clamp(span: Span, len: usize) -> Range<usize> {
    let start = (span.start as usize).min(len);
    let end = (span.end as usize).min(len);
    if start < end {
        start..end
    } else {
        start..(start + 1).min(len)
    }
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
