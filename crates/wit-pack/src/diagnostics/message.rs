use super::Span;

/// Diagnostic kinds, syntax first, then resolution.
///
/// The split matters: the first syntax diagnostic turns the whole parse into
/// a `ParseError`, and resolution only runs on syntactically valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Delimiters left open at end of input or item
    UnclosedBrace,
    UnclosedParen,
    UnclosedAngle,

    // User omitted something required
    ExpectedItem,
    ExpectedIdentifier,
    ExpectedType,
    ExpectedFunc,

    // User wrote something that doesn't belong
    UnexpectedToken,
    InvalidIdentifier,
    NestingTooDeep,

    // Valid syntax, invalid references or definitions
    UndefinedType,
    UnknownInterface,
    UndefinedImport,
    DuplicateDefinition,
    DuplicateFunction,
    DuplicateMember,
    DuplicateParam,
    RecursiveType,
    UnitOutsideExpected,
    ReservedTypeName,
}

impl DiagnosticKind {
    pub fn is_syntax_error(&self) -> bool {
        *self <= Self::NestingTooDeep
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidIdentifier => Some("identifiers are kebab-case, e.g. `package-name`"),
            Self::ExpectedFunc => Some("functions are declared as `name: func(arg: type) -> type`"),
            Self::RecursiveType => Some("interface types cannot refer to themselves"),
            Self::UnitOutsideExpected => Some("`_` is only valid inside `expected<..., ...>`"),
            Self::ReservedTypeName => Some("prefix the name with `%` or pick another name"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBrace => "missing closing `}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedAngle => "missing closing `>`",

            Self::ExpectedItem => "expected a type definition, function or `use`",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedType => "expected a type",
            Self::ExpectedFunc => "expected `func`",

            Self::UnexpectedToken => "unexpected token",
            Self::InvalidIdentifier => "invalid identifier",
            Self::NestingTooDeep => "type nested too deeply",

            Self::UndefinedType => "undefined type",
            Self::UnknownInterface => "unknown interface",
            Self::UndefinedImport => "name not found in interface",
            Self::DuplicateDefinition => "duplicate definition",
            Self::DuplicateFunction => "duplicate function",
            Self::DuplicateMember => "duplicate member",
            Self::DuplicateParam => "duplicate parameter",
            Self::RecursiveType => "recursive type",
            Self::UnitOutsideExpected => "`_` is not a type here",
            Self::ReservedTypeName => "reserved type name",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UndefinedType => "`{}` is not defined".to_string(),
            Self::UnknownInterface => "interface `{}` was not provided".to_string(),
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::DuplicateFunction => "function `{}` is already defined".to_string(),
            Self::DuplicateParam => "parameter `{}` is already declared".to_string(),
            Self::RecursiveType => "type `{}` refers to itself".to_string(),
            Self::ReservedTypeName => "`{}` is a builtin type".to_string(),
            Self::InvalidIdentifier => "`{}` is not a valid identifier".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        let mut hints = Vec::new();
        if let Some(hint) = kind.default_hint() {
            hints.push(hint.to_string());
        }
        Self {
            kind,
            span,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
