//! Grammar productions.
//!
//! Each production returns `None` after reporting a diagnostic; callers
//! decide how far to skip before trying again.

use crate::diagnostics::DiagnosticKind;

use super::ast::{
    Case, Docs, Document, Field, Function, Ident, Item, Type, TypeDef, TypeDefKind, TypeKind, Use,
    UseName, is_builtin_type_name,
};
use super::core::{MAX_TYPE_DEPTH, Parser};
use super::lexer::SyntaxKind;

impl Parser<'_> {
    pub fn parse_document(&mut self) -> Document {
        let mut items = Vec::new();

        while !self.eof() {
            let start = self.pos;
            let docs = self.parse_docs();
            if self.eof() {
                break;
            }

            match self.parse_item(docs) {
                Some(item) => items.push(item),
                None => {
                    if self.pos == start {
                        self.bump();
                    }
                    self.recover_to_item();
                }
            }
        }

        Document { items }
    }

    fn parse_item(&mut self, docs: Docs) -> Option<Item> {
        let kind = self.current()?;
        match kind {
            SyntaxKind::KwUse => self.parse_use().map(Item::Use),
            SyntaxKind::KwRecord
            | SyntaxKind::KwVariant
            | SyntaxKind::KwEnum
            | SyntaxKind::KwFlags
            | SyntaxKind::KwUnion
            | SyntaxKind::KwType
            | SyntaxKind::KwResource => self.parse_typedef(docs).map(Item::TypeDef),
            SyntaxKind::Id => self.parse_function(docs, false).map(Item::Function),
            _ => {
                let detail = format!("found {}", self.found());
                self.error_at_current(DiagnosticKind::ExpectedItem, detail);
                None
            }
        }
    }

    fn parse_use(&mut self) -> Option<Use> {
        let start = self.bump().span;
        let names = self.delimited(
            SyntaxKind::BraceOpen,
            SyntaxKind::BraceClose,
            DiagnosticKind::UnclosedBrace,
            |p| {
                let name = p.expect_ident("expected a name to import")?;
                let alias = if p.eat(SyntaxKind::KwAs) {
                    Some(p.expect_ident("expected a local name after `as`")?)
                } else {
                    None
                };
                Some(UseName { name, alias })
            },
        )?;
        self.expect(SyntaxKind::KwFrom)?;
        let from = self.expect_ident("expected an interface name")?;
        let span = start.cover(from.span);
        Some(Use { names, from, span })
    }

    fn parse_typedef(&mut self, docs: Docs) -> Option<TypeDef> {
        let keyword = self.bump().kind;
        let name = self.expect_ident("expected a type name")?;
        self.check_reserved(&name);

        let kind = match keyword {
            SyntaxKind::KwRecord => TypeDefKind::Record(self.braced(|p| p.parse_field())?),
            SyntaxKind::KwVariant => TypeDefKind::Variant(self.braced(|p| p.parse_case(true))?),
            SyntaxKind::KwEnum => TypeDefKind::Enum(self.braced(|p| p.parse_case(false))?),
            SyntaxKind::KwFlags => TypeDefKind::Flags(self.braced(|p| p.parse_case(false))?),
            SyntaxKind::KwUnion => TypeDefKind::Union(self.braced(|p| p.parse_type())?),
            SyntaxKind::KwType => {
                self.expect(SyntaxKind::Equals)?;
                TypeDefKind::Alias(self.parse_type()?)
            }
            SyntaxKind::KwResource => TypeDefKind::Resource(self.parse_resource_body()?),
            _ => unreachable!("parse_item only dispatches type definition keywords"),
        };

        Some(TypeDef { docs, name, kind })
    }

    /// `resource name` alone declares a resource without methods.
    fn parse_resource_body(&mut self) -> Option<Vec<Function>> {
        if !self.at(SyntaxKind::BraceOpen) {
            return Some(Vec::new());
        }
        let open = self.bump().span;
        let mut methods = Vec::new();

        loop {
            let docs = self.parse_docs();
            match self.current() {
                Some(SyntaxKind::BraceClose) => {
                    self.bump();
                    return Some(methods);
                }
                Some(SyntaxKind::Comma) => {
                    self.bump();
                }
                None => {
                    self.unclosed(DiagnosticKind::UnclosedBrace, open);
                    return None;
                }
                Some(_) => {
                    let is_static = self.eat(SyntaxKind::KwStatic);
                    match self.parse_function(docs, is_static) {
                        Some(method) => methods.push(method),
                        None => self.recover_to_list_end(SyntaxKind::BraceClose),
                    }
                }
            }
        }
    }

    fn parse_function(&mut self, docs: Docs, is_static: bool) -> Option<Function> {
        let name = self.expect_ident("expected a function name")?;
        self.expect(SyntaxKind::Colon)?;
        if !self.eat(SyntaxKind::KwFunc) {
            let detail = format!("found {}", self.found());
            self.error_at_current(DiagnosticKind::ExpectedFunc, detail);
            return None;
        }
        let params = self.delimited(
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            DiagnosticKind::UnclosedParen,
            |p| p.parse_field(),
        )?;
        let result = if self.eat(SyntaxKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Some(Function {
            docs,
            name,
            is_static,
            params,
            result,
        })
    }

    fn parse_field(&mut self) -> Option<Field> {
        let docs = self.parse_docs();
        let name = self.expect_ident("expected a field name")?;
        self.expect(SyntaxKind::Colon)?;
        let ty = self.parse_type()?;
        Some(Field { docs, name, ty })
    }

    fn parse_case(&mut self, allow_payload: bool) -> Option<Case> {
        let docs = self.parse_docs();
        let name = self.expect_ident("expected a case name")?;
        let ty = if allow_payload && self.at(SyntaxKind::ParenOpen) {
            let open = self.bump().span;
            let ty = self.parse_type()?;
            if !self.eat(SyntaxKind::ParenClose) {
                self.unclosed(DiagnosticKind::UnclosedParen, open);
                return None;
            }
            Some(ty)
        } else {
            None
        };
        Some(Case { docs, name, ty })
    }

    pub(super) fn parse_type(&mut self) -> Option<Type> {
        if self.depth >= MAX_TYPE_DEPTH {
            let detail = format!("more than {MAX_TYPE_DEPTH} levels");
            self.error_at_current(DiagnosticKind::NestingTooDeep, detail);
            return None;
        }
        self.depth += 1;
        let ty = self.parse_type_inner();
        self.depth -= 1;
        ty
    }

    fn parse_type_inner(&mut self) -> Option<Type> {
        match self.current() {
            Some(SyntaxKind::Underscore) => {
                let span = self.bump().span;
                Some(Type {
                    kind: TypeKind::Unit,
                    span,
                })
            }
            Some(SyntaxKind::Id) => {
                let text = self.current_text();
                if text.starts_with('%') {
                    let ident = self.expect_ident("expected a type")?;
                    let span = ident.span;
                    return Some(Type {
                        kind: TypeKind::Named(ident),
                        span,
                    });
                }
                if let Some(kind) = TypeKind::primitive(text) {
                    let span = self.bump().span;
                    return Some(Type { kind, span });
                }
                match text {
                    "list" | "option" | "expected" | "tuple" => self.parse_generic(),
                    _ => {
                        let ident = self.expect_ident("expected a type")?;
                        let span = ident.span;
                        Some(Type {
                            kind: TypeKind::Named(ident),
                            span,
                        })
                    }
                }
            }
            _ => {
                let detail = format!("found {}", self.found());
                self.error_at_current(DiagnosticKind::ExpectedType, detail);
                None
            }
        }
    }

    /// `list<T>`, `option<T>`, `expected<T, E>`, `tuple<T, ...>`.
    fn parse_generic(&mut self) -> Option<Type> {
        let head = self.bump();
        let source = self.source;
        let constructor = &source[head.span.range()];
        let args = self.delimited(
            SyntaxKind::AngleOpen,
            SyntaxKind::AngleClose,
            DiagnosticKind::UnclosedAngle,
            |p| p.parse_type(),
        )?;
        let span = head.span.cover(self.prev_span());

        let expected_arity = match constructor {
            "list" | "option" => Some(1),
            "expected" => Some(2),
            _ => None,
        };
        if let Some(arity) = expected_arity {
            if args.len() != arity {
                let detail = format!(
                    "`{constructor}` takes {arity} type argument{}, found {}",
                    if arity == 1 { "" } else { "s" },
                    args.len()
                );
                self.error_at(DiagnosticKind::UnexpectedToken, span, detail);
                return None;
            }
        }

        let kind = match constructor {
            "list" => {
                let [inner] = <[_; 1]>::try_from(args).ok()?;
                TypeKind::List(Box::new(inner))
            }
            "option" => {
                let [inner] = <[_; 1]>::try_from(args).ok()?;
                TypeKind::Option(Box::new(inner))
            }
            "expected" => {
                let [ok, err] = <[_; 2]>::try_from(args).ok()?;
                TypeKind::Expected(Box::new(ok), Box::new(err))
            }
            _ => TypeKind::Tuple(args),
        };
        Some(Type { kind, span })
    }

    fn braced<T>(&mut self, element: impl FnMut(&mut Self) -> Option<T>) -> Option<Vec<T>> {
        self.delimited(
            SyntaxKind::BraceOpen,
            SyntaxKind::BraceClose,
            DiagnosticKind::UnclosedBrace,
            element,
        )
    }

    /// Comma-separated list between `open` and `close`, trailing comma allowed.
    ///
    /// A broken element is skipped up to the next `,` so the rest of the
    /// list still gets checked; the list as a whole then yields `None`.
    fn delimited<T>(
        &mut self,
        open: SyntaxKind,
        close: SyntaxKind,
        unclosed: DiagnosticKind,
        mut element: impl FnMut(&mut Self) -> Option<T>,
    ) -> Option<Vec<T>> {
        let open_span = self.expect(open)?.span;
        let mut elements = Vec::new();
        let mut failed = false;

        loop {
            match self.current() {
                Some(kind) if kind == close => {
                    self.bump();
                    break;
                }
                None => {
                    self.unclosed(unclosed, open_span);
                    return None;
                }
                Some(SyntaxKind::BraceClose) => {
                    // A `}` closing an outer item while `(` or `<` is still open.
                    self.unclosed(unclosed, open_span);
                    return None;
                }
                Some(_) => {}
            }

            match element(self) {
                Some(value) => elements.push(value),
                None => {
                    failed = true;
                    self.recover_to_list_end(close);
                }
            }

            if !self.eat(SyntaxKind::Comma) && !self.at(close) {
                if self.eof() {
                    continue;
                }
                if !failed {
                    let detail = format!(
                        "expected `,` or {}, found {}",
                        close.describe(),
                        self.found()
                    );
                    self.error_at_current(DiagnosticKind::UnexpectedToken, detail);
                }
                failed = true;
                self.recover_to_list_end(close);
                if self.at(SyntaxKind::Comma) {
                    self.bump();
                } else if !self.at(close) {
                    self.unclosed(unclosed, open_span);
                    return None;
                }
            }
        }

        if failed { None } else { Some(elements) }
    }

    /// Definition names must not shadow builtin types unless escaped with `%`.
    fn check_reserved(&mut self, name: &Ident) {
        let escaped = self.source[name.span.range()].starts_with('%');
        if !escaped && is_builtin_type_name(&name.name) {
            self.error_at(DiagnosticKind::ReservedTypeName, name.span, name.name.clone());
        }
    }
}
