//! Name resolution: turns a parsed document into an [`Interface`].
//!
//! Runs in three passes over the items: `use` imports, type declarations,
//! then definitions and functions. Every problem is reported and resolution
//! continues, so the caller sees all of them at once.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Span};
use crate::parser::ast;

use super::model::{
    Case, Direction, Field, Function, FunctionKind, Interface, Type, TypeDef, TypeDefKind,
};

/// A name visible to type references.
#[derive(Debug, Clone, Copy)]
struct Binding {
    span: Span,
    is_resource: bool,
}

pub(super) struct Resolver<'a> {
    deps: &'a [Interface],
    diagnostics: Diagnostics,
    scope: IndexMap<String, Binding>,
    types: IndexMap<String, TypeDef>,
    /// Where each imported definition came from, for duplicate reports.
    imported_at: IndexMap<String, Span>,
}

impl<'a> Resolver<'a> {
    pub(super) fn new(deps: &'a [Interface]) -> Self {
        Self {
            deps,
            diagnostics: Diagnostics::new(),
            scope: IndexMap::new(),
            types: IndexMap::new(),
            imported_at: IndexMap::new(),
        }
    }

    pub(super) fn resolve(
        mut self,
        name: String,
        direction: Direction,
        document: &ast::Document,
    ) -> (Interface, Diagnostics) {
        for item in &document.items {
            if let ast::Item::Use(import) = item {
                self.resolve_use(import);
            }
        }

        let mut locals = Vec::new();
        for item in &document.items {
            if let ast::Item::TypeDef(def) = item {
                if self.declare(&def.name, matches!(def.kind, ast::TypeDefKind::Resource(_))) {
                    locals.push(def);
                }
            }
        }

        for def in &locals {
            let resolved = self.define(def);
            self.types.insert(resolved.name.clone(), resolved);
        }

        let mut functions = Vec::new();
        let mut function_names: IndexMap<&str, Span> = IndexMap::new();
        for item in &document.items {
            if let ast::Item::Function(func) = item {
                if let Some(first) = function_names.get(func.name.name.as_str()) {
                    self.diagnostics
                        .report(DiagnosticKind::DuplicateFunction, func.name.span)
                        .message(&func.name.name)
                        .related_to("first defined here", *first)
                        .emit();
                    continue;
                }
                function_names.insert(&func.name.name, func.name.span);
                functions.push(self.function(func, FunctionKind::Freestanding));
            }
        }

        for def in &locals {
            if self.is_recursive(&def.name.name) {
                self.diagnostics
                    .report(DiagnosticKind::RecursiveType, def.name.span)
                    .message(&def.name.name)
                    .emit();
            }
        }

        let interface = Interface {
            name,
            direction,
            types: self.types,
            functions,
        };
        (interface, self.diagnostics)
    }

    fn resolve_use(&mut self, import: &ast::Use) {
        let deps = self.deps;
        let Some(dep) = deps.iter().find(|d| d.name == import.from.name) else {
            self.diagnostics
                .report(DiagnosticKind::UnknownInterface, import.from.span)
                .message(&import.from.name)
                .emit();
            // Bind the names anyway so their uses don't cascade into undefined-type errors.
            for name in &import.names {
                self.declare(name.local(), false);
            }
            return;
        };

        for name in &import.names {
            let local = name.local();
            let Some(def) = dep.get_type(&name.name.name) else {
                self.diagnostics
                    .report(DiagnosticKind::UndefinedImport, name.name.span)
                    .message(format!("`{}` in `{}`", name.name.name, dep.name))
                    .emit();
                self.declare(local, false);
                continue;
            };
            let is_resource = matches!(def.kind, TypeDefKind::Resource(_));
            let mut renamed = def.clone();
            renamed.name = local.name.clone();

            // Already pulled in as a dependency of an earlier import.
            if !self.scope.contains_key(&local.name) && self.types.get(&local.name) == Some(&renamed)
            {
                self.scope.insert(
                    local.name.clone(),
                    Binding {
                        span: local.span,
                        is_resource,
                    },
                );
                continue;
            }

            if !self.declare(local, is_resource) {
                continue;
            }
            self.import_dependencies(dep, def, import.span);
            self.imported_at.insert(renamed.name.clone(), import.span);
            self.types.insert(renamed.name.clone(), renamed);
        }
    }

    /// Copy every definition `def` refers to, under its original name.
    fn import_dependencies(&mut self, dep: &Interface, def: &TypeDef, span: Span) {
        let mut referenced = Vec::new();
        for ty in def.kind.member_types() {
            referenced.extend(ty.references());
        }
        if let TypeDefKind::Resource(methods) = &def.kind {
            for method in methods {
                for param in &method.params {
                    referenced.extend(param.ty.references());
                }
                if let Some(result) = &method.result {
                    referenced.extend(result.references());
                }
            }
        }

        for name in referenced {
            if name == def.name || self.types.contains_key(name) {
                continue;
            }
            let Some(inner) = dep.get_type(name) else {
                continue;
            };
            self.import_dependencies(dep, inner, span);
            self.imported_at.insert(name.to_string(), span);
            self.types.insert(name.to_string(), inner.clone());
        }
    }

    /// Bring a name into scope. Returns false (after reporting) on a duplicate.
    fn declare(&mut self, ident: &ast::Ident, is_resource: bool) -> bool {
        let existing = self
            .scope
            .get(&ident.name)
            .map(|b| b.span)
            .or_else(|| self.imported_at.get(&ident.name).copied());
        if let Some(first) = existing {
            self.diagnostics
                .report(DiagnosticKind::DuplicateDefinition, ident.span)
                .message(&ident.name)
                .related_to("first defined here", first)
                .emit();
            return false;
        }
        self.scope.insert(
            ident.name.clone(),
            Binding {
                span: ident.span,
                is_resource,
            },
        );
        true
    }

    fn define(&mut self, def: &ast::TypeDef) -> TypeDef {
        let kind = match &def.kind {
            ast::TypeDefKind::Record(fields) => TypeDefKind::Record(self.fields(
                fields,
                DiagnosticKind::DuplicateMember,
                "field",
            )),
            ast::TypeDefKind::Variant(cases) => TypeDefKind::Variant(self.cases(cases)),
            ast::TypeDefKind::Enum(cases) => TypeDefKind::Enum(self.cases(cases)),
            ast::TypeDefKind::Flags(cases) => TypeDefKind::Flags(self.cases(cases)),
            ast::TypeDefKind::Union(types) => {
                TypeDefKind::Union(types.iter().map(|t| self.lower(t)).collect())
            }
            ast::TypeDefKind::Alias(ty) => TypeDefKind::Alias(self.lower(ty)),
            ast::TypeDefKind::Resource(methods) => {
                let resource = def.name.name.clone();
                let mut seen: IndexMap<&str, Span> = IndexMap::new();
                let mut resolved = Vec::new();
                for method in methods {
                    if let Some(first) = seen.get(method.name.name.as_str()) {
                        self.diagnostics
                            .report(DiagnosticKind::DuplicateFunction, method.name.span)
                            .message(format!("{resource}::{}", method.name.name))
                            .related_to("first defined here", *first)
                            .emit();
                        continue;
                    }
                    seen.insert(&method.name.name, method.name.span);
                    let kind = if method.is_static {
                        FunctionKind::Static {
                            resource: resource.clone(),
                        }
                    } else {
                        FunctionKind::Method {
                            resource: resource.clone(),
                        }
                    };
                    resolved.push(self.function(method, kind));
                }
                TypeDefKind::Resource(resolved)
            }
        };

        TypeDef {
            name: def.name.name.clone(),
            docs: def.docs.contents(),
            kind,
        }
    }

    fn function(&mut self, func: &ast::Function, kind: FunctionKind) -> Function {
        Function {
            name: func.name.name.clone(),
            docs: func.docs.contents(),
            kind,
            params: self.fields(&func.params, DiagnosticKind::DuplicateParam, "parameter"),
            result: func.result.as_ref().map(|ty| self.lower(ty)),
        }
    }

    fn fields(&mut self, fields: &[ast::Field], duplicate: DiagnosticKind, what: &str) -> Vec<Field> {
        let mut seen: IndexMap<&str, Span> = IndexMap::new();
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            if let Some(first) = seen.get(field.name.name.as_str()) {
                let detail = if duplicate == DiagnosticKind::DuplicateParam {
                    field.name.name.clone()
                } else {
                    format!("{what} `{}`", field.name.name)
                };
                self.diagnostics
                    .report(duplicate, field.name.span)
                    .message(detail)
                    .related_to("first defined here", *first)
                    .emit();
                continue;
            }
            seen.insert(&field.name.name, field.name.span);
            out.push(Field {
                name: field.name.name.clone(),
                docs: field.docs.contents(),
                ty: self.lower(&field.ty),
            });
        }
        out
    }

    fn cases(&mut self, cases: &[ast::Case]) -> Vec<Case> {
        let mut seen: IndexMap<&str, Span> = IndexMap::new();
        let mut out = Vec::with_capacity(cases.len());
        for case in cases {
            if let Some(first) = seen.get(case.name.name.as_str()) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateMember, case.name.span)
                    .message(format!("case `{}`", case.name.name))
                    .related_to("first defined here", *first)
                    .emit();
                continue;
            }
            seen.insert(&case.name.name, case.name.span);
            out.push(Case {
                name: case.name.name.clone(),
                docs: case.docs.contents(),
                ty: case.ty.as_ref().map(|ty| self.lower(ty)),
            });
        }
        out
    }

    fn lower(&mut self, ty: &ast::Type) -> Type {
        match &ty.kind {
            ast::TypeKind::Bool => Type::Bool,
            ast::TypeKind::U8 => Type::U8,
            ast::TypeKind::U16 => Type::U16,
            ast::TypeKind::U32 => Type::U32,
            ast::TypeKind::U64 => Type::U64,
            ast::TypeKind::S8 => Type::S8,
            ast::TypeKind::S16 => Type::S16,
            ast::TypeKind::S32 => Type::S32,
            ast::TypeKind::S64 => Type::S64,
            ast::TypeKind::Float32 => Type::Float32,
            ast::TypeKind::Float64 => Type::Float64,
            ast::TypeKind::Char => Type::Char,
            ast::TypeKind::String => Type::String,
            ast::TypeKind::Unit => {
                self.diagnostics
                    .report(DiagnosticKind::UnitOutsideExpected, ty.span)
                    .emit();
                Type::Tuple(Vec::new())
            }
            ast::TypeKind::List(inner) => Type::List(Box::new(self.lower(inner))),
            ast::TypeKind::Option(inner) => Type::Option(Box::new(self.lower(inner))),
            ast::TypeKind::Expected(ok, err) => {
                Type::Expected(self.expected_side(ok), self.expected_side(err))
            }
            ast::TypeKind::Tuple(elements) => {
                Type::Tuple(elements.iter().map(|t| self.lower(t)).collect())
            }
            ast::TypeKind::Named(ident) => match self.scope.get(&ident.name) {
                Some(binding) if binding.is_resource => Type::Handle(ident.name.clone()),
                Some(_) => Type::Named(ident.name.clone()),
                None => {
                    self.diagnostics
                        .report(DiagnosticKind::UndefinedType, ident.span)
                        .message(&ident.name)
                        .emit();
                    Type::Named(ident.name.clone())
                }
            },
        }
    }

    fn expected_side(&mut self, ty: &ast::Type) -> Option<Box<Type>> {
        match ty.kind {
            ast::TypeKind::Unit => None,
            _ => Some(Box::new(self.lower(ty))),
        }
    }

    /// Whether `name` can reach itself through the shapes of other definitions.
    fn is_recursive(&self, name: &str) -> bool {
        let mut visited = HashSet::new();
        self.reaches(name, name, &mut visited)
    }

    fn reaches<'t>(&'t self, from: &str, target: &str, visited: &mut HashSet<&'t str>) -> bool {
        let Some(def) = self.types.get(from) else {
            return false;
        };
        for ty in def.kind.member_types() {
            for reference in ty.references() {
                if reference == target {
                    return true;
                }
                if visited.insert(reference) && self.reaches(reference, target, visited) {
                    return true;
                }
            }
        }
        false
    }
}
