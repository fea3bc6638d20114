//! Semantic checks over parsed files.
//!
//! Runs after parsing and before a [`Program`] is handed out: builds the
//! symbol table, resolves imports, and validates every type reference.
//! Checks never abort early; all diagnostics for a file are collected so
//! one render shows everything wrong with it.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::config::{CompilerConfig, LanguageLevel};
use crate::diagnostics::{DiagnosticKind, Diagnostics, FileDiagnostics};
use crate::parser::{Decl, ObjectType, SyntaxKind, TypeExpr};
use rowan::TextRange;

use super::loader::resolve_module;
use super::{SourceFile, Symbol, BUILTIN_TYPES};

pub(crate) fn check(
    files: &[SourceFile],
    config: &CompilerConfig,
) -> (IndexMap<String, Symbol>, Vec<FileDiagnostics>) {
    let by_path: IndexMap<&PathBuf, usize> = files
        .iter()
        .enumerate()
        .map(|(idx, f)| (&f.path, idx))
        .collect();

    // First pass: register every declaration program-wide. Later
    // declarations of an already taken name are reported in pass two.
    let mut symbols: IndexMap<String, Symbol> = IndexMap::new();
    for (idx, file) in files.iter().enumerate() {
        for decl in file.decls() {
            let Some(name) = decl.name() else { continue };
            symbols.entry(name.text().to_string()).or_insert(Symbol {
                file: idx,
                exported: decl.is_exported(),
            });
        }
    }

    let mut reports = Vec::new();
    for (idx, file) in files.iter().enumerate() {
        let mut diagnostics = file.parse.diagnostics().clone();
        let mut checker = FileChecker {
            files,
            by_path: &by_path,
            symbols: &symbols,
            config,
            file,
            index: idx,
            diagnostics: &mut diagnostics,
            visible: Default::default(),
        };
        checker.run();
        if config.strict {
            diagnostics.promote_warnings();
        }
        if !diagnostics.is_empty() {
            reports.push(FileDiagnostics {
                path: file.path.clone(),
                source: file.text.clone(),
                diagnostics,
            });
        }
    }

    (symbols, reports)
}

struct FileChecker<'a> {
    files: &'a [SourceFile],
    by_path: &'a IndexMap<&'a PathBuf, usize>,
    symbols: &'a IndexMap<String, Symbol>,
    config: &'a CompilerConfig,
    file: &'a SourceFile,
    index: usize,
    diagnostics: &'a mut Diagnostics,
    /// Names visible in this file: own and library declarations plus
    /// successfully resolved imports. Builtins are checked separately.
    visible: indexmap::IndexSet<String>,
}

impl FileChecker<'_> {
    fn run(&mut self) {
        self.collect_visible();
        self.check_imports();

        let mut seen: IndexMap<String, TextRange> = IndexMap::new();
        for decl in self.file.decls() {
            if let Some(name) = decl.name() {
                let range = name.text_range();
                let owner = self.symbols.get(name.text());
                let taken_here = seen.get(name.text()).copied();
                if let Some(first) = taken_here {
                    self.diagnostics
                        .report(DiagnosticKind::DuplicateDeclaration, range)
                        .message(format!("`{}` is declared more than once", name.text()))
                        .related_to("first declared here", first)
                        .emit();
                } else if owner.is_some_and(|s| s.file != self.index) {
                    self.diagnostics
                        .report(DiagnosticKind::DuplicateDeclaration, range)
                        .message(format!(
                            "`{}` is already declared in `{}`",
                            name.text(),
                            self.files[self.symbols[name.text()].file].path.display()
                        ))
                        .emit();
                } else {
                    seen.insert(name.text().to_string(), range);
                }
            }
            self.check_decl(&decl);
        }
    }

    fn collect_visible(&mut self) {
        for (idx, file) in self.files.iter().enumerate() {
            if idx != self.index && !file.is_lib {
                continue;
            }
            for decl in file.decls() {
                if let Some(name) = decl.name() {
                    self.visible.insert(name.text().to_string());
                }
            }
        }
    }

    fn check_imports(&mut self) {
        for import in self.file.root().imports() {
            let Some(spec) = import.module_path() else {
                continue;
            };
            let target = resolve_module(&spec, &self.file.path, self.config);
            let Some(&target_idx) = self.by_path.get(&target) else {
                self.diagnostics
                    .report(DiagnosticKind::UnresolvedImport, import.as_cst().text_range())
                    .message(format!("cannot resolve module `{spec}`"))
                    .emit();
                continue;
            };
            for name in import.names() {
                let found = self.files[target_idx]
                    .decl(name.text())
                    .is_some_and(|d| d.is_exported());
                if found {
                    self.visible.insert(name.text().to_string());
                } else {
                    self.diagnostics
                        .report(DiagnosticKind::UnresolvedImport, name.text_range())
                        .message(format!("`{}` is not exported by `{spec}`", name.text()))
                        .emit();
                }
            }
        }
    }

    fn check_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Interface(it) => {
                if let Some(extends) = it.extends() {
                    if let Some(base) = extends.name() {
                        let target = self
                            .lookup(base.text())
                            .and_then(|idx| self.files[idx].decl(base.text()));
                        match target {
                            Some(Decl::Interface(_)) => {}
                            Some(Decl::Alias(_)) => {
                                self.diagnostics
                                    .report(DiagnosticKind::InvalidExtendsTarget, base.text_range())
                                    .message(format!(
                                        "`{}` is a type alias and cannot be extended",
                                        base.text()
                                    ))
                                    .emit();
                            }
                            None => {
                                self.diagnostics
                                    .report(DiagnosticKind::InvalidExtendsTarget, base.text_range())
                                    .emit();
                            }
                        }
                    }
                }
                match it.body() {
                    Some(body) => {
                        let empty = body.members().next().is_none() && it.extends().is_none();
                        if empty {
                            if let Some(name) = it.name() {
                                self.diagnostics
                                    .report(DiagnosticKind::EmptyInterface, name.text_range())
                                    .emit();
                            }
                        }
                        self.check_object(&body);
                    }
                    None => {}
                }
            }
            Decl::Alias(alias) => {
                if let Some(ty) = alias.ty() {
                    self.check_type(&ty);
                }
            }
        }
    }

    fn check_object(&mut self, object: &ObjectType) {
        let mut seen: IndexMap<String, TextRange> = IndexMap::new();
        for member in object.members() {
            let Some(token) = member.name_token() else {
                continue;
            };
            if token.kind() == SyntaxKind::PrivateId
                && self.config.language_level == LanguageLevel::Legacy
            {
                self.diagnostics
                    .report(DiagnosticKind::PrivateMemberNotSupported, token.text_range())
                    .emit();
            }
            if let Some(name) = member.name() {
                if let Some(&first) = seen.get(&name) {
                    self.diagnostics
                        .report(DiagnosticKind::DuplicateMember, token.text_range())
                        .message(format!("member `{name}` is declared more than once"))
                        .related_to("first declared here", first)
                        .emit();
                } else {
                    seen.insert(name, token.text_range());
                }
            }
            if let Some(ty) = member.ty() {
                self.check_type(&ty);
            }
        }
    }

    fn check_type(&mut self, expr: &TypeExpr) {
        match expr {
            TypeExpr::Object(obj) => self.check_object(obj),
            TypeExpr::Union(union) => {
                for variant in union.variants() {
                    self.check_type(&variant);
                }
            }
            TypeExpr::Intersection(isect) => {
                for part in isect.parts() {
                    self.check_type(&part);
                }
            }
            TypeExpr::Array(array) => {
                if let Some(element) = array.element() {
                    self.check_type(&element);
                }
            }
            TypeExpr::Tuple(tuple) => {
                for element in tuple.elements() {
                    self.check_type(&element);
                }
            }
            TypeExpr::Func(func) => {
                for child in func.as_cst().children() {
                    if child.kind() == SyntaxKind::Param {
                        if let Some(ty) = child.children().find_map(TypeExpr::cast) {
                            self.check_type(&ty);
                        }
                    } else if let Some(ty) = TypeExpr::cast(child) {
                        self.check_type(&ty);
                    }
                }
            }
            TypeExpr::Paren(paren) => {
                if let Some(inner) = paren.inner() {
                    self.check_type(&inner);
                }
            }
            TypeExpr::Literal(_) => {}
            TypeExpr::Ref(type_ref) => {
                let Some(name) = type_ref.name() else { return };
                if name.text() == "any" {
                    self.diagnostics
                        .report(DiagnosticKind::AnyUsage, name.text_range())
                        .emit();
                    return;
                }
                if BUILTIN_TYPES.contains(&name.text()) {
                    return;
                }
                if self.lookup(name.text()).is_none() {
                    self.diagnostics
                        .report(DiagnosticKind::UnknownTypeName, name.text_range())
                        .message(format!("cannot find type `{}`", name.text()))
                        .emit();
                }
            }
        }
    }

    /// Resolves a name visible in this file to its defining file index.
    fn lookup(&self, name: &str) -> Option<usize> {
        if !self.visible.contains(name) {
            return None;
        }
        self.symbols.get(name).map(|s| s.file)
    }
}
