//! Declaration emission.
//!
//! Pretty-prints each module of a program into a `.d.dcl` artifact, after
//! redaction has renamed private members. Runs once per invocation and
//! produces artifacts only; the gate decides whether anything reaches the
//! filesystem.

use std::path::PathBuf;

use tracing::debug;

use crate::config::CompilerConfig;
use crate::parser::{Decl, Member, Root, TypeExpr};
use crate::program::Program;

use super::gate::OutputArtifact;
use super::redact::redact_private_members;

/// Whether the pass ran to completion. Artifacts are only committed when
/// it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Skipped,
}

/// Prints every non-library module of the program into a declaration
/// artifact. Skipped entirely when declaration output is disabled.
pub fn emit_declarations(
    program: &Program,
    config: &CompilerConfig,
) -> (Outcome, Vec<OutputArtifact>) {
    if !config.declaration {
        debug!("declaration output disabled, skipping pass");
        return (Outcome::Skipped, Vec::new());
    }

    let declaration_dir = config.declaration_dir();
    let mut artifacts = Vec::new();
    for file in program.files().filter(|f| !f.is_lib) {
        let redacted = redact_private_members(&file.parse.syntax());
        let Some(root) = Root::cast(redacted) else {
            continue;
        };
        let relative = file
            .path
            .strip_prefix(&config.root_dir)
            .unwrap_or(&file.path);
        let mut path: PathBuf = declaration_dir.join(relative);
        path.set_extension("d.dcl");
        artifacts.push(OutputArtifact {
            path,
            contents: print_declarations(&root),
        });
    }
    (Outcome::Completed, artifacts)
}

/// Renders a module as declaration source. Member and declaration doc
/// comments are kept; formatting is normalized to two-space indentation.
pub fn print_declarations(root: &Root) -> String {
    let mut printer = Printer::default();
    for import in root.imports() {
        let names: Vec<_> = import.names().map(|t| t.text().to_string()).collect();
        let path = import.module_path().unwrap_or_default();
        printer.line(format!("import {{ {} }} from \"{path}\";", names.join(", ")));
    }
    for decl in root.decls() {
        if !printer.out.is_empty() {
            printer.line("");
        }
        printer.decl(&decl);
    }
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Interface(it) => {
                if let Some(doc) = it.doc() {
                    self.line(doc.text());
                }
                let mut header = String::new();
                if it.is_exported() {
                    header.push_str("export ");
                }
                header.push_str("interface ");
                if let Some(name) = it.name() {
                    header.push_str(name.text());
                }
                if let Some(base) = it.extends().and_then(|e| e.name()) {
                    header.push_str(" extends ");
                    header.push_str(base.text());
                }
                header.push_str(" {");
                self.line(header);
                if let Some(body) = it.body() {
                    for member in body.members() {
                        self.member(&member);
                    }
                }
                self.line("}");
            }
            Decl::Alias(alias) => {
                if let Some(doc) = alias.doc() {
                    self.line(doc.text());
                }
                let mut line = String::new();
                if alias.is_exported() {
                    line.push_str("export ");
                }
                line.push_str("type ");
                if let Some(name) = alias.name() {
                    line.push_str(name.text());
                }
                line.push_str(" = ");
                if let Some(ty) = alias.ty() {
                    line.push_str(&type_text(&ty));
                }
                line.push(';');
                self.line(line);
            }
        }
    }

    fn member(&mut self, member: &Member) {
        if let Some(doc) = member.doc() {
            self.line(format!("  {}", doc.text()));
        }
        let Some(token) = member.name_token() else {
            return;
        };
        let mut line = format!("  {}", token.text());
        if member.is_optional() {
            line.push('?');
        }
        line.push_str(": ");
        match member.ty() {
            Some(ty) => line.push_str(&type_text(&ty)),
            None => line.push_str("any"),
        }
        line.push(';');
        self.line(line);
    }
}

fn type_text(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Object(obj) => {
            let members: Vec<String> = obj
                .members()
                .filter_map(|m| {
                    let token = m.name_token()?;
                    let mut text = token.text().to_string();
                    if m.is_optional() {
                        text.push('?');
                    }
                    text.push_str(": ");
                    match m.ty() {
                        Some(ty) => text.push_str(&type_text(&ty)),
                        None => text.push_str("any"),
                    }
                    Some(text)
                })
                .collect();
            if members.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", members.join("; "))
            }
        }
        TypeExpr::Union(union) => {
            let variants: Vec<String> = union.variants().map(|v| type_text(&v)).collect();
            variants.join(" | ")
        }
        TypeExpr::Intersection(isect) => {
            let parts: Vec<String> = isect.parts().map(|p| type_text(&p)).collect();
            parts.join(" & ")
        }
        TypeExpr::Array(array) => match array.element() {
            Some(inner @ (TypeExpr::Union(_) | TypeExpr::Intersection(_) | TypeExpr::Func(_))) => {
                format!("({})[]", type_text(&inner))
            }
            Some(inner) => format!("{}[]", type_text(&inner)),
            None => "any[]".to_string(),
        },
        TypeExpr::Tuple(tuple) => {
            let elements: Vec<String> = tuple.elements().map(|e| type_text(&e)).collect();
            format!("[{}]", elements.join(", "))
        }
        TypeExpr::Func(func) => {
            let params: Vec<String> = func
                .params()
                .filter_map(|p| {
                    let name = p.name()?;
                    let mut text = name.text().to_string();
                    if p.is_optional() {
                        text.push('?');
                    }
                    text.push_str(": ");
                    match p.ty() {
                        Some(ty) => text.push_str(&type_text(&ty)),
                        None => text.push_str("any"),
                    }
                    Some(text)
                })
                .collect();
            let ret = match func.return_ty() {
                Some(ty) => type_text(&ty),
                None => "void".to_string(),
            };
            format!("({}) => {ret}", params.join(", "))
        }
        TypeExpr::Paren(paren) => match paren.inner() {
            Some(inner) => format!("({})", type_text(&inner)),
            None => "()".to_string(),
        },
        TypeExpr::Literal(lit) => lit
            .token()
            .map(|t| t.text().to_string())
            .unwrap_or_default(),
        TypeExpr::Ref(type_ref) => type_ref
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default(),
    }
}
