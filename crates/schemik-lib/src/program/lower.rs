//! Lowering from syntax to [`TypeShape`].
//!
//! References to named declarations stay as [`TypeShape::Named`] so the
//! extractor can share them through the definitions table. Intersections
//! and `extends` clauses are merged away here, which means named parts of
//! an intersection are expanded in place.

use indexmap::IndexMap;

use crate::parser::{unquote, Decl, Member, SyntaxKind, TypeExpr};

use super::shape::{DocInfo, LiteralValue, MemberShape, ObjectShape, TypeShape};
use super::{Program, BUILTIN_TYPES};

pub(crate) fn lower_decl(program: &Program, decl: &Decl) -> TypeShape {
    let mut lowerer = Lowerer {
        program,
        stack: Vec::new(),
    };
    lowerer.decl(decl)
}

struct Lowerer<'a> {
    program: &'a Program,
    /// Declarations currently being expanded, for cycle detection.
    stack: Vec<String>,
}

impl Lowerer<'_> {
    fn decl(&mut self, decl: &Decl) -> TypeShape {
        let Some(name) = decl.name() else {
            return TypeShape::Unknown;
        };
        if self.stack.iter().any(|n| n == name.text()) {
            return TypeShape::Unknown;
        }
        self.stack.push(name.text().to_string());
        let shape = match decl {
            Decl::Interface(it) => {
                let mut members = IndexMap::new();
                if let Some(extends) = it.extends() {
                    if let Some(base) = extends.name() {
                        if let TypeShape::Object(base) = self.named(base.text()) {
                            members = base.members;
                        }
                    }
                }
                if let Some(body) = it.body() {
                    for member in body.members() {
                        self.member(&member, &mut members);
                    }
                }
                TypeShape::Object(ObjectShape { members })
            }
            Decl::Alias(alias) => match alias.ty() {
                Some(ty) => self.ty(&ty),
                None => TypeShape::Unknown,
            },
        };
        self.stack.pop();
        shape
    }

    /// Resolves a name and lowers its declaration in place. Used for
    /// `extends` bases and named intersection parts, where the reference
    /// cannot stay shared.
    fn named(&mut self, name: &str) -> TypeShape {
        if self.stack.iter().any(|n| n == name) {
            return TypeShape::Unknown;
        }
        match self.program.resolve(name) {
            Some((_, decl)) => self.decl(&decl),
            None => TypeShape::Unknown,
        }
    }

    fn member(&mut self, member: &Member, into: &mut IndexMap<String, MemberShape>) {
        let Some(name) = member.name() else {
            return;
        };
        let shape = match member.ty() {
            Some(ty) => self.ty(&ty),
            None => TypeShape::Any,
        };
        let (shape, admits_undefined) = shape.simplify();
        into.insert(
            name,
            MemberShape {
                shape,
                optional: member.is_optional() || admits_undefined,
                private: member.is_private(),
                doc: member.doc().map(|t| DocInfo::parse(t.text())),
            },
        );
    }

    fn ty(&mut self, expr: &TypeExpr) -> TypeShape {
        match expr {
            TypeExpr::Object(obj) => {
                let mut members = IndexMap::new();
                for member in obj.members() {
                    self.member(&member, &mut members);
                }
                TypeShape::Object(ObjectShape { members })
            }
            TypeExpr::Union(union) => {
                TypeShape::Union(union.variants().map(|v| self.ty(&v)).collect())
            }
            TypeExpr::Intersection(isect) => {
                let mut members = IndexMap::new();
                for part in isect.parts() {
                    let part = match self.ty(&part) {
                        TypeShape::Named(name) => self.named(&name),
                        other => other,
                    };
                    match part {
                        TypeShape::Object(obj) => members.extend(obj.members),
                        _ => return TypeShape::Unknown,
                    }
                }
                TypeShape::Object(ObjectShape { members })
            }
            TypeExpr::Array(array) => {
                let element = match array.element() {
                    Some(inner) => self.ty(&inner),
                    None => TypeShape::Any,
                };
                TypeShape::Array(Box::new(element))
            }
            TypeExpr::Tuple(tuple) => {
                TypeShape::Tuple(tuple.elements().map(|e| self.ty(&e)).collect())
            }
            TypeExpr::Func(_) => TypeShape::Function,
            TypeExpr::Paren(paren) => match paren.inner() {
                Some(inner) => self.ty(&inner),
                None => TypeShape::Unknown,
            },
            TypeExpr::Literal(lit) => match lit.token() {
                Some(token) => lower_literal(&token),
                None => TypeShape::Unknown,
            },
            TypeExpr::Ref(type_ref) => match type_ref.name() {
                Some(name) => lower_name(name.text()),
                None => TypeShape::Unknown,
            },
        }
    }
}

fn lower_name(name: &str) -> TypeShape {
    match name {
        "string" => TypeShape::String,
        "number" => TypeShape::Number,
        "integer" => TypeShape::Integer,
        "boolean" => TypeShape::Boolean,
        "null" => TypeShape::Null,
        "undefined" | "void" => TypeShape::Undefined,
        "any" => TypeShape::Any,
        "unknown" => TypeShape::Unknown,
        _ => {
            debug_assert!(!BUILTIN_TYPES.contains(&name));
            TypeShape::Named(name.to_string())
        }
    }
}

fn lower_literal(token: &crate::parser::SyntaxToken) -> TypeShape {
    match token.kind() {
        SyntaxKind::StringLiteral => {
            TypeShape::Literal(LiteralValue::String(unquote(token.text())))
        }
        SyntaxKind::NumberLiteral => match token.text().parse() {
            Ok(number) => TypeShape::Literal(LiteralValue::Number(number)),
            Err(_) => TypeShape::Number,
        },
        SyntaxKind::KwTrue => TypeShape::Literal(LiteralValue::Bool(true)),
        SyntaxKind::KwFalse => TypeShape::Literal(LiteralValue::Bool(false)),
        _ => TypeShape::Unknown,
    }
}
