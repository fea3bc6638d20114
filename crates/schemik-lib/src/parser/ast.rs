//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(ImportDecl, ImportDecl);
ast_node!(InterfaceDecl, InterfaceDecl);
ast_node!(AliasDecl, AliasDecl);
ast_node!(ExtendsClause, ExtendsClause);
ast_node!(Member, Member);
ast_node!(ObjectType, ObjectType);
ast_node!(UnionType, UnionType);
ast_node!(IntersectionType, IntersectionType);
ast_node!(ArrayType, ArrayType);
ast_node!(TupleType, TupleType);
ast_node!(FuncType, FuncType);
ast_node!(Param, Param);
ast_node!(ParenType, ParenType);
ast_node!(LiteralType, LiteralType);
ast_node!(TypeRef, TypeRef);

/// Any type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Object(ObjectType),
    Union(UnionType),
    Intersection(IntersectionType),
    Array(ArrayType),
    Tuple(TupleType),
    Func(FuncType),
    Paren(ParenType),
    Literal(LiteralType),
    Ref(TypeRef),
}

impl TypeExpr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ObjectType => ObjectType::cast(node).map(TypeExpr::Object),
            SyntaxKind::UnionType => UnionType::cast(node).map(TypeExpr::Union),
            SyntaxKind::IntersectionType => {
                IntersectionType::cast(node).map(TypeExpr::Intersection)
            }
            SyntaxKind::ArrayType => ArrayType::cast(node).map(TypeExpr::Array),
            SyntaxKind::TupleType => TupleType::cast(node).map(TypeExpr::Tuple),
            SyntaxKind::FuncType => FuncType::cast(node).map(TypeExpr::Func),
            SyntaxKind::ParenType => ParenType::cast(node).map(TypeExpr::Paren),
            SyntaxKind::LiteralType => LiteralType::cast(node).map(TypeExpr::Literal),
            SyntaxKind::TypeRef => TypeRef::cast(node).map(TypeExpr::Ref),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            TypeExpr::Object(n) => n.as_cst(),
            TypeExpr::Union(n) => n.as_cst(),
            TypeExpr::Intersection(n) => n.as_cst(),
            TypeExpr::Array(n) => n.as_cst(),
            TypeExpr::Tuple(n) => n.as_cst(),
            TypeExpr::Func(n) => n.as_cst(),
            TypeExpr::Paren(n) => n.as_cst(),
            TypeExpr::Literal(n) => n.as_cst(),
            TypeExpr::Ref(n) => n.as_cst(),
        }
    }
}

/// A top-level named declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decl {
    Interface(InterfaceDecl),
    Alias(AliasDecl),
}

impl Decl {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::InterfaceDecl => InterfaceDecl::cast(node).map(Decl::Interface),
            SyntaxKind::AliasDecl => AliasDecl::cast(node).map(Decl::Alias),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        match self {
            Decl::Interface(d) => d.name(),
            Decl::Alias(d) => d.name(),
        }
    }

    pub fn is_exported(&self) -> bool {
        match self {
            Decl::Interface(d) => d.is_exported(),
            Decl::Alias(d) => d.is_exported(),
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Decl::Interface(d) => d.as_cst(),
            Decl::Alias(d) => d.as_cst(),
        }
    }
}

impl Root {
    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + '_ {
        self.0.children().filter_map(ImportDecl::cast)
    }

    pub fn decls(&self) -> impl Iterator<Item = Decl> + '_ {
        self.0.children().filter_map(Decl::cast)
    }
}

impl ImportDecl {
    /// Imported names, in source order.
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Id)
    }

    /// The module path with its surrounding quotes stripped.
    pub fn module_path(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::StringLiteral)
            .map(|t| unquote(t.text()))
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_token(&self.0, SyntaxKind::Id)
    }

    pub fn is_exported(&self) -> bool {
        direct_token(&self.0, SyntaxKind::KwExport).is_some()
    }

    pub fn extends(&self) -> Option<ExtendsClause> {
        self.0.children().find_map(ExtendsClause::cast)
    }

    pub fn body(&self) -> Option<ObjectType> {
        self.0.children().find_map(ObjectType::cast)
    }

    pub fn doc(&self) -> Option<SyntaxToken> {
        doc_comment(&self.0)
    }
}

impl AliasDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_token(&self.0, SyntaxKind::Id)
    }

    pub fn is_exported(&self) -> bool {
        direct_token(&self.0, SyntaxKind::KwExport).is_some()
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }

    pub fn doc(&self) -> Option<SyntaxToken> {
        doc_comment(&self.0)
    }
}

impl ExtendsClause {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_token(&self.0, SyntaxKind::Id)
    }
}

impl ObjectType {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

impl Member {
    /// The raw name token: identifier, private identifier, quoted string,
    /// or a contextual keyword used as a name.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Id
                        | SyntaxKind::PrivateId
                        | SyntaxKind::StringLiteral
                        | SyntaxKind::KwType
                        | SyntaxKind::KwFrom
                )
            })
    }

    /// The member name as written, quotes stripped. Private names keep `#`.
    pub fn name(&self) -> Option<String> {
        let token = self.name_token()?;
        Some(match token.kind() {
            SyntaxKind::StringLiteral => unquote(token.text()),
            _ => token.text().to_string(),
        })
    }

    pub fn is_private(&self) -> bool {
        self.name_token()
            .is_some_and(|t| t.kind() == SyntaxKind::PrivateId)
    }

    /// `?` between the name and the colon.
    pub fn is_optional(&self) -> bool {
        direct_token(&self.0, SyntaxKind::Question).is_some()
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }

    pub fn doc(&self) -> Option<SyntaxToken> {
        doc_comment(&self.0)
    }
}

impl UnionType {
    pub fn variants(&self) -> impl Iterator<Item = TypeExpr> + '_ {
        self.0.children().filter_map(TypeExpr::cast)
    }
}

impl IntersectionType {
    pub fn parts(&self) -> impl Iterator<Item = TypeExpr> + '_ {
        self.0.children().filter_map(TypeExpr::cast)
    }
}

impl ArrayType {
    pub fn element(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

impl TupleType {
    pub fn elements(&self) -> impl Iterator<Item = TypeExpr> + '_ {
        self.0.children().filter_map(TypeExpr::cast)
    }
}

impl FuncType {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.0.children().filter_map(Param::cast)
    }

    pub fn return_ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

impl Param {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_token(&self.0, SyntaxKind::Id)
    }

    pub fn is_optional(&self) -> bool {
        direct_token(&self.0, SyntaxKind::Question).is_some()
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

impl ParenType {
    pub fn inner(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

impl LiteralType {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

impl TypeRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_token(&self.0, SyntaxKind::Id)
    }
}

fn direct_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

/// Nearest doc comment among the preceding siblings, separated from the node
/// only by blank trivia.
fn doc_comment(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut cursor = node.prev_sibling_or_token();
    while let Some(element) = cursor {
        match &element {
            SyntaxElement::Token(token) => match token.kind() {
                SyntaxKind::Whitespace | SyntaxKind::Newline => {
                    cursor = element.prev_sibling_or_token();
                }
                SyntaxKind::DocComment => return Some(token.clone()),
                _ => return None,
            },
            SyntaxElement::Node(_) => return None,
        }
    }
    None
}

/// Strips the surrounding quotes from a string literal and resolves the
/// escape sequences the lexer admits.
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => break,
            }
        } else {
            out.push(c);
        }
    }
    out
}
