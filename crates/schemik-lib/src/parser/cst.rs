//! Syntax kinds for the declaration language.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds
//! (from parser). Logos derives token recognition; node kinds lack
//! token/regex attributes. `DclLang` implements Rowan's `Language` trait for
//! tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("{")]
    BraceOpen = 0,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// `=>` for function types. Defined before `Equals` for correct precedence.
    #[token("=>")]
    Arrow,

    #[token("=")]
    Equals,

    #[token("|")]
    Pipe,

    #[token("&")]
    Amp,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    #[token(";")]
    Semi,

    #[token(",")]
    Comma,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    StringLiteral,

    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    NumberLiteral,

    /// Private member name: `#cache`
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*")]
    PrivateId,

    #[token("import")]
    KwImport,

    #[token("from")]
    KwFrom,

    #[token("export")]
    KwExport,

    #[token("interface")]
    KwInterface,

    #[token("type")]
    KwType,

    #[token("extends")]
    KwExtends,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    /// Identifier. Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `/** ... */`, trivia for the grammar, read back for descriptions.
    #[regex(r"/\*\*(?:[^*]|\*[^/])*\*/")]
    DocComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    ImportDecl,
    InterfaceDecl,
    AliasDecl,
    ExtendsClause,
    Member,
    ObjectType,
    UnionType,
    IntersectionType,
    ArrayType,
    TupleType,
    FuncType,
    Param,
    ParenType,
    LiteralType,
    TypeRef,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | Newline | LineComment | BlockComment | DocComment
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DclLang {}

impl Language for DclLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<DclLang>;
pub type SyntaxToken = rowan::SyntaxToken<DclLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a type expression.
    pub const TYPE_FIRST: TokenSet = TokenSet::new(&[
        BraceOpen,
        BracketOpen,
        ParenOpen,
        StringLiteral,
        NumberLiteral,
        KwTrue,
        KwFalse,
        Id,
    ]);

    /// FIRST set of a top-level declaration.
    pub const DECL_FIRST: TokenSet =
        TokenSet::new(&[KwImport, KwExport, KwInterface, KwType]);

    /// Tokens that may start an interface member name.
    pub const MEMBER_NAME_FIRST: TokenSet =
        TokenSet::new(&[Id, PrivateId, StringLiteral, KwType, KwFrom]);

    pub const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[Semi, BraceClose]);

    pub const DECL_RECOVERY: TokenSet =
        TokenSet::new(&[KwImport, KwExport, KwInterface, KwType]);
}
