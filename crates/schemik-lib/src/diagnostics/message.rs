use rowan::TextRange;

/// Diagnostic kinds, ordered roughly by how early in the pipeline they arise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexing / parsing
    UnterminatedString,
    UnclosedBrace,
    UnclosedBracket,
    UnclosedParen,
    ExpectedDeclaration,
    ExpectedType,
    ExpectedMemberName,
    ExpectedIdentifier,
    ExpectedToken,
    UnexpectedToken,

    // Language-level gating
    PrivateMemberNotSupported,

    // Name resolution / checking
    DuplicateDeclaration,
    DuplicateMember,
    UnresolvedImport,
    UnknownTypeName,
    InvalidExtendsTarget,

    // Lints (warnings by default, errors under strict)
    EmptyInterface,
    AnyUsage,
}

impl DiagnosticKind {
    /// Default severity. Strict mode promotes warnings when the loader runs.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyInterface | Self::AnyUsage => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message used when the call site provides no detail.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::UnclosedBrace => "unclosed `{`",
            Self::UnclosedBracket => "unclosed `[`",
            Self::UnclosedParen => "unclosed `(`",
            Self::ExpectedDeclaration => "expected a declaration",
            Self::ExpectedType => "expected a type",
            Self::ExpectedMemberName => "expected a member name",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedToken => "expected token",
            Self::UnexpectedToken => "unexpected token",
            Self::PrivateMemberNotSupported => {
                "private members require language level `modern`"
            }
            Self::DuplicateDeclaration => "duplicate declaration",
            Self::DuplicateMember => "duplicate member",
            Self::UnresolvedImport => "unresolved import",
            Self::UnknownTypeName => "unknown type name",
            Self::InvalidExtendsTarget => "extends target is not an interface",
            Self::EmptyInterface => "interface has no members",
            Self::AnyUsage => "`any` erases all structure from the schema",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// A single diagnostic: kind, severity, span, message, optional context spans.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub range: TextRange,
    pub message: String,
    pub related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.default_message())
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sev = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}[{}..{}]: {}",
            sev,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

/// Secondary span attached to a diagnostic (e.g. the opening delimiter).
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}
