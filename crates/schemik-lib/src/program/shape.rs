//! Resolved type shapes.
//!
//! A [`TypeShape`] is the effective shape of a declaration after lowering:
//! aliases stay as named references (so shared types can become `$ref`s),
//! intersections are merged away, nested unions are flattened, and
//! `undefined` branches are folded into member optionality. Shapes are
//! computed per extraction and never cached across runs.

use indexmap::IndexMap;

/// Literal value admitted by a literal type.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl LiteralValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LiteralValue::String(s) => serde_json::Value::String(s.clone()),
            LiteralValue::Number(n) => serde_json::Value::Number(n.clone()),
            LiteralValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

/// The effective shape of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Any,
    Unknown,
    Null,
    /// Only meaningful inside unions; folded into optionality when a member
    /// type admits it.
    Undefined,
    Boolean,
    Integer,
    Number,
    String,
    Literal(LiteralValue),
    Array(Box<TypeShape>),
    Tuple(Vec<TypeShape>),
    Object(ObjectShape),
    Union(Vec<TypeShape>),
    Function,
    /// Reference to a named declaration. Kept unexpanded so the extractor
    /// can share it through the definitions table.
    Named(String),
}

impl TypeShape {
    /// Flattens directly nested unions and strips `undefined` branches.
    /// Returns the simplified shape and whether `undefined` was admitted.
    pub fn simplify(self) -> (TypeShape, bool) {
        match self {
            TypeShape::Undefined => (TypeShape::Undefined, true),
            TypeShape::Union(branches) => {
                let mut flat = Vec::with_capacity(branches.len());
                let mut admits_undefined = false;
                for branch in branches {
                    let (branch, undef) = branch.simplify();
                    admits_undefined |= undef;
                    match branch {
                        TypeShape::Undefined => {}
                        TypeShape::Union(inner) => flat.extend(inner),
                        other => {
                            if !flat.contains(&other) {
                                flat.push(other);
                            }
                        }
                    }
                }
                let shape = match flat.len() {
                    0 => TypeShape::Undefined,
                    1 => flat.remove(0),
                    _ => TypeShape::Union(flat),
                };
                (shape, admits_undefined)
            }
            other => (other, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    /// Members in declaration order.
    pub members: IndexMap<String, MemberShape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberShape {
    pub shape: TypeShape,
    /// `?`-marked, or the declared type admits `undefined`.
    pub optional: bool,
    /// `#`-named; excluded from schema output and redacted at emission.
    pub private: bool,
    pub doc: Option<DocInfo>,
}

/// Parsed doc comment: description text plus `@tag value` lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocInfo {
    pub description: String,
    pub tags: Vec<DocTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocTag {
    pub name: String,
    pub value: String,
}

impl DocInfo {
    /// Parses a `/** ... */` comment body. Leading `*` gutters are stripped;
    /// everything before the first `@tag` line is the description.
    pub fn parse(raw: &str) -> Self {
        let body = raw
            .trim_start_matches("/**")
            .trim_end_matches("*/")
            .trim();

        let mut description_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();

        for line in body.lines() {
            let line = line.trim().trim_start_matches('*').trim();
            if let Some(rest) = line.strip_prefix('@') {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                tags.push(DocTag {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            } else if let Some(last) = tags.last_mut() {
                // Continuation line of the previous tag.
                if !line.is_empty() {
                    if !last.value.is_empty() {
                        last.value.push(' ');
                    }
                    last.value.push_str(line);
                }
            } else if !line.is_empty() || !description_lines.is_empty() {
                description_lines.push(line);
            }
        }

        while description_lines.last().is_some_and(|l| l.is_empty()) {
            description_lines.pop();
        }

        Self {
            description: description_lines.join("\n"),
            tags,
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }
}
