//! Schema extraction.
//!
//! Walks resolved type shapes and converts them to schema fragments. Named
//! types that may be shared go through the definitions table and come back
//! as `$ref`s; everything else is inlined. A visited set keyed by type name
//! guarantees termination on recursive type graphs: a name already on the
//! current expansion path always comes back as a `$ref`, even when the
//! options ask for inlining.

use indexmap::{IndexMap, IndexSet};

use crate::config::Profile;
use crate::program::{DocInfo, MemberShape, ObjectShape, Program, TypeShape};
use crate::{Error, Result};

use super::document::{Discriminator, Items, Schema, SchemaDocument};

/// Which types an extraction call asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRequest {
    /// Every exported declaration in the program.
    Wildcard,
    /// An explicit ordered list of names.
    Names(Vec<String>),
}

impl TypeRequest {
    pub fn wildcard() -> Self {
        TypeRequest::Wildcard
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeRequest::Names(names.into_iter().map(Into::into).collect())
    }
}

/// Which named types may be lifted into `definitions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expose {
    All,
    Exported,
}

/// What to do with function-typed members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionPolicy {
    /// Omit the member from the output.
    Hide,
    /// Fail the extraction.
    Fail,
}

/// How much documentation to carry into the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsDocPolicy {
    None,
    /// Descriptions only.
    Basic,
    /// Descriptions plus `@default`, `@deprecated`, `@title`, `@examples`.
    Extended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Represent unions whose branches all carry a common literal-valued
    /// member as `oneOf` with a discriminator instead of plain `anyOf`.
    pub discriminator: bool,
    /// Collapse shared named types to `$ref`s. When off, named types are
    /// inlined at every use site (cycles still force a `$ref`).
    pub encode_refs: bool,
    pub expose: Expose,
    pub functions: FunctionPolicy,
    pub js_doc: JsDocPolicy,
    /// Emit object properties in lexicographic order. When off, the
    /// declaration order is kept.
    pub sort_props: bool,
    /// Encode tuples with exact `minItems`/`maxItems` bounds.
    pub strict_tuples: bool,
    /// Express the document root as a `$ref` into `definitions`.
    pub top_ref: bool,
}

impl ExtractOptions {
    /// The default profile: shared `$ref`s, root via `$ref`, extended docs.
    pub fn standard() -> Self {
        Self {
            discriminator: false,
            encode_refs: true,
            expose: Expose::Exported,
            functions: FunctionPolicy::Hide,
            js_doc: JsDocPolicy::Extended,
            sort_props: true,
            strict_tuples: false,
            top_ref: true,
        }
    }

    /// Self-contained output: no ref encoding, root inlined, basic docs.
    pub fn inlined() -> Self {
        Self {
            encode_refs: false,
            expose: Expose::All,
            js_doc: JsDocPolicy::Basic,
            top_ref: false,
            ..Self::standard()
        }
    }

    /// Exact tuples, tagged unions, and function members are an error.
    pub fn strict() -> Self {
        Self {
            discriminator: true,
            functions: FunctionPolicy::Fail,
            strict_tuples: true,
            ..Self::standard()
        }
    }
}

impl From<Profile> for ExtractOptions {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Standard => ExtractOptions::standard(),
            Profile::Inlined => ExtractOptions::inlined(),
            Profile::Strict => ExtractOptions::strict(),
        }
    }
}

/// Extracts one schema document for the requested types.
pub fn extract(
    program: &Program,
    request: &TypeRequest,
    options: &ExtractOptions,
) -> Result<SchemaDocument> {
    let names: Vec<String> = match request {
        TypeRequest::Wildcard => program
            .declared_names()
            .filter(|n| program.is_exported(n))
            .map(str::to_string)
            .collect(),
        TypeRequest::Names(names) => names.clone(),
    };
    for name in &names {
        if program.resolve(name).is_none() {
            return Err(Error::UnresolvedType(name.clone()));
        }
    }

    let mut extractor = Extractor {
        program,
        options,
        definitions: IndexMap::new(),
        in_progress: IndexSet::new(),
        forced: IndexSet::new(),
    };

    let root = match names.as_slice() {
        [name] if options.top_ref => {
            extractor.define(name)?;
            Schema::reference(name)
        }
        [name] => extractor.inline(name)?,
        _ => {
            for name in &names {
                extractor.define(name)?;
            }
            Schema::default()
        }
    };

    Ok(SchemaDocument::new(root, extractor.definitions))
}

struct Extractor<'a> {
    program: &'a Program,
    options: &'a ExtractOptions,
    definitions: IndexMap<String, Schema>,
    /// Names on the current expansion path.
    in_progress: IndexSet<String>,
    /// Names that hit a cycle while being inlined; their finished schemas
    /// must land in `definitions` so the emitted `$ref`s resolve.
    forced: IndexSet<String>,
}

impl Extractor<'_> {
    /// Ensures `name` has an entry in the definitions table.
    fn define(&mut self, name: &str) -> Result<()> {
        if self.definitions.contains_key(name) || self.in_progress.contains(name) {
            return Ok(());
        }
        self.in_progress.insert(name.to_string());
        let shape = self.program.shape_of(name)?;
        let mut schema = self.schema(&shape)?;
        self.annotate_decl(name, &mut schema);
        self.in_progress.shift_remove(name);
        self.forced.shift_remove(name);
        self.definitions.insert(name.to_string(), schema);
        Ok(())
    }

    /// Expands `name` in place instead of referencing it.
    fn inline(&mut self, name: &str) -> Result<Schema> {
        self.in_progress.insert(name.to_string());
        let shape = self.program.shape_of(name)?;
        let mut schema = self.schema(&shape)?;
        self.annotate_decl(name, &mut schema);
        self.in_progress.shift_remove(name);
        if self.forced.shift_remove(name) {
            self.definitions.insert(name.to_string(), schema.clone());
        }
        Ok(schema)
    }

    /// A use of a named type: `$ref` when shareable or on-cycle, inline
    /// expansion otherwise.
    fn reference(&mut self, name: &str) -> Result<Schema> {
        if self.in_progress.contains(name) {
            if !self.definitions.contains_key(name) {
                self.forced.insert(name.to_string());
            }
            return Ok(Schema::reference(name));
        }
        let shared = self.options.encode_refs
            && (self.options.expose == Expose::All || self.program.is_exported(name));
        if shared {
            self.define(name)?;
            Ok(Schema::reference(name))
        } else {
            self.inline(name)
        }
    }

    fn schema(&mut self, shape: &TypeShape) -> Result<Schema> {
        Ok(match shape {
            TypeShape::Any | TypeShape::Unknown => Schema::default(),
            TypeShape::Null | TypeShape::Undefined => Schema::of_type("null"),
            TypeShape::Boolean => Schema::of_type("boolean"),
            TypeShape::Integer => Schema::of_type("integer"),
            TypeShape::Number => Schema::of_type("number"),
            TypeShape::String => Schema::of_type("string"),
            TypeShape::Literal(value) => Schema::constant(value.to_json()),
            TypeShape::Array(element) => Schema {
                items: Some(Items::Uniform(Box::new(self.schema(element)?))),
                ..Schema::of_type("array")
            },
            TypeShape::Tuple(elements) => self.tuple(elements)?,
            TypeShape::Object(object) => self.object(object)?,
            TypeShape::Union(branches) => self.union(branches)?,
            TypeShape::Function => match self.options.functions {
                FunctionPolicy::Hide => Schema::default(),
                FunctionPolicy::Fail => {
                    return Err(Error::Configuration(
                        "function types cannot be represented in a schema".to_string(),
                    ));
                }
            },
            TypeShape::Named(name) => self.reference(name)?,
        })
    }

    fn tuple(&mut self, elements: &[TypeShape]) -> Result<Schema> {
        let items = elements
            .iter()
            .map(|e| self.schema(e))
            .collect::<Result<Vec<_>>>()?;
        let mut schema = Schema::of_type("array");
        schema.items = Some(Items::Positional(items));
        if self.options.strict_tuples {
            schema.min_items = Some(elements.len());
            schema.max_items = Some(elements.len());
        }
        Ok(schema)
    }

    fn object(&mut self, object: &ObjectShape) -> Result<Schema> {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();
        for (name, member) in &object.members {
            if member.private {
                continue;
            }
            if member.shape == TypeShape::Function {
                match self.options.functions {
                    FunctionPolicy::Hide => continue,
                    FunctionPolicy::Fail => {
                        return Err(Error::Configuration(format!(
                            "member `{name}` has a function type, which cannot be \
                             represented in a schema"
                        )));
                    }
                }
            }
            let mut schema = self.schema(&member.shape)?;
            self.annotate_member(member, &mut schema);
            if !member.optional {
                required.push(name.clone());
            }
            properties.insert(name.clone(), schema);
        }
        if self.options.sort_props {
            properties.sort_keys();
            required.sort();
        }
        let mut schema = Schema::of_type("object");
        schema.properties = properties;
        schema.required = required;
        schema.additional_properties = Some(false);
        Ok(schema)
    }

    fn union(&mut self, branches: &[TypeShape]) -> Result<Schema> {
        // A union of literals collapses to an enum.
        if branches
            .iter()
            .all(|b| matches!(b, TypeShape::Literal(_)))
        {
            let values = branches
                .iter()
                .filter_map(|b| match b {
                    TypeShape::Literal(value) => Some(value.to_json()),
                    _ => None,
                })
                .collect();
            return Ok(Schema {
                enum_values: values,
                ..Schema::default()
            });
        }

        let schemas = branches
            .iter()
            .map(|b| self.schema(b))
            .collect::<Result<Vec<_>>>()?;

        if self.options.discriminator {
            if let Some(tag) = self.common_tag(branches) {
                return Ok(Schema {
                    one_of: schemas,
                    discriminator: Some(Discriminator { property_name: tag }),
                    ..Schema::default()
                });
            }
        }
        Ok(Schema {
            any_of: schemas,
            ..Schema::default()
        })
    }

    /// A member name carried by every branch with a literal type, making
    /// the union tagged.
    fn common_tag(&self, branches: &[TypeShape]) -> Option<String> {
        let objects: Vec<ObjectShape> = branches
            .iter()
            .map(|b| {
                let resolved = match b {
                    TypeShape::Named(name) => self.resolved_shape(name)?,
                    other => other.clone(),
                };
                match resolved {
                    TypeShape::Object(obj) => Some(obj),
                    _ => None,
                }
            })
            .collect::<Option<Vec<_>>>()?;
        let first = objects.first()?;
        for (name, member) in &first.members {
            if !matches!(member.shape, TypeShape::Literal(_)) {
                continue;
            }
            let shared = objects.iter().all(|obj| {
                obj.members
                    .get(name)
                    .is_some_and(|m| matches!(m.shape, TypeShape::Literal(_)))
            });
            if shared {
                return Some(name.clone());
            }
        }
        None
    }

    fn resolved_shape(&self, name: &str) -> Option<TypeShape> {
        self.program.shape_of(name).ok()
    }

    fn annotate_decl(&self, name: &str, schema: &mut Schema) {
        if self.options.js_doc == JsDocPolicy::None {
            return;
        }
        if let Some(doc) = self.program.doc_of(name) {
            self.annotate(&doc, schema);
        }
    }

    fn annotate_member(&self, member: &MemberShape, schema: &mut Schema) {
        if self.options.js_doc == JsDocPolicy::None {
            return;
        }
        if let Some(doc) = &member.doc {
            self.annotate(doc, schema);
        }
    }

    fn annotate(&self, doc: &DocInfo, schema: &mut Schema) {
        if !doc.description.is_empty() {
            schema.description = Some(doc.description.clone());
        }
        if self.options.js_doc != JsDocPolicy::Extended {
            return;
        }
        if let Some(value) = doc.tag("default") {
            schema.default = Some(parse_tag_value(value));
        }
        if doc.tag("deprecated").is_some() {
            schema.deprecated = true;
        }
        if let Some(title) = doc.tag("title") {
            schema.title = Some(title.to_string());
        }
        for tag in doc.tags.iter().filter(|t| t.name == "examples") {
            schema.examples.push(parse_tag_value(&tag.value));
        }
    }
}

/// Tag values are JSON when they parse as JSON, bare strings otherwise.
fn parse_tag_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}
