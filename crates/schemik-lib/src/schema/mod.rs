//! JSON Schema generation from compiled programs.

mod document;
mod extract;

#[cfg(test)]
mod extract_tests;

pub use document::{Discriminator, Items, Schema, SchemaDocument, DRAFT07};
pub use extract::{extract, Expose, ExtractOptions, FunctionPolicy, JsDocPolicy, TypeRequest};
