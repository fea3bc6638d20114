//! Output emission: redaction, declaration printing, and the commit gate.

mod declaration;
mod gate;
mod redact;

#[cfg(test)]
mod declaration_tests;
#[cfg(test)]
mod gate_tests;

pub use declaration::{emit_declarations, print_declarations, Outcome};
pub use gate::{Gate, OutputArtifact};
pub use redact::{redact_private_members, rewrite_tokens};
