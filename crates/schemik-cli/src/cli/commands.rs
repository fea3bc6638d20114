//! Command builders for the CLI.
//!
//! Each command is built from the shared arg builders in `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("schemik")
        .about("JSON Schema generation from typed declaration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(debug_arg())
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(schema_command())
}

/// Run a full generation from a project manifest.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate every configured schema and declaration artifact")
        .override_usage(
            "\
  schemik generate
  schemik generate <MANIFEST>",
        )
        .after_help(
            r#"EXAMPLES:
  schemik generate                    # ./schemik.json
  schemik generate conf/schemik.json  # explicit manifest"#,
        )
        .arg(manifest_arg())
        .arg(color_arg())
}

/// Validate the project without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Compile and type-check the project without writing artifacts")
        .override_usage(
            "\
  schemik check
  schemik check <MANIFEST> [--strict]",
        )
        .after_help(
            r#"EXAMPLES:
  schemik check                       # diagnostics only
  schemik check --strict              # warnings become errors"#,
        )
        .arg(manifest_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// One-off extraction from a single declaration file.
pub fn schema_command() -> Command {
    Command::new("schema")
        .about("Extract a JSON Schema from one declaration file")
        .override_usage(
            "\
  schemik schema <FILE> [TYPE]...
  schemik schema <FILE> -o <OUT>",
        )
        .after_help(
            r#"EXAMPLES:
  schemik schema config.dcl                    # every exported type
  schemik schema config.dcl Config             # one named type
  schemik schema config.dcl --profile strict   # strict extraction
  schemik schema config.dcl -o config.schema.json"#,
        )
        .arg(file_arg())
        .arg(types_arg())
        .arg(profile_arg())
        .arg(output_file_arg())
        .arg(compact_arg())
        .arg(color_arg())
}
