//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so flags shared between commands stay identical.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction};

/// Project manifest path (positional, defaults to schemik.json).
pub fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .value_name("MANIFEST")
        .value_parser(value_parser!(PathBuf))
        .default_value("schemik.json")
        .help("Project manifest file")
}

/// Declaration file for one-off extraction (positional).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Declaration file to compile")
}

/// Requested type names (positional, repeatable).
pub fn types_arg() -> Arg {
    Arg::new("types")
        .value_name("TYPE")
        .num_args(0..)
        .help("Type names to extract (every exported type if omitted)")
}

/// Extraction profile (--profile).
pub fn profile_arg() -> Arg {
    Arg::new("profile")
        .long("profile")
        .value_name("PROFILE")
        .default_value("standard")
        .value_parser(["standard", "inlined", "strict"])
        .help("Extraction profile")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file instead of stdout")
}

/// Debug logging to stderr (--debug).
pub fn debug_arg() -> Arg {
    Arg::new("debug")
        .long("debug")
        .global(true)
        .action(ArgAction::SetTrue)
        .help("Enable debug logging on stderr")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}
