//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! `from_matches()` pulls the relevant fields and `Into<*Args>` bridges to
//! the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;
use schemik_lib::config::Profile;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::schema::SchemaArgs;

pub struct GenerateParams {
    pub manifest: PathBuf,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest: manifest_path(m),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            manifest: p.manifest,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub manifest: PathBuf,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest: manifest_path(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            manifest: p.manifest,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SchemaParams {
    pub file: PathBuf,
    pub types: Vec<String>,
    pub profile: Profile,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub color: ColorChoice,
}

impl SchemaParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m
                .get_one::<PathBuf>("file")
                .cloned()
                .unwrap_or_default(),
            types: m
                .get_many::<String>("types")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            profile: parse_profile(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<SchemaParams> for SchemaArgs {
    fn from(p: SchemaParams) -> Self {
        Self {
            file: p.file,
            types: p.types,
            profile: p.profile,
            output: p.output,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

fn manifest_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("manifest")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("schemik.json"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_profile(m: &ArgMatches) -> Profile {
    match m.get_one::<String>("profile").map(String::as_str) {
        Some("inlined") => Profile::Inlined,
        Some("strict") => Profile::Strict,
        _ => Profile::Standard,
    }
}
