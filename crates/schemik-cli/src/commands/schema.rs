use std::fs;
use std::path::{Path, PathBuf};

use schemik_lib::config::{CompilerConfig, Profile};
use schemik_lib::program::load_program;
use schemik_lib::schema::{extract, ExtractOptions, TypeRequest};

use super::report_error;

pub struct SchemaArgs {
    pub file: PathBuf,
    pub types: Vec<String>,
    pub profile: Profile,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: SchemaArgs) {
    let root = args
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = CompilerConfig::new(root);

    let program = match load_program(std::slice::from_ref(&args.file), &config) {
        Ok(program) => program,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };
    for warning in program.warnings() {
        eprint!("{}", warning.render_colored(args.color));
    }

    let request = if args.types.is_empty() {
        TypeRequest::Wildcard
    } else {
        TypeRequest::names(args.types.iter().cloned())
    };
    let document = match extract(&program, &request, &ExtractOptions::from(args.profile)) {
        Ok(document) => document,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };

    let rendered = if args.compact {
        serde_json::to_string(&document)
    } else {
        serde_json::to_string_pretty(&document)
    };
    let rendered = match rendered {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot serialize schema: {e}");
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered + "\n") {
                eprintln!("error: cannot write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => println!("{rendered}"),
    }
}
