use std::path::PathBuf;

use schemik_lib::config::ProjectConfig;
use schemik_lib::emit::Outcome;
use schemik_lib::pipeline;

use super::report_error;

pub struct GenerateArgs {
    pub manifest: PathBuf,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let config = match ProjectConfig::load(&args.manifest) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };

    let report = match pipeline::generate(&config) {
        Ok(report) => report,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };

    for warning in &report.warnings {
        eprint!("{warning}");
    }
    for entry in &report.entries {
        match &entry.error {
            Some(message) => eprintln!("error: entry `{}`: {}", entry.name, message),
            None => println!("{}: {}", entry.name, entry.output_file.display()),
        }
    }
    if report.outcome == Outcome::Skipped {
        eprintln!("declaration output is disabled; no artifacts were written");
    }

    if report.has_failures() {
        std::process::exit(1);
    }
}
