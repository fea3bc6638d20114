use std::path::PathBuf;

use schemik_lib::config::ProjectConfig;
use schemik_lib::program::{expand_roots, load_program};

use super::report_error;

pub struct CheckArgs {
    pub manifest: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut config = match ProjectConfig::load(&args.manifest) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };
    if args.strict {
        config.compiler.strict = true;
    }

    let program = expand_roots(&config.compiler, &config.include, &config.exclude)
        .and_then(|roots| load_program(&roots, &config.compiler));
    let program = match program {
        Ok(program) => program,
        Err(e) => {
            report_error(&e, args.color);
            std::process::exit(1);
        }
    };

    for warning in program.warnings() {
        eprint!("{}", warning.render_colored(args.color));
    }

    // Silent on success (like cargo check)
}
