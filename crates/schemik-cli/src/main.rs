mod cli;
mod commands;

use cli::{build_cli, CheckParams, GenerateParams, SchemaParams};

fn main() {
    let matches = build_cli().get_matches();

    let filter = if matches.get_flag("debug") {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("schema", m)) => {
            let params = SchemaParams::from_matches(m);
            commands::schema::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
