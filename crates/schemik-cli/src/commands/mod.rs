pub mod check;
pub mod generate;
pub mod schema;

use schemik_lib::Error;

/// Prints a fatal error the way every command does, diagnostics with spans
/// when the failure carries them.
pub fn report_error(err: &Error, color: bool) {
    match err {
        Error::Compilation(failures) => {
            for file in failures {
                eprint!("{}", file.render_colored(color));
            }
            eprintln!("error: {err}");
        }
        other => eprintln!("error: {other}"),
    }
}
