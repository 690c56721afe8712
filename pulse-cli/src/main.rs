//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use pulse_cli::CliError;

fn main() {
    env_logger::init();
    match pulse_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("pulse: {err}");
            std::process::exit(1);
        }
    }
}
