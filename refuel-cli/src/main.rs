//! Entry point for the `refuel` command-line interface.
#![forbid(unsafe_code)]

use refuel_cli::CliError;

#[expect(clippy::print_stderr, reason = "the binary reports failures on stderr")]
fn main() {
    match refuel_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("refuel: {err}");
            std::process::exit(1);
        }
    }
}
