use sitesnap_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log to the state-dir file when possible, stderr otherwise.
    if logging::init().is_err() {
        logging::init_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("sitesnap error: {:#}", err);
        std::process::exit(1);
    }
}
