use std::process::ExitCode;

use clap::Parser;
use neufw::cli::{Cli, execute_command, record_failure};
use neufw::error::full_message;
use neufw::logger::init_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings come first so the `logger` section can shape logging
    let (settings, load_error) = if cli.command.uses_settings() {
        match cli.load_settings() {
            Ok(settings) => (Some(settings), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    let logger_config = cli.logger_config(settings.as_ref());
    let console = logger_config.console.enabled;
    let logging = match init_logger(logger_config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Logger initialization error: {}", e);
            false
        }
    };

    let result = match load_error {
        Some(e) => Err(e),
        None => execute_command(&cli, settings.as_ref(), &mut std::io::stdout().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            record_failure(&cli, settings.as_ref(), &e);
            if !(logging && console) {
                eprintln!("Error: {}", full_message(&e));
            }
            ExitCode::FAILURE
        }
    }
}
