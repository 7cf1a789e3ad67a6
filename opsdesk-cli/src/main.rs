mod cli;
mod commands;
mod paths;
mod prompt;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use cli::Cli;

/// Logs to `latest.log` in the cache dir. Logging is best effort: a failure
/// here is reported and the command still runs.
fn init_logging(verbose: bool) {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        eprintln!("warning: no home directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("warning: cannot write {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::info!("opsdesk starting against {}", cli.url);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e.message());
            ExitCode::FAILURE
        }
    }
}
