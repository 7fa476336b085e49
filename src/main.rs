use std::process::exit;

use clap::ArgMatches;
use log::LevelFilter;
use pipelog::logger;
use pipelog::relay::{self, error::RelayError, RelayConfig, Shutdown};

mod clidef;

static VERSION: &str = "0.1.0";
static LOGGER: logger::StderrLogger = logger::StderrLogger;

/// Set logger
fn set_logger(params: &ArgMatches) {
    if let Err(err) = log::set_logger(&LOGGER).map(|()| {
        log::set_max_level(match params.get_count("debug") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            2.. => LevelFilter::max(),
        })
    }) {
        eprintln!("{err}")
    }
}

fn main() {
    let params = clidef::cli(VERSION).get_matches();
    set_logger(&params);

    if let Err(err) = relay::signal::install() {
        log::error!("Unable to install shutdown signal handlers: {err}");
        exit(1);
    }

    let cfg = RelayConfig::resolve(
        params.get_one::<String>("pipe-path"),
        params.get_one::<String>("output-path"),
    );
    log::info!(
        "Relaying commands from {} into {}",
        cfg.pipe_path.display(),
        cfg.output_path.display()
    );

    match relay::run(&cfg) {
        Ok(Shutdown::Quit) => log::info!("Quit command received, shutting down"),
        Ok(Shutdown::Signaled) => log::info!("Interrupted, shutting down"),
        Err(err @ RelayError::PipeCreation(_)) => {
            log::error!("{err}");
            exit(1);
        }
        Err(err) => {
            log::error!("{err}");
            exit(2);
        }
    }
}
