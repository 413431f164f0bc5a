pub mod draw;
pub mod show;
pub mod verify;

use fairdraw_core::RaffleError;

/// Pick the default log filter from the verbosity flags. `RUST_LOG` still
/// overrides it.
pub fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Initialise stderr logging.
pub fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Report a fatal error and exit non-zero.
pub fn fail(err: &RaffleError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
