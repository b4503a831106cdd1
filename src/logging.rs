//! Logger setup for the binary.

use env_logger::Env;

fn level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes `env_logger`. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbose: u8) {
    let level = level(verbose);
    let filter = format!("nearfind={level},nearfind_types={level}");
    env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}
