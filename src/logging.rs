//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Logging setup

use tracing_subscriber::EnvFilter;

/// Log level for a `-v` count. `RUST_LOG` takes precedence when set.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Sends logs to stderr so stdout only carries passwords.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pairpass={}", level_for(verbosity))));
    // a subscriber may already be installed, e.g. when tests initialise twice
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
