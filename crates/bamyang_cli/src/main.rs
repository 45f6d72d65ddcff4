//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bamyang_core` linkage and database bootstrap.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `bamyang_cli [config.json]`. Without an argument the `BAMYANG_*`
//! environment variables are used.

use bamyang_core::db::migrations::current_user_version;
use bamyang_core::db::open_with_config;
use bamyang_core::{init_logging_from_config, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("bamyang_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => StoreConfig::from_env(),
    };
    init_logging_from_config(&config)?;

    println!("bamyang_core ping={}", bamyang_core::ping());
    println!("bamyang_core version={}", bamyang_core::core_version());

    let conn = open_with_config(&config).map_err(|err| err.to_string())?;
    let version = current_user_version(&conn).map_err(|err| err.to_string())?;
    let mode = if config.db_path.is_some() { "file" } else { "memory" };
    println!("bamyang_core db_mode={mode} schema_version={version}");
    log::info!("event=cli_smoke module=cli status=ok schema_version={version}");
    Ok(())
}
