//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notekeep_core` linkage and the configured store end to end.
//! - Keep output deterministic `key=value` lines for quick local checks.

use notekeep_core::db::open_db;
use notekeep_core::{init_logging, AppConfig, AppState, SqliteKvStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    println!("notekeep_core version={}", notekeep_core::core_version());

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_status module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteKvStore::try_new(&conn)?;
    let mut app = AppState::new(store, &config.namespace);
    app.init();

    println!("store path={}", config.db_path.display());
    println!("store namespace={}", config.namespace);
    match app.auth().user() {
        Some(user) => {
            println!("session user_id={}", user.id);
            println!("session notes={}", app.notes().notes().len());
        }
        None => println!("session none"),
    }
    println!("route /={}", app.navigate("/").location());
    Ok(())
}
