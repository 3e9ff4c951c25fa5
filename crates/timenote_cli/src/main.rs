//! TimeNote command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration (environment, then flags) and start logging.
//! - Open the blob store once and hand the note store to the command.
//!
//! # Invariants
//! - Storage problems never abort the program; the session falls back to an
//!   in-memory store and says so.

mod app;
mod cli;
mod render;
mod session;

use clap::Parser;
use cli::{Cli, Command};
use log::{error, warn};
use rusqlite::Connection;
use std::io;
use std::process::ExitCode;
use timenote_core::db::open_db;
use timenote_core::{
    init_logging, AppConfig, BlobNotePersistence, BlobStore, LogLevel, MemoryBlobStore,
    NoteStore, SqliteBlobStore,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("timenote: {message}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("timenote: logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            error!(
                "event=cli_start module=cli status=error error_code=db_unavailable error={err}"
            );
            eprintln!(
                "timenote: cannot open {} ({err}); changes will not be saved",
                config.db_path.display()
            );
            None
        }
    };
    let blobs = blob_store(conn.as_ref());
    let mut store = NoteStore::open(BlobNotePersistence::with_key(
        blobs,
        config.storage_key.clone(),
    ));

    let command = cli.command.unwrap_or(Command::List);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match app::execute(command, &mut store, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("timenote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    apply_flags(config, cli)
}

/// Flags win over the environment and are held to the same rules.
fn apply_flags(mut config: AppConfig, cli: &Cli) -> Result<AppConfig, String> {
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(key) = cli.key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
        config.storage_key = key.to_string();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.parse::<LogLevel>().map_err(|err| err.to_string())?;
    }
    if let Some(dir) = &cli.log_dir {
        if !dir.is_absolute() {
            return Err(format!(
                "--log-dir: log directory must be absolute, got `{}`",
                dir.display()
            ));
        }
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}

fn blob_store(conn: Option<&Connection>) -> Box<dyn BlobStore + '_> {
    match conn.map(SqliteBlobStore::try_new) {
        Some(Ok(store)) => Box::new(store),
        Some(Err(err)) => {
            warn!("event=cli_start module=cli status=degraded error={err}");
            Box::new(MemoryBlobStore::new())
        }
        None => Box::new(MemoryBlobStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::apply_flags;
    use crate::cli::Cli;
    use clap::Parser;
    use timenote_core::{AppConfig, LogLevel};

    fn flags(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("timenote").chain(args.iter().copied()))
            .expect("flags should parse")
    }

    #[test]
    fn relative_log_dir_flag_is_rejected() {
        let err = apply_flags(AppConfig::default(), &flags(&["--log-dir", "logs"]))
            .expect_err("relative log dir must be rejected");
        assert!(err.contains("must be absolute"));
    }

    #[test]
    fn flags_override_environment_values() {
        let log_dir = std::env::temp_dir().join("timenote-logs");
        let log_dir_arg = log_dir.to_string_lossy().into_owned();
        let config = apply_flags(
            AppConfig::default(),
            &flags(&["--key", "other", "--log-level", "warning", "--log-dir", &log_dir_arg]),
        )
        .expect("absolute flags should apply");

        assert_eq!(config.storage_key, "other");
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir.as_deref(), Some(log_dir.as_path()));
    }
}
