use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::Path;

use rust_passgen::cli::handlers::{self, Context};
use rust_passgen::cli::{menu, Args};
use rust_passgen::core::{Config, PassGen};
use rust_passgen::db;
use rust_passgen::generators::PasswordGenerator;
use rust_passgen::logging;

fn main() -> Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load().context("invalid configuration")?;
    logging::init(&config).context("failed to initialise logging")?;
    log::debug!("Loaded config: {:?}", config);

    let location = args.db.clone().unwrap_or_else(|| config.database_url.clone());
    let db = db::init_db(&location)
        .with_context(|| format!("failed to open password store at '{}'", location))?;

    let service = PassGen::new(db, PasswordGenerator::new(config.substitution_table.clone()));
    log::info!("Using {} store at '{}'", service.get_db_ref().get_backend_type(), location);
    log::debug!("Substitution table: {}", service.generator().table());
    let owner = args.owner.clone().or_else(|| config.default_owner.clone());
    let ctx = Context {
        service: &service,
        owner: owner.as_deref(),
        json: args.json,
    };

    let outcome = match args.command {
        Some(command) => handlers::dispatch(&ctx, command),
        None => menu::run_cli_menu(&ctx, config.default_password_length),
    };

    service.close().context("failed to close password store")?;
    outcome.map_err(|e| anyhow::anyhow!("{}", e))
}
