//! Moneta CLI - Personal finance backend
//!
//! Usage:
//!   moneta init                          Initialize database
//!   moneta users add --email a@b.c --name A
//!   moneta accounts add --name Main --bank revolut
//!   moneta import --file statement.csv --account 1
//!   moneta serve --port 3000             Start the REST API server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(UsersAction::List) => commands::cmd_users_list(&db),
                Some(UsersAction::Add { email, name }) => {
                    commands::cmd_users_add(&db, &email, &name)
                }
            }
        }
        Commands::Accounts { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(AccountsAction::List) => commands::cmd_accounts_list(&db),
                Some(AccountsAction::Add {
                    name,
                    bank,
                    user,
                    currency,
                }) => commands::cmd_accounts_add(&db, &name, &bank, user, currency.as_deref()),
            }
        }
        Commands::Import {
            file,
            account,
            mime,
        } => commands::cmd_import(&cli.db, &file, account, mime.as_deref(), cli.no_encrypt).await,
        Commands::Transactions {
            account,
            category,
            limit,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_transactions_list(&db, account, category.as_deref(), limit)
        }
    }
}
