//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Moneta - Self-hosted personal finance backend
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "Self-hosted personal finance backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "moneta.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set MONETA_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, size, counts)
    Status,

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an API key from MONETA_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },

    /// Manage users (add, list)
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Manage accounts (add, list)
    Accounts {
        #[command(subcommand)]
        action: Option<AccountsAction>,
    },

    /// Import a bank statement (CSV, XLS, or XLSX)
    Import {
        /// Statement file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Account to import into
        #[arg(short, long)]
        account: i64,

        /// MIME type override (auto-detected from extension if not specified)
        #[arg(long)]
        mime: Option<String>,
    },

    /// List transactions
    Transactions {
        /// Filter by account
        #[arg(short, long)]
        account: Option<i64>,

        /// Filter by category (e.g. groceries, transport)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// Add a user
    Add {
        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },

    /// List users
    List,
}

#[derive(Subcommand)]
pub enum AccountsAction {
    /// Add an account
    Add {
        /// Account name
        #[arg(short, long)]
        name: String,

        /// Bank designator (e.g. revolut, wise)
        #[arg(short, long)]
        bank: String,

        /// Owning user id
        #[arg(short, long)]
        user: Option<i64>,

        /// Account currency (ISO 4217 code, e.g. EUR)
        #[arg(short, long)]
        currency: Option<String>,
    },

    /// List accounts
    List,
}
