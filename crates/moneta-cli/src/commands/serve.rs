//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting Moneta API server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let mut config = moneta_server::ServerConfig::from_env();
    config.require_auth = !no_auth;

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if config.api_keys.is_empty() {
        println!("   ❌ Authentication: enabled but MONETA_API_KEYS is not set");
        println!("      All requests will be rejected until keys are configured");
    } else {
        println!(
            "   🔑 API keys: {} configured (MONETA_API_KEYS)",
            config.api_keys.len()
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    moneta_server::serve(db, host, port, config).await
}
