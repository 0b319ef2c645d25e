//! Server command implementation

use std::path::Path;

use anyhow::Result;
use nestegg_core::settings::HealthSettings;

use super::open_db;

/// Parse comma-separated API keys
pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    settings: HealthSettings,
) -> Result<()> {
    println!("🚀 Starting Nestegg web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!("   Month starts on day {}", settings.month_start_day);

    let api_keys = parse_api_keys(&std::env::var("NESTEGG_API_KEYS").unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!("   ⚠️  No API keys configured: every /api request except /api/health will be rejected");
        println!("      Set NESTEGG_API_KEYS or pass --no-auth for local use");
    } else {
        println!(
            "   🔑 API keys: {} configured (NESTEGG_API_KEYS)",
            api_keys.len()
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = nestegg_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    nestegg_server::serve_with_config(db, settings, host, port, config).await?;

    Ok(())
}
