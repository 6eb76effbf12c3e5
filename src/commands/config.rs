//! `config show`: display the effective configuration.

use std::path::Path;

use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::{AuthType, Config};
use crate::error::Result;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn credential_status(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| mask_sensitive_value(value))
}

/// Show current configuration
pub fn cmd_config_show(path: Option<&Path>, as_json: bool) -> Result<()> {
    let config = Config::read(path)?;
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);
    let base_url = config.base_url_string().ok();
    let problem = config.validate().err().map(|e| e.to_string());

    if as_json {
        let output = json!({
            "subdomain": config.subdomain,
            "base_url": base_url,
            "user": config.user,
            "auth_type": config.auth_type.to_string(),
            "token_configured": !config.token.is_empty(),
            "password_configured": !config.password.is_empty(),
            "display_limit": config.display_limit,
            "timeout": config.timeout,
            "valid": problem.is_none(),
            "config_file": config_path.to_string_lossy(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let not_configured = || "not configured".dimmed().to_string();
    let or_missing = |value: &str| {
        if value.is_empty() {
            not_configured()
        } else {
            value.to_string()
        }
    };

    println!("{}\n", "Configuration:".cyan().bold());
    println!("{}: {}", "subdomain".cyan(), or_missing(&config.subdomain));
    println!(
        "{}: {}",
        "base_url".cyan(),
        base_url.unwrap_or_else(not_configured)
    );
    println!("{}: {}", "user".cyan(), or_missing(&config.user));
    println!("{}: {}", "auth_type".cyan(), config.auth_type);

    let (field, secret) = match config.auth_type {
        AuthType::Token => ("token", &config.token),
        AuthType::Password => ("password", &config.password),
    };
    println!(
        "{}: {}",
        field.cyan(),
        credential_status(secret).unwrap_or_else(not_configured)
    );
    println!("{}: {}", "display_limit".cyan(), config.display_limit);
    println!("{}: {}s", "timeout".cyan(), config.timeout);

    println!();
    match problem {
        Some(problem) => println!("{} {}", "invalid:".red().bold(), problem),
        None => println!("{}", "valid".green()),
    }
    println!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    );

    Ok(())
}
