//! Configuration loading and resolution
//!
//! Every value resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (bind address only)
//!
//! The two hosted-platform values (base URL and service key) have no
//! default: if neither CLI, environment, nor config file provides them,
//! startup fails with a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address when nothing else is configured
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5870";

/// Environment variable names
pub const ENV_BIND_ADDR: &str = "COMMDESK_BIND_ADDR";
pub const ENV_PLATFORM_URL: &str = "COMMDESK_PLATFORM_URL";
pub const ENV_PLATFORM_SERVICE_KEY: &str = "COMMDESK_PLATFORM_SERVICE_KEY";

/// Hosted-platform connection settings
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the hosted platform (tables + auth API live under it)
    pub base_url: String,
    /// Service key used for the platform's admin API and as the api key header
    pub service_key: String,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub platform: PlatformConfig,
}

/// Subset of values readable from the TOML config file
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub platform_url: Option<String>,
    pub platform_service_key: Option<String>,
}

/// Values supplied on the command line (parsed by the binary, passed in here)
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_addr: Option<String>,
    pub platform_url: Option<String>,
    pub platform_service_key: Option<String>,
    /// Explicit config file path; skips the platform-default search
    pub config_file: Option<PathBuf>,
}

/// Resolve the full application configuration.
///
/// Missing platform URL or service key is reported as a configuration
/// error at startup and is not recovered.
pub fn resolve_app_config(cli: &CliOverrides) -> Result<AppConfig> {
    let file = load_config_file(cli.config_file.clone())?;

    let bind_addr = resolve_value(
        cli.bind_addr.as_deref(),
        ENV_BIND_ADDR,
        file.bind_addr.as_deref(),
    )
    .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let bind_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|_| Error::Config(format!("Invalid bind address: {}", bind_addr)))?;

    let base_url = resolve_value(
        cli.platform_url.as_deref(),
        ENV_PLATFORM_URL,
        file.platform_url.as_deref(),
    )
    .ok_or_else(|| {
        Error::Config(format!(
            "Platform URL not configured (set {} or platform_url in the config file)",
            ENV_PLATFORM_URL
        ))
    })?;

    let service_key = resolve_value(
        cli.platform_service_key.as_deref(),
        ENV_PLATFORM_SERVICE_KEY,
        file.platform_service_key.as_deref(),
    )
    .ok_or_else(|| {
        Error::Config(format!(
            "Platform service key not configured (set {} or platform_service_key in the config file)",
            ENV_PLATFORM_SERVICE_KEY
        ))
    })?;

    Ok(AppConfig {
        bind_addr,
        platform: PlatformConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        },
    })
}

/// Resolve a single value: CLI > environment > config file
fn resolve_value(cli: Option<&str>, env_var: &str, file: Option<&str>) -> Option<String> {
    if let Some(v) = cli {
        return Some(v.to_string());
    }
    if let Ok(v) = std::env::var(env_var) {
        if !v.is_empty() {
            return Some(v);
        }
    }
    file.map(|v| v.to_string())
}

/// Load the TOML config file.
///
/// An explicit path that does not exist or fails to parse is an error.
/// A missing file at the default locations is not: resolution simply
/// falls through to CLI/env values.
fn load_config_file(explicit: Option<PathBuf>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(Error::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(TomlConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default configuration file path for the platform
fn default_config_path() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        // ~/.config/commdesk/config.toml first, then /etc/commdesk/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("commdesk").join("config.toml"));
        if let Some(path) = user_config {
            if path.exists() {
                return Some(path);
            }
        }
        let system_config = PathBuf::from("/etc/commdesk/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
        None
    } else {
        dirs::config_dir().map(|d| d.join("commdesk").join("config.toml"))
    }
}
