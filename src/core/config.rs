//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.herald/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HeraldConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub hero: HeroConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HeroConfig {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub placeholder: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HERO_NAME: &str = "Simeon Akinrinola";
pub const DEFAULT_TAGLINE: &str = "High-end Frontend Developer. Interfaces crafted with intent.";
pub const DEFAULT_PLACEHOLDER: &str = "Ask my AI assistant anything about me...";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// Transport timeout; `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
    pub hero_name: String,
    pub tagline: String,
    pub placeholder: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.herald/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".herald").join("config.toml"))
}

/// Load config from `~/.herald/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HeraldConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HeraldConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HeraldConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HeraldConfig::default());
    }

    load_config_from(&path)
}

/// Load and parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<HeraldConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HeraldConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Herald Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://localhost:8000"   # Or set HERALD_BASE_URL env var
# timeout_secs = 30                    # Or set HERALD_TIMEOUT_SECS; unset = no client timeout

# [hero]
# name = "Simeon Akinrinola"
# tagline = "High-end Frontend Developer. Interfaces crafted with intent."
# placeholder = "Ask my AI assistant anything about me..."
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment overrides, read once so resolution stays testable.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("HERALD_BASE_URL").ok(),
            timeout_secs: std::env::var("HERALD_TIMEOUT_SECS").ok(),
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--base-url` flag (None = not specified).
pub fn resolve(
    config: &HeraldConfig,
    env: &EnvOverrides,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| env.base_url.clone())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → none. Zero means "no timeout".
    let timeout_secs = match env.timeout_secs.as_deref().map(str::parse::<u64>) {
        Some(Ok(secs)) => Some(secs),
        Some(Err(e)) => {
            warn!("Ignoring invalid HERALD_TIMEOUT_SECS: {}", e);
            config.service.timeout_secs
        }
        None => config.service.timeout_secs,
    };
    let timeout = timeout_secs
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    ResolvedConfig {
        base_url,
        timeout,
        hero_name: config
            .hero
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_HERO_NAME.to_string()),
        tagline: config
            .hero
            .tagline
            .clone()
            .unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
        placeholder: config
            .hero
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&HeraldConfig::default(), &EnvOverrides::default(), None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, None);
        assert_eq!(resolved.hero_name, DEFAULT_HERO_NAME);
        assert_eq!(resolved.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HeraldConfig {
            service: ServiceConfig {
                base_url: Some("https://api.example.com".to_string()),
                timeout_secs: Some(15),
            },
            hero: HeroConfig {
                name: Some("Ada".to_string()),
                ..Default::default()
            },
        };
        let resolved = resolve(&config, &EnvOverrides::default(), None);
        assert_eq!(resolved.base_url, "https://api.example.com");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(15)));
        assert_eq!(resolved.hero_name, "Ada");
        assert_eq!(resolved.tagline, DEFAULT_TAGLINE);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = HeraldConfig {
            service: ServiceConfig {
                base_url: Some("http://from-config".to_string()),
                timeout_secs: Some(15),
            },
            ..Default::default()
        };
        let env = EnvOverrides {
            base_url: Some("http://from-env".to_string()),
            timeout_secs: Some("3".to_string()),
        };

        let resolved = resolve(&config, &env, None);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(3)));

        let resolved = resolve(&config, &env, Some("http://from-cli"));
        assert_eq!(resolved.base_url, "http://from-cli");
    }

    #[test]
    fn test_invalid_env_timeout_falls_back_to_config() {
        let config = HeraldConfig {
            service: ServiceConfig {
                timeout_secs: Some(20),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = EnvOverrides {
            timeout_secs: Some("soon".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &env, None);
        assert_eq!(resolved.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let env = EnvOverrides {
            timeout_secs: Some("0".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&HeraldConfig::default(), &env, None);
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[service]
base_url = "http://192.168.1.100:8000"
timeout_secs = 30

[hero]
name = "Akin"
tagline = "Builder."
"#;
        let config: HeraldConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
        assert_eq!(config.service.timeout_secs, Some(30));
        assert_eq!(config.hero.name.as_deref(), Some("Akin"));
        assert!(config.hero.placeholder.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[hero]
placeholder = "Ask away"
"#;
        let config: HeraldConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.hero.placeholder.as_deref(), Some("Ask away"));
        assert!(config.service.base_url.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("herald-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[service\nbase_url = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_generated_default_config_parses_as_empty() {
        let dir = std::env::temp_dir().join(format!("herald-default-{}", std::process::id()));
        let path = dir.join("config.toml");
        generate_default_config(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.service.base_url.is_none());
        assert!(config.hero.name.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
