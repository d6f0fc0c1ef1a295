//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Upstream instance URL.
pub const ENV_URL: &str = "SERVICENOW_URL";
/// Upstream basic-auth username.
pub const ENV_USER: &str = "SERVICENOW_USER";
/// Upstream basic-auth password.
pub const ENV_PASSWORD: &str = "SERVICENOW_PASSWORD";
/// Listener port.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// `lookup` returns the value of a variable, if set. Taking it as a closure
/// keeps the overlay testable without touching the real process environment.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_URL) {
        config.upstream.base_url = url;
    }
    if let Some(user) = lookup(ENV_USER) {
        config.upstream.username = user;
    }
    if let Some(password) = lookup(ENV_PASSWORD) {
        config.upstream.password = password;
    }
    if let Some(port) = lookup(ENV_PORT) {
        // An empty PORT falls back to the configured value.
        if !port.is_empty() {
            config.listener.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
    }
    Ok(())
}

/// Build the effective configuration.
///
/// Order: defaults, then the optional TOML file, then `.env`, then the
/// process environment. Hard validation errors abort; warnings are returned
/// for the caller to log.
pub fn load_config(path: Option<&Path>) -> Result<(GatewayConfig, Vec<ValidationError>), ConfigError> {
    let mut config = match path {
        Some(p) => load_file(p)?,
        None => GatewayConfig::default(),
    };

    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();

    apply_env(&mut config, |key| std::env::var(key).ok())?;

    let (errors, warnings): (Vec<_>, Vec<_>) = validate_config(&config)
        .into_iter()
        .partition(ValidationError::is_fatal);

    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok((config, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_credentials_and_port() {
        let mut config = GatewayConfig::default();
        apply_env(
            &mut config,
            env(&[
                (ENV_URL, "https://dev1.service-now.com"),
                (ENV_USER, "admin"),
                (ENV_PASSWORD, "secret"),
                (ENV_PORT, "8088"),
            ]),
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "https://dev1.service-now.com");
        assert_eq!(config.upstream.username, "admin");
        assert_eq!(config.upstream.password, "secret");
        assert_eq!(config.listener.port, 8088);
    }

    #[test]
    fn test_missing_env_keeps_defaults() {
        let mut config = GatewayConfig::default();
        apply_env(&mut config, env(&[])).unwrap();
        assert_eq!(config, GatewayConfig::default());
    }

    #[test]
    fn test_empty_port_falls_back() {
        let mut config = GatewayConfig::default();
        apply_env(&mut config, env(&[(ENV_PORT, "")])).unwrap();
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let mut config = GatewayConfig::default();
        let err = apply_env(&mut config, env(&[(ENV_PORT, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "http"));
        assert_eq!(err.to_string(), "Invalid PORT value 'http'");
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("problem-gateway-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[listener]\nport = 4100\n\n[http]\nmax_body_bytes = 512").unwrap();

        let config = load_file(&path).unwrap();
        assert_eq!(config.listener.port, 4100);
        assert_eq!(config.http.max_body_bytes, 512);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_file_parse_error() {
        let path = std::env::temp_dir().join(format!("problem-gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "listener = 3").unwrap();

        assert!(matches!(load_file(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_file(&path);
    }
}
