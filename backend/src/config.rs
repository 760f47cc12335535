use std::path::PathBuf;

use lettre::message::Mailbox;
use thiserror::Error;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-4o-mini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be a valid port number, got {1:?}")]
    InvalidPort(&'static str, String),
    #[error("{0} is not a valid email address: {1}")]
    InvalidAddress(&'static str, String),
    #[error("{0} is set but {1} is missing")]
    Incomplete(&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("development") => Environment::Development,
            Some("staging") => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: Mailbox,
    pub contact_to: Mailbox,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub frontend_url: String,
    pub frontend_dist: PathBuf,
    /// `None` runs the contact form in log-only mode.
    pub smtp: Option<SmtpConfig>,
    /// `None` makes every chat request answer with the fallback reply.
    pub chat: Option<ChatConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let port = parse_port("PORT", get("PORT"), 3000)?;
        let environment = Environment::parse(get("ENVIRONMENT").as_deref());
        let frontend_url = get("FRONTEND_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let frontend_dist = get("FRONTEND_DIST")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("frontend/dist"));

        let smtp = match get("SMTP_SERVER") {
            Some(server) => {
                let username = get("SMTP_USERNAME").ok_or(ConfigError::Incomplete("SMTP_SERVER", "SMTP_USERNAME"))?;
                let password = get("SMTP_PASSWORD").ok_or(ConfigError::Incomplete("SMTP_SERVER", "SMTP_PASSWORD"))?;
                let from = get("SMTP_FROM").unwrap_or_else(|| username.clone());
                let contact_to = get("CONTACT_TO").ok_or(ConfigError::Incomplete("SMTP_SERVER", "CONTACT_TO"))?;
                Some(SmtpConfig {
                    server,
                    port: parse_port("SMTP_PORT", get("SMTP_PORT"), 587)?,
                    username,
                    password,
                    from: parse_mailbox("SMTP_FROM", &from)?,
                    contact_to: parse_mailbox("CONTACT_TO", &contact_to)?,
                })
            }
            None => None,
        };

        let chat = get("OPENROUTER_API_KEY").map(|api_key| ChatConfig {
            api_key,
            endpoint: get("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string()),
            model: get("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        });

        Ok(Self {
            port,
            environment,
            frontend_url,
            frontend_dist,
            smtp,
            chat,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_port(key: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidPort(key, v)),
        None => Ok(default),
    }
}

fn parse_mailbox(key: &'static str, value: &str) -> Result<Mailbox, ConfigError> {
    value
        .parse::<Mailbox>()
        .map_err(|e| ConfigError::InvalidAddress(key, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.frontend_dist, PathBuf::from("frontend/dist"));
        assert!(config.smtp.is_none());
        assert!(config.chat.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort("PORT", _)));
    }

    #[test]
    fn smtp_requires_contact_address() {
        let err = config_from(&[
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_USERNAME", "site@example.com"),
            ("SMTP_PASSWORD", "secret"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete("SMTP_SERVER", "CONTACT_TO")));
    }

    #[test]
    fn smtp_from_falls_back_to_username() {
        let config = config_from(&[
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_USERNAME", "site@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("CONTACT_TO", "Enquiries <hello@example.com>"),
        ])
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.from.email.to_string(), "site@example.com");
        assert_eq!(smtp.contact_to.email.to_string(), "hello@example.com");
    }

    #[test]
    fn bad_contact_address_is_rejected() {
        let err = config_from(&[
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_USERNAME", "site@example.com"),
            ("SMTP_PASSWORD", "secret"),
            ("CONTACT_TO", "not an address"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress("CONTACT_TO", _)));
    }

    #[test]
    fn chat_defaults_and_blank_values() {
        let config = config_from(&[("OPENROUTER_API_KEY", "key"), ("CHAT_MODEL", "  ")]).unwrap();
        let chat = config.chat.unwrap();
        assert_eq!(chat.endpoint, DEFAULT_CHAT_ENDPOINT);
        assert_eq!(chat.model, DEFAULT_CHAT_MODEL);
    }

    #[test]
    fn development_environment() {
        let config = config_from(&[("ENVIRONMENT", "development")]).unwrap();
        assert!(config.is_development());
    }
}
