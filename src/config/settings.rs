//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::{DEFAULT_CODE_LENGTH, MIN_CODE_LENGTH};
use crate::infrastructure::repositories::DEFAULT_MAX_CODE_ATTEMPTS;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Invite link configuration
    pub invites: InviteSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

/// Invite link configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteSettings {
    /// Length of generated invite codes
    pub code_length: usize,

    /// Attempts at generating an unused code before giving up
    pub max_code_attempts: u32,

    /// Whether a successful join deactivates the invite
    pub single_use: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".into(),
                port: 3000,
            },
            cors: CorsSettings {
                allowed_origins: vec!["http://localhost:3000".into()],
            },
            invites: InviteSettings::default(),
            environment: "development".into(),
        }
    }
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            single_use: false,
        }
    }
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the invite code length is too short.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let defaults = Self::default();
        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port)?
            .set_default("cors.allowed_origins", defaults.cors.allowed_origins)?
            .set_default("invites.code_length", defaults.invites.code_length as u64)?
            .set_default("invites.max_code_attempts", defaults.invites.max_code_attempts)?
            .set_default("invites.single_use", defaults.invites.single_use)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    /// Check settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.invites.code_length < MIN_CODE_LENGTH {
            return Err(ConfigError::Message(format!(
                "Invite code length must be at least {} characters to resist guessing. Current length: {}",
                MIN_CODE_LENGTH, self.invites.code_length
            )));
        }
        if self.invites.max_code_attempts == 0 {
            return Err(ConfigError::Message(
                "invites.max_code_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerSettings {
    /// Get the socket address for binding.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
