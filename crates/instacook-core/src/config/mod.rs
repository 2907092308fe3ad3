use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    pub run_migrations: bool,
}

/// Token signing and lifetime settings.
///
/// The activation salt is appended to the JWT secret when signing account
/// activation links, so an activation token can never pass as an access token.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub activation_salt: String,
    pub activation_hours: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("activation_salt", &"<redacted>")
            .field("activation_hours", &self.activation_hours)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "http://host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the public origin URL, without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.trim_end_matches('/').to_string()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    pub default_per_page: i64,
    pub max_per_page: i64,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with the built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 4)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.access_token_minutes", 15)?
            .set_default("auth.refresh_token_days", 30)?
            .set_default("auth.activation_salt", "activate")?
            .set_default("auth.activation_hours", 24)?
            .set_default("logging.level", "debug")?
            .set_default("pagination.default_per_page", 20)?
            .set_default("pagination.max_per_page", 100)?)
    }

    /// ## Summary
    /// Loads configuration from environment variables and `config.toml` into a `Settings`.
    ///
    /// Environment variables use the `INSTACOOK_` prefix and `__` between nested keys,
    /// e.g. `INSTACOOK_AUTH__JWT_SECRET`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment wins over the file
            .add_source(
                config::Environment::with_prefix("INSTACOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
