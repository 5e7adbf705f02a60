use common::config::StorageConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// The single shared admin password. No default; must be provided.
    pub admin_password: String,
    /// Secret the session tokens are signed with. No default; must be provided.
    pub session_secret: String,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Session lifetime in hours. The cookie Max-Age matches.
    pub session_ttl_hours: i64,
    /// Set the `Secure` attribute on the session cookie. Enable behind TLS.
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://./data/vitrine.db?mode=rwc")?
            .set_default("auth.cookie_name", "admin_session")?
            .set_default("auth.session_ttl_hours", 24)?
            .set_default("auth.secure_cookies", false)?
            .set_default("storage.backend", "filesystem")?
            .set_default("storage.bucket", "projects")?
            .set_default("storage.public_base_url", "http://localhost:3000/assets")?
            .set_default("storage.root", "./data/storage")?
            .set_default("storage.endpoint", "")?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.access_key", "")?
            .set_default("storage.secret_key", "")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., VITRINE__AUTH__ADMIN_PASSWORD)
            .add_source(Environment::with_prefix("VITRINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
