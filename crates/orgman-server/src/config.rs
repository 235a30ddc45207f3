//! Server configuration loaded from the environment.

use orgman_auth::AuthConfig;
use orgman_db::DbConfig;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub http_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Build a configuration from `ORGMAN_*` environment variables,
    /// falling back to development defaults.
    ///
    /// `ORGMAN_JWT_SECRET` has no default: token signing must not fall
    /// back to a well-known value.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = std::env::var("ORGMAN_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("ORGMAN_JWT_SECRET must be set"))?;

        let auth = AuthConfig {
            jwt_secret,
            login_token_ttl_secs: env_or("ORGMAN_LOGIN_TOKEN_TTL_SECS", "1800").parse()?,
            default_token_ttl_secs: env_or("ORGMAN_DEFAULT_TOKEN_TTL_SECS", "900").parse()?,
            pepper: std::env::var("ORGMAN_PASSWORD_PEPPER").ok(),
            min_password_length: env_or("ORGMAN_MIN_PASSWORD_LENGTH", "8").parse()?,
        };

        let db = DbConfig {
            url: env_or("ORGMAN_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("ORGMAN_DB_NAMESPACE", "orgman"),
            database: env_or("ORGMAN_DB_DATABASE", "master"),
            username: env_or("ORGMAN_DB_USERNAME", "root"),
            password: env_or("ORGMAN_DB_PASSWORD", "root"),
        };

        Ok(Self {
            http_addr: env_or("ORGMAN_HTTP_ADDR", "0.0.0.0:8080"),
            db,
            auth,
        })
    }
}
