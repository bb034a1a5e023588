use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Upper bound for a single repository call before it is reported as cancelled.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            query_timeout_secs: default_query_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_query_timeout() -> u64 { 15 }

/// Bearer token settings and the single operator account allowed to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_username")]
    pub username: String,
    /// argon2 PHC string; an empty value disables `/auth/login`.
    #[serde(default)]
    pub password_hash: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            username: default_username(),
            password_hash: String::new(),
        }
    }
}

fn default_token_ttl_hours() -> i64 { 12 }

/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 8760;
fn default_username() -> String { "admin".into() }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_page_size: default_page_size(), max_page_size: default_max_page_size() }
    }
}

fn default_page_size() -> u64 { 20 }
fn default_max_page_size() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of the compact human format.
    #[serde(default)]
    pub json: bool,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults plus
    /// environment variables when the file does not exist.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.pagination.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.port = port.parse().map_err(|_| anyhow!("SERVER_PORT is not a valid port: {port}"))?;
        }
        self.normalize()
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 || self.query_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(anyhow!("auth.token_ttl_hours must be within 1..={MAX_TOKEN_TTL_HOURS}"));
        }
        Ok(())
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(anyhow!("pagination sizes must be positive"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(anyhow!("pagination.default_page_size must be <= max_page_size"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file_with_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/characters"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.query_timeout_secs, 15);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.auth.username, "admin");
        assert_eq!(cfg.pagination.default_page_size, 20);
        assert_eq!(cfg.pagination.max_page_size, 100);
        assert!(!cfg.logging.json);
    }

    #[test]
    fn database_validation() {
        let mut db = DatabaseConfig::default();
        assert!(db.validate().is_err());

        db.url = "mysql://localhost/x".into();
        assert!(db.validate().is_err());

        db.url = "postgres://localhost/x".into();
        assert!(db.validate().is_ok());

        db.max_connections = 1;
        assert!(db.validate().is_err());
    }

    #[test]
    fn auth_requires_secret() {
        let mut auth = AuthConfig::default();
        assert!(auth.validate().is_err());
        auth.jwt_secret = "s3cret".into();
        assert!(auth.validate().is_ok());
        auth.token_ttl_hours = 0;
        assert!(auth.validate().is_err());
    }

    #[test]
    fn auth_ttl_has_an_upper_bound() {
        let mut auth = AuthConfig { jwt_secret: "s3cret".into(), ..Default::default() };
        auth.token_ttl_hours = MAX_TOKEN_TTL_HOURS;
        assert!(auth.validate().is_ok());
        auth.token_ttl_hours = MAX_TOKEN_TTL_HOURS + 1;
        assert!(auth.validate().is_err());
        auth.token_ttl_hours = 1_000_000_000_000;
        assert!(auth.validate().is_err());
    }

    #[test]
    fn pagination_default_cannot_exceed_max() {
        let p = PaginationConfig { default_page_size: 50, max_page_size: 10 };
        assert!(p.validate().is_err());
        assert!(PaginationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut s = ServerConfig { host: " ".into(), port: 0 };
        assert!(s.normalize().is_err());
        s.port = 8080;
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
    }
}
