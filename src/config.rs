use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Upper bound on a single request, including its database call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Allowed CORS origins, comma-separated in TODO_API__API__CORS_ALLOWED_ORIGINS.
    /// Empty by default: no cross-origin access.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:` for a throwaway database.
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_api_port() -> u16 { 9090 }
fn default_request_timeout() -> u64 { 30 }
fn default_db_path() -> String { "./todos.db".to_string() }
fn default_max_connections() -> u32 { 10 }
fn default_cors_allowed_origins() -> Vec<String> { Vec::new() }

pub const MEMORY_DB_PATH: &str = ":memory:";

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.api.port == 0 {
        anyhow::bail!("CONFIG ERROR: api.port must be non-zero");
    }

    if cfg.api.request_timeout_secs == 0 {
        anyhow::bail!("CONFIG ERROR: api.request_timeout_secs must be at least 1");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("CONFIG ERROR: database.max_connections must be at least 1");
    }

    // Validate database path directory exists
    if cfg.database.path != MEMORY_DB_PATH {
        if let Some(parent) = std::path::Path::new(&cfg.database.path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                anyhow::bail!(
                    "CONFIG ERROR: Database directory does not exist: {}",
                    parent.display()
                );
            }
        }
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

pub fn load() -> Result<Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(
            config::Environment::with_prefix("TODO_API")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.cors_allowed_origins")
                .try_parsing(true),
        )
        .set_default("api.bind", default_bind())?
        .set_default("api.port", i64::from(default_api_port()))?
        .set_default("api.request_timeout_secs", default_request_timeout() as i64)?
        .set_default("api.cors_allowed_origins", default_cors_allowed_origins())?
        .set_default("database.path", default_db_path())?
        .set_default("database.max_connections", i64::from(default_max_connections()))?
        .build()?
        .try_deserialize()?;

    validate(&cfg)?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            api: ApiConfig {
                bind: default_bind(),
                port: default_api_port(),
                request_timeout_secs: default_request_timeout(),
                cors_allowed_origins: default_cors_allowed_origins(),
            },
            database: DatabaseConfig {
                path: MEMORY_DB_PATH.to_string(),
                max_connections: 1,
            },
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&base()).is_ok());
        assert_eq!(base().api.port, 9090);
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut cfg = base();
        cfg.database.max_connections = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut cfg = base();
        cfg.api.request_timeout_secs = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_relative_db_file_accepted() {
        let mut cfg = base();
        cfg.database.path = "todos.db".to_string();
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_missing_db_directory_rejected() {
        let mut cfg = base();
        cfg.database.path = "/definitely/not/a/real/dir/todos.db".to_string();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("Database directory does not exist"));
    }

    #[test]
    fn test_load_layers_env_over_defaults() {
        // The only test that touches process env; keys are unique to it.
        std::env::set_var("TODO_API__API__PORT", "7070");
        std::env::set_var("TODO_API__DATABASE__PATH", MEMORY_DB_PATH);
        std::env::set_var("TODO_API__API__CORS_ALLOWED_ORIGINS", "http://a.test,http://b.test");

        let cfg = load();

        std::env::remove_var("TODO_API__API__PORT");
        std::env::remove_var("TODO_API__DATABASE__PATH");
        std::env::remove_var("TODO_API__API__CORS_ALLOWED_ORIGINS");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.api.port, 7070);
        assert_eq!(cfg.database.path, MEMORY_DB_PATH);
        assert_eq!(
            cfg.api.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(cfg.api.bind, "0.0.0.0");
        assert_eq!(cfg.api.request_timeout_secs, 30);
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let cfg: Config = serde_json::from_value(serde_json::json!({
            "api": {},
            "database": { "path": "./x.db" }
        }))
        .unwrap();
        assert_eq!(cfg.api.port, 9090);
        assert_eq!(cfg.api.request_timeout_secs, 30);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.path, "./x.db");
        assert!(cfg.api.cors_allowed_origins.is_empty());
    }
}
