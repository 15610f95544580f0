use core_config::{
    AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig, storage::StorageConfig,
};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let storage = StorageConfig::from_env()?;
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            storage,
            cors,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(
            [
                "APP_ENV",
                "HOST",
                "PORT",
                "ITEMS_DATA_PATH",
                "CORS_ALLOWED_ORIGIN",
                "SHUTDOWN_TIMEOUT_SECS",
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "catalog_api");
                assert_eq!(config.server.port, 3001);
                assert_eq!(config.storage.data_path(), Path::new("data/items.json"));
                assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_config_rejects_invalid_port() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
