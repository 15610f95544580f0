use crate::{env_or_default, ConfigError, FromEnv};

/// Origin of the catalog frontend dev server
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Cross-origin settings for the browser frontend
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromEnv for CorsConfig {
    /// CORS_ALLOWED_ORIGIN: comma-separated origins, defaults to http://localhost:3000
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CORS_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if allowed_origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new([DEFAULT_ALLOWED_ORIGIN])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_default_origin() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let config = CorsConfig::from_env().unwrap();
            assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        });
    }

    #[test]
    fn test_cors_config_splits_and_trims() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:3000, https://catalog.example.com ,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    vec!["http://localhost:3000", "https://catalog.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_cors_config_rejects_empty_list() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            let err = CorsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
        });
    }
}
