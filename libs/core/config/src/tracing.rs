use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info"
    } else {
        "debug,domain_items=trace,tower_http=debug"
    }
}

/// Install color-eyre with location sections on and env sections off.
///
/// Call once at the top of `main`, before anything fallible. Repeated
/// calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the global subscriber.
///
/// Production (`APP_ENV=production`) logs flattened JSON lines; development
/// logs the pretty multi-line format. Both install
/// [`tracing_error::ErrorLayer`] so `eyre` reports carry span traces, and
/// both honour `RUST_LOG` over [`default_filter`].
///
/// Returns `false` when a subscriber was already installed (tests call this
/// repeatedly).
///
/// ```ignore
/// use core_config::{Environment, tracing::{init_tracing, install_color_eyre}};
///
/// install_color_eyre();
/// init_tracing(&Environment::from_env());
/// ```
pub fn init_tracing(environment: &Environment) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let installed = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    } else {
        tracing::debug!("Tracing subscriber already set");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_per_environment() {
        assert_eq!(
            default_filter(&Environment::Production),
            "info,tower_http=info"
        );
        assert!(default_filter(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_default_filters_parse() {
        for env in [Environment::Development, Environment::Production] {
            assert!(default_filter(&env).parse::<EnvFilter>().is_ok());
        }
    }

    #[test]
    fn test_second_init_is_ignored() {
        init_tracing(&Environment::Development);
        assert!(!init_tracing(&Environment::Production));
    }

    #[test]
    fn test_init_with_rust_log_override() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Production);
        });
    }
}
