//! crates/logging/src/tracing_bridge.rs
//! Installation of the process-wide tracing subscriber.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::VerbosityConfig;

/// Environment variable whose directive string overrides `-v`.
pub const LOG_ENV_VAR: &str = "SPARSE_CP_LOG";

/// Builds the filter for `config`, preferring `override_directive` when it
/// parses as a valid `EnvFilter` directive string.
#[must_use]
pub fn build_filter(config: VerbosityConfig, override_directive: Option<&str>) -> EnvFilter {
    override_directive
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Installs a stderr formatter filtered by `config` and [`LOG_ENV_VAR`].
///
/// Returns `false` when a global subscriber was already installed; the
/// existing subscriber is left untouched in that case.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let override_directive = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(config, override_directive.as_deref());

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(config.level() >= 2)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_follows_verbosity_without_override() {
        let filter = build_filter(VerbosityConfig::from_verbose_level(2), None);
        assert_eq!(filter.to_string(), EnvFilter::new("warn,sparse_cp=debug").to_string());
    }

    #[test]
    fn valid_override_replaces_verbosity() {
        let filter = build_filter(VerbosityConfig::default(), Some("sparse_cp::hole=trace"));
        assert_eq!(filter.to_string(), "sparse_cp::hole=trace");
    }

    #[test]
    fn blank_override_is_ignored() {
        let filter = build_filter(VerbosityConfig::from_verbose_level(1), Some("   "));
        assert_eq!(filter.to_string(), EnvFilter::new("warn,sparse_cp=info").to_string());
    }

    #[test]
    fn invalid_override_falls_back_to_verbosity() {
        let filter = build_filter(VerbosityConfig::default(), Some("sparse_cp=notalevel"));
        assert_eq!(filter.to_string(), EnvFilter::new("warn").to_string());
    }

    #[test]
    fn second_initialisation_reports_existing_subscriber() {
        let _ = init_tracing(VerbosityConfig::default());
        assert!(!init_tracing(VerbosityConfig::from_verbose_level(3)));
    }
}
