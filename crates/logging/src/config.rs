//! crates/logging/src/config.rs
//! Verbosity configuration derived from the `-v` count.

use tracing::level_filters::LevelFilter;

/// Target prefix shared by every event emitted from the workspace.
pub const TARGET_PREFIX: &str = "sparse_cp";

/// Verbosity selected on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VerbosityConfig {
    level: u8,
}

impl VerbosityConfig {
    /// Creates a configuration from a verbose level (number of `-v` flags).
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { level }
    }

    /// Returns the verbose level.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Returns the most detailed level enabled for workspace targets.
    #[must_use]
    pub const fn level_filter(&self) -> LevelFilter {
        match self.level {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Renders the `EnvFilter` directive for this configuration.
    ///
    /// Other crates stay at `warn` regardless of the level.
    #[must_use]
    pub fn directive(&self) -> String {
        if self.level == 0 {
            return "warn".to_owned();
        }
        let level = self.level_filter().to_string().to_ascii_lowercase();
        format!("warn,{TARGET_PREFIX}={level}")
    }
}
