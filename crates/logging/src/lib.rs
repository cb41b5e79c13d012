#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the command line's `-v` count into a `tracing` filter and
//! installs the process-wide subscriber used by the `sparse-cp` binaries.
//!
//! # Design
//!
//! - [`VerbosityConfig`] maps a verbose level to a filter directive: warnings
//!   only by default, then `info`, `debug`, and `trace` for the `sparse_cp`
//!   targets as `-v` is repeated.
//! - [`init_tracing`] installs a `tracing-subscriber` formatter on stderr.
//!   When [`LOG_ENV_VAR`] holds a valid directive string it replaces the
//!   verbosity-derived filter.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert_eq!(config.directive(), "warn,sparse_cp=debug");
//! ```

mod config;
mod tracing_bridge;

pub use config::{TARGET_PREFIX, VerbosityConfig};
pub use tracing_bridge::{LOG_ENV_VAR, build_filter, init_tracing};
