#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-ends of the workspace: the
//! `sparse-cp` copier and the `mkhole` fixture generator. Both entry points
//! accept an argument iterator together with handles for standard output
//! and error, so tests can drive them without spawning processes.
//!
//! # Design
//!
//! [`run`] parses arguments with a [`clap`](https://docs.rs/clap/) command
//! whose built-in help and version flags are disabled in favour of static
//! text, checks that exactly two operands were supplied, installs the
//! tracing subscriber, and hands the operands to
//! [`engine::SparseCopier`]. Engine errors are rendered on the error stream
//! as `sparse-cp: <diagnostic>` and converted to an exit status through
//! [`engine::SparseCopyError::exit_code`].
//!
//! # Invariants
//!
//! - `run` never panics; failures become non-zero statuses.
//! - Usage errors always print the usage line on the error stream and
//!   return [`ExitCode::Syntax`](exit_code::ExitCode::Syntax).
//! - Successful copies return `0`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["sparse-cp", "only-one-operand"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 1);
//! assert!(String::from_utf8(stderr).unwrap().contains("Usage:"));
//! ```

pub mod exit_code;
mod frontend;
mod mkhole;

pub use exit_code::exit_code_from;
pub use frontend::{PROGRAM_NAME, run};
pub use mkhole::{MKHOLE_PROGRAM_NAME, run_mkhole};
