//! `sparse-cp` front-end: argument handling, diagnostics, and dispatch to
//! the copy engine.

mod arguments;
mod command;
pub(crate) mod stats_format;


use std::ffi::OsString;
use std::io::Write;

use engine::{CopyOptions, SparseCopier};
use logging::VerbosityConfig;
use tracing::info;

use crate::exit_code::ExitCode;

pub(crate) use arguments::parse_size;
use arguments::{ParsedArgs, parse_args};
use stats_format::StatsFormatter;

/// Canonical program name used in diagnostics and help output.
pub const PROGRAM_NAME: &str = "sparse-cp";

const USAGE: &str = "Usage: sparse-cp [OPTIONS] SOURCE DEST";

/// Deterministic help text describing the supported options.
const HELP_TEXT: &str = concat!(
    "sparse-cp ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: sparse-cp [OPTIONS] SOURCE DEST\n",
    "\n",
    "Copy the regular file SOURCE to DEST, leaving holes in DEST wherever\n",
    "SOURCE has a block consisting only of zero bytes. DEST is created with\n",
    "mode 0644 when absent; an existing DEST is overwritten in place.\n",
    "\n",
    "Options:\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
    "  -v, --verbose          Increase logging verbosity (repeatable).\n",
    "  -B, --block-size=SIZE  Use SIZE bytes per block instead of the source's\n",
    "                         preferred I/O size (K, M, G suffixes accepted,\n",
    "                         at most 1G).\n",
    "      --truncate         Truncate an existing DEST before copying.\n",
    "      --stats            Print a transfer summary after copying.\n",
    "\n",
    "Environment:\n",
    "  SPARSE_CP_LOG          Tracing filter directives; overrides -v.\n",
);

/// Runs the `sparse-cp` front-end and returns the process exit status.
///
/// `arguments` includes the program name as its first element. Help,
/// version, and `--stats` output go to `stdout`; usage errors and copy
/// diagnostics go to `stderr`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            let rendered = error.to_string();
            let message = rendered.lines().next().unwrap_or("invalid arguments");
            let message = message.strip_prefix("error: ").unwrap_or(message);
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
            let _ = writeln!(stderr, "{USAGE}");
            return ExitCode::Syntax.as_i32();
        }
    };

    if parsed.show_help {
        let _ = stdout.write_all(HELP_TEXT.as_bytes());
        return ExitCode::Ok.as_i32();
    }

    if parsed.show_version {
        let _ = writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::Ok.as_i32();
    }

    execute(parsed, stdout, stderr)
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let operand_count = parsed.operands.len();
    let Ok([source, destination]) = <[OsString; 2]>::try_from(parsed.operands) else {
        let _ = writeln!(
            stderr,
            "{PROGRAM_NAME}: expected SOURCE and DEST operands, got {operand_count}"
        );
        let _ = writeln!(stderr, "{USAGE}");
        return ExitCode::Syntax.as_i32();
    };

    logging::init_tracing(VerbosityConfig::from_verbose_level(parsed.verbose));

    let options = CopyOptions::new()
        .block_size(parsed.block_size)
        .truncate(parsed.truncate);

    match SparseCopier::new(options).copy(&source, &destination) {
        Ok(summary) => {
            info!(
                target: "sparse_cp::copy",
                bytes = summary.bytes_read(),
                holes = summary.hole_blocks(),
                "copied {} to {}",
                source.to_string_lossy(),
                destination.to_string_lossy()
            );
            if parsed.stats {
                let _ = stdout.write_all(StatsFormatter::new(&summary).format().as_bytes());
            }
            ExitCode::Ok.as_i32()
        }
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}
