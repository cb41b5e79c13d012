//! `mkhole` front-end: writes the sparse fixture used to check hole
//! preservation.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};
use engine::hole_file::{FIXTURE_LEN, FIXTURE_PATH, check_fixture_len, create_hole_file};
use logging::VerbosityConfig;
use tracing::info;

use crate::exit_code::ExitCode;
use crate::frontend::parse_size;

/// Program name used in `mkhole` diagnostics.
pub const MKHOLE_PROGRAM_NAME: &str = "mkhole";

const MKHOLE_USAGE: &str = "Usage: mkhole [OPTIONS] [PATH]";

const MKHOLE_HELP_TEXT: &str = concat!(
    "mkhole ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: mkhole [OPTIONS] [PATH]\n",
    "\n",
    "Create PATH (default tmp/file.hole) as a sparse file whose first ten\n",
    "bytes are \"abcdefghij\", whose last ten bytes are \"ABCDEFGHIJ\", and\n",
    "which has a hole in between. Missing parent directories are created.\n",
    "\n",
    "Options:\n",
    "  -h, --help         Show this help message and exit.\n",
    "  -V, --version      Output version information and exit.\n",
    "  -v, --verbose      Increase logging verbosity (repeatable).\n",
    "  -s, --size=BYTES   Total file length (default 1G, minimum 20).\n",
);

fn mkhole_command() -> ClapCommand {
    ClapCommand::new(MKHOLE_PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .short('s')
                .value_name("BYTES")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(parse_size),
        )
        .arg(
            Arg::new("path")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Runs the `mkhole` front-end and returns the process exit status.
///
/// Invalid options and lengths below 20 bytes return `1`; failures while
/// creating the file return `11`.
pub fn run_mkhole<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(MKHOLE_PROGRAM_NAME));
    }

    let mut matches = match mkhole_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.to_string();
            let message = rendered.lines().next().unwrap_or("invalid arguments");
            let message = message.strip_prefix("error: ").unwrap_or(message);
            let _ = writeln!(stderr, "{MKHOLE_PROGRAM_NAME}: {message}");
            let _ = writeln!(stderr, "{MKHOLE_USAGE}");
            return ExitCode::Syntax.as_i32();
        }
    };

    if matches.get_flag("help") {
        let _ = stdout.write_all(MKHOLE_HELP_TEXT.as_bytes());
        return ExitCode::Ok.as_i32();
    }
    if matches.get_flag("version") {
        let _ = writeln!(stdout, "{MKHOLE_PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::Ok.as_i32();
    }

    logging::init_tracing(VerbosityConfig::from_verbose_level(
        matches.get_count("verbose"),
    ));

    let path = matches
        .remove_one::<OsString>("path")
        .map_or_else(|| PathBuf::from(FIXTURE_PATH), PathBuf::from);
    let len = matches.get_one::<u64>("size").copied().unwrap_or(FIXTURE_LEN);

    let result = check_fixture_len(len)
        .and_then(|()| {
            path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or(Ok(()), fs::create_dir_all)
        })
        .and_then(|()| create_hole_file(&path, len));

    match result {
        Ok(()) => {
            info!(
                target: "sparse_cp::hole",
                len,
                "created {}",
                path.display()
            );
            ExitCode::Ok.as_i32()
        }
        Err(error) if error.kind() == io::ErrorKind::InvalidInput => {
            let _ = writeln!(stderr, "{MKHOLE_PROGRAM_NAME}: {error}");
            let _ = writeln!(stderr, "{MKHOLE_USAGE}");
            ExitCode::Syntax.as_i32()
        }
        Err(error) => {
            let _ = writeln!(
                stderr,
                "{MKHOLE_PROGRAM_NAME}: failed to create '{}': {error}",
                path.display()
            );
            ExitCode::FileIo.as_i32()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use engine::hole_file::{FIXTURE_HEAD, FIXTURE_TAIL};
    use test_support::{TestDir, first_nonzero_outside, read_range};

    fn run_with_args(args: Vec<OsString>) -> (i32, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_mkhole(args, &mut stdout, &mut stderr);
        (status, String::from_utf8(stderr).expect("stderr utf8"))
    }

    #[test]
    fn creates_fixture_with_requested_size_and_parent() {
        let dir = TestDir::new().expect("tempdir");
        let path = dir.join("nested/file.hole");

        let (status, stderr) = run_with_args(vec![
            OsString::from("mkhole"),
            OsString::from("--size=64K"),
            path.clone().into_os_string(),
        ]);

        assert_eq!(status, 0, "stderr: {stderr}");
        assert_eq!(fs::metadata(&path).expect("metadata").len(), 64 * 1024);
        assert_eq!(read_range(&path, 0, 10).expect("head"), FIXTURE_HEAD);
        assert_eq!(read_range(&path, 64 * 1024 - 10, 10).expect("tail"), FIXTURE_TAIL);
        assert_eq!(
            first_nonzero_outside(&path, &[(0, 10), (64 * 1024 - 10, 10)]).expect("scan"),
            None
        );
    }

    #[test]
    fn rejects_sizes_below_marker_length() {
        let dir = TestDir::new().expect("tempdir");
        let path = dir.join("tiny.hole");

        let (status, stderr) = run_with_args(vec![
            OsString::from("mkhole"),
            OsString::from("-s"),
            OsString::from("19"),
            path.into_os_string(),
        ]);

        assert_eq!(status, 1);
        assert!(stderr.contains("smaller than 20 bytes"));
        assert!(!dir.exists("tiny.hole"));
    }

    #[test]
    fn rejected_size_leaves_parent_directories_uncreated() {
        let dir = TestDir::new().expect("tempdir");

        let (status, _) = run_with_args(vec![
            OsString::from("mkhole"),
            OsString::from("--size=5"),
            dir.join("a/b/file.hole").into_os_string(),
        ]);

        assert_eq!(status, 1);
        assert!(!dir.exists("a"));
    }

    #[test]
    fn malformed_size_is_a_usage_error() {
        let (status, stderr) = run_with_args(vec![
            OsString::from("mkhole"),
            OsString::from("--size=big"),
        ]);

        assert_eq!(status, 1);
        assert!(stderr.ends_with(&format!("{MKHOLE_USAGE}\n")));
    }

    #[test]
    fn help_lists_default_path() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = run_mkhole(["mkhole", "--help"], &mut stdout, &mut stderr);

        assert_eq!(status, 0);
        assert!(String::from_utf8(stdout).expect("utf8").contains(FIXTURE_PATH));
    }

    #[test]
    fn unwritable_location_reports_io_status() {
        let dir = TestDir::new().expect("tempdir");
        let blocker = dir.write_file("blocker", b"x").expect("write blocker");

        let (status, stderr) = run_with_args(vec![
            OsString::from("mkhole"),
            OsString::from("--size=32"),
            blocker.join("file.hole").into_os_string(),
        ]);

        assert_eq!(status, 11);
        assert!(stderr.starts_with("mkhole: failed to create"));
    }
}
