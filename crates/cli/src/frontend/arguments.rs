use std::ffi::OsString;

use super::PROGRAM_NAME;
use super::command::clap_command;

/// Options extracted from the command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct ParsedArgs {
    pub(super) show_help: bool,
    pub(super) show_version: bool,
    pub(super) verbose: u8,
    pub(super) stats: bool,
    pub(super) truncate: bool,
    pub(super) block_size: Option<i64>,
    pub(super) operands: Vec<OsString>,
}

pub(super) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command(PROGRAM_NAME).try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_count("verbose"),
        stats: matches.get_flag("stats"),
        truncate: matches.get_flag("truncate"),
        block_size: matches.get_one::<i64>("block-size").copied(),
        operands: matches
            .remove_many::<OsString>("operands")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}

/// Parses a byte count with an optional binary `K`, `M`, or `G` suffix.
pub(crate) fn parse_size(text: &str) -> Result<u64, String> {
    let trimmed = text.trim();
    let digits_end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(digits_end);

    if digits.is_empty() {
        return Err(format!("invalid size '{text}'"));
    }

    let shift = match suffix {
        "" => 0,
        "k" | "K" => 10,
        "m" | "M" => 20,
        "g" | "G" => 30,
        _ => return Err(format!("invalid size suffix in '{text}'")),
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(1u64 << shift))
        .ok_or_else(|| format!("size '{text}' is too large"))
}

pub(super) fn parse_block_size(text: &str) -> Result<i64, String> {
    let size = parse_size(text)?;
    i64::try_from(size).map_err(|_| format!("block size '{text}' is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_plain_and_suffixed_values() {
        assert_eq!(parse_size("0"), Ok(0));
        assert_eq!(parse_size("4096"), Ok(4096));
        assert_eq!(parse_size("4k"), Ok(4096));
        assert_eq!(parse_size("64M"), Ok(64 << 20));
        assert_eq!(parse_size(" 1G "), Ok(1 << 30));
    }

    #[test]
    fn parse_size_rejects_malformed_values() {
        assert!(parse_size("").is_err());
        assert!(parse_size("K").is_err());
        assert!(parse_size("12T").is_err());
        assert!(parse_size("1.5M").is_err());
        assert!(parse_size("-1").is_err());
        assert!(parse_size("99999999999999999999G").is_err());
    }

    #[test]
    fn parse_block_size_rejects_values_beyond_i64() {
        assert_eq!(parse_block_size("512"), Ok(512));
        assert!(parse_block_size("18446744073709551615").is_err());
    }

    #[test]
    fn empty_argument_list_defaults_program_name() {
        let parsed = parse_args(Vec::<OsString>::new()).expect("parse");
        assert_eq!(parsed, ParsedArgs::default());
    }

    #[test]
    fn collects_flags_and_operands() {
        let parsed = parse_args([
            "sparse-cp",
            "-vv",
            "--stats",
            "--truncate",
            "--block-size=8K",
            "in",
            "out",
        ])
        .expect("parse");

        assert_eq!(parsed.verbose, 2);
        assert!(parsed.stats);
        assert!(parsed.truncate);
        assert_eq!(parsed.block_size, Some(8192));
        assert_eq!(parsed.operands, vec![OsString::from("in"), OsString::from("out")]);
    }

    #[test]
    fn short_block_size_takes_separate_value() {
        let parsed = parse_args(["sparse-cp", "-B", "512", "a", "b"]).expect("parse");
        assert_eq!(parsed.block_size, Some(512));
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(parse_args(["sparse-cp", "--sparse", "a", "b"]).is_err());
    }

    #[test]
    fn invalid_block_size_is_an_error() {
        assert!(parse_args(["sparse-cp", "--block-size=lots", "a", "b"]).is_err());
    }
}
