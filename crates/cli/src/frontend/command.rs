use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};

use super::arguments::parse_block_size;

pub(super) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
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
            Arg::new("block-size")
                .long("block-size")
                .short('B')
                .value_name("SIZE")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(parse_block_size),
        )
        .arg(
            Arg::new("truncate")
                .long("truncate")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("stats").long("stats").action(ArgAction::SetTrue))
        .arg(
            Arg::new("operands")
                .action(ArgAction::Append)
                .num_args(0..)
                .value_parser(OsStringValueParser::new()),
        )
}
