use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("board")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watch board pages for new content and star messages")
        .long_about("Talks to a board server the way its pages do: `watch` polls a page's auto-update endpoint until newer content appears, `star` records a star on one or more messages.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Board server URL (overrides [server] base_url in config)")
                .value_name("URL")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
}
