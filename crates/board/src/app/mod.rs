mod global;
mod star;
mod watch;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(watch::watch_command())
        .subcommand(star::star_command())
}
