use clap::{Arg, Command};

pub fn star_command() -> Command {
    Command::new("star")
        .about("Star one or more messages")
        .arg(
            Arg::new("subject")
                .help("Message id(s) to star. Each id is sent as its own request")
                .required(true)
                .num_args(1..)
                .index(1),
        )
}
