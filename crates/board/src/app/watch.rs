use clap::{Arg, ArgAction, Command, value_parser};

pub fn watch_command() -> Command {
    Command::new("watch")
        .about("Poll a page until the server has newer content, then reload it")
        .arg(
            Arg::new("page")
                .help("Page path as rendered, query string included (e.g. '/messList?au=1')")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("since")
                .long("since")
                .help("Newest timestamp the page already shows (Unix seconds or YYYY-MM-DDTHH:MM:SS)")
                .value_name("TIMESTAMP")
                .required(true),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .help("Delay between polls in milliseconds (default: 10000)")
                .value_name("MS")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open the refreshed page in the browser when new content arrives")
                .action(ArgAction::SetTrue),
        )
}
