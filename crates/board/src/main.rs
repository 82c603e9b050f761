use board_client::init_logging;

mod app;
pub(crate) mod color;
mod commands;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Handle --no-color before any output
    if matches.get_flag("no-color") {
        color::set_no_color();
    }

    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    if let Err(e) = commands::run_command(&matches) {
        // Error already printed to user via eprintln! in command handlers.
        drop(e);
        std::process::exit(1);
    }
}
