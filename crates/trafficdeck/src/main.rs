//! TrafficDeck: affiliate traffic performance dashboard.

use std::process::ExitCode;

use trafficdeck_cli::Styler;
use trafficdeck_lib::{app, config, errors};

fn main() -> ExitCode {
    let config = config::AppConfig::parse();
    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", Styler::from_env().error(&format!("{err:#}")));
            ExitCode::from(errors::exit_status(&err))
        }
    }
}
