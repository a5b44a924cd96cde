//! pxtile - Command-line tool for encoding tile sheets and generating tile levels

use std::process::ExitCode;

use pxtile::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run()
}
