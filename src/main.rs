//! `dotlink` binary entry point.
use anyhow::Result;
use clap::Parser;

use dotlink::cli::{Cli, Command};
use dotlink::commands;
use dotlink::logging::{Logger, init_subscriber};

#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    init_subscriber(args.verbose);
    let log = Logger::new();

    match args.command {
        Some(Command::Link) => commands::link::run(&args.global, &log),
        Some(Command::Check) => commands::check::run(&args.global, &log),
        Some(Command::Version) => {
            let version = option_env!("DOTLINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("dotlink {version}");
            Ok(())
        }
        Some(Command::Other(_)) | None => commands::load_only(&args.global, &log),
    }
}
