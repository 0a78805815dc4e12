//! Command line interface of the state-space search engine.
use clap::Parser;
use colored::Colorize;
use env_logger::Env;

use std::path::PathBuf;

/// Print an error message to stderr and exit with the given status code.
macro_rules! fatal_error {
    ($code:expr, $($arg:tt)*) => {{
        eprintln!("{} {}", "Error:".red().bold(), format!($($arg)*));
        std::process::exit($code)
    }};
}

mod commands;
use commands::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    cli.command.run();
}
