use clap::Parser;
use log::{error, info};

use meal_tracker::cli::{self, Cli};

fn main() {
    // Warnings by default; RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    info!("Starting meal tracker");

    if let Err(e) = cli::run(args) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
