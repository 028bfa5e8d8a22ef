mod config;
mod error;
mod quiz;
mod ui;

use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use log::{error, info};

use crate::{config::Opts, error::Error, quiz::QuizSession};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A .env file is optional, real environment variables win anyway
    dotenv().ok();
    // Logs go to stderr, which the TUI shares: use RUST_LOG=debug 2>quiz.log
    pretty_env_logger::init();

    let opts = Opts::parse();
    if let Err(err) = run(opts).await {
        error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<(), Error> {
    let bank = Arc::new(opts.load_bank()?);
    info!(
        "Loaded {} question sets, starting with set {}",
        bank.len(),
        opts.first_set % bank.len()
    );

    let session = QuizSession::new(bank, opts.rng(), opts.first_set);
    ui::run(session).await
}
