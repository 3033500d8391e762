//! # Salon CLI Entry Point
//!
//! ```text
//! main ──► init_tracing ──► salon_cli::run(cli)
//!                               │
//!                  Ok ──► JSON on stdout, exit 0
//!                  Err(ApiError) ──► ApiError JSON on stdout, exit 1
//!                  Err(other) ──► message on stderr, exit 1
//! ```

use std::process::ExitCode;

use clap::Parser;

use salon_cli::cli::Cli;
use salon_cli::error::ApiError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    salon_cli::init_tracing();

    match salon_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ApiError>() {
                Some(api) => match serde_json::to_string_pretty(api) {
                    Ok(text) => println!("{}", text),
                    Err(_) => eprintln!("error: {}", api),
                },
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
