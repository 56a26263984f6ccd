use std::env;
use std::error::Error;

use clap::Parser;
use switchpad::cli::{main_cli, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::new().parse_filters(&log_level).init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::debug!("Starting switchpad v{}", VERSION);

    let args = Args::parse();
    main_cli(args).await
}
