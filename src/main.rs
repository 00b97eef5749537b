mod api;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::api::HttpBackend;

#[derive(Parser)]
#[command(name = "sift", about = "Terminal client for the feedback-insights assistant")]
struct Args {
    /// Backend base URL (overrides config file and SIFT_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sift.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("sift.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match core::config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let resolved = core::config::resolve(&config, args.backend_url.as_deref());

    log::info!("Sift starting up, backend at {}", resolved.base_url);

    let backend = Arc::new(HttpBackend::new(resolved.base_url.clone()));
    tui::run(resolved, backend)
}
