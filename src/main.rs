use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use sous::core::config;
use sous::tui;

#[derive(Parser)]
#[command(name = "sous", about = "Terminal pantry-to-recipe assistant")]
struct Args {
    /// Kitchen backend base URL (default http://127.0.0.1:8000)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to sous.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("sous.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {e}");
        Default::default()
    });
    let resolved = config::resolve(&file_config, args.base_url.as_deref());

    log::info!("Sous starting up against {}", resolved.base_url);

    tui::run(resolved)
}
