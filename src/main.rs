use chrono::Local;
use riftbound_cards::{config::ScrapeConfig, info_time, process::process_site, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = ScrapeConfig::default();
    process_site(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
