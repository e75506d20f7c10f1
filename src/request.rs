use reqwest::Client;

use crate::{info_time, Result};

/// Requests a page and returns a `Result<String>` containing the HTML.
/// Single attempt, no timeout: a transport failure is handed straight back to the caller.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info_time!("GET {url}");
    let res = client.get(url).send().await?;
    let html = res.text().await?;
    Ok(html)
}
