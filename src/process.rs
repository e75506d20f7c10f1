use std::collections::BTreeMap;
use std::path::Path;

use chrono::Local;
use serde_json::Value;

use crate::card::{transform, NormalizedCard, RawCard};
use crate::config::ScrapeConfig;
use crate::parse::extract_gallery_items;
use crate::request::fetch_page;
use crate::{info_time, Result};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Number of raw gallery items, 0 when none were found.
    pub raw_count: usize,
    /// Normalized card count per set id.
    pub by_set: BTreeMap<String, usize>,
    /// Cards in the subset file.
    pub subset_count: usize,
    /// `false` when the gallery couldn't be located and nothing was written.
    pub written: bool,
}

/// Fetches the gallery page and runs it through the pipeline.
pub async fn process_site(config: &ScrapeConfig) -> Result<ScrapeSummary> {
    let start_time = Local::now();
    let client = reqwest::Client::new();

    info_time!("Fetching card gallery page...");
    let html = fetch_page(&client, &config.gallery_url).await?;
    info_time!(start_time, "Fetched {} bytes", html.len());

    process_html(html, config).await
}

/// Extracts, normalizes and writes the cards found in an already fetched gallery page.
pub async fn process_html(html: String, config: &ScrapeConfig) -> Result<ScrapeSummary> {
    info_time!("Extracting card data...");
    let Some(items) = extract_gallery_items(html, &config.dump_path).await? else {
        info_time!(
            "No card data found. Check the {} file to locate the cards manually.",
            config.dump_path.display()
        );
        return Ok(ScrapeSummary::default());
    };
    info_time!("Found {} raw cards", items.len());

    let raw_count = items.len();
    let cards = normalize_all(items)?;

    let by_set = count_by_set(&cards);
    info_time!("Cards by set: {:?}", by_set);

    write_cards(&config.all_cards_path, &cards).await?;
    info_time!(
        "Saved {} cards to {}",
        cards.len(),
        config.all_cards_path.display()
    );

    let subset = cards
        .into_iter()
        .filter(|c| c.set == config.subset_set)
        .collect::<Vec<_>>();
    write_cards(&config.subset_path, &subset).await?;
    info_time!(
        "Saved {} {} cards to {}",
        subset.len(),
        config.subset_set,
        config.subset_path.display()
    );

    Ok(ScrapeSummary {
        raw_count,
        by_set,
        subset_count: subset.len(),
        written: true,
    })
}

/// Transforms every raw item. Only an item that isn't a JSON object is an error.
pub fn normalize_all(items: Vec<Value>) -> Result<Vec<NormalizedCard>> {
    items
        .into_iter()
        .map(|item| RawCard::from_value(item).map(|raw| transform(&raw)))
        .collect()
}

pub fn count_by_set(cards: &[NormalizedCard]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(card.set.clone()).or_insert(0) += 1;
    }
    counts
}

/// Writes `cards` as a pretty printed JSON array, creating parent directories as needed.
pub async fn write_cards(path: &Path, cards: &[NormalizedCard]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(cards)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
