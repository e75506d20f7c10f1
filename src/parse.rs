use std::path::Path;

use scraper::{Html, Selector};
use serde_json::Value;
use tokio::task::spawn_blocking;

use crate::{error_time, info_time, Error, Result};

/// Next.js ships the page props as JSON inside this tag.
const NEXT_DATA_SELECTOR: &str = r#"script[id="__NEXT_DATA__"]"#;
/// `type` of the blade that holds the card list.
const GALLERY_BLADE_TYPE: &str = "riftboundCardGallery";

/// Extracts the raw gallery items from the page HTML.
///
/// The HTML is parsed on the blocking pool since `scraper::Html` is neither cheap nor `Send`.
/// Returns `Ok(None)` whenever the page doesn't look the way we expect; in the case where the
/// Next.js payload was found but the gallery wasn't, `pageProps` is dumped to `dump_path`
/// so the new layout can be inspected by hand.
pub async fn extract_gallery_items(html: String, dump_path: &Path) -> Result<Option<Vec<Value>>> {
    let next_data = spawn_blocking(move || extract_next_data(&html)).await??;

    match next_data {
        Some(next_data) => find_gallery_items(&next_data, dump_path).await,
        None => Ok(None),
    }
}

/// Finds the `__NEXT_DATA__` script and parses its content.
/// Both a missing tag and broken JSON are logged and reported as `None`.
pub fn extract_next_data(html: &str) -> Result<Option<Value>> {
    let doc = Html::parse_document(html);
    let selector = create_selector(NEXT_DATA_SELECTOR)?;

    let Some(script) = doc.select(&selector).next() else {
        info_time!("Could not find __NEXT_DATA__ in the HTML");
        return Ok(None);
    };

    let payload = script.text().collect::<String>();
    match serde_json::from_str::<Value>(&payload) {
        Ok(value) => {
            info_time!("Found Next.js data structure");
            Ok(Some(value))
        }
        Err(e) => {
            error_time!("Error parsing JSON: {e}");
            Ok(None)
        }
    }
}

/// Walks `props.pageProps.page.blades[]` looking for the card gallery blade and
/// returns its `cards.items`.
///
/// The layout is not a published contract and may change at any time, so a miss only
/// produces a dump of `pageProps` and `None`. Only writing that dump can fail.
pub async fn find_gallery_items(next_data: &Value, dump_path: &Path) -> Result<Option<Vec<Value>>> {
    let Some(props) = next_data.pointer("/props/pageProps") else {
        info_time!("Next.js data has no pageProps");
        return Ok(None);
    };

    if let Some(items) = gallery_items(props) {
        return Ok(Some(items.clone()));
    }

    if let Some(parent) = dump_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let dump = serde_json::to_string_pretty(props)?;
    tokio::fs::write(dump_path, dump).await?;
    info_time!(
        "Card data structure not found, saved props to {}",
        dump_path.display()
    );
    Ok(None)
}

fn gallery_items(props: &Value) -> Option<&Vec<Value>> {
    props
        .pointer("/page/blades")?
        .as_array()?
        .iter()
        .find(|blade| blade.get("type").and_then(Value::as_str) == Some(GALLERY_BLADE_TYPE))?
        .pointer("/cards/items")?
        .as_array()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}
