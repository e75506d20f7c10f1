// Runs the fetcher pipeline on canned gallery pages, and once against a host that refuses connections.

use std::path::PathBuf;

use riftbound_cards::card::NormalizedCard;
use riftbound_cards::config::ScrapeConfig;
use riftbound_cards::process::{process_html, process_site};
use riftbound_cards::Error;
use serde_json::{json, Value};
use tempfile::tempdir;

fn gallery_page(items: Value) -> String {
    let next_data = json!({
        "props": {"pageProps": {"page": {"blades": [
            {"type": "riftboundHeader"},
            {"type": "riftboundCardGallery", "cards": {"items": items}}
        ]}}},
        "page": "/[locale]/card-gallery"
    });
    format!(
        r#"<!DOCTYPE html><html><body><div id="__next"></div><script id="__NEXT_DATA__" type="application/json">{next_data}</script></body></html>"#
    )
}

fn read_cards(path: &PathBuf) -> Vec<NormalizedCard> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn writes_full_and_subset_files() {
    let dir = tempdir().unwrap();
    let config = ScrapeConfig::default().with_output_dir(dir.path());
    let html = gallery_page(json!([
        {
            "id": "ogn-007-298",
            "name": "Jinx, Loose Cannon",
            "collectorNumber": 7,
            "set": {"value": {"id": "OGN", "label": "Origins"}},
            "domain": {"values": [{"id": "fury", "label": "Fury"}]},
            "rarity": {"value": {"id": "rare", "label": "Rare"}},
            "cardType": {"values": [{"id": "unit", "label": "Unit"}]},
            "illustrator": {"values": [{"id": "x", "label": "Some Artist"}]},
            "text": {"richText": {"body": "<p>Deal 2.</p>"}},
            "energy": {"value": {"id": 4, "label": "4"}},
            "might": 3
        },
        {
            "id": "sfd-001-221",
            "name": "Spirit",
            "collectorNumber": "1",
            "set": {"value": {"id": "SFD", "label": "Spiritforged"}},
            "text": "Plain text."
        },
        {"id": "mystery"}
    ]));

    let summary = process_html(html, &config).await.unwrap();
    assert!(summary.written);
    assert_eq!(summary.raw_count, 3);
    assert_eq!(summary.subset_count, 1);
    assert_eq!(summary.by_set.get("OGN"), Some(&1));
    assert_eq!(summary.by_set.get("UNKNOWN"), Some(&1));

    let all = read_cards(&config.all_cards_path);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].public_code, "OGN-007");
    assert_eq!(all[0].illustrator, vec!["Some Artist"]);
    assert_eq!(all[0].text, "<p>Deal 2.</p>");
    assert_eq!(all[0].energy, Some(4.into()));
    assert_eq!(all[0].might, Some(3.into()));
    assert!(all[0].power.is_none());
    assert_eq!(all[2].set, "UNKNOWN");

    let subset = read_cards(&config.subset_path);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].public_code, "SFD-001");
    assert_eq!(subset[0].text, "Plain text.");

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&config.all_cards_path).unwrap()).unwrap();
    assert!(raw[1].get("energy").is_none());
}

#[tokio::test]
async fn schema_drift_dumps_props_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = ScrapeConfig::default().with_output_dir(dir.path());
    let html = r#"<html><body><script id="__NEXT_DATA__" type="application/json">{"props":{"pageProps":{"page":{"sections":[]}}}}</script></body></html>"#;

    let summary = process_html(html.to_string(), &config).await.unwrap();
    assert!(!summary.written);
    assert_eq!(summary.raw_count, 0);
    assert!(config.dump_path.exists());
    assert!(!config.all_cards_path.exists());
    assert!(!config.subset_path.exists());
}

#[tokio::test]
async fn page_without_payload_is_not_an_error() {
    let dir = tempdir().unwrap();
    let config = ScrapeConfig::default().with_output_dir(dir.path());

    let summary = process_html("<html><body>maintenance</body></html>".into(), &config)
        .await
        .unwrap();
    assert!(!summary.written);
    assert!(!config.dump_path.exists());
}

#[tokio::test]
async fn unreachable_gallery_fails_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = ScrapeConfig {
        gallery_url: "http://127.0.0.1:1/".into(),
        ..ScrapeConfig::default().with_output_dir(dir.path())
    };

    let res = process_site(&config).await;
    assert!(matches!(res, Err(Error::Reqwest(_))), "got {res:?}");
    assert!(!config.all_cards_path.exists());
    assert!(!config.subset_path.exists());
    assert!(!config.dump_path.exists());
}
