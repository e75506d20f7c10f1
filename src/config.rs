use std::path::PathBuf;

use crate::{ALL_CARDS_PATH, CARD_GALLERY_URL, PROPS_DUMP_PATH, SUBSET_PATH, SUBSET_SET};

/// Where the fetcher reads from and writes to.
/// `Default` gives the fixed locations the `fetch-cards` binary uses.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub gallery_url: String,
    /// Full normalized dataset.
    pub all_cards_path: PathBuf,
    /// Only the cards of `subset_set`, kept around for inspection.
    pub subset_path: PathBuf,
    pub subset_set: String,
    /// Where `pageProps` gets dumped when the gallery block can't be found.
    pub dump_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            gallery_url: CARD_GALLERY_URL.into(),
            all_cards_path: ALL_CARDS_PATH.into(),
            subset_path: SUBSET_PATH.into(),
            subset_set: SUBSET_SET.into(),
            dump_path: PROPS_DUMP_PATH.into(),
        }
    }
}

impl ScrapeConfig {
    /// Same settings, but every output file lives directly in `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file_name = |p: &PathBuf| p.file_name().map(PathBuf::from).unwrap_or_default();
        self.all_cards_path = dir.join(file_name(&self.all_cards_path));
        self.subset_path = dir.join(file_name(&self.subset_path));
        self.dump_path = dir.join(file_name(&self.dump_path));
        self
    }
}
