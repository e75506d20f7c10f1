//! RIFTBOUND CARD GALLERY SCRAPER + FLASHCARD TRAINER
//!
//! `fetch-cards` pulls the card list out of the official gallery page and writes it as flat JSON,
//! `study` quizzes you on that JSON one set/domain at a time.

mod error;
mod macros;

pub mod card;
pub mod catalog;
pub mod config;
pub mod parse;
pub mod process;
pub mod request;
pub mod study;

pub use error::{Error, Result};

pub const CARD_GALLERY_URL: &str = "https://riftbound.leagueoflegends.com/en-us/card-gallery/";
/// Full normalized dataset, also the default input of `study`.
pub const ALL_CARDS_PATH: &str = "data/riftbound-cards.json";
pub const SUBSET_SET: &str = "SFD";
pub const SUBSET_PATH: &str = "data/spiritforged-cards.json";
pub const PROPS_DUMP_PATH: &str = "data/page-props.json";
