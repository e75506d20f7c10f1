//! Terminal flashcard trainer over the JSON written by `fetch-cards`.
//!
//! The deck is read from disk when the program starts (first argument, or
//! `data/riftbound-cards.json`) rather than embedded at build time, so this binary
//! builds before any scrape has run and picks up a fresh scrape without a rebuild.

use std::fmt;

use inquire::{InquireError, Select};
use riftbound_cards::{
    card::NormalizedCard,
    catalog::{find_domain, find_set, CardSet, Domain, DOMAINS, SETS},
    info_time,
    study::{Action, Screen, StudyState},
    Result, ALL_CARDS_PATH,
};

const HIDDEN: &str = "▒▒▒▒▒▒▒▒";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Next,
    Previous,
    RevealCost,
    RevealMight,
    RevealText,
    Back,
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Choice::Next => "Next card",
            Choice::Previous => "Previous card",
            Choice::RevealCost => "Reveal cost and domains",
            Choice::RevealMight => "Reveal might",
            Choice::RevealText => "Reveal text",
            Choice::Back => "Back to selection",
            Choice::Quit => "Quit",
        };
        write!(f, "{s}")
    }
}

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| ALL_CARDS_PATH.into());
    let deck: Vec<NormalizedCard> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    info_time!("Loaded {} cards from {path}", deck.len());

    let mut rng = rand::thread_rng();
    let mut state = StudyState::new();

    loop {
        let action = match state.screen {
            Screen::Selecting => match select_session()? {
                Some((set, domain)) => {
                    state.update(Action::SelectSet(set.id.into()), &deck, &mut rng);
                    state.update(Action::SelectDomain(domain.id.into()), &deck, &mut rng);
                    Action::StartLearning
                }
                None => break,
            },
            Screen::Studying => {
                render(&state);
                match study_menu(&state)? {
                    Choice::Next => Action::NextCard,
                    Choice::Previous => Action::PrevCard,
                    Choice::RevealCost => Action::RevealTopLeft,
                    Choice::RevealMight => Action::RevealTopRight,
                    Choice::RevealText => Action::RevealBottom,
                    Choice::Back => Action::GoBack,
                    Choice::Quit => break,
                }
            }
        };
        state.update(action, &deck, &mut rng);
    }

    Ok(())
}

/// `None` when the user backs out of a prompt.
fn select_session() -> Result<Option<(CardSet, Domain)>> {
    let Some(set) = cancellable(Select::new("Select a set", SETS.to_vec()).prompt())? else {
        return Ok(None);
    };
    let Some(domain) = cancellable(Select::new("Select a domain (color)", DOMAINS.to_vec()).prompt())?
    else {
        return Ok(None);
    };
    Ok(Some((set, domain)))
}

fn study_menu(state: &StudyState) -> Result<Choice> {
    let mut choices = vec![Choice::Next, Choice::Previous];
    if state.reveal.top_left {
        choices.push(Choice::RevealCost);
    }
    if state.shows_top_right() && state.reveal.top_right {
        choices.push(Choice::RevealMight);
    }
    if state.reveal.bottom {
        choices.push(Choice::RevealText);
    }
    choices.extend([Choice::Back, Choice::Quit]);

    Ok(cancellable(Select::new("", choices).prompt())?.unwrap_or(Choice::Quit))
}

fn cancellable<T>(res: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(t) => Ok(Some(t)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn render(state: &StudyState) {
    let (pos, total) = state.position();
    let Some(card) = state.current_card() else {
        println!("\nNo cards match {}.", session_title(state));
        return;
    };

    println!("\n{}\nCard {pos} of {total}", session_title(state));
    println!("{} [{}] {}", card.name, card.public_code, card.rarity.label);
    println!("Image: {}", card.card_image.url);

    let cost = if state.reveal.top_left {
        HIDDEN.to_string()
    } else {
        let domains = card
            .domains
            .iter()
            .map(|d| d.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "energy {} | power {} | {domains}",
            stat(&card.energy),
            stat(&card.power)
        )
    };
    println!("Cost:  {cost}");

    if state.shows_top_right() {
        let might = if state.reveal.top_right {
            HIDDEN.to_string()
        } else {
            stat(&card.might)
        };
        println!("Might: {might}");
    }

    let text = if state.reveal.bottom { HIDDEN } else { card.text.as_str() };
    println!("Text:  {text}");
}

/// "Origins (OGN) / Fury", falling back to the raw ids for anything outside the catalog.
fn session_title(state: &StudyState) -> String {
    let set = state.selected_set.as_deref().unwrap_or_default();
    let domain = state.selected_domain.as_deref().unwrap_or_default();
    let set = find_set(set).map_or_else(|| set.to_string(), ToString::to_string);
    let domain = find_domain(domain).map_or_else(|| domain.to_string(), ToString::to_string);
    format!("{set} / {domain}")
}

fn stat(value: &Option<serde_json::Number>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".into())
}
