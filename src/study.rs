//! Flashcard session state. All changes go through [`StudyState::update`],
//! the front-end only renders what it finds here.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::NormalizedCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Selecting,
    Studying,
}

/// Which regions of the current card are still covered. `true` means hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    /// Energy cost, power cost and domain symbols.
    pub top_left: bool,
    /// Might, only printed on units.
    pub top_right: bool,
    /// Rules text.
    pub bottom: bool,
}

impl Reveal {
    pub const HIDDEN: Reveal = Reveal {
        top_left: true,
        top_right: true,
        bottom: true,
    };
}

impl Default for Reveal {
    fn default() -> Self {
        Self::HIDDEN
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectSet(String),
    SelectDomain(String),
    StartLearning,
    NextCard,
    PrevCard,
    RevealTopLeft,
    RevealTopRight,
    RevealBottom,
    GoBack,
}

#[derive(Debug, Clone, Default)]
pub struct StudyState {
    pub screen: Screen,
    pub selected_set: Option<String>,
    pub selected_domain: Option<String>,
    /// Shuffled cards of the current session, empty while selecting.
    pub cards: Vec<NormalizedCard>,
    pub index: usize,
    pub reveal: Reveal,
}

impl StudyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action`. `deck` is the full dataset, `rng` drives the shuffle on start.
    pub fn update<R: Rng + ?Sized>(&mut self, action: Action, deck: &[NormalizedCard], rng: &mut R) {
        match (self.screen, action) {
            (Screen::Selecting, Action::SelectSet(set)) => self.selected_set = Some(set),
            (Screen::Selecting, Action::SelectDomain(domain)) => self.selected_domain = Some(domain),
            (Screen::Selecting, Action::StartLearning) => self.start_learning(deck, rng),

            (Screen::Studying, Action::NextCard) => self.step(1),
            (Screen::Studying, Action::PrevCard) => self.step(-1),
            (Screen::Studying, Action::RevealTopLeft) => self.reveal.top_left = false,
            (Screen::Studying, Action::RevealTopRight) => {
                if self.shows_top_right() {
                    self.reveal.top_right = false;
                }
            }
            (Screen::Studying, Action::RevealBottom) => self.reveal.bottom = false,
            (Screen::Studying, Action::GoBack) => {
                self.cards.clear();
                self.index = 0;
                self.screen = Screen::Selecting;
            }

            // Anything else doesn't apply on the current screen.
            _ => {}
        }
    }

    /// Both a set and a domain must be picked. An empty result still starts a session.
    fn start_learning<R: Rng + ?Sized>(&mut self, deck: &[NormalizedCard], rng: &mut R) {
        let (Some(set), Some(domain)) = (&self.selected_set, &self.selected_domain) else {
            return;
        };

        let mut cards = deck
            .iter()
            .filter(|c| &c.set == set && c.has_domain(domain))
            .cloned()
            .collect::<Vec<_>>();
        cards.shuffle(rng);

        self.cards = cards;
        self.index = 0;
        self.reveal = Reveal::HIDDEN;
        self.screen = Screen::Studying;
    }

    fn step(&mut self, delta: isize) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        self.index = (self.index as isize + delta).rem_euclid(len as isize) as usize;
        self.reveal = Reveal::HIDDEN;
    }

    pub fn can_start(&self) -> bool {
        self.selected_set.is_some() && self.selected_domain.is_some()
    }

    pub fn current_card(&self) -> Option<&NormalizedCard> {
        match self.screen {
            Screen::Studying => self.cards.get(self.index),
            Screen::Selecting => None,
        }
    }

    /// Whether the current card has a top right region at all.
    pub fn shows_top_right(&self) -> bool {
        self.current_card().is_some_and(NormalizedCard::is_unit)
    }

    /// "Card i of n", 1-based.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{transform, RawCard};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::HashSet;

    fn card(id: &str, set: &str, domains: &[&str], types: &[&str]) -> NormalizedCard {
        let domains = domains.iter().map(|d| json!({"id": d, "label": d})).collect::<Vec<_>>();
        let types = types.iter().map(|t| json!({"id": t, "label": t})).collect::<Vec<_>>();
        let raw = RawCard::from_value(json!({
            "id": id,
            "name": id,
            "set": {"value": {"id": set}},
            "domain": {"values": domains},
            "cardType": {"values": types}
        }))
        .unwrap();
        transform(&raw)
    }

    fn deck() -> Vec<NormalizedCard> {
        vec![
            card("ogn-1", "OGN", &["fury"], &["unit"]),
            card("ogn-2", "OGN", &["fury", "chaos"], &["spell"]),
            card("ogn-3", "OGN", &["calm"], &["unit"]),
            card("sfd-1", "SFD", &["fury"], &["unit"]),
            card("ogn-4", "OGN", &["chaos", "fury"], &["gear"]),
        ]
    }

    fn studying(set: &str, domain: &str, deck: &[NormalizedCard]) -> StudyState {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = StudyState::new();
        state.update(Action::SelectSet(set.into()), deck, &mut rng);
        state.update(Action::SelectDomain(domain.into()), deck, &mut rng);
        state.update(Action::StartLearning, deck, &mut rng);
        state
    }

    #[test]
    fn start_filters_by_set_and_domain() {
        let deck = deck();
        let state = studying("OGN", "fury", &deck);

        assert_eq!(state.screen, Screen::Studying);
        assert_eq!(state.index, 0);
        assert!(state.cards.iter().all(|c| c.set == "OGN" && c.has_domain("fury")));

        let ids = state.cards.iter().map(|c| c.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(ids, HashSet::from(["ogn-1", "ogn-2", "ogn-4"]));
    }

    #[test]
    fn start_needs_both_selections() {
        let deck = deck();
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = StudyState::new();
        state.update(Action::SelectSet("OGN".into()), &deck, &mut rng);
        assert!(!state.can_start());
        state.update(Action::StartLearning, &deck, &mut rng);
        assert_eq!(state.screen, Screen::Selecting);
        assert!(state.cards.is_empty());
    }

    #[test]
    fn navigation_wraps_and_hides_everything() {
        let deck = deck();
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = studying("OGN", "fury", &deck);
        let last = state.cards.len() - 1;

        state.update(Action::PrevCard, &deck, &mut rng);
        assert_eq!(state.index, last);

        state.update(Action::RevealTopLeft, &deck, &mut rng);
        state.update(Action::RevealBottom, &deck, &mut rng);
        assert!(!state.reveal.top_left && !state.reveal.bottom);

        state.update(Action::NextCard, &deck, &mut rng);
        assert_eq!(state.index, 0);
        assert_eq!(state.reveal, Reveal::HIDDEN);
        assert_eq!(state.position(), (1, 3));
    }

    #[test]
    fn top_right_only_on_units() {
        let deck = vec![card("spell", "OGN", &["mind"], &["spell"])];
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = studying("OGN", "mind", &deck);

        assert!(!state.shows_top_right());
        state.update(Action::RevealTopRight, &deck, &mut rng);
        assert!(state.reveal.top_right);

        let deck = vec![card("unit", "OGN", &["mind"], &["unit"])];
        let mut state = studying("OGN", "mind", &deck);
        assert!(state.shows_top_right());
        state.update(Action::RevealTopRight, &deck, &mut rng);
        assert!(!state.reveal.top_right);
        assert!(state.reveal.top_left && state.reveal.bottom);
    }

    #[test]
    fn empty_session_is_allowed_and_inert() {
        let deck = deck();
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = studying("OGS", "order", &deck);

        assert_eq!(state.screen, Screen::Studying);
        assert!(state.current_card().is_none());
        state.update(Action::NextCard, &deck, &mut rng);
        state.update(Action::PrevCard, &deck, &mut rng);
        assert_eq!(state.index, 0);
    }

    #[test]
    fn go_back_clears_session_but_keeps_selection() {
        let deck = deck();
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = studying("OGN", "fury", &deck);
        state.update(Action::NextCard, &deck, &mut rng);
        state.update(Action::GoBack, &deck, &mut rng);

        assert_eq!(state.screen, Screen::Selecting);
        assert!(state.cards.is_empty());
        assert_eq!(state.index, 0);
        assert_eq!(state.selected_set.as_deref(), Some("OGN"));
        assert!(state.current_card().is_none());
    }

    #[test]
    fn selection_is_ignored_while_studying() {
        let deck = deck();
        let mut rng = StdRng::seed_from_u64(13);
        let mut state = studying("OGN", "fury", &deck);
        state.update(Action::SelectSet("SFD".into()), &deck, &mut rng);
        assert_eq!(state.selected_set.as_deref(), Some("OGN"));
    }
}
