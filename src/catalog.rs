//! Sets and domains the study tool offers to pick from.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSet {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub id: &'static str,
    pub name: &'static str,
}

pub const SETS: [CardSet; 3] = [
    CardSet { id: "OGN", name: "Origins" },
    CardSet { id: "OGS", name: "Proving Grounds" },
    CardSet { id: "SFD", name: "Spiritforged" },
];

pub const DOMAINS: [Domain; 6] = [
    Domain { id: "body", name: "Body" },
    Domain { id: "calm", name: "Calm" },
    Domain { id: "chaos", name: "Chaos" },
    Domain { id: "fury", name: "Fury" },
    Domain { id: "mind", name: "Mind" },
    Domain { id: "order", name: "Order" },
];

pub fn find_set(id: &str) -> Option<&'static CardSet> {
    SETS.iter().find(|s| s.id == id)
}

pub fn find_domain(id: &str) -> Option<&'static Domain> {
    DOMAINS.iter().find(|d| d.id == id)
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
