//! Card records as the gallery ships them, and the flat schema we write out.
//!
//! The gallery's fields come in several shapes: plain scalars, `{value: {id, label}}`,
//! `{values: [{id, label}]}` or `{richText: {body}}`. Every such field is captured as a
//! [`Field`] and resolved once in [`transform`], where each output field gets a default.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::{Error, Result};

/// Orientation used when the gallery doesn't say.
pub const DEFAULT_ORIENTATION: &str = "portrait";
pub const UNKNOWN_SET_ID: &str = "UNKNOWN";
pub const UNKNOWN_SET_NAME: &str = "Unknown";
pub const DEFAULT_RARITY_ID: &str = "common";
pub const DEFAULT_RARITY_LABEL: &str = "Common";
/// Width `collectorNumber` is zero-padded to when building a public code.
const PUBLIC_CODE_NUMBER_WIDTH: usize = 3;

// ---------------------------------------------------------------------------
// Raw (gallery) side
// ---------------------------------------------------------------------------

/// A scalar that may be sent as a number or a string. Anything else ends up in `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
    Other(Value),
}

impl Scalar {
    /// Text form of the scalar; empty strings and non-scalars count as missing.
    pub fn text(&self) -> Option<String> {
        match self {
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Numeric form of the scalar; numeric strings are parsed.
    pub fn number(&self) -> Option<Number> {
        match self {
            Scalar::Number(n) => Some(n.clone()),
            Scalar::Text(s) => parse_number(s.trim()),
            Scalar::Other(_) => None,
        }
    }
}

/// `{id, label}` entry inside a wrapped field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawTag {
    pub id: Option<Scalar>,
    pub label: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RichText {
    pub body: Option<String>,
}

/// The object shapes the gallery wraps values in.
///
/// Each member is read on its own, so a sibling in an odd shape doesn't hide the one we need.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wrapper {
    pub value: Option<Lenient<RawTag>>,
    pub values: Option<Lenient<Vec<RawTag>>>,
    pub rich_text: Option<Lenient<RichText>>,
}

impl Wrapper {
    pub fn value(&self) -> Option<&RawTag> {
        self.value.as_ref().and_then(Lenient::known)
    }

    pub fn values(&self) -> &[RawTag] {
        self.values
            .as_ref()
            .and_then(Lenient::known)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn rich_text_body(&self) -> Option<&str> {
        self.rich_text.as_ref().and_then(Lenient::known)?.body.as_deref()
    }
}

/// Any variant-shaped gallery field.
///
/// Variants are tried in order, `Other` swallows whatever the others reject,
/// so deserializing a `Field` never fails.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Number(Number),
    Text(String),
    List(Vec<Scalar>),
    Wrapped(Wrapper),
    Other(Value),
}

impl Field {
    /// `value` of a wrapped field.
    pub fn single(&self) -> Option<&RawTag> {
        match self {
            Field::Wrapped(w) => w.value(),
            _ => None,
        }
    }

    /// `values` of a wrapped field, empty for every other shape.
    pub fn many(&self) -> &[RawTag] {
        match self {
            Field::Wrapped(w) => w.values(),
            _ => &[],
        }
    }

    /// A plain number, or a wrapped `value.id` that reads as one.
    pub fn numeric(&self) -> Option<Number> {
        match self {
            Field::Number(n) => Some(n.clone()),
            Field::Wrapped(_) => self.single()?.id.as_ref()?.number(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawImage {
    pub url: Option<Scalar>,
    pub colors: Option<Lenient<RawColors>>,
    pub accessibility_text: Option<Scalar>,
}

/// Either the shape we know how to read, or whatever came instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Unknown(Value),
}

impl<T> Lenient<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Lenient::Known(t) => Some(t),
            Lenient::Unknown(_) => None,
        }
    }
}

/// One item of the gallery's `cards.items` array.
///
/// Every field is optional and shape-tolerant; only a non-object item fails to deserialize.
/// `null` and absent fields both come through as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCard {
    pub id: Option<Scalar>,
    pub name: Option<Scalar>,
    pub collector_number: Option<Scalar>,
    pub public_code: Option<Scalar>,
    pub orientation: Option<Scalar>,
    pub set: Option<Field>,
    pub domain: Option<Field>,
    pub rarity: Option<Field>,
    pub card_type: Option<Field>,
    pub card_image: Option<Lenient<RawImage>>,
    pub illustrator: Option<Field>,
    pub text: Option<Field>,
    pub energy: Option<Field>,
    pub power: Option<Field>,
    pub might: Option<Field>,
}

impl RawCard {
    /// Fails only if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::CardNotAnObject(value.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

// ---------------------------------------------------------------------------
// Normalized side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Collector numbers are kept in whichever form the gallery used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectorNumber {
    Number(Number),
    Text(String),
}

impl std::fmt::Display for CollectorNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectorNumber::Number(n) => write!(f, "{n}"),
            CollectorNumber::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardColors {
    pub primary: String,
    pub secondary: String,
    pub label: String,
}

impl Default for CardColors {
    fn default() -> Self {
        Self {
            primary: "#000000".into(),
            secondary: "#FFFFFF".into(),
            label: "#000000".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    pub url: String,
    pub colors: CardColors,
    pub accessibility_text: String,
}

/// The flat record written to the output JSON and read back by the study tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCard {
    pub id: String,
    pub name: String,
    pub collector_number: CollectorNumber,
    pub public_code: String,
    pub orientation: String,
    pub set: String,
    pub set_name: String,
    pub domains: Vec<Tag>,
    pub rarity: Tag,
    pub card_type: Vec<Tag>,
    pub card_image: CardImage,
    pub illustrator: Vec<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub might: Option<Number>,
}

impl NormalizedCard {
    pub fn has_domain(&self, domain_id: &str) -> bool {
        self.domains.iter().any(|d| d.id == domain_id)
    }

    pub fn has_card_type(&self, type_id: &str) -> bool {
        self.card_type.iter().any(|t| t.id == type_id)
    }

    /// Units are the only cards with a power stat printed top right.
    pub fn is_unit(&self) -> bool {
        self.has_card_type("unit")
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Maps one gallery record to the output schema, filling in defaults for everything
/// that is missing or came in an unexpected shape.
pub fn transform(card: &RawCard) -> NormalizedCard {
    let set_tag = card.set.as_ref().and_then(Field::single);
    let set = tag_text(set_tag.and_then(|t| t.id.as_ref())).unwrap_or_else(|| UNKNOWN_SET_ID.into());
    let set_name =
        tag_text(set_tag.and_then(|t| t.label.as_ref())).unwrap_or_else(|| UNKNOWN_SET_NAME.into());

    let collector_number = match &card.collector_number {
        Some(Scalar::Number(n)) => CollectorNumber::Number(n.clone()),
        Some(Scalar::Text(s)) => CollectorNumber::Text(s.clone()),
        _ => CollectorNumber::Text(String::new()),
    };

    let public_code = tag_text(card.public_code.as_ref())
        .unwrap_or_else(|| derive_public_code(&set, &collector_number));

    let rarity_tag = card.rarity.as_ref().and_then(Field::single);
    let rarity = Tag::new(
        tag_text(rarity_tag.and_then(|t| t.id.as_ref())).unwrap_or_else(|| DEFAULT_RARITY_ID.into()),
        tag_text(rarity_tag.and_then(|t| t.label.as_ref()))
            .unwrap_or_else(|| DEFAULT_RARITY_LABEL.into()),
    );

    NormalizedCard {
        id: tag_text(card.id.as_ref()).unwrap_or_default(),
        name: tag_text(card.name.as_ref()).unwrap_or_default(),
        collector_number,
        public_code,
        orientation: tag_text(card.orientation.as_ref())
            .unwrap_or_else(|| DEFAULT_ORIENTATION.into()),
        set,
        set_name,
        domains: tags(card.domain.as_ref()),
        rarity,
        card_type: tags(card.card_type.as_ref()),
        card_image: card_image(card.card_image.as_ref().and_then(Lenient::known)),
        illustrator: illustrators(card.illustrator.as_ref()),
        text: rules_text(card.text.as_ref()),
        energy: card.energy.as_ref().and_then(Field::numeric),
        power: card.power.as_ref().and_then(Field::numeric),
        might: card.might.as_ref().and_then(Field::numeric),
    }
}

/// `<set>-<collector number padded to 3 with zeros>`, e.g. `OGN-007`.
pub fn derive_public_code(set: &str, collector_number: &CollectorNumber) -> String {
    format!(
        "{set}-{:0>width$}",
        collector_number.to_string(),
        width = PUBLIC_CODE_NUMBER_WIDTH
    )
}

#[inline]
fn tag_text(scalar: Option<&Scalar>) -> Option<String> {
    scalar.and_then(Scalar::text)
}

fn tags(field: Option<&Field>) -> Vec<Tag> {
    field
        .map(Field::many)
        .unwrap_or_default()
        .iter()
        .map(|t| {
            Tag::new(
                tag_text(t.id.as_ref()).unwrap_or_default(),
                tag_text(t.label.as_ref()).unwrap_or_default(),
            )
        })
        .collect()
}

fn card_image(image: Option<&RawImage>) -> CardImage {
    let Some(image) = image else {
        return CardImage {
            url: String::new(),
            colors: CardColors::default(),
            accessibility_text: String::new(),
        };
    };

    let defaults = CardColors::default();
    let colors = match image.colors.as_ref().and_then(Lenient::known) {
        Some(raw) => CardColors {
            primary: raw.primary.clone().unwrap_or(defaults.primary),
            secondary: raw.secondary.clone().unwrap_or(defaults.secondary),
            label: raw.label.clone().unwrap_or(defaults.label),
        },
        None => defaults,
    };

    CardImage {
        url: tag_text(image.url.as_ref()).unwrap_or_default(),
        colors,
        accessibility_text: tag_text(image.accessibility_text.as_ref()).unwrap_or_default(),
    }
}

fn illustrators(field: Option<&Field>) -> Vec<String> {
    match field {
        Some(Field::List(names)) => names.iter().filter_map(Scalar::text).collect(),
        Some(field) => field
            .many()
            .iter()
            .filter_map(|t| tag_text(t.label.as_ref()))
            .collect(),
        None => Vec::new(),
    }
}

fn rules_text(field: Option<&Field>) -> String {
    match field {
        Some(Field::Text(text)) => text.clone(),
        Some(Field::Wrapped(w)) => w.rich_text_body().unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n.into());
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}
