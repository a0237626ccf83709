use crate::domain::ids::{ProductId, RecordId};
use crate::error::CoreError;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Relationship category between a product and its recommended product.
///
/// The integer code is the wire representation, the label is what the panel
/// shows and edits. This enum is the only place the two are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationType {
    Generic,
    BoughtTogether,
    CrossSell,
    UpSell,
    Complementary,
}

impl RecommendationType {
    pub const ALL: [RecommendationType; 5] = [
        RecommendationType::Generic,
        RecommendationType::BoughtTogether,
        RecommendationType::CrossSell,
        RecommendationType::UpSell,
        RecommendationType::Complementary,
    ];

    pub fn code(self) -> i64 {
        match self {
            RecommendationType::Generic => 0,
            RecommendationType::BoughtTogether => 1,
            RecommendationType::CrossSell => 2,
            RecommendationType::UpSell => 3,
            RecommendationType::Complementary => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecommendationType::Generic => "Generic",
            RecommendationType::BoughtTogether => "BoughtTogether",
            RecommendationType::CrossSell => "CrossSell",
            RecommendationType::UpSell => "UpSell",
            RecommendationType::Complementary => "Complementary",
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
    }

    /// Reads the form's `type` field. Empty means "not given"; labels and
    /// in-range codes are accepted, anything else is rejected.
    pub fn parse_field(raw: &str) -> Result<Option<Self>, CoreError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl FromStr for RecommendationType {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(kind) = Self::from_label(trimmed) {
            return Ok(kind);
        }
        trimmed
            .parse::<i64>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| CoreError::InvalidRecommendationType(raw.to_string()))
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RecommendationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

/// The raw `type` code as received from the server. Codes outside the known
/// set are kept as-is rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeCode(pub i64);

impl TypeCode {
    pub fn code(self) -> i64 {
        self.0
    }

    pub fn kind(self) -> Option<RecommendationType> {
        RecommendationType::from_code(self.0)
    }

    /// Text for the form: the label for known codes, the decimal code otherwise.
    pub fn form_text(self) -> String {
        match self.kind() {
            Some(kind) => kind.label().to_string(),
            None => self.0.to_string(),
        }
    }
}

impl From<RecommendationType> for TypeCode {
    fn from(kind: RecommendationType) -> Self {
        Self(kind.code())
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

struct TypeCodeVisitor;

impl<'de> Visitor<'de> for TypeCodeVisitor {
    type Value = TypeCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer type code or a type label")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(TypeCode(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(TypeCode)
            .map_err(|_| E::custom(format!("type code out of range: {value}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if let Some(kind) = RecommendationType::from_label(value) {
            return Ok(kind.into());
        }
        value
            .trim()
            .parse::<i64>()
            .map(TypeCode)
            .map_err(|_| E::custom(format!("unknown type label: {value}")))
    }
}

impl<'de> Deserialize<'de> for TypeCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TypeCodeVisitor)
    }
}

/// A recommendation as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(deserialize_with = "required_id")]
    pub id: RecordId,
    pub product_id: ProductId,
    pub rec_product_id: ProductId,
    #[serde(rename = "type")]
    pub rec_type: TypeCode,
    #[serde(default)]
    pub interested: u64,
}

/// A loaded record always has an id, so the form's id is blank only when
/// nothing is loaded.
fn required_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RecordId, D::Error> {
    let id = RecordId::deserialize(deserializer)?;
    if id.as_str().trim().is_empty() {
        return Err(de::Error::custom("record id is empty"));
    }
    Ok(id)
}

/// Body of create and update requests. `interested` is server-owned and never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationDraft {
    pub product_id: ProductId,
    pub rec_product_id: ProductId,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rec_type: Option<RecommendationType>,
}
