//! Skintone categories and the numeric scale classifier.
//!
//! The catalog groups foundation shades into six canonical categories. Clients
//! that only know a position on the 1-10 scale use [`classify`] to find the
//! category to filter by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lowest value on the numeric skintone scale.
pub const SCALE_MIN: i64 = 1;
/// Highest value on the numeric skintone scale.
pub const SCALE_MAX: i64 = 10;

/// One of the six canonical skintone categories.
///
/// Serialized as its canonical uppercase text (e.g. `"LIGHT MEDIUM"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkintoneLabel {
    #[serde(rename = "FAIR")]
    Fair,
    #[serde(rename = "LIGHT")]
    Light,
    #[serde(rename = "LIGHT MEDIUM")]
    LightMedium,
    #[serde(rename = "MEDIUM TAN")]
    MediumTan,
    #[serde(rename = "DARK")]
    Dark,
    #[serde(rename = "DEEP")]
    Deep,
}

impl SkintoneLabel {
    /// Every category, lightest first.
    pub const ALL: [SkintoneLabel; 6] = [
        SkintoneLabel::Fair,
        SkintoneLabel::Light,
        SkintoneLabel::LightMedium,
        SkintoneLabel::MediumTan,
        SkintoneLabel::Dark,
        SkintoneLabel::Deep,
    ];

    /// Canonical text stored in the `skintone` field of a shade record.
    pub fn as_str(self) -> &'static str {
        match self {
            SkintoneLabel::Fair => "FAIR",
            SkintoneLabel::Light => "LIGHT",
            SkintoneLabel::LightMedium => "LIGHT MEDIUM",
            SkintoneLabel::MediumTan => "MEDIUM TAN",
            SkintoneLabel::Dark => "DARK",
            SkintoneLabel::Deep => "DEEP",
        }
    }
}

impl fmt::Display for SkintoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a canonical category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a canonical skintone category")]
pub struct UnknownSkintone(pub String);

impl FromStr for SkintoneLabel {
    type Err = UnknownSkintone;

    /// Case-insensitive. `_` and `-` are accepted as word separators and runs
    /// of whitespace are collapsed, so `"light_medium"` parses as
    /// [`SkintoneLabel::LightMedium`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        SkintoneLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| UnknownSkintone(s.to_string()))
    }
}

/// Map a position on the 1-10 scale to its category.
///
/// Returns `None` for any value outside the scale. That is a client input
/// problem, not a fault.
pub fn classify(number: i64) -> Option<SkintoneLabel> {
    match number {
        1 | 2 => Some(SkintoneLabel::Fair),
        3 | 4 => Some(SkintoneLabel::Light),
        5 => Some(SkintoneLabel::LightMedium),
        6 => Some(SkintoneLabel::MediumTan),
        7 | 8 => Some(SkintoneLabel::Dark),
        9 | 10 => Some(SkintoneLabel::Deep),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_the_whole_scale() {
        let expected = [
            (1, SkintoneLabel::Fair),
            (2, SkintoneLabel::Fair),
            (3, SkintoneLabel::Light),
            (4, SkintoneLabel::Light),
            (5, SkintoneLabel::LightMedium),
            (6, SkintoneLabel::MediumTan),
            (7, SkintoneLabel::Dark),
            (8, SkintoneLabel::Dark),
            (9, SkintoneLabel::Deep),
            (10, SkintoneLabel::Deep),
        ];

        for (number, label) in expected {
            assert_eq!(classify(number), Some(label), "number {number}");
        }
    }

    #[test]
    fn classify_rejects_values_off_the_scale() {
        for number in [i64::MIN, -1, 0, 11, 42, i64::MAX] {
            assert_eq!(classify(number), None, "number {number}");
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("fair".parse::<SkintoneLabel>(), Ok(SkintoneLabel::Fair));
        assert_eq!("  Deep ".parse::<SkintoneLabel>(), Ok(SkintoneLabel::Deep));
        assert_eq!("light_medium".parse::<SkintoneLabel>(), Ok(SkintoneLabel::LightMedium));
        assert_eq!("medium-tan".parse::<SkintoneLabel>(), Ok(SkintoneLabel::MediumTan));
        assert_eq!("LIGHT   MEDIUM".parse::<SkintoneLabel>(), Ok(SkintoneLabel::LightMedium));
    }

    #[test]
    fn free_form_labels_do_not_parse() {
        let err = "warm beige".parse::<SkintoneLabel>().unwrap_err();
        assert_eq!(err, UnknownSkintone("warm beige".to_string()));
        assert!("".parse::<SkintoneLabel>().is_err());
    }

    #[test]
    fn label_serializes_as_canonical_text() {
        let json = serde_json::to_string(&SkintoneLabel::MediumTan).unwrap();
        assert_eq!(json, "\"MEDIUM TAN\"");

        for label in SkintoneLabel::ALL {
            assert_eq!(label.to_string(), label.as_str());
        }
    }
}
