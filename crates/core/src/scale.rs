//! Zoom values understood by the document viewer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IntegrationError;

/// Scale applied to the viewer when pages initialize and after a resize
///
/// The named variants are resolved by the viewer against the container size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawScale", into = "RawScale")]
pub enum ScaleValue {
    PageActual,
    PageWidth,
    PageHeight,
    PageFit,
    #[default]
    Auto,
    /// Explicit zoom factor (1.0 = 100%)
    Custom(f64),
}

impl fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleValue::PageActual => write!(f, "page-actual"),
            ScaleValue::PageWidth => write!(f, "page-width"),
            ScaleValue::PageHeight => write!(f, "page-height"),
            ScaleValue::PageFit => write!(f, "page-fit"),
            ScaleValue::Auto => write!(f, "auto"),
            ScaleValue::Custom(scale) => write!(f, "{}", scale),
        }
    }
}

impl FromStr for ScaleValue {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page-actual" => Ok(ScaleValue::PageActual),
            "page-width" => Ok(ScaleValue::PageWidth),
            "page-height" => Ok(ScaleValue::PageHeight),
            "page-fit" => Ok(ScaleValue::PageFit),
            "auto" => Ok(ScaleValue::Auto),
            other => other
                .parse::<f64>()
                .map_err(|_| IntegrationError::InvalidConfig(format!("unknown scale value {other:?}")))
                .and_then(ScaleValue::custom),
        }
    }
}

impl ScaleValue {
    /// Explicit zoom factor, rejecting non-positive and non-finite values
    pub fn custom(scale: f64) -> Result<Self, IntegrationError> {
        if scale.is_finite() && scale > 0.0 {
            Ok(ScaleValue::Custom(scale))
        } else {
            Err(IntegrationError::InvalidConfig(format!(
                "scale must be a positive number, got {scale}"
            )))
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawScale {
    Number(f64),
    Named(String),
}

impl TryFrom<RawScale> for ScaleValue {
    type Error = IntegrationError;

    fn try_from(raw: RawScale) -> Result<Self, Self::Error> {
        match raw {
            RawScale::Number(scale) => ScaleValue::custom(scale),
            RawScale::Named(name) => name.parse(),
        }
    }
}

impl From<ScaleValue> for RawScale {
    fn from(value: ScaleValue) -> Self {
        match value {
            ScaleValue::Custom(scale) => RawScale::Number(scale),
            named => RawScale::Named(named.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_values_round_trip_through_strings() {
        for value in [
            ScaleValue::PageActual,
            ScaleValue::PageWidth,
            ScaleValue::PageHeight,
            ScaleValue::PageFit,
            ScaleValue::Auto,
        ] {
            assert_eq!(value.to_string().parse::<ScaleValue>().unwrap(), value);
        }
    }

    #[test]
    fn test_custom_scale() {
        assert_eq!("1.5".parse::<ScaleValue>().unwrap(), ScaleValue::Custom(1.5));
        assert!("0".parse::<ScaleValue>().is_err());
        assert!("zoomed".parse::<ScaleValue>().is_err());
    }

    #[test]
    fn test_serde_accepts_names_and_numbers() {
        let named: ScaleValue = serde_json::from_str("\"page-width\"").unwrap();
        assert_eq!(named, ScaleValue::PageWidth);
        let number: ScaleValue = serde_json::from_str("2.0").unwrap();
        assert_eq!(number, ScaleValue::Custom(2.0));
        assert_eq!(serde_json::to_string(&ScaleValue::Auto).unwrap(), "\"auto\"");
    }
}
