//! Screenshots attached to a trade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Moment of the trade an image documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Before,
    During,
    After,
    #[default]
    Analysis,
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageType::Before => "before",
            ImageType::During => "during",
            ImageType::After => "after",
            ImageType::Analysis => "analysis",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ImageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" => Ok(ImageType::Before),
            "during" => Ok(ImageType::During),
            "after" => Ok(ImageType::After),
            "analysis" => Ok(ImageType::Analysis),
            _ => Err(ValidationError::UnknownLabel {
                kind: "image type",
                label: s.to_string(),
            }),
        }
    }
}

/// Image stored for a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeImage {
    pub id: u64,
    pub trade_id: u64,
    pub image_url: String,
    pub image_type: ImageType,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_type_parse() {
        assert_eq!(ImageType::from_str("Before").unwrap(), ImageType::Before);
        assert_eq!(ImageType::default(), ImageType::Analysis);
        assert!(ImageType::from_str("thumbnail").is_err());
    }
}
