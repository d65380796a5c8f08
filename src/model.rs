use serde::{Serialize, Serializer};

/// Serialized in place of any value the upstream did not provide.
pub const UNKNOWN: &str = "N/A";

/// A numeric field that may be missing upstream.
///
/// Always serializes to a value: a JSON number, the raw text the upstream
/// supplied, or the [`UNKNOWN`] sentinel. Consumers never see a missing key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Measure {
    Number(f64),
    Text(String),
    #[default]
    Unknown,
}

impl Measure {
    /// Interpret a loosely typed JSON value.
    ///
    /// Numbers and numeric strings become [`Measure::Number`], other
    /// non-empty strings are kept verbatim, everything else is unknown.
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => n.as_f64().map_or(Measure::Unknown, Measure::Number),
            Some(serde_json::Value::String(s)) => Measure::from_text(s),
            _ => Measure::Unknown,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNKNOWN) {
            return Measure::Unknown;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Measure::Number(n),
            _ => Measure::Text(trimmed.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Measure::Unknown)
    }
}

impl From<Option<f64>> for Measure {
    fn from(value: Option<f64>) -> Self {
        value
            .filter(|n| n.is_finite())
            .map_or(Measure::Unknown, Measure::Number)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole numbers go out as integers so `45` does not become `45.0`
            Measure::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Measure::Number(n) => serializer.serialize_f64(*n),
            Measure::Text(s) => serializer.serialize_str(s),
            Measure::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: Measure,
    pub unit: String,
}

/// The normalized recipe shape returned by every recipe endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    pub cuisine: Vec<String>,
    pub preparation_time: Measure,
    pub servings: Measure,
    pub vegetarian: bool,
    pub vegan: bool,
    #[serde(rename = "glutenFree")]
    pub gluten_free: bool,
    pub calories: Measure,
    pub protein: Measure,
    pub fat: Measure,
    pub carbs: Measure,
    pub summary: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

/// A food news entry.
///
/// `read`, `emoji` and `tag` are cosmetic filler picked at random; they
/// carry no information about the article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsArticle {
    pub title: String,
    pub link: String,
    pub date: String,
    pub read: String,
    pub emoji: String,
    pub tag: String,
}
