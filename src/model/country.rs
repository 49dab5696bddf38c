//! Country records as returned by the countries API.
//!
//! The pagination core treats a `Country` as opaque apart from its identity
//! key. The remaining accessors exist for the card renderer.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any field the API left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Regions offered by the filter panel, in display order.
pub const REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

// ===== CountryName =====

/// Name block of a country record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    /// Short, commonly used name ("France").
    pub common: String,
    /// Official name ("French Republic"), when provided.
    #[serde(default)]
    pub official: Option<String>,
}

// ===== Country =====

/// A single country record.
///
/// Deserialization is lenient: every field except `name.common` may be
/// missing or null and falls back to an empty value. Population accepts any
/// JSON number, and a value that is not a count shows as `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Common and official names.
    pub name: CountryName,

    /// Capital cities. Most countries have exactly one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital: Vec<String>,

    /// Continental region ("Europe").
    #[serde(default)]
    pub region: Option<String>,

    /// Population count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<u64>,

    /// UTC offsets the country spans ("UTC+01:00").
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,

    /// Flag, either an emoji or an image URL depending on the API.
    #[serde(default)]
    pub flag: Option<String>,
}

impl Country {
    /// Create a country with only a common name set.
    pub fn named(common: impl Into<String>) -> Self {
        Self {
            name: CountryName {
                common: common.into(),
                official: None,
            },
            capital: Vec::new(),
            region: None,
            population: None,
            timezones: Vec::new(),
            flag: None,
        }
    }

    /// Identity key used for list-key stability.
    pub fn key(&self) -> &str {
        &self.name.common
    }

    /// First capital, or `N/A`.
    pub fn capital_display(&self) -> &str {
        self.capital
            .first()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Region, or `N/A`.
    pub fn region_display(&self) -> &str {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Population with thousands separators, or `N/A`.
    pub fn population_display(&self) -> String {
        match self.population {
            Some(population) => group_thousands(population),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Timezones joined with `, `, or `N/A`.
    pub fn timezones_display(&self) -> String {
        if self.timezones.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.timezones.join(", ")
        }
    }

    /// Flag suitable for a terminal title.
    ///
    /// Image URLs cannot be drawn in a terminal, so only emoji-style flags are
    /// returned.
    pub fn flag_glyph(&self) -> Option<&str> {
        self.flag
            .as_deref()
            .filter(|f| !f.is_empty() && !f.contains("://"))
    }
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a count from any JSON number or numeric string.
///
/// Fractions are rounded. Negative, non-finite and non-numeric values become
/// `None` instead of failing the record.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(rounded_count)),
        Some(serde_json::Value::String(text)) => {
            text.trim().parse::<f64>().ok().and_then(rounded_count)
        }
        _ => None,
    })
}

fn rounded_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}
