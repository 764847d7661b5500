//! Type-safe domain enums for the configurator
//!
//! Categories, availability states, finding severities and sort orders are
//! closed enums instead of string keys, so every `match` is exhaustive and a
//! typo in a category name is a parse error rather than a silent miss.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the eight fixed hardware slots of a build.
///
/// Declaration order is the order slots are listed in summaries and quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    #[default]
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Storage,
    Psu,
    Case,
    Cooling,
}

impl Category {
    /// All categories in slot order.
    pub fn all() -> impl Iterator<Item = Category> {
        Self::iter()
    }

    /// Upper-case label used in quote line items (`CPU`, `MOTHERBOARD`, ...).
    pub fn label(self) -> String {
        self.to_string().to_uppercase()
    }

    /// Human-readable slot name (`CPU`, `Motherboard`, `Power Supply`, ...).
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Motherboard => "Motherboard",
            Self::Ram => "RAM",
            Self::Gpu => "GPU",
            Self::Storage => "Storage",
            Self::Psu => "Power Supply",
            Self::Case => "Case",
            Self::Cooling => "Cooling",
        }
    }

    /// Categories a quote is expected to contain before it is considered complete.
    pub const ESSENTIAL: [Category; 3] = [Category::Cpu, Category::Motherboard, Category::Ram];

    pub fn is_essential(self) -> bool {
        Self::ESSENTIAL.contains(&self)
    }
}

/// Stock state of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    #[strum(to_string = "In Stock", serialize = "in-stock")]
    InStock,
    #[strum(to_string = "Low Stock", serialize = "low-stock")]
    LowStock,
    #[strum(to_string = "Out of Stock", serialize = "out-of-stock")]
    OutOfStock,
}

impl Availability {
    /// Whether the part can currently be ordered
    pub fn is_orderable(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

/// Severity of a compatibility finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Ordering applied when browsing a category listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    /// Gaming score, best first
    Performance,
    /// Customer rating, best first
    Rating,
    /// Release date, most recent first
    Newest,
}

/// Qualitative label for a 0-100 performance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display)]
pub enum PerformanceRating {
    #[strum(serialize = "Poor")]
    Poor,
    #[strum(serialize = "Fair")]
    Fair,
    #[strum(serialize = "Good")]
    Good,
    #[strum(serialize = "Very Good")]
    VeryGood,
    #[strum(serialize = "Excellent")]
    Excellent,
}

impl PerformanceRating {
    /// Map a score to its rating. Thresholds are inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::VeryGood
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("cpu".parse::<Category>().unwrap(), Category::Cpu);
        assert_eq!("GPU".parse::<Category>().unwrap(), Category::Gpu);
        assert_eq!("Psu".parse::<Category>().unwrap(), Category::Psu);
        assert!("monitor".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_order_and_count() {
        let all: Vec<Category> = Category::all().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all.first(), Some(&Category::Cpu));
        assert_eq!(all.last(), Some(&Category::Cooling));
    }

    #[test]
    fn test_category_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Category::Motherboard).unwrap();
        assert_eq!(json, "\"motherboard\"");
        let parsed: Category = serde_json::from_str("\"case\"").unwrap();
        assert_eq!(parsed, Category::Case);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(Category::Cpu.label(), "CPU");
        assert_eq!(Category::Cooling.label(), "COOLING");
    }

    #[test]
    fn test_essentials() {
        assert!(Category::Cpu.is_essential());
        assert!(Category::Ram.is_essential());
        assert!(!Category::Gpu.is_essential());
    }

    #[test]
    fn test_availability_display_and_serde() {
        assert_eq!(Availability::LowStock.to_string(), "Low Stock");
        let parsed: Availability = serde_json::from_str("\"out-of-stock\"").unwrap();
        assert_eq!(parsed, Availability::OutOfStock);
        assert!(!parsed.is_orderable());
        assert!(Availability::InStock.is_orderable());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Newest);
        assert_eq!(SortOrder::PriceDesc.to_string(), "price-desc");
    }

    #[test]
    fn test_performance_rating_boundaries() {
        assert_eq!(PerformanceRating::from_score(90.0), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_score(89.99), PerformanceRating::VeryGood);
        assert_eq!(PerformanceRating::from_score(80.0), PerformanceRating::VeryGood);
        assert_eq!(PerformanceRating::from_score(70.0), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_score(60.0), PerformanceRating::Fair);
        assert_eq!(PerformanceRating::from_score(59.9), PerformanceRating::Poor);
        assert_eq!(PerformanceRating::from_score(0.0), PerformanceRating::Poor);
        assert_eq!(PerformanceRating::VeryGood.to_string(), "Very Good");
    }
}
