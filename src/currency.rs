//! Display-currency conversion and price formatting.
//!
//! Catalog prices are whole units of the source currency (USD). Everything a
//! visitor reads (listings, quote lines, totals) goes through [`Currency`] so
//! the exchange rate and digit grouping live in one place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How thousands are grouped when a price is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DigitGrouping {
    /// 12,34,567 (lakh/crore)
    #[default]
    Indian,
    /// 1,234,567
    Western,
}

/// Display currency settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    /// ISO code, informational only
    pub code: String,
    pub symbol: String,
    /// Display units per one source (USD) unit
    pub rate_from_usd: f64,
    pub grouping: DigitGrouping,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
            rate_from_usd: 83.5,
            grouping: DigitGrouping::Indian,
        }
    }
}

impl Currency {
    /// Source-currency pass-through (rate 1, western grouping)
    pub fn usd() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            rate_from_usd: 1.0,
            grouping: DigitGrouping::Western,
        }
    }

    /// Convert a source price to whole display units, rounding half up.
    pub fn convert(&self, usd: u64) -> u64 {
        let converted = (usd as f64 * self.rate_from_usd).round();
        if converted.is_finite() && converted > 0.0 {
            converted as u64
        } else {
            0
        }
    }

    /// Convert and format, e.g. `589` -> `₹49,182`
    pub fn format(&self, usd: u64) -> String {
        format!("{}{}", self.symbol, group_digits(self.convert(usd), self.grouping))
    }
}

/// Insert separators into an integer according to the grouping style
pub fn group_digits(value: u64, grouping: DigitGrouping) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
