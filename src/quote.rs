//! Quote request composition.
//!
//! Turns a build into the subject and body of an email to the shop. A build
//! with no parts gets the consultation template instead of a line-item list.
//! Nothing here performs I/O; delivery is the job of `dispatch`.

use strum::Display;

use crate::aggregate::{self, PerformanceAxis};
use crate::config::QuoteSettings;
use crate::currency::Currency;
use crate::selection::Build;

/// Which template a message was produced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QuoteKind {
    #[strum(serialize = "quote request")]
    LineItems,
    #[strum(serialize = "custom PC consultation")]
    Consultation,
}

/// A ready-to-send message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMessage {
    pub kind: QuoteKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl QuoteMessage {
    /// `mailto:` URL with percent-encoded subject and body
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }

    /// Plain-text draft for pasting into a mail client
    pub fn draft_text(&self) -> String {
        format!(
            "Subject: {}\n\nTo: {}\n\n{}",
            self.subject, self.recipient, self.body
        )
    }

    /// Last-resort instruction when no channel could deliver
    pub fn advisory(&self) -> String {
        format!("Please email {} for {}.", self.recipient, self.kind)
    }
}

/// Compose the message for `build`, falling back to the consultation
/// template when nothing is selected.
pub fn compose(build: &Build, currency: &Currency, settings: &QuoteSettings) -> QuoteMessage {
    if build.is_empty() {
        return compose_consultation(currency, settings);
    }

    let summary = aggregate::summarize(build);
    let count = build.filled_count();

    let lines: Vec<String> = build
        .iter()
        .map(|(category, component)| {
            format!(
                "{}: {} - {}",
                category.label(),
                component.name,
                currency.format(u64::from(component.price))
            )
        })
        .collect();

    let total_text = if summary.total_price > 0 {
        currency.format(summary.total_price)
    } else {
        "To be quoted".to_string()
    };
    let power_text = if summary.total_power > 0 {
        format!("{}W", summary.total_power)
    } else {
        "To be calculated".to_string()
    };
    let perf = &summary.performance;
    let performance_text = if perf.rounded(PerformanceAxis::Gaming) > 0 {
        format!(
            "Gaming {}%, Productivity {}%, Creation {}%",
            perf.rounded(PerformanceAxis::Gaming),
            perf.rounded(PerformanceAxis::Productivity),
            perf.rounded(PerformanceAxis::Creation)
        )
    } else {
        "To be determined based on final configuration".to_string()
    };

    let body = format!(
        "Hello {business},\n\
         \n\
         I would like to request a quote for the following PC build:\n\
         \n\
         {lines}\n\
         \n\
         Total Estimated Price: {total}\n\
         Estimated Power Consumption: {power}\n\
         \n\
         Please provide me with:\n\
         - Final pricing including assembly\n\
         - Availability timeline\n\
         - Warranty information\n\
         - Any recommended modifications\n\
         \n\
         Additional Information:\n\
         - Build Configuration: {count} components selected\n\
         - Performance Rating: {performance}\n\
         \n\
         Thank you!",
        business = settings.business_name,
        lines = lines.join("\n"),
        total = total_text,
        power = power_text,
        count = count,
        performance = performance_text,
    );

    QuoteMessage {
        kind: QuoteKind::LineItems,
        recipient: settings.recipient.clone(),
        subject: format!("PC Build Quote Request - {} ({} Components)", total_text, count),
        body,
    }
}

/// The open-ended consultation request
pub fn compose_consultation(currency: &Currency, settings: &QuoteSettings) -> QuoteMessage {
    let body = format!(
        "Hello {business},\n\
         \n\
         I would like to request a custom PC build consultation.\n\
         \n\
         My Requirements:\n\
         [ ] Gaming PC\n\
         [ ] Workstation/Professional\n\
         [ ] Content Creation\n\
         [ ] Office/Productivity\n\
         [ ] AI/Machine Learning\n\
         [ ] Server/NAS\n\
         [ ] Other: ________________\n\
         \n\
         Budget Range: {symbol}____________\n\
         \n\
         Specific Requirements:\n\
         - Performance needs: ________________\n\
         - Preferred brands: ________________\n\
         - Special software requirements: ________________\n\
         - Form factor preferences: ________________\n\
         - Aesthetic preferences: ________________\n\
         \n\
         Please provide me with:\n\
         - Custom component recommendations\n\
         - Final pricing including assembly\n\
         - Availability timeline\n\
         - Warranty information\n\
         - Performance estimates\n\
         \n\
         Additional Notes:\n\
         ________________\n\
         \n\
         Thank you for your custom PC building service!",
        business = settings.business_name,
        symbol = currency.symbol,
    );

    QuoteMessage {
        kind: QuoteKind::Consultation,
        recipient: settings.recipient.clone(),
        subject: "Custom PC Build Consultation Request".to_string(),
        body,
    }
}
