//! Plain-text rendering for the command-line front end.

use std::sync::Arc;

use crate::aggregate::{BuildSummary, PerformanceAxis};
use crate::app::{Notice, NoticeLevel};
use crate::catalog::Component;
use crate::currency::Currency;
use crate::presets::Preset;
use crate::selection::Build;
use crate::types::{Category, Severity};

const AXES: [(PerformanceAxis, &str); 3] = [
    (PerformanceAxis::Gaming, "Gaming"),
    (PerformanceAxis::Productivity, "Productivity"),
    (PerformanceAxis::Creation, "Creation"),
];

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "✗",
        Severity::Warning => "!",
        Severity::Success => "✓",
    }
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✓",
        NoticeLevel::Warning => "!",
        NoticeLevel::Error => "✗",
    };
    format!("{} {}", marker, notice.message)
}

/// Join lines with a trailing newline
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Slot list, totals, PSU advice, performance and findings
pub fn render_summary(build: &Build, summary: &BuildSummary, currency: &Currency) -> String {
    let mut lines = vec![format!(
        "Your Build ({}/{} slots)",
        summary.filled,
        Category::all().count()
    )];

    lines.extend(Category::all().map(|category| match build.get(category) {
        Some(c) => format!(
            "  {:<13} {} ({})",
            category.display_name(),
            c.name,
            currency.format(u64::from(c.price))
        ),
        None => format!("  {:<13} -", category.display_name()),
    }));

    lines.push(String::new());
    lines.push(format!("Total Price:       {}", currency.format(summary.total_price)));
    lines.push(format!("Power Consumption: {}W", summary.total_power));
    lines.push(format!("Recommended PSU:   {}W", summary.recommended_psu));

    if !summary.performance.is_zero() {
        lines.push(String::new());
        lines.push("Performance".to_string());
        lines.extend(AXES.iter().map(|&(axis, name)| {
            format!(
                "  {:<13} {:>3}%  {}",
                name,
                summary.performance.rounded(axis),
                summary.performance.rating(axis)
            )
        }));
    }

    if !summary.findings.is_empty() {
        lines.push(String::new());
        lines.push("Compatibility".to_string());
        lines.extend(
            summary
                .findings
                .iter()
                .map(|f| format!("  {} {}", severity_marker(f.severity), f.message)),
        );
    }

    finish(lines)
}

/// One line per component of a browse result, plus its specs when present
pub fn render_listing(
    category: Category,
    items: &[Arc<Component>],
    selected: Option<&str>,
    currency: &Currency,
) -> String {
    if items.is_empty() {
        return format!("No {} components match.\n", category.display_name());
    }

    let mut lines = Vec::with_capacity(items.len() * 2);
    for c in items {
        let mark = if selected == Some(c.id.as_str()) { "*" } else { " " };
        lines.push(format!(
            "{} {:<30} {:<42} {:>10}  {:.1}★  {}",
            mark,
            c.id,
            c.name,
            currency.format(u64::from(c.price)),
            c.rating,
            c.availability
        ));
        if !c.specs.is_empty() {
            lines.push(format!("  {}", c.specs));
        }
    }
    finish(lines)
}

pub fn render_brands(category: Category, brands: &[&str]) -> String {
    if brands.is_empty() {
        return format!("No {} brands in the catalog.\n", category.display_name());
    }
    finish(brands.iter().map(|b| b.to_string()).collect())
}

pub fn render_presets(presets: &[Preset]) -> String {
    presets
        .iter()
        .map(|p| format!("{:<16} {} ({} parts)\n", p.key, p.name, p.components.len()))
        .collect()
}
