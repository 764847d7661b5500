//! Build aggregation: price, power, performance and compatibility.
//!
//! Every function here is a pure function of a [`Build`]. Nothing is cached;
//! callers recompute after each selection change.
//!
//! # Compatibility rules
//!
//! | Rule        | Fires when                          | Findings |
//! |-------------|-------------------------------------|----------|
//! | Socket      | CPU and motherboard both declare one | error on mismatch, success on match |
//! | Memory type | RAM type and board RAM type declared | error on mismatch |
//! | PSU headroom| PSU declares wattage, draw > 0      | warning under 100 W, success otherwise |
//!
//! Rules are evaluated independently; an unselected part is never an error.

use serde::{Deserialize, Serialize};

use crate::catalog::Performance;
use crate::selection::Build;
use crate::types::{Category, PerformanceRating, Severity};

/// Headroom below which the PSU rule warns
pub const MIN_PSU_HEADROOM_W: i64 = 100;

/// Recommended PSU sizes are multiples of this
pub const PSU_STEP_W: u32 = 50;

/// A derived compatibility observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityFinding {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl CompatibilityFinding {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Which score of the performance triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceAxis {
    Gaming,
    Productivity,
    Creation,
}

/// Mean performance over the filled slots that declare scores
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AveragePerformance {
    pub gaming: f64,
    pub productivity: f64,
    pub creation: f64,
}

impl AveragePerformance {
    pub fn score(&self, axis: PerformanceAxis) -> f64 {
        match axis {
            PerformanceAxis::Gaming => self.gaming,
            PerformanceAxis::Productivity => self.productivity,
            PerformanceAxis::Creation => self.creation,
        }
    }

    pub fn rating(&self, axis: PerformanceAxis) -> PerformanceRating {
        performance_rating(self.score(axis))
    }

    /// Whole-number score for display
    pub fn rounded(&self, axis: PerformanceAxis) -> u8 {
        self.score(axis).round().clamp(0.0, 100.0) as u8
    }

    pub fn is_zero(&self) -> bool {
        self.gaming == 0.0 && self.productivity == 0.0 && self.creation == 0.0
    }
}

/// Everything the presentation layer shows for a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub total_price: u64,
    pub total_power: u32,
    pub recommended_psu: u32,
    pub performance: AveragePerformance,
    pub findings: Vec<CompatibilityFinding>,
    pub filled: usize,
    pub missing_essentials: Vec<Category>,
}

impl BuildSummary {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Sum of prices of the filled slots
pub fn total_price(build: &Build) -> u64 {
    build.iter().map(|(_, c)| u64::from(c.price)).sum()
}

/// Sum of power draw of the filled slots, in watts
pub fn total_power(build: &Build) -> u32 {
    build.iter().map(|(_, c)| c.power_draw).sum()
}

/// `ceil(total_power * 1.3 / 50) * 50`, in integer arithmetic
pub fn recommended_psu_wattage(total_power: u32) -> u32 {
    let scaled = u64::from(total_power) * 13;
    let step = u64::from(PSU_STEP_W) * 10;
    let steps = scaled.div_ceil(step);
    u32::try_from(steps * u64::from(PSU_STEP_W)).unwrap_or(u32::MAX)
}

/// Per-axis mean over filled slots with scores; zero when there are none
pub fn average_performance(build: &Build) -> AveragePerformance {
    let scored: Vec<_> = build.iter().filter_map(|(_, c)| c.performance).collect();
    if scored.is_empty() {
        return AveragePerformance::default();
    }

    let n = scored.len() as f64;
    let mean = |score: fn(&Performance) -> u8| {
        scored.iter().map(|p| f64::from(score(p))).sum::<f64>() / n
    };

    AveragePerformance {
        gaming: mean(|p: &Performance| p.gaming),
        productivity: mean(|p: &Performance| p.productivity),
        creation: mean(|p: &Performance| p.creation),
    }
}

/// Qualitative label for a score
pub fn performance_rating(score: f64) -> PerformanceRating {
    PerformanceRating::from_score(score)
}

/// Evaluate every compatibility rule against the build
pub fn compatibility(build: &Build) -> Vec<CompatibilityFinding> {
    let mut findings = Vec::new();

    let cpu = build.get(Category::Cpu);
    let board = build.get(Category::Motherboard);
    let ram = build.get(Category::Ram);
    let psu = build.get(Category::Psu);

    if let (Some(cpu), Some(board)) = (cpu, board) {
        if let (Some(cpu_socket), Some(board_socket)) =
            (&cpu.attributes.socket, &board.attributes.socket)
        {
            if cpu_socket != board_socket {
                findings.push(CompatibilityFinding::new(
                    Severity::Error,
                    format!(
                        "CPU socket {} is not compatible with motherboard socket {}",
                        cpu_socket, board_socket
                    ),
                ));
            } else {
                findings.push(CompatibilityFinding::new(
                    Severity::Success,
                    "CPU and motherboard are compatible",
                ));
            }
        }
    }

    if let (Some(ram), Some(board)) = (ram, board) {
        if let (Some(ram_type), Some(board_type)) =
            (&ram.attributes.kind, &board.attributes.ram_type)
        {
            if ram_type != board_type {
                findings.push(CompatibilityFinding::new(
                    Severity::Error,
                    format!(
                        "RAM type {} is not compatible with motherboard {}",
                        ram_type, board_type
                    ),
                ));
            }
        }
    }

    let power = total_power(build);
    if let Some(wattage) = psu.and_then(|p| p.attributes.wattage) {
        if power > 0 {
            let margin = i64::from(wattage) - i64::from(power);
            if margin < MIN_PSU_HEADROOM_W {
                findings.push(CompatibilityFinding::new(
                    Severity::Warning,
                    "PSU wattage is close to system requirements. Consider a higher wattage PSU.",
                ));
            } else {
                findings.push(CompatibilityFinding::new(
                    Severity::Success,
                    format!("PSU provides adequate power with {}W headroom", margin),
                ));
            }
        }
    }

    findings
}

/// Essential categories (CPU, motherboard, RAM) with nothing selected
pub fn missing_essentials(build: &Build) -> Vec<Category> {
    Category::all()
        .filter(|c| c.is_essential() && !build.contains(*c))
        .collect()
}

/// Full recompute
pub fn summarize(build: &Build) -> BuildSummary {
    let total_power = total_power(build);
    BuildSummary {
        total_price: total_price(build),
        total_power,
        recommended_psu: recommended_psu_wattage(total_power),
        performance: average_performance(build),
        findings: compatibility(build),
        filled: build.filled_count(),
        missing_essentials: missing_essentials(build),
    }
}
