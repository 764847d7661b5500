//! Adapter state definitions
//!
//! Actions coming in from a front end, and the notices and outcomes going
//! back out.

use serde::Serialize;
use std::path::PathBuf;
use strum::Display;

use crate::aggregate::BuildSummary;
use crate::types::Category;

/// A user intent, already parsed out of whatever front end produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Select { category: Category, id: String },
    Clear(Category),
    ClearAll,
    LoadPreset(String),
    /// Read an exported document
    Import(PathBuf),
    /// Load a share link or bare share token
    OpenShare(String),
    Export(PathBuf),
    Share,
    /// Compose a quote; with `send`, hand it to the dispatch chain
    RequestQuote { send: bool, draft: Option<PathBuf> },
}

impl Action {
    /// Whether the action may change the build (and so needs persisting)
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Select { .. }
                | Self::Clear(_)
                | Self::ClearAll
                | Self::LoadPreset(_)
                | Self::Import(_)
                | Self::OpenShare(_)
        )
    }
}

/// Severity of a notice shown to the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Non-fatal advisory message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What an action produced
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    /// Text the front end should show verbatim (share link, quote draft)
    pub output: Option<String>,
    /// Recomputed after the action
    pub summary: BuildSummary,
}

impl Outcome {
    pub fn has_level(&self, level: NoticeLevel) -> bool {
        self.notices.iter().any(|n| n.level == level)
    }
}
