//! RigForge Library
//!
//! Core of a PC build configurator: a read-only parts catalog, the
//! one-component-per-slot build, derived totals and compatibility findings,
//! local persistence, export/import and quote requests.

pub mod aggregate;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod currency;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod presets;
pub mod quote;
pub mod report;
pub mod selection;
pub mod storage;
pub mod types;

// Re-export main types for convenience
pub use aggregate::{BuildSummary, CompatibilityFinding, recommended_psu_wattage, summarize};
pub use app::{Action, App, Notice, NoticeLevel, Outcome};
pub use catalog::{Catalog, CatalogQuery, CatalogSource, Component};
pub use config::ForgeConfig;
pub use currency::Currency;
pub use error::{ForgeError, Result};
pub use export::BuildDocument;
pub use selection::{Build, BuildSnapshot, PcBuilder, UnresolvedPolicy};
pub use storage::SnapshotStore;
pub use types::{Availability, Category, PerformanceRating, Severity, SortOrder};
