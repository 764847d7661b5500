//! Selection state: the visitor's build and the builder that owns it.
//!
//! # Design
//!
//! - **No global state**: a `PcBuilder` is created by the caller and passed
//!   around explicitly; every session owns its own.
//! - **Identity, not copies**: slots hold the catalog's `Arc<Component>`.
//! - **One per slot**: a build is keyed by `Category`, so a second selection
//!   in the same category replaces the first.
//! - **Order-free**: selections in different categories commute; re-selecting
//!   the same id is a no-op.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{debug, info, warn};

use crate::aggregate::{self, BuildSummary};
use crate::catalog::{Catalog, Component};
use crate::error::{ForgeError, Result};
use crate::presets;
use crate::types::Category;

/// What to do with snapshot entries whose id is not in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Keep the entries that resolve, report the rest
    #[default]
    Drop,
    /// Refuse the whole snapshot and leave the build unchanged
    Reject,
}

/// At most one component per category
#[derive(Debug, Clone, Default)]
pub struct Build {
    slots: BTreeMap<Category, Arc<Component>>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a component in its own category's slot, returning what it replaced.
    ///
    /// This does not consult a catalog; `PcBuilder::select` is the checked path.
    pub fn insert(&mut self, component: Arc<Component>) -> Option<Arc<Component>> {
        self.slots.insert(component.category, component)
    }

    pub fn remove(&mut self, category: Category) -> Option<Arc<Component>> {
        self.slots.remove(&category)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn get(&self, category: Category) -> Option<&Arc<Component>> {
        self.slots.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    /// Filled slots in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Arc<Component>)> {
        self.slots.iter().map(|(c, component)| (*c, component))
    }

    pub fn filled_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn snapshot(&self) -> BuildSnapshot {
        BuildSnapshot(
            self.slots
                .iter()
                .map(|(c, component)| (*c, component.id.clone()))
                .collect(),
        )
    }
}

/// Builds are equal when the same ids fill the same slots.
impl PartialEq for Build {
    fn eq(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self
                .slots
                .iter()
                .all(|(c, component)| other.get(*c).is_some_and(|o| o.id == component.id))
    }
}

impl Eq for Build {}

/// Flat category -> component id mapping used for persistence, export and
/// share links.
///
/// Serializes all eight category keys, with `null` for empty slots. When
/// deserializing, missing keys and `null` both mean "empty", and an entry may
/// be either an id string or an object carrying an `id` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSnapshot(BTreeMap<Category, String>);

impl BuildSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, id: impl Into<String>) -> Option<String> {
        self.0.insert(category, id.into())
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.0.iter().map(|(c, id)| (*c, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Category, String)> for BuildSnapshot {
    fn from_iter<I: IntoIterator<Item = (Category, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for BuildSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        for category in Category::all() {
            map.serialize_entry(&category, &self.get(category))?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotEntry {
    Id(String),
    Component { id: String },
}

impl<'de> Deserialize<'de> for BuildSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: BTreeMap<Category, Option<SnapshotEntry>> = BTreeMap::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(category, entry)| {
                entry.map(|entry| match entry {
                    SnapshotEntry::Id(id) | SnapshotEntry::Component { id } => (category, id),
                })
            })
            .collect())
    }
}

/// Result of applying a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotLoad {
    /// Slots filled from the snapshot
    pub applied: usize,
    /// Entries that did not resolve and were left unset
    pub unresolved: Vec<(Category, String)>,
}

impl SnapshotLoad {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Owns a build and the catalog it selects from
#[derive(Debug, Clone)]
pub struct PcBuilder {
    catalog: Arc<Catalog>,
    build: Build,
    policy: UnresolvedPolicy,
}

impl PcBuilder {
    /// Start with an empty build
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            build: Build::new(),
            policy: UnresolvedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn policy(&self) -> UnresolvedPolicy {
        self.policy
    }

    /// Select `id` for `category`. Unknown ids leave the build untouched.
    pub fn select(&mut self, category: Category, id: &str) -> Result<Arc<Component>> {
        let Some(component) = self.catalog.find(category, id) else {
            warn!("Selection ignored: no {} with id '{}'", category, id);
            return Err(ForgeError::not_found(category, id));
        };

        let component = Arc::clone(component);
        if let Some(previous) = self.build.insert(Arc::clone(&component)) {
            debug!("{}: replaced '{}' with '{}'", category, previous.id, component.id);
        } else {
            debug!("{}: selected '{}'", category, component.id);
        }
        Ok(component)
    }

    /// Empty one slot, returning what was there
    pub fn clear(&mut self, category: Category) -> Option<Arc<Component>> {
        let removed = self.build.remove(category);
        if let Some(component) = &removed {
            debug!("{}: cleared '{}'", category, component.id);
        }
        removed
    }

    pub fn clear_all(&mut self) {
        self.build.clear();
        debug!("Build cleared");
    }

    pub fn snapshot(&self) -> BuildSnapshot {
        self.build.snapshot()
    }

    /// Replace the build with the snapshot's contents.
    ///
    /// Under [`UnresolvedPolicy::Drop`] resolvable entries are applied and the
    /// rest reported. Under [`UnresolvedPolicy::Reject`] any unresolved entry
    /// fails the whole load and the current build is kept.
    pub fn load_snapshot(&mut self, snapshot: &BuildSnapshot) -> Result<SnapshotLoad> {
        self.apply_snapshot(snapshot, self.policy)
    }

    /// Clear and load a named preset. Preset ids that are not in the catalog
    /// are skipped.
    pub fn load_preset(&mut self, key: &str) -> Result<SnapshotLoad> {
        let preset = presets::find(key).ok_or_else(|| ForgeError::UnknownPreset(key.to_string()))?;
        info!("Loading preset '{}'", preset.name);
        self.apply_snapshot(&preset.snapshot(), UnresolvedPolicy::Drop)
    }

    /// Recompute everything derived from the current build
    pub fn summary(&self) -> BuildSummary {
        aggregate::summarize(&self.build)
    }

    fn apply_snapshot(
        &mut self,
        snapshot: &BuildSnapshot,
        policy: UnresolvedPolicy,
    ) -> Result<SnapshotLoad> {
        let mut next = Build::new();
        let mut report = SnapshotLoad::default();

        for (category, id) in snapshot.iter() {
            match self.catalog.find(category, id) {
                Some(component) => {
                    next.insert(Arc::clone(component));
                    report.applied += 1;
                }
                None => report.unresolved.push((category, id.to_string())),
            }
        }

        if policy == UnresolvedPolicy::Reject && !report.is_complete() {
            let missing: Vec<String> = report
                .unresolved
                .iter()
                .map(|(c, id)| format!("{}={}", c, id))
                .collect();
            warn!("Snapshot rejected, unresolved entries: {}", missing.join(", "));
            return Err(ForgeError::snapshot(format!(
                "unknown components: {}",
                missing.join(", ")
            )));
        }

        for (category, id) in &report.unresolved {
            warn!("Snapshot entry dropped: no {} with id '{}'", category, id);
        }

        self.build = next;
        Ok(report)
    }
}
