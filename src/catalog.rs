//! Component catalog: the read-only parts database.
//!
//! The catalog is loaded once at startup and never mutated. Components are
//! handed out as `Arc<Component>` so a build refers to the catalog entry
//! itself rather than a copy.
//!
//! # File format
//!
//! A JSON object keyed by category name, each value an array of component
//! records with camelCase keys:
//!
//! ```json
//! { "cpu": [ { "id": "amd-ryzen-5-7600x", "name": "AMD Ryzen 5 7600X",
//!              "brand": "AMD", "price": 299, "socket": "AM5",
//!              "powerConsumption": 105,
//!              "performance": { "gaming": 85, "productivity": 80, "creation": 78 } } ] }
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::currency::Currency;
use crate::error::{ForgeError, Result};
use crate::types::{Availability, Category, SortOrder};

/// Bundled parts database
const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Gaming / productivity / creation scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Performance {
    pub gaming: u8,
    pub productivity: u8,
    pub creation: u8,
}

impl Performance {
    pub const fn new(gaming: u8, productivity: u8, creation: u8) -> Self {
        Self {
            gaming,
            productivity,
            creation,
        }
    }

    fn is_in_range(&self) -> bool {
        self.gaming <= 100 && self.productivity <= 100 && self.creation <= 100
    }
}

/// PSU cable modularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modularity {
    FullyModular,
    SemiModular,
    NonModular,
}

/// Category-specific attributes. Which ones are present depends on the part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    /// CPU and motherboard socket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    /// Memory generation a motherboard accepts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_type: Option<String>,
    /// Module / drive / cooler type (`DDR5`, `NVMe SSD`, `AIO Liquid`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// GB for memory and storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// MT/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Rated PSU output in watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wattage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular: Option<Modularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Cooler height in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Radiator length in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiator_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    /// Assigned from the catalog section the record was loaded from
    #[serde(skip)]
    pub category: Category,
    pub name: String,
    pub brand: String,
    /// Whole source-currency units
    pub price: u32,
    #[serde(default)]
    pub specs: String,
    /// Estimated draw in watts
    #[serde(rename = "powerConsumption", default)]
    pub power_draw: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,
    /// 0.0 - 5.0
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub availability: Availability,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Component {
    /// Minimal constructor; remaining fields take their defaults.
    pub fn new(
        category: Category,
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: u32,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            brand: brand.into(),
            price,
            specs: String::new(),
            power_draw: 0,
            performance: None,
            rating: 0.0,
            availability: Availability::InStock,
            attributes: Attributes::default(),
        }
    }

    pub fn with_power_draw(mut self, watts: u32) -> Self {
        self.power_draw = watts;
        self
    }

    pub fn with_performance(mut self, performance: Performance) -> Self {
        self.performance = Some(performance);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Case-insensitive match against name, brand and spec text
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.brand.to_lowercase().contains(&needle)
            || self.specs.to_lowercase().contains(&needle)
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ForgeError::catalog(format!(
                "{} entry '{}' has an empty id",
                self.category, self.name
            )));
        }
        if let Some(perf) = &self.performance {
            if !perf.is_in_range() {
                return Err(ForgeError::catalog(format!(
                    "{}: performance scores must be within 0-100",
                    self.id
                )));
            }
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ForgeError::catalog(format!(
                "{}: rating {} is outside 0-5",
                self.id, self.rating
            )));
        }
        Ok(())
    }
}

/// Where the catalog is read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    #[default]
    Builtin,
    File(PathBuf),
}

/// Filters and ordering for a category listing
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Exact brand match
    pub brand: Option<String>,
    /// Inclusive lower bound, display currency
    pub min_price: Option<u64>,
    /// Inclusive upper bound, display currency
    pub max_price: Option<u64>,
    /// Substring of name, brand or specs
    pub search: Option<String>,
    pub sort: SortOrder,
}

/// Read-only mapping from category to its ordered components
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<Category, Vec<Arc<Component>>>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled parts database, or an empty catalog if it fails to parse.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Bundled catalog is unusable, continuing with an empty catalog: {}", e);
                Self::empty()
            }
        }
    }

    /// Load from `source`. Never fails: an unreachable or malformed source
    /// yields an empty catalog and a warning.
    pub fn load(source: &CatalogSource) -> Self {
        let catalog = match source {
            CatalogSource::Builtin => Self::builtin(),
            CatalogSource::File(path) => match Self::load_from_file(path) {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!("Falling back to an empty catalog: {:#}", e);
                    Self::empty()
                }
            },
        };
        info!("Catalog loaded with {} components", catalog.len());
        catalog
    }

    /// Load a catalog JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse catalog {:?}", path.as_ref()))?;

        Ok(catalog)
    }

    /// Parse a catalog document. Duplicate ids within a category and
    /// out-of-range scores are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<Category, Vec<Component>> = serde_json::from_str(json)?;
        Self::from_components(raw.into_iter().flat_map(|(category, items)| {
            items.into_iter().map(move |mut component| {
                component.category = category;
                component
            })
        }))
    }

    /// Build a catalog from components, keeping their relative order per category
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Result<Self> {
        let mut entries: BTreeMap<Category, Vec<Arc<Component>>> = BTreeMap::new();
        let mut seen: HashSet<(Category, String)> = HashSet::new();

        for component in components {
            component.validate()?;
            if !seen.insert((component.category, component.id.clone())) {
                return Err(ForgeError::catalog(format!(
                    "duplicate {} id '{}'",
                    component.category, component.id
                )));
            }
            entries
                .entry(component.category)
                .or_default()
                .push(Arc::new(component));
        }

        debug!(
            "Catalog built: {}",
            entries
                .iter()
                .map(|(c, items)| format!("{}={}", c, items.len()))
                .collect::<Vec<_>>()
                .join(" ")
        );

        Ok(Self { entries })
    }

    /// Total number of components across all categories
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components of a category in catalog order
    pub fn list_by_category(&self, category: Category) -> &[Arc<Component>] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, category: Category, id: &str) -> Option<&Arc<Component>> {
        self.list_by_category(category).iter().find(|c| c.id == id)
    }

    /// Unique brands of a category in first-seen order
    pub fn brands(&self, category: Category) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for component in self.list_by_category(category) {
            if !brands.contains(&component.brand.as_str()) {
                brands.push(component.brand.as_str());
            }
        }
        brands
    }

    /// Filter, search and sort a category listing. Price bounds are compared
    /// in the display currency.
    pub fn browse(
        &self,
        category: Category,
        query: &CatalogQuery,
        currency: &Currency,
    ) -> Vec<Arc<Component>> {
        let mut items: Vec<Arc<Component>> = self
            .list_by_category(category)
            .iter()
            .filter(|c| query.brand.as_deref().is_none_or(|b| c.brand == b))
            .filter(|c| {
                let price = currency.convert(u64::from(c.price));
                query.min_price.is_none_or(|min| price >= min)
                    && query.max_price.is_none_or(|max| price <= max)
            })
            .filter(|c| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|needle| c.matches_text(needle))
            })
            .cloned()
            .collect();

        // Vec::sort_by is stable, so ties keep catalog order
        match query.sort {
            SortOrder::None => {}
            SortOrder::PriceAsc => items.sort_by_key(|c| c.price),
            SortOrder::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Performance => items.sort_by(|a, b| {
                let score = |c: &Arc<Component>| c.performance.map(|p| p.gaming);
                score(b).cmp(&score(a))
            }),
            SortOrder::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::Newest => items.sort_by(|a, b| {
                b.attributes.release_date.cmp(&a.attributes.release_date)
            }),
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_covers_every_category() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 49);
        for category in Category::all() {
            assert!(
                !catalog.list_by_category(category).is_empty(),
                "{} should have components",
                category
            );
        }
    }

    #[test]
    fn test_builtin_assigns_categories_and_attributes() {
        let catalog = Catalog::builtin();
        let cpu = catalog.find(Category::Cpu, "amd-ryzen-5-7600x").unwrap();
        assert_eq!(cpu.category, Category::Cpu);
        assert_eq!(cpu.price, 299);
        assert_eq!(cpu.attributes.socket.as_deref(), Some("AM5"));
        assert_eq!(cpu.performance, Some(Performance::new(85, 80, 78)));

        let ram = catalog.find(Category::Ram, "corsair-vengeance-16gb-ddr4").unwrap();
        assert_eq!(ram.attributes.kind.as_deref(), Some("DDR4"));

        let psu = catalog.find(Category::Psu, "coolermaster-mwe-600w").unwrap();
        assert_eq!(psu.attributes.wattage, Some(600));
        assert_eq!(psu.attributes.modular, Some(Modularity::SemiModular));
    }

    #[test]
    fn test_find_is_scoped_to_category() {
        let catalog = Catalog::builtin();
        assert!(catalog.find(Category::Gpu, "rtx-4090").is_some());
        assert!(catalog.find(Category::Cpu, "rtx-4090").is_none());
        assert!(catalog.find(Category::Gpu, "rtx-9999").is_none());
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"{ "gpu": [
            { "id": "a", "name": "A", "brand": "X", "price": 1 },
            { "id": "a", "name": "A2", "brand": "X", "price": 2 }
        ] }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, ForgeError::Catalog(_)));
    }

    #[test]
    fn test_same_id_in_different_categories_is_allowed() {
        let json = r#"{
            "gpu": [ { "id": "a", "name": "A", "brand": "X", "price": 1 } ],
            "case": [ { "id": "a", "name": "A", "brand": "X", "price": 1 } ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let json = r#"{ "monitor": [] }"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_out_of_range_scores() {
        let json = r#"{ "cpu": [ { "id": "a", "name": "A", "brand": "X", "price": 1,
            "performance": { "gaming": 101, "productivity": 0, "creation": 0 } } ] }"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_empty() {
        let catalog = Catalog::load(&CatalogSource::File(PathBuf::from(
            "/nonexistent/rigforge/catalog.json",
        )));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_malformed_file_falls_back_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ this is not json").unwrap();
        let catalog = Catalog::load(&CatalogSource::File(file.path().to_path_buf()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "psu": [ {{ "id": "p1", "name": "P1", "brand": "B", "price": 50, "wattage": 550 }} ] }}"#
        )
        .unwrap();
        let catalog = Catalog::load(&CatalogSource::File(file.path().to_path_buf()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.find(Category::Psu, "p1").unwrap().attributes.wattage,
            Some(550)
        );
    }

    #[test]
    fn test_brands_unique_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.brands(Category::Cpu), vec!["Intel", "AMD"]);
    }

    #[test]
    fn test_browse_brand_and_sort() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            brand: Some("AMD".to_string()),
            sort: SortOrder::PriceAsc,
            ..Default::default()
        };
        let items = catalog.browse(Category::Cpu, &query, &Currency::usd());
        let ids: Vec<&str> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["amd-ryzen-5-7600x", "amd-ryzen-7-7800x3d", "amd-ryzen-9-7950x"]
        );
    }

    #[test]
    fn test_browse_price_range_uses_display_currency() {
        let catalog = Catalog::builtin();
        // 299 USD = 24,967 INR; 319 USD = 26,637 INR
        let query = CatalogQuery {
            min_price: Some(24_000),
            max_price: Some(27_000),
            ..Default::default()
        };
        let items = catalog.browse(Category::Cpu, &query, &Currency::default());
        let ids: Vec<&str> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["intel-i5-14600k", "amd-ryzen-5-7600x"]);
    }

    #[test]
    fn test_browse_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            search: Some("v-cache".to_string()),
            ..Default::default()
        };
        let items = catalog.browse(Category::Cpu, &query, &Currency::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "amd-ryzen-7-7800x3d");
    }

    #[test]
    fn test_browse_newest_puts_undated_last() {
        let catalog = Catalog::from_components(vec![
            Component::new(Category::Gpu, "undated", "U", "X", 1),
            Component::new(Category::Gpu, "old", "O", "X", 1).with_attributes(Attributes {
                release_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                ..Default::default()
            }),
            Component::new(Category::Gpu, "new", "N", "X", 1).with_attributes(Attributes {
                release_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                ..Default::default()
            }),
        ])
        .unwrap();
        let query = CatalogQuery {
            sort: SortOrder::Newest,
            ..Default::default()
        };
        let ids: Vec<String> = catalog
            .browse(Category::Gpu, &query, &Currency::usd())
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_browse_performance_sort() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            sort: SortOrder::Performance,
            ..Default::default()
        };
        let items = catalog.browse(Category::Gpu, &query, &Currency::usd());
        assert_eq!(items[0].id, "rtx-4090");
        assert_eq!(items.last().unwrap().id, "rx-6600-xt");
    }
}
