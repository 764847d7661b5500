//! Prebuilt configurations.
//!
//! Presets are kept in Rust (not in the catalog file) so a typo in a preset
//! key fails a test instead of silently loading an empty build.
//!
//! | Key               | Name                   |
//! |-------------------|------------------------|
//! | `budget-gaming`   | Budget Gaming Build    |
//! | `high-end-gaming` | High-End Gaming Build  |

use crate::selection::BuildSnapshot;
use crate::types::Category;

/// A named category -> id mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub components: &'static [(Category, &'static str)],
}

impl Preset {
    pub fn snapshot(&self) -> BuildSnapshot {
        self.components
            .iter()
            .map(|(category, id)| (*category, (*id).to_string()))
            .collect()
    }
}

pub const BUDGET_GAMING: Preset = Preset {
    key: "budget-gaming",
    name: "Budget Gaming Build",
    components: &[
        (Category::Cpu, "amd-ryzen-5-7600x"),
        (Category::Motherboard, "msi-x670e-ace"),
        (Category::Ram, "corsair-vengeance-16gb-ddr4"),
        (Category::Gpu, "rx-7800-xt"),
        (Category::Storage, "wd-black-sn850x-1tb"),
        (Category::Psu, "evga-supernova-850-g5"),
        (Category::Case, "fractal-design-define-7"),
        (Category::Cooling, "noctua-nh-d15"),
    ],
};

pub const HIGH_END_GAMING: Preset = Preset {
    key: "high-end-gaming",
    name: "High-End Gaming Build",
    components: &[
        (Category::Cpu, "amd-ryzen-7-7800x3d"),
        (Category::Motherboard, "asus-rog-z790"),
        (Category::Ram, "gskill-trident-32gb-ddr5"),
        (Category::Gpu, "rtx-4090"),
        (Category::Storage, "samsung-980-pro-2tb"),
        (Category::Psu, "corsair-rm1000x"),
        (Category::Case, "lian-li-o11-dynamic"),
        (Category::Cooling, "corsair-h150i-elite"),
    ],
};

/// All presets in display order
pub const ALL: &[Preset] = &[BUDGET_GAMING, HIGH_END_GAMING];

pub fn find(key: &str) -> Option<&'static Preset> {
    ALL.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}
