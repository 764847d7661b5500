//! Configuration file handling.
//!
//! Every field has a default, so an empty JSON object is a valid config and a
//! missing config file simply means "use the defaults".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSource;
use crate::currency::Currency;
use crate::selection::UnresolvedPolicy;

/// Directory name used under the platform data directory
const APP_DIR: &str = "rigforge";

/// Who quote requests are addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    pub recipient: String,
    pub business_name: String,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            recipient: "quotes@rigforge.example".to_string(),
            business_name: "RigForge Custom PCs".to_string(),
        }
    }
}

/// Runtime configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub currency: Currency,
    pub quote: QuoteSettings,
    /// Where the saved build lives; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
    /// External catalog file; bundled catalog when unset
    pub catalog_path: Option<PathBuf>,
    pub unresolved_policy: UnresolvedPolicy,
    /// Prefix for share links
    pub share_base_url: String,
    /// Command that opens `mailto:` URLs
    pub opener: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            quote: QuoteSettings::default(),
            storage_dir: None,
            catalog_path: None,
            unresolved_policy: UnresolvedPolicy::Drop,
            share_base_url: "https://rigforge.example/builder".to_string(),
            opener: default_opener().to_string(),
        }
    }
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

impl ForgeConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.currency.rate_from_usd.is_finite() && self.currency.rate_from_usd > 0.0) {
            anyhow::bail!("Currency exchange rate must be a positive number");
        }
        if self.currency.symbol.trim().is_empty() {
            anyhow::bail!("Currency symbol must be specified");
        }

        let recipient = self.quote.recipient.trim();
        if recipient.is_empty() {
            anyhow::bail!("Quote recipient must be specified");
        }
        if recipient.contains(char::is_whitespace) || !recipient.contains('@') {
            anyhow::bail!("Quote recipient must be an email address");
        }
        if self.quote.business_name.trim().is_empty() {
            anyhow::bail!("Business name must be specified");
        }

        if self.opener.trim().is_empty() {
            anyhow::bail!("Opener command must be specified");
        }

        let base = self.share_base_url.trim();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            anyhow::bail!("Share base URL must start with http:// or https://");
        }

        Ok(())
    }

    /// Storage directory, resolved against the platform data directory
    pub fn resolved_storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
    }

    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog_path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Builtin,
        }
    }
}
