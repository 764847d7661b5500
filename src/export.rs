//! Build export, import and share links.
//!
//! An exported document carries metadata (creation time, totals, averaged
//! performance), the category -> id mapping and the compatibility findings
//! at export time. Import only needs the top-level `components` object;
//! anything without it is rejected as a format error.

use anyhow::Context;
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::{self, AveragePerformance, CompatibilityFinding};
use crate::error::{ForgeError, Result};
use crate::selection::{Build, BuildSnapshot};

/// Default document name
pub const DEFAULT_BUILD_NAME: &str = "Custom PC Build";

/// Query parameter carrying the share token
const SHARE_PARAM: &str = "build=";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Decoders tried in order: our own URL-safe tokens, then standard
/// (`+`/`/`, padded) tokens as produced by browser `btoa`
const TOKEN_DECODERS: [GeneralPurpose; 2] = [
    GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT),
    GeneralPurpose::new(&alphabet::STANDARD, LENIENT),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub total_price: u64,
    pub power_consumption: u32,
    pub performance: AveragePerformance,
}

/// Exported build document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDocument {
    pub metadata: BuildMetadata,
    pub components: BuildSnapshot,
    #[serde(default)]
    pub compatibility_check: Vec<CompatibilityFinding>,
}

impl BuildDocument {
    pub fn from_build(build: &Build, name: impl Into<String>) -> Self {
        let summary = aggregate::summarize(build);
        Self {
            metadata: BuildMetadata {
                name: name.into(),
                created: Utc::now(),
                total_price: summary.total_price,
                power_consumption: summary.total_power,
                performance: summary.performance,
            },
            components: build.snapshot(),
            compatibility_check: summary.findings,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write build to {:?}", path.as_ref()))?;
        info!("Exported build to {:?}", path.as_ref());
        Ok(())
    }
}

/// Extract the build mapping from an exported document.
///
/// Only `components` is required; metadata is informational and ignored.
pub fn parse_import(json: &str) -> Result<BuildSnapshot> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ForgeError::format(format!("not valid JSON: {}", e)))?;

    let components = value
        .get("components")
        .filter(|c| c.is_object())
        .ok_or_else(|| ForgeError::format("missing top-level 'components' object"))?;

    let snapshot = BuildSnapshot::deserialize(components)
        .map_err(|e| ForgeError::format(format!("unreadable 'components': {}", e)))?;

    debug!("Parsed import with {} components", snapshot.len());
    Ok(snapshot)
}

/// Read and parse an exported document
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<BuildSnapshot> {
    let content = fs::read_to_string(&path)?;
    parse_import(&content)
}

/// `<base>?build=<token>`
pub fn share_url(base: &str, snapshot: &BuildSnapshot) -> Result<String> {
    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}{}", base, separator, SHARE_PARAM, share_token(snapshot)?))
}

/// URL-safe base64 of the snapshot JSON
pub fn share_token(snapshot: &BuildSnapshot) -> Result<String> {
    let json = serde_json::to_vec(snapshot)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a bare token or a full share URL.
///
/// The token may be percent-encoded and may use either base64 alphabet,
/// with or without padding.
pub fn decode_share_token(input: &str) -> Result<BuildSnapshot> {
    let raw = match input.find(SHARE_PARAM) {
        Some(pos) => {
            let rest = &input[pos + SHARE_PARAM.len()..];
            rest.split(['&', '#']).next().unwrap_or(rest)
        }
        None => input,
    }
    .trim();

    let token = urlencoding::decode(raw)
        .map_err(|e| ForgeError::format(format!("share token is not valid UTF-8: {}", e)))?;

    let mut last_err = None;
    let bytes = TOKEN_DECODERS
        .iter()
        .find_map(|engine| match engine.decode(token.as_bytes()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                last_err = Some(e);
                None
            }
        })
        .ok_or_else(|| {
            let reason = last_err.map(|e| e.to_string()).unwrap_or_default();
            ForgeError::format(format!("share token is not base64: {}", reason))
        })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ForgeError::format(format!("share token does not hold a build: {}", e)))
}
