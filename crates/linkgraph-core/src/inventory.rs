//! Site inventory: the page list produced by a content scan.
//!
//! The inventory is the input to graph building. It carries page metadata,
//! extracted link targets, and optionally the page body used for anchor-text
//! search.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Inventory format version this crate reads.
pub const INVENTORY_VERSION: &str = "1.0";

/// Errors from loading or validating a site inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse inventory JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("inventory version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("page #{index} has an empty path")]
    EmptyPath { index: usize },
    #[error("duplicate page path: {0}")]
    DuplicatePath(String),
}

/// One scanned page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub path: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Internal link targets found in the page, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    /// Page body text used for anchor-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PageRecord {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            category: None,
            tags: Vec::new(),
            links: Vec::new(),
            content: None,
        }
    }
}

/// All pages of a site as reported by the content scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInventory {
    pub version: String,
    pub pages: Vec<PageRecord>,
}

impl Default for SiteInventory {
    fn default() -> Self {
        Self {
            version: INVENTORY_VERSION.to_string(),
            pages: Vec::new(),
        }
    }
}

impl SiteInventory {
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self {
            version: INVENTORY_VERSION.to_string(),
            pages,
        }
    }

    /// Load and validate an inventory file.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let json = std::fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate an inventory from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        let inventory: SiteInventory = serde_json::from_str(json)?;
        inventory.validate()?;
        Ok(inventory)
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, InventoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the version and that page paths are non-empty and unique.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.version != INVENTORY_VERSION {
            return Err(InventoryError::VersionMismatch {
                expected: INVENTORY_VERSION.to_string(),
                found: self.version.clone(),
            });
        }
        let mut seen = HashSet::with_capacity(self.pages.len());
        for (index, page) in self.pages.iter().enumerate() {
            if page.path.is_empty() {
                return Err(InventoryError::EmptyPath { index });
            }
            if !seen.insert(page.path.as_str()) {
                return Err(InventoryError::DuplicatePath(page.path.clone()));
            }
        }
        Ok(())
    }

    /// Page bodies keyed by path. Pages without content are absent.
    pub fn contents(&self) -> BTreeMap<&str, &str> {
        self.pages
            .iter()
            .filter_map(|p| p.content.as_deref().map(|c| (p.path.as_str(), c)))
            .collect()
    }
}
