//! Display catalogs for supermarkets and store areas.
//!
//! The core trusts area keys supplied by the upstream pipeline; this catalog
//! only maps keys to display names for the API layer and validates the
//! supermarket choice on list creation. It is injected rather than global so
//! tests and deployments can supply alternate enumerations.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Supermarket and area enumerations with display names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub supermarkets: HashMap<String, String>,
    pub areas: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let supermarkets = [
            ("tesco", "Tesco"),
            ("sainsburys", "Sainsbury's"),
            ("asda", "Asda"),
            ("morrisons", "Morrisons"),
            ("aldi", "Aldi"),
            ("lidl", "Lidl"),
            ("waitrose", "Waitrose"),
            ("ms", "M&S"),
        ];
        let areas = [
            ("produce", "Fruit & Veg"),
            ("bakery", "Bakery"),
            ("dairy", "Dairy & Eggs"),
            ("meat", "Meat & Fish"),
            ("deli", "Deli"),
            ("frozen", "Frozen"),
            ("pantry", "Pantry"),
            ("breakfast", "Breakfast"),
            ("snacks", "Snacks"),
            ("confectionery", "Confectionery"),
            ("drinks", "Drinks"),
            ("tea_coffee", "Tea & Coffee"),
            ("alcohol", "Alcohol"),
            ("household", "Household"),
            ("health_beauty", "Health & Beauty"),
            ("baby", "Baby"),
            ("pet", "Pet"),
            ("world_foods", "World Foods"),
            ("other", "Other"),
        ];

        Self {
            supermarkets: supermarkets
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            areas: areas
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Catalog {
    /// Loads a catalog from a YAML file. Missing sections fall back to the
    /// built-in enumerations.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CatalogError::ParseError(path.to_path_buf(), e))
    }

    /// Returns true if `key` names a known supermarket.
    pub fn has_supermarket(&self, key: &str) -> bool {
        self.supermarkets.contains_key(key)
    }

    /// Display name for a supermarket key, if known.
    pub fn supermarket_display(&self, key: &str) -> Option<&str> {
        self.supermarkets.get(key).map(String::as_str)
    }

    /// Display name for an area key. Unknown keys get a title-cased fallback
    /// so freshly invented categories still render acceptably.
    pub fn area_display(&self, key: &str) -> String {
        match self.areas.get(key) {
            Some(name) => name.clone(),
            None => title_case(key),
        }
    }
}

/// Capitalizes the first letter of every alphabetic run, preserving
/// separators: "world_foods" becomes "World_Foods".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[derive(Debug)]
pub enum CatalogError {
    ReadError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::ReadError(path, e) => {
                write!(f, "Failed to read catalog file '{}': {}", path.display(), e)
            }
            CatalogError::ParseError(path, e) => {
                write!(
                    f,
                    "Failed to parse catalog file '{}': {}",
                    path.display(),
                    e
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}
