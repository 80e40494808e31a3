//! Fixture store backing the test suites
//!
//! Curves and keys are grouped by category. The `secg` category is built in;
//! others come from JSON files shaped like
//!
//! ```json
//! {
//!   "category": "composite",
//!   "curves": [{ "id": "small_5", "bits": 256, "field": "fp",
//!                "params": ["<p>", "<a>", "<b>", "<G>", "<r>", "<k>"], "desc": "..." }],
//!   "keys":   [{ "id": "small_5_pub", "curve": "small_5", "type": "public",
//!                "params": ["<W>"], "desc": "..." }]
//! }
//! ```
//!
//! with every parameter hex encoded.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ectester_api::{Curve, Error as ApiError, FieldKind, FixtureProvider, Key, Result as ApiResult};
use ectester_params::traditional::ec::{
    DOMAIN_F2M, DOMAIN_FP, PARAMETER_S, PARAMETER_W, STANDARD_CURVES,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ReaderConfig;
use crate::error::Result;

/// Category holding the built-in standard curves
pub const BUILTIN_CATEGORY: &str = "secg";

#[derive(Debug, Deserialize)]
struct FixtureFile {
    category: String,
    #[serde(default)]
    curves: Vec<CurveFixture>,
    #[serde(default)]
    keys: Vec<KeyFixture>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FieldName {
    Fp,
    F2m,
}

#[derive(Debug, Deserialize)]
struct CurveFixture {
    id: String,
    bits: u16,
    field: FieldName,
    #[serde(default)]
    mask: Option<u16>,
    params: Vec<String>,
    #[serde(default)]
    desc: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KeyKind {
    Public,
    Private,
}

#[derive(Debug, Deserialize)]
struct KeyFixture {
    id: String,
    curve: String,
    #[serde(rename = "type")]
    kind: KeyKind,
    #[serde(default)]
    mask: Option<u16>,
    params: Vec<String>,
    #[serde(default)]
    desc: String,
}

fn decode_params(params: &[String]) -> Result<Vec<Vec<u8>>> {
    params
        .iter()
        .map(|p| hex::decode(p.trim()).map_err(Into::into))
        .collect()
}

impl CurveFixture {
    fn into_curve(self) -> Result<Curve> {
        let (field, default_mask) = match self.field {
            FieldName::Fp => (FieldKind::Fp, DOMAIN_FP),
            FieldName::F2m => (FieldKind::F2m, DOMAIN_F2M),
        };
        let data = decode_params(&self.params)?;
        let curve = Curve::new(
            self.id,
            self.bits,
            field,
            self.mask.unwrap_or(default_mask),
            data,
            self.desc,
        )?;
        Ok(curve)
    }
}

impl KeyFixture {
    fn into_key(self) -> Result<Key> {
        let default_mask = match self.kind {
            KeyKind::Public => PARAMETER_W,
            KeyKind::Private => PARAMETER_S,
        };
        let data = decode_params(&self.params)?;
        let key = Key::new(
            self.id,
            self.curve,
            self.mask.unwrap_or(default_mask),
            data,
            self.desc,
        )?;
        Ok(key)
    }
}

#[derive(Debug, Clone, Default)]
struct Category {
    curves: Vec<Curve>,
    keys: Vec<Key>,
}

/// In-memory [`FixtureProvider`]
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    categories: BTreeMap<String, Category>,
}

impl FixtureStore {
    /// A store holding only the built-in standard curves
    pub fn new() -> Result<Self> {
        let mut store = Self::default();
        for params in STANDARD_CURVES {
            let curve = Curve::new(
                params.name,
                params.bits,
                FieldKind::Fp,
                DOMAIN_FP,
                params.domain(),
                format!("SECG curve {}", params.name),
            )?;
            store.insert_curve(BUILTIN_CATEGORY, curve);
        }
        Ok(store)
    }

    /// Built-in curves plus everything under the configured fixture directory
    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        let mut store = Self::new()?;
        if let Some(dir) = &config.fixture_dir {
            store.load_dir(dir)?;
        }
        Ok(store)
    }

    pub fn insert_curve(&mut self, category: &str, curve: Curve) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .curves
            .push(curve);
    }

    pub fn insert_key(&mut self, category: &str, key: Key) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .keys
            .push(key);
    }

    /// Add the fixtures of one JSON document
    pub fn load_str(&mut self, json: &str) -> Result<()> {
        let file: FixtureFile = serde_json::from_str(json)?;
        let (n_curves, n_keys) = (file.curves.len(), file.keys.len());
        for curve in file.curves {
            let curve = curve.into_curve()?;
            self.insert_curve(&file.category, curve);
        }
        for key in file.keys {
            let key = key.into_key()?;
            self.insert_key(&file.category, key);
        }
        debug!(
            category = %file.category,
            curves = n_curves,
            keys = n_keys,
            "fixtures loaded"
        );
        Ok(())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        self.load_str(&json)?;
        info!("Loaded fixture file {}", path.display());
        Ok(())
    }

    /// Load every `*.json` file in `dir`, in file name order
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in paths {
            self.load_file(&path)?;
        }
        Ok(())
    }

    fn category(&self, category: &str) -> ApiResult<&Category> {
        self.categories
            .get(category)
            .ok_or_else(|| ApiError::missing("category", category))
    }
}

impl FixtureProvider for FixtureStore {
    fn curves(&self, category: &str) -> ApiResult<Vec<Curve>> {
        let found = &self.category(category)?.curves;
        if found.is_empty() {
            return Err(ApiError::missing("curves in category", category));
        }
        Ok(found.clone())
    }

    fn keys(&self, category: &str) -> ApiResult<Vec<Key>> {
        let found = &self.category(category)?.keys;
        if found.is_empty() {
            return Err(ApiError::missing("keys in category", category));
        }
        Ok(found.clone())
    }

    fn curve(&self, id: &str) -> Option<Curve> {
        self.categories
            .values()
            .flat_map(|c| c.curves.iter())
            .find(|c| c.id() == id)
            .cloned()
    }
}
