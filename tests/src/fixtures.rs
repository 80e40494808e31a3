//! Fixture sets for suite runs

use ectester_reader::{FixtureStore, Result};

/// A miniature `composite` category: one curve with two small-order keys and
/// one curve in each of the `small`, `pq` and `rg0` groups
pub const COMPOSITE_JSON: &str = r#"{
    "category": "composite",
    "curves": [
        { "id": "whole_128", "bits": 128, "field": "fp",
          "params": ["FFFFFFFDFFFFFFFFFFFFFFFFFFFFFFFF", "00", "07",
                     "0401020304", "1D", "0001"],
          "desc": "Composite order curve" },
        { "id": "small_128", "bits": 128, "field": "fp",
          "params": ["FFFFFFFDFFFFFFFFFFFFFFFFFFFFFFFF", "01", "03",
                     "0405060708", "05", "0001"],
          "desc": "Small generator order curve" },
        { "id": "pq_128", "bits": 128, "field": "fp",
          "params": ["FFFFFFFDFFFFFFFFFFFFFFFFFFFFFFFF", "02", "05",
                     "0409090909", "8F", "0001"],
          "desc": "Composite generator order" },
        { "id": "rg0_128", "bits": 128, "field": "fp",
          "params": ["FFFFFFFDFFFFFFFFFFFFFFFFFFFFFFFF", "03", "0B",
                     "0400000001", "00", "0001"],
          "desc": "Zero generator order" }
    ],
    "keys": [
        { "id": "whole_128_w3", "curve": "whole_128", "type": "public",
          "params": ["04AABB"], "desc": "order 3 point" },
        { "id": "whole_128_w5", "curve": "whole_128", "type": "public",
          "params": ["04CCDD"], "desc": "order 5 point" }
    ]
}"#;

/// Built-in curves only
pub fn builtin_store() -> Result<FixtureStore> {
    FixtureStore::new()
}

/// Built-in curves plus [`COMPOSITE_JSON`]
pub fn composite_store() -> Result<FixtureStore> {
    let mut store = FixtureStore::new()?;
    store.load_str(COMPOSITE_JSON)?;
    Ok(store)
}
