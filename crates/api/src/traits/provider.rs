//! Curve and key fixture lookup

use crate::error::{Error, Result};
use crate::types::{Curve, Key};

/// Source of named curve domains and key fixtures, grouped by category
pub trait FixtureProvider {
    /// All curves of a category, in a stable order
    ///
    /// An unknown or empty category is [`Error::MissingFixture`].
    fn curves(&self, category: &str) -> Result<Vec<Curve>>;

    /// All keys of a category, in a stable order
    fn keys(&self, category: &str) -> Result<Vec<Key>>;

    /// Look up a single curve by id
    fn curve(&self, id: &str) -> Option<Curve>;

    /// Group keys under the curve they belong to
    ///
    /// Curves appear in the order their first key does.
    fn group_by_curve(&self, keys: Vec<Key>) -> Result<Vec<(Curve, Vec<Key>)>> {
        let mut groups: Vec<(Curve, Vec<Key>)> = Vec::new();
        for key in keys {
            match groups.iter_mut().find(|(c, _)| c.id() == key.curve()) {
                Some((_, members)) => members.push(key),
                None => {
                    let curve = self
                        .curve(key.curve())
                        .ok_or_else(|| Error::missing("curve", key.curve()))?;
                    groups.push((curve, vec![key]));
                }
            }
        }
        Ok(groups)
    }
}

impl<P: FixtureProvider + ?Sized> FixtureProvider for &P {
    fn curves(&self, category: &str) -> Result<Vec<Curve>> {
        (**self).curves(category)
    }

    fn keys(&self, category: &str) -> Result<Vec<Key>> {
        (**self).keys(category)
    }

    fn curve(&self, id: &str) -> Option<Curve> {
        (**self).curve(id)
    }

    fn group_by_curve(&self, keys: Vec<Key>) -> Result<Vec<(Curve, Vec<Key>)>> {
        (**self).group_by_curve(keys)
    }
}

/// Leading part of a fixture id, up to the first `/` or `_`
pub fn id_prefix(id: &str) -> &str {
    id.split(['/', '_']).next().unwrap_or(id)
}

/// Group curves by [`id_prefix`], preserving first-seen order
pub fn group_by_prefix(curves: Vec<Curve>) -> Vec<(String, Vec<Curve>)> {
    let mut groups: Vec<(String, Vec<Curve>)> = Vec::new();
    for curve in curves {
        let prefix = id_prefix(curve.id()).to_string();
        match groups.iter_mut().find(|(p, _)| *p == prefix) {
            Some((_, members)) => members.push(curve),
            None => groups.push((prefix, vec![curve])),
        }
    }
    groups
}
