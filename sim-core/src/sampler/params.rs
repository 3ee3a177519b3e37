//! `key=value,key=value` parameter lists for [`super::Distribution::parse`].

use std::collections::BTreeMap;

use crate::error::{Result, SimError};

/// Parsed numeric parameters, keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, f64>,
}

impl Params {
    /// Parses a comma-separated `key=value` list.
    ///
    /// Blank entries and entries without `=` are skipped. Keys are trimmed and
    /// lower-cased; a repeated key keeps its last value.
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = BTreeMap::new();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, raw)) = part.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let raw = raw.trim();
            let value = raw.parse::<f64>().map_err(|_| SimError::ParseParameter {
                key: key.clone(),
                value: raw.to_string(),
            })?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// First present key among `keys`, else `default`.
    pub fn real(&self, keys: &[&str], default: f64) -> f64 {
        keys.iter().find_map(|k| self.get(k)).unwrap_or(default)
    }

    /// Like [`Params::real`] but the value must be a non-negative whole number.
    pub fn count(&self, name: &'static str, default: u64) -> Result<u64> {
        match self.get(name) {
            None => Ok(default),
            Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
                Ok(v as u64)
            }
            Some(v) => Err(SimError::invalid(
                name,
                format!("must be a non-negative whole number, got {v}"),
            )),
        }
    }

    /// Keys not present in `known`.
    pub fn unknown_keys<'a>(&'a self, known: &'a [&str]) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .keys()
            .map(String::as_str)
            .filter(move |k| !known.iter().any(|kn| kn == k))
    }
}
