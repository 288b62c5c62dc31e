use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::ids::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Column value for "no annotation".
pub const ABSENT: &str = "_";

/// Derived-column value for a content word that was annotated with nothing.
pub const EXPLICIT_EMPTY: &str = "|";

/// Feature names written by the engine.
pub mod names {
    pub const ASPECT: &str = "Aspect";
    pub const CASE: &str = "Case";
    pub const CONJ_TYPE: &str = "ConjType";
    pub const DEFINITE: &str = "Definite";
    pub const DEGREE: &str = "Degree";
    pub const DEM: &str = "Dem";
    pub const GENDER: &str = "Gender";
    pub const MOOD: &str = "Mood";
    pub const NUMBER: &str = "Number";
    pub const PERSON: &str = "Person";
    pub const POLARITY: &str = "Polarity";
    pub const POSS: &str = "Poss";
    pub const PRON_TYPE: &str = "PronType";
    pub const REL_TYPE: &str = "RelType";
    pub const TENSE: &str = "Tense";
    pub const VERB_FORM: &str = "VerbForm";
    pub const VOICE: &str = "Voice";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureParseError {
    pub item: String,
}

impl fmt::Display for FeatureParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed feature '{}' (expected Name=Value)", self.item)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FeatureParseError {}

/// Feature name ordered the way UD sorts a FEATS column: case-insensitively,
/// so `Number` precedes `NumType`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
struct FeatureName(String);

impl Ord for FeatureName {
    fn cmp(&self, other: &Self) -> Ordering {
        let folded = |name: &FeatureName| {
            name.0
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .collect::<Vec<_>>()
        };
        folded(self)
            .cmp(&folded(other))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for FeatureName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An ordered `Name=Value` mapping.
///
/// Used both for the read-only morphological features of the input and for the
/// derived bundle the engine produces. Keys iterate in UD order, which is the
/// order the feature column is written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeatureBundle(BTreeMap<FeatureName, String>);

impl FeatureBundle {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parses a `Name=Value|Name=Value` column; `_` and the empty string are empty bundles.
    pub fn parse(column: &str) -> Result<Self, FeatureParseError> {
        let mut bundle = Self::new();
        if column == ABSENT || column.is_empty() {
            return Ok(bundle);
        }
        for item in column.split('|').filter(|item| !item.is_empty()) {
            match item.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    bundle.set(name, value);
                }
                _ => {
                    return Err(FeatureParseError {
                        item: item.to_string(),
                    })
                }
            }
        }
        Ok(bundle)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&FeatureName(name.to_string())).map(String::as_str)
    }

    /// `true` when the feature is present with a non-empty value.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).map_or(false, |value| !value.is_empty())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(FeatureName(name.into()), value.into());
    }

    /// Sets the feature only when it is missing or empty.
    pub fn set_default(&mut self, name: &str, value: impl Into<String>) {
        if !self.has(name) {
            self.set(name, value);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&FeatureName(name.to_string()))
    }

    /// Copies every feature of `other` over this bundle.
    pub fn merge(&mut self, other: &FeatureBundle) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Drops features whose value ended up empty.
    pub fn prune_empty(&mut self) {
        self.0.retain(|_, value| !value.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.0.as_str(), v.as_str()))
    }

    /// `Name=Value|...` in key order, `_` when empty.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return ABSENT.to_string();
        }
        self.iter()
            .map(|(name, value)| alloc::format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FeatureBundle {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bundle = Self::new();
        for (name, value) in iter {
            bundle.set(name, value);
        }
        bundle
    }
}

impl fmt::Display for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Renders the derived column: absent is `_`, explicitly empty is `|`.
pub fn render_derived(bundle: Option<&FeatureBundle>) -> String {
    match bundle {
        None => ABSENT.to_string(),
        Some(bundle) if bundle.is_empty() => EXPLICIT_EMPTY.to_string(),
        Some(bundle) => bundle.render(),
    }
}

/// Splits a comma list, drops empty parts, dedups and sorts it.
pub fn normalize_multi_value(value: &str) -> String {
    let mut parts: Vec<&str> = value.split(',').filter(|part| !part.is_empty()).collect();
    parts.sort_unstable();
    parts.dedup();
    parts.join(",")
}

/// Derived bundles of one sentence, keyed by node id.
///
/// A node missing from the layer is unannotated (`_`); a node mapped to an
/// empty bundle was annotated with nothing (`|`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeatureLayer(BTreeMap<NodeId, FeatureBundle>);

impl FeatureLayer {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, id: NodeId) -> Option<&FeatureBundle> {
        self.0.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn insert(&mut self, id: NodeId, bundle: FeatureBundle) {
        self.0.insert(id, bundle);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &FeatureBundle)> {
        self.0.iter().map(|(id, bundle)| (*id, bundle))
    }

    /// The derived column for `id`.
    pub fn render(&self, id: NodeId) -> String {
        render_derived(self.get(id))
    }
}

impl FromIterator<(NodeId, FeatureBundle)> for FeatureLayer {
    fn from_iter<T: IntoIterator<Item = (NodeId, FeatureBundle)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
