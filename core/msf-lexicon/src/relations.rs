use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::translit::fallback_value;

/// Which relation feature a function word contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Argument-predicate relation, written as `Case`.
    Case,
    /// Predicate-predicate relation, written as `RelType`.
    Marker,
    /// Coordination, written as `ConjType`.
    Conj,
}

/// Lemma → feature-value mappings for adpositions, subordinators and coordinators.
///
/// An empty value in a loaded table means "use the lemma itself".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTables {
    pub case: BTreeMap<String, String>,
    pub marker: BTreeMap<String, String>,
    pub conj: BTreeMap<String, String>,
    /// Per-lemma bucket that wins over the clause/non-clause default.
    #[serde(default)]
    pub prefer: BTreeMap<String, Bucket>,
    /// Adverbs reinterpreted as markers when they open an adverbial clause.
    #[serde(default)]
    pub fronted_markers: BTreeSet<String>,
}

impl RelationTables {
    /// Replaces empty values with their key.
    pub fn normalize(&mut self) {
        for table in [&mut self.case, &mut self.marker, &mut self.conj] {
            for (lemma, value) in table.iter_mut() {
                if value.is_empty() {
                    *value = lemma.clone();
                }
            }
        }
    }

    pub fn table(&self, bucket: Bucket) -> &BTreeMap<String, String> {
        match bucket {
            Bucket::Case => &self.case,
            Bucket::Marker => &self.marker,
            Bucket::Conj => &self.conj,
        }
    }

    pub fn contains(&self, bucket: Bucket, lemma: &str) -> bool {
        self.table(bucket).contains_key(lemma)
    }

    /// Whether any of the three tables knows the lemma.
    pub fn knows(&self, lemma: &str) -> bool {
        self.case.contains_key(lemma)
            || self.marker.contains_key(lemma)
            || self.conj.contains_key(lemma)
    }

    pub fn preference(&self, lemma: &str) -> Option<Bucket> {
        self.prefer.get(lemma).copied()
    }

    pub fn is_fronted_marker(&self, lemma: &str) -> bool {
        self.fronted_markers.contains(lemma)
    }

    /// Value from the first table in `order` that has the lemma, else the lemma itself.
    pub fn lookup(&self, order: &[Bucket], lemma: &str) -> String {
        order
            .iter()
            .find_map(|bucket| self.table(*bucket).get(lemma))
            .cloned()
            .unwrap_or_else(|| fallback_value(lemma))
    }
}
