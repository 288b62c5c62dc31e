use std::collections::BTreeMap;

use msf_protocol::FeatureBundle;
use serde::{Deserialize, Serialize};

/// How a determiner entry is recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeterminerKey {
    Lemma(String),
    /// Any of these lower-cased surface forms, whatever the lemma.
    Forms(Vec<String>),
}

/// Features that depend on the exact surface form of the determiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRefinement {
    pub forms: Vec<String>,
    pub features: FeatureBundle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterminerEntry {
    pub key: DeterminerKey,
    /// Always set when the entry matches.
    pub features: FeatureBundle,
    /// First refinement whose forms contain the surface form wins.
    #[serde(default)]
    pub refinements: Vec<FormRefinement>,
    /// Used when no refinement matched.
    #[serde(default)]
    pub otherwise: FeatureBundle,
    /// Multiword determiners (e.g. `den här`) keyed by fixed lemma.
    #[serde(default)]
    pub fixed: BTreeMap<String, FeatureBundle>,
}

impl DeterminerEntry {
    pub fn lemma(lemma: impl Into<String>, features: FeatureBundle) -> Self {
        Self {
            key: DeterminerKey::Lemma(lemma.into()),
            features,
            refinements: Vec::new(),
            otherwise: FeatureBundle::new(),
            fixed: BTreeMap::new(),
        }
    }

    pub fn forms(forms: &[&str], features: FeatureBundle) -> Self {
        Self {
            key: DeterminerKey::Forms(forms.iter().map(|f| f.to_string()).collect()),
            ..Self::lemma(String::new(), features)
        }
    }

    pub fn refine(mut self, forms: &[&str], features: FeatureBundle) -> Self {
        self.refinements.push(FormRefinement {
            forms: forms.iter().map(|f| f.to_string()).collect(),
            features,
        });
        self
    }

    pub fn otherwise(mut self, features: FeatureBundle) -> Self {
        self.otherwise = features;
        self
    }

    pub fn fixed(mut self, fixed_lemma: impl Into<String>, features: FeatureBundle) -> Self {
        self.fixed.insert(fixed_lemma.into(), features);
        self
    }

    pub fn matches(&self, lemma: &str, form_lower: &str) -> bool {
        match &self.key {
            DeterminerKey::Lemma(key) => key == lemma,
            DeterminerKey::Forms(forms) => forms.iter().any(|f| f == form_lower),
        }
    }

    /// Features for a matching determiner occurrence.
    pub fn features_for(&self, form_lower: &str, fixed_lemma: Option<&str>) -> FeatureBundle {
        let mut out = self.features.clone();

        let refined = self
            .refinements
            .iter()
            .find(|r| r.forms.iter().any(|f| f == form_lower))
            .map(|r| &r.features)
            .unwrap_or(&self.otherwise);
        out.merge(refined);

        if let Some(extra) = fixed_lemma.and_then(|fixed| self.fixed.get(fixed)) {
            out.merge(extra);
        }
        out
    }
}

/// Comparison particle (e.g. `mer`) and the Degree it gives its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMarker {
    pub form: String,
    pub degree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterminerTable {
    pub entries: Vec<DeterminerEntry>,
    /// Checked in order; the first present marker sets Degree.
    #[serde(default)]
    pub comparison: Vec<ComparisonMarker>,
}

impl DeterminerTable {
    /// Features for a determiner, or `None` if the table does not know it.
    pub fn resolve(
        &self,
        lemma: &str,
        form_lower: &str,
        fixed_lemma: Option<&str>,
    ) -> Option<FeatureBundle> {
        self.entries
            .iter()
            .find(|entry| entry.matches(lemma, form_lower))
            .map(|entry| entry.features_for(form_lower, fixed_lemma))
    }

    pub fn is_comparison_marker(&self, form_lower: &str) -> bool {
        self.comparison.iter().any(|m| m.form == form_lower)
    }
}
