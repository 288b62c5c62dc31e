use std::collections::BTreeSet;

use msf_protocol::{Modality, Tense, Voice};
use serde::{Deserialize, Serialize};

/// What a finite auxiliary does to the head's tense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiniteEffect {
    /// Finite form of the auxiliary is ignored.
    #[default]
    None,
    /// Head takes the auxiliary's Tense (and Mood, if still unset).
    Inherit,
    /// Present-tense auxiliary makes the head future, anything else past.
    FutureShift,
}

/// One entry of the ordered auxiliary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TamRule {
    pub lemma: String,
    /// The lemma must match exactly one auxiliary child.
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub voice: Option<Voice>,
    #[serde(default)]
    pub modality: Option<Modality>,
    /// Tense set regardless of the auxiliary's own form.
    #[serde(default)]
    pub tense: Option<Tense>,
    #[serde(default)]
    pub finite: FiniteEffect,
    /// A supine auxiliary adds Aspect=Perf.
    #[serde(default)]
    pub supine_perfect: bool,
    /// The auxiliary always adds Aspect=Perf.
    #[serde(default)]
    pub perfect: bool,
    /// A subjunctive auxiliary adds Aspect=Prosp.
    #[serde(default)]
    pub subjunctive_prospective: bool,
}

impl TamRule {
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            unique: false,
            voice: None,
            modality: None,
            tense: None,
            finite: FiniteEffect::None,
            supine_perfect: false,
            perfect: false,
            subjunctive_prospective: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    pub fn tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    pub fn finite(mut self, effect: FiniteEffect) -> Self {
        self.finite = effect;
        self
    }

    pub fn supine_perfect(mut self) -> Self {
        self.supine_perfect = true;
        self
    }

    pub fn perfect(mut self) -> Self {
        self.perfect = true;
        self
    }

    pub fn subjunctive_prospective(mut self) -> Self {
        self.subjunctive_prospective = true;
        self
    }
}

/// Auxiliary and particle vocabulary for tense, aspect, mood, voice and polarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TamTable {
    /// Particle that makes the head non-finite.
    pub infinitive_marker: String,
    /// Foreign-language auxiliaries skipped entirely.
    #[serde(default)]
    pub ignored: BTreeSet<String>,
    pub negation: BTreeSet<String>,
    /// Applied in order.
    pub rules: Vec<TamRule>,
}

impl TamTable {
    pub fn rule(&self, lemma: &str) -> Option<&TamRule> {
        self.rules.iter().find(|rule| rule.lemma == lemma)
    }

    pub fn is_negation(&self, lemma: &str) -> bool {
        self.negation.contains(lemma)
    }

    pub fn is_ignored(&self, lemma: &str) -> bool {
        self.ignored.contains(lemma)
    }
}
