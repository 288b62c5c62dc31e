//! Definiteness, gender, number and degree contributed by determiners and
//! comparison particles of nominal, adjectival and adverbial heads.

use msf_lexicon::DeterminerTable;
use msf_protocol::features::names;
use msf_protocol::{deprel, FeatureBundle, Node, NodeId, PosClass};

use crate::record::Records;

#[derive(Debug, Default)]
pub struct DeterminerOutcome<'a> {
    pub features: FeatureBundle,
    /// Dependents still owed pass-through features, in id order.
    pub remaining: Vec<&'a Node>,
    pub absorbed: Vec<NodeId>,
}

/// Folds the recognized determiners among `remaining` into one bundle.
///
/// Unknown determiners stay in `remaining` and keep their own features.
pub fn resolve_determiners<'a>(
    table: &DeterminerTable,
    records: &Records,
    remaining: Vec<&'a Node>,
) -> DeterminerOutcome<'a> {
    let mut outcome = DeterminerOutcome::default();

    for child in remaining {
        if !child.has_deprel(deprel::DET) {
            outcome.remaining.push(child);
            continue;
        }
        match table.resolve(&child.lemma, &child.form_lower(), records.fixed_lemma(child.id)) {
            Some(features) => {
                outcome.features.merge(&features);
                outcome.absorbed.push(child.id);
            }
            None => outcome.remaining.push(child),
        }
    }

    outcome
}

/// Sets Degree from `mer`/`mest`-style particles of an adjective or adverb.
///
/// The first marker in table order wins; every marker present is absorbed.
pub fn resolve_degree(table: &DeterminerTable, head: &Node, outcome: &mut DeterminerOutcome<'_>) {
    if !head.is(PosClass::ADJECTIVAL | PosClass::ADVERBIAL) {
        return;
    }

    let forms: Vec<String> = outcome.remaining.iter().map(|child| child.form_lower()).collect();
    if let Some(marker) = table
        .comparison
        .iter()
        .find(|marker| forms.iter().any(|form| *form == marker.form))
    {
        outcome.features.set(names::DEGREE, marker.degree.as_str());
    }

    let (markers, rest): (Vec<&Node>, Vec<&Node>) = outcome
        .remaining
        .drain(..)
        .partition(|child| table.is_comparison_marker(&child.form_lower()));
    outcome.remaining = rest;
    outcome.absorbed.extend(markers.iter().map(|child| child.id));
    outcome.absorbed.sort_unstable();
}
