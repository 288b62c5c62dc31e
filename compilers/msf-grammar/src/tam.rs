//! Tense, aspect, mood, voice and polarity from auxiliaries and particles.

use std::collections::{BTreeSet, HashSet};

use msf_lexicon::{FiniteEffect, TamRule, TamTable};
use msf_protocol::features::{names, normalize_multi_value};
use msf_protocol::{Aspect, FeatureBundle, Modality, Mood, Node, Polarity, Tense, VerbForm, Voice};

use crate::error::AnnotationError;

#[derive(Debug, Default)]
struct TamState {
    infinitive: bool,
    voice: Option<Voice>,
    tense: Option<String>,
    mood: Option<String>,
    aspects: BTreeSet<Aspect>,
    modality: BTreeSet<Modality>,
    polarity: Option<Polarity>,
    negated_modality: bool,
}

impl TamState {
    fn set_mood_default(&mut self, mood: &str) {
        if self.mood.as_deref().map_or(true, str::is_empty) {
            self.mood = Some(mood.to_string());
        }
    }

    fn apply(&mut self, rule: &TamRule, aux: &Node) {
        if let Some(voice) = rule.voice {
            self.voice = Some(voice);
        }
        if let Some(modality) = rule.modality {
            self.modality.insert(modality);
        }
        if let Some(tense) = rule.tense {
            self.tense = Some(tense.as_str().to_string());
            self.set_mood_default(Mood::Ind.as_str());
        }

        let verb_form = aux.feats.get(names::VERB_FORM);
        if rule.supine_perfect && verb_form == Some(VerbForm::Sup.as_str()) {
            self.aspects.insert(Aspect::Perf);
        }
        if verb_form == Some(VerbForm::Fin.as_str()) {
            let aux_tense = aux.feats.get(names::TENSE);
            let aux_mood = aux.feats.get(names::MOOD).unwrap_or(Mood::Ind.as_str());
            match rule.finite {
                FiniteEffect::None => {}
                FiniteEffect::Inherit => {
                    if let Some(tense) = aux_tense {
                        self.tense = Some(tense.to_string());
                    }
                    self.set_mood_default(aux_mood);
                }
                FiniteEffect::FutureShift => {
                    let shifted = if aux_tense == Some(Tense::Pres.as_str()) {
                        Tense::Fut
                    } else {
                        Tense::Past
                    };
                    self.tense = Some(shifted.as_str().to_string());
                    self.set_mood_default(aux_mood);
                }
            }
            if rule.subjunctive_prospective && aux_mood == Mood::Sub.as_str() {
                self.aspects.insert(Aspect::Prosp);
            }
        }
        if rule.perfect {
            self.aspects.insert(Aspect::Perf);
        }
    }

    fn into_bundle(self) -> FeatureBundle {
        let mut bundle = FeatureBundle::new();

        let verb_form = if self.infinitive { VerbForm::Inf } else { VerbForm::Fin };
        bundle.set(names::VERB_FORM, verb_form.as_str());
        if let Some(voice) = self.voice {
            bundle.set(names::VOICE, voice.as_str());
        }
        if let Some(tense) = self.tense {
            bundle.set(names::TENSE, normalize_multi_value(&tense));
        }
        if !self.aspects.is_empty() {
            let aspects: Vec<&str> = self.aspects.iter().map(|a| a.as_str()).collect();
            bundle.set(names::ASPECT, aspects.join(","));
        }
        if let Some(polarity) = self.polarity {
            bundle.set(names::POLARITY, polarity.as_str());
        }

        // Mood carries the modal meanings; negated ones are grouped as neg(A+B)
        let mut mood: Vec<String> = self.mood.into_iter().collect();
        let tags: Vec<&str> = self.modality.iter().map(|m| m.as_str()).collect();
        if self.negated_modality {
            mood.push(format!("neg({})", tags.join("+")));
        } else {
            mood.extend(tags.iter().map(|tag| tag.to_string()));
        }
        let mood = normalize_multi_value(&mood.join(",")).replace('+', ",");
        bundle.set(names::MOOD, mood);

        bundle.prune_empty();
        bundle
    }
}

/// Derives the TAM features a head gets from its auxiliary and particle dependents.
///
/// Rules are tried in table order; each matched lemma is used up. A lemma that is
/// still unused at the end is an error, as is a second occurrence of a lemma whose
/// rule is marked unique.
pub fn resolve_tam(table: &TamTable, candidates: &[&Node]) -> Result<FeatureBundle, AnnotationError> {
    let mut working: HashSet<&str> = candidates
        .iter()
        .map(|node| node.lemma.as_str())
        .filter(|lemma| !table.is_ignored(lemma))
        .collect();
    let mut state = TamState::default();

    // 1. Infinitive marker
    state.infinitive = working.remove(table.infinitive_marker.as_str());

    // 2. Auxiliary rules, in order
    for rule in &table.rules {
        if !working.remove(rule.lemma.as_str()) {
            continue;
        }
        let matching: Vec<&Node> = candidates
            .iter()
            .copied()
            .filter(|node| node.lemma == rule.lemma)
            .collect();
        if rule.unique && matching.len() != 1 {
            return Err(AnnotationError::AmbiguousAuxiliary {
                lemma: rule.lemma.clone(),
                ids: matching.iter().map(|node| node.id).collect(),
            });
        }
        if let Some(aux) = matching.first() {
            state.apply(rule, aux);
        }
    }

    // 3. Negation
    let before = working.len();
    working.retain(|lemma| !table.is_negation(lemma));
    if working.len() < before {
        if state.modality.is_empty() {
            state.polarity = Some(Polarity::Neg);
        } else {
            state.negated_modality = true;
        }
    } else {
        state.polarity = Some(Polarity::Pos);
    }

    // 4. Anything left is unaccounted for
    if !working.is_empty() {
        let ids = candidates
            .iter()
            .filter(|node| working.contains(node.lemma.as_str()))
            .map(|node| node.id)
            .collect();
        return Err(AnnotationError::UntreatedAuxiliary { ids });
    }

    Ok(state.into_bundle())
}

/// Values every head with TAM dependents ends up with.
pub fn backfill(bundle: &mut FeatureBundle) {
    bundle.set_default(names::MOOD, Mood::Ind.as_str());
    bundle.set_default(names::POLARITY, Polarity::Pos.as_str());
    bundle.set_default(names::VERB_FORM, VerbForm::Fin.as_str());
    bundle.set_default(names::VOICE, Voice::Act.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::word;
    use msf_lexicon::Lexicon;
    use msf_protocol::{NodeId, Upos};

    fn resolve(nodes: &[Node]) -> Result<FeatureBundle, AnnotationError> {
        let lexicon = Lexicon::swedish();
        let candidates: Vec<&Node> = nodes.iter().collect();
        resolve_tam(&lexicon.tam, &candidates)
    }

    #[test]
    fn test_perfect_inherits_from_finite_ha() {
        let feats = resolve(&[word(2, "har", "ha", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin")])
            .unwrap();
        assert_eq!(feats.render(), "Aspect=Perf|Mood=Ind|Polarity=Pos|Tense=Pres|VerbForm=Fin");
    }

    #[test]
    fn test_passive_supine_bli() {
        let feats = resolve(&[
            word(2, "har", "ha", Upos::Aux, 4, "aux", "Mood=Ind|Tense=Past|VerbForm=Fin"),
            word(3, "blivit", "bli", Upos::Aux, 4, "aux:pass", "VerbForm=Sup"),
        ])
        .unwrap();
        assert_eq!(feats.get("Voice"), Some("Pass"));
        assert_eq!(feats.get("Aspect"), Some("Perf"));
        assert_eq!(feats.get("Tense"), Some("Past"));
    }

    #[test]
    fn test_future_shift_and_infinitive() {
        let feats = resolve(&[word(2, "ska", "skola", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin")])
            .unwrap();
        assert_eq!(feats.get("Tense"), Some("Fut"));

        let feats = resolve(&[
            word(1, "skulle", "skola", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Past|VerbForm=Fin"),
            word(2, "att", "att", Upos::Part, 3, "mark", ""),
        ])
        .unwrap();
        assert_eq!(feats.get("Tense"), Some("Past"));
        assert_eq!(feats.get("VerbForm"), Some("Inf"));
    }

    #[test]
    fn test_fixed_tense_modal() {
        let feats = resolve(&[word(2, "måste", "måste", Upos::Aux, 3, "aux", "")]).unwrap();
        assert_eq!(feats.render(), "Mood=Ind,Nec|Polarity=Pos|Tense=Pres|VerbForm=Fin");
    }

    #[test]
    fn test_negation_without_modality() {
        let feats = resolve(&[
            word(2, "är", "vara", Upos::Aux, 4, "cop", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "inte", "inte", Upos::Adv, 4, "advmod", ""),
        ])
        .unwrap();
        assert_eq!(feats.render(), "Mood=Ind|Polarity=Neg|Tense=Pres|VerbForm=Fin");
    }

    #[test]
    fn test_negated_modalities_are_grouped() {
        let feats = resolve(&[
            word(2, "måste", "måste", Upos::Aux, 5, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "inte", "inte", Upos::Part, 5, "advmod", ""),
            word(4, "kunna", "kunna", Upos::Aux, 5, "aux", "VerbForm=Inf"),
        ])
        .unwrap();
        assert_eq!(feats.get("Mood"), Some("Ind,neg(Nec,Pot)"));
        assert_eq!(feats.get("Polarity"), None);
    }

    #[test]
    fn test_subjunctive_copula_is_prospective() {
        let feats = resolve(&[word(2, "vore", "vara", Upos::Aux, 3, "cop", "Mood=Sub|Tense=Past|VerbForm=Fin")])
            .unwrap();
        assert_eq!(feats.get("Aspect"), Some("Prosp"));
        assert_eq!(feats.get("Mood"), Some("Sub"));
    }

    #[test]
    fn test_repeated_unique_auxiliary() {
        let err = resolve(&[
            word(2, "har", "ha", Upos::Aux, 4, "aux", "VerbForm=Fin"),
            word(3, "haft", "ha", Upos::Aux, 4, "aux", "VerbForm=Sup"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            AnnotationError::AmbiguousAuxiliary {
                lemma: "ha".into(),
                ids: vec![NodeId(2), NodeId(3)],
            }
        );
        assert_eq!(err.code(), "TAM_MULTIPLE_ha_2-3");
    }

    #[test]
    fn test_unknown_auxiliary_is_untreated() {
        let err = resolve(&[
            word(2, "tänker", "tänka", Upos::Aux, 4, "aux", "VerbForm=Fin"),
            word(3, "do", "do", Upos::Aux, 4, "aux", ""),
        ])
        .unwrap_err();
        assert_eq!(err.code(), "TAM_UNTREATED_2");
    }

    #[test]
    fn test_backfill_keeps_existing_values() {
        let mut bundle: FeatureBundle = vec![("Mood", "Sub")].into_iter().collect();
        backfill(&mut bundle);
        assert_eq!(bundle.render(), "Mood=Sub|Polarity=Pos|VerbForm=Fin|Voice=Act");
    }
}
