use msf_lexicon::Lexicon;
use msf_protocol::features::names;
use msf_protocol::{deprel, FeatureBundle, FeatureLayer, Node, PosClass, Sentence};
use msf_tree::{verify_head_closure, HeadChildren, TreeIndex};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::context::SentenceContext;
use crate::determiner::{resolve_degree, resolve_determiners};
use crate::error::AnnotationError;
use crate::record::Records;
use crate::relation::resolve_relations;
use crate::tam::{backfill, resolve_tam};

/// Verbal features a head keeps from its own input when no dependent set them.
const VERBAL_OWN: [&str; 6] = [
    names::MOOD,
    names::TENSE,
    names::ASPECT,
    names::VOICE,
    names::VERB_FORM,
    names::POLARITY,
];

/// Result of annotating one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Accepted {
        sentence: Sentence,
        features: FeatureLayer,
    },
    Rejected {
        sentence: Sentence,
        reason: AnnotationError,
    },
}

impl Annotation {
    pub fn sentence(&self) -> &Sentence {
        match self {
            Annotation::Accepted { sentence, .. } | Annotation::Rejected { sentence, .. } => sentence,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Annotation::Accepted { .. })
    }

    pub fn features(&self) -> Option<&FeatureLayer> {
        match self {
            Annotation::Accepted { features, .. } => Some(features),
            Annotation::Rejected { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&AnnotationError> {
        match self {
            Annotation::Accepted { .. } => None,
            Annotation::Rejected { reason, .. } => Some(reason),
        }
    }
}

/// Derives morphosyntactic features sentence by sentence.
///
/// Holds no per-sentence state, so one annotator can serve many threads.
#[derive(Debug, Clone)]
pub struct Annotator {
    lexicon: Lexicon,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::swedish()
    }
}

impl Annotator {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn swedish() -> Self {
        Self::new(Lexicon::swedish())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Annotates a sentence, or rejects it with the first failure found.
    pub fn annotate(&self, sentence: Sentence) -> Annotation {
        match self.derive(&sentence) {
            Ok(features) => Annotation::Accepted { sentence, features },
            Err(reason) => {
                warn!(
                    sent_id = sentence.sent_id().unwrap_or("-"),
                    code = %reason.code(),
                    "rejected sentence"
                );
                Annotation::Rejected { sentence, reason }
            }
        }
    }

    /// Derived feature layer of a sentence; input nodes are left untouched.
    pub fn derive(&self, sentence: &Sentence) -> Result<FeatureLayer, AnnotationError> {
        let index = TreeIndex::build(sentence)?;
        let ctx = SentenceContext::new(sentence, &index, &self.lexicon);
        let mut records = Records::new(sentence);

        for pair in index.bottom_up() {
            apply_head(&ctx, &mut records, pair)?;
        }
        promote_unannotated(&ctx, &mut records);

        let layer = records.into_layer();
        verify_head_closure(sentence, &layer)?;
        Ok(layer)
    }
}

fn apply_head(ctx: &SentenceContext<'_>, records: &mut Records, pair: &HeadChildren) -> Result<(), AnnotationError> {
    let Some(head) = ctx.node(pair.head) else {
        return Ok(());
    };
    let children: Vec<&Node> = pair.children.iter().filter_map(|id| ctx.node(*id)).collect();
    let partition = classify(ctx, records, head, &children);

    // 1. Multiword lemma
    if !partition.fixed.is_empty() {
        records.set_fixed_lemma(head.id, partition.fixed_lemma.clone());
    }
    for child in &partition.fixed {
        records.absorb(child.id);
    }

    let verbal = head.is(PosClass::VERBAL);
    let mut bundle = if verbal {
        FeatureBundle::new()
    } else {
        head.feats.clone()
    };

    // 2. Auxiliaries and particles
    if !partition.tam.is_empty() {
        let tam = resolve_tam(&ctx.lexicon.tam, &partition.tam)?;
        bundle.merge(&tam);
        backfill(&mut bundle);
    }

    // 3. Relation words
    if !partition.relational.is_empty() {
        let clausal = deprel::is_clausal(&head.deprel);
        let relations = resolve_relations(&ctx.lexicon.relations, records, &partition.relational, verbal, clausal)?;
        bundle.merge(&relations);
    }
    for child in partition.tam.iter().chain(&partition.relational) {
        records.absorb(child.id);
    }

    // 4. Head's own features, determiners and degree
    let mut remaining = partition.remaining;
    if verbal {
        for name in VERBAL_OWN {
            if let Some(value) = head.feats.get(name) {
                bundle.set_default(name, value);
            }
        }
        bundle.set_default(names::VOICE, msf_protocol::Voice::Act.as_str());
    } else if head.is(PosClass::MODIFIABLE) {
        let mut outcome = resolve_determiners(&ctx.lexicon.determiners, records, remaining);
        resolve_degree(&ctx.lexicon.determiners, head, &mut outcome);
        bundle.merge(&outcome.features);
        for id in &outcome.absorbed {
            records.absorb(*id);
        }
        remaining = outcome.remaining;
    }

    bundle.prune_empty();
    debug!(head = %head.id, lemma = %head.lemma, feats = %bundle, "annotated head");
    records.set_feats(head.id, (!bundle.is_empty()).then_some(bundle));

    for child in remaining.into_iter().filter(|child| child.is(PosClass::PASS_THROUGH)) {
        records.pass_through(child);
    }
    Ok(())
}

/// Gives unannotated content words their own input features. An adposition or
/// adverb heading a fixed expression is promoted too, even when its head
/// absorbed it as a relation word.
fn promote_unannotated(ctx: &SentenceContext<'_>, records: &mut Records) {
    for node in &ctx.sentence.nodes {
        if records.has_feats(node.id) {
            continue;
        }
        let content =
            node.is(PosClass::CONTENT) && !node.has_deprel(deprel::FIXED) && !records.is_absorbed(node.id);
        let fixed_head = node.is(PosClass::FIXED_PROMOTABLE) && ctx.has_fixed_children(node.id);
        if content || fixed_head {
            records.pass_through(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::word;
    use msf_protocol::{NodeId, Upos};

    fn derive(nodes: Vec<Node>) -> Result<FeatureLayer, AnnotationError> {
        Annotator::swedish().derive(&Sentence::new(nodes))
    }

    fn code(nodes: Vec<Node>) -> String {
        derive(nodes).unwrap_err().code()
    }

    #[test]
    fn test_perfect_auxiliary_is_folded_into_verb() {
        // Hon har läst
        let layer = derive(vec![
            word(1, "Hon", "hon", Upos::Pron, 3, "nsubj", "Case=Nom"),
            word(2, "har", "ha", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "läst", "läsa", Upos::Verb, 0, "root", "VerbForm=Sup"),
        ])
        .unwrap();
        assert_eq!(
            layer.render(NodeId(3)),
            "Aspect=Perf|Mood=Ind|Polarity=Pos|Tense=Pres|VerbForm=Fin|Voice=Act"
        );
        assert_eq!(layer.render(NodeId(2)), "_");
        assert_eq!(layer.render(NodeId(1)), "Case=Nom");
    }

    #[test]
    fn test_article_is_folded_into_noun() {
        // Jag ser ett hus
        let layer = derive(vec![
            word(1, "Jag", "jag", Upos::Pron, 2, "nsubj", ""),
            word(2, "ser", "se", Upos::Verb, 0, "root", "Mood=Ind|Tense=Pres|VerbForm=Fin|Voice=Act"),
            word(3, "ett", "en", Upos::Det, 4, "det", ""),
            word(4, "hus", "hus", Upos::Noun, 2, "obj", "Gender=Neut|Number=Sing"),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(4)), "Definite=Ind|Gender=Neut|Number=Sing");
        assert_eq!(layer.render(NodeId(3)), "_");
        assert_eq!(layer.render(NodeId(2)), "Mood=Ind|Tense=Pres|VerbForm=Fin|Voice=Act");
        assert_eq!(layer.render(NodeId(1)), "|");
    }

    #[test]
    fn test_unknown_determiner_keeps_own_features() {
        let layer = derive(vec![
            word(1, "varje", "varje", Upos::Det, 2, "det", "PronType=Tot"),
            word(2, "hus", "hus", Upos::Noun, 0, "root", "Number=Sing"),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(1)), "PronType=Tot");
        assert_eq!(layer.render(NodeId(2)), "Number=Sing");
    }

    #[test]
    fn test_negated_copula() {
        // Hon är inte glad
        let layer = derive(vec![
            word(1, "Hon", "hon", Upos::Pron, 4, "nsubj", ""),
            word(2, "är", "vara", Upos::Aux, 4, "cop", "Mood=Ind|Tense=Pres|VerbForm=Fin|Voice=Act"),
            word(3, "inte", "inte", Upos::Adv, 4, "advmod", ""),
            word(4, "glad", "glad", Upos::Adj, 0, "root", "Degree=Pos"),
        ])
        .unwrap();
        assert_eq!(
            layer.render(NodeId(4)),
            "Degree=Pos|Mood=Ind|Polarity=Neg|Tense=Pres|VerbForm=Fin|Voice=Act"
        );
        assert_eq!(layer.render(NodeId(3)), "_");
    }

    #[test]
    fn test_future_with_skola() {
        // Vi ska resa
        let layer = derive(vec![
            word(1, "Vi", "vi", Upos::Pron, 3, "nsubj", ""),
            word(2, "ska", "skola", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin|Voice=Act"),
            word(3, "resa", "resa", Upos::Verb, 0, "root", "VerbForm=Inf|Voice=Act"),
        ])
        .unwrap();
        let feats = layer.get(NodeId(3)).unwrap();
        assert_eq!(feats.get("Tense"), Some("Fut"));
        assert_eq!(feats.get("VerbForm"), Some("Fin"));
    }

    #[test]
    fn test_negated_modal_keeps_positive_polarity() {
        // Han kan inte komma
        let layer = derive(vec![
            word(1, "Han", "han", Upos::Pron, 4, "nsubj", ""),
            word(2, "kan", "kunna", Upos::Aux, 4, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin|Voice=Act"),
            word(3, "inte", "inte", Upos::Part, 4, "advmod", ""),
            word(4, "komma", "komma", Upos::Verb, 0, "root", "VerbForm=Inf"),
        ])
        .unwrap();
        let feats = layer.get(NodeId(4)).unwrap();
        assert_eq!(feats.get("Mood"), Some("Ind,neg(Pot)"));
        assert_eq!(feats.get("Polarity"), Some("Pos"));
    }

    #[test]
    fn test_unknown_auxiliary_rejects_sentence() {
        let err = code(vec![
            word(1, "Jag", "jag", Upos::Pron, 3, "nsubj", ""),
            word(2, "tänker", "tänka", Upos::Aux, 3, "aux", "VerbForm=Fin"),
            word(3, "gå", "gå", Upos::Verb, 0, "root", "VerbForm=Inf"),
        ]);
        assert_eq!(err, "TAM_UNTREATED_2");
    }

    #[test]
    fn test_multiword_preposition() {
        // Vi stannade på grund av regnet
        let layer = derive(vec![
            word(1, "Vi", "vi", Upos::Pron, 2, "nsubj", ""),
            word(2, "stannade", "stanna", Upos::Verb, 0, "root", "Mood=Ind|Tense=Past|VerbForm=Fin|Voice=Act"),
            word(3, "på", "på", Upos::Adp, 6, "case", ""),
            word(4, "grund", "grund", Upos::Noun, 3, "fixed", ""),
            word(5, "av", "av", Upos::Adp, 3, "fixed", ""),
            word(6, "regnet", "regn", Upos::Noun, 2, "obl", "Definite=Def|Gender=Neut|Number=Sing"),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(6)), "Case=Cau|Definite=Def|Gender=Neut|Number=Sing");
        // the head of the fixed expression is promoted, its parts are not
        assert_eq!(layer.render(NodeId(3)), "|");
        assert_eq!(layer.render(NodeId(4)), "_");
        assert_eq!(layer.render(NodeId(5)), "_");
    }

    #[test]
    fn test_absorbed_comparative_keeps_its_own_features() {
        // Boken är mycket mer intressant
        let layer = derive(vec![
            word(1, "Boken", "bok", Upos::Noun, 5, "nsubj", "Definite=Def|Gender=Com|Number=Sing"),
            word(2, "är", "vara", Upos::Aux, 5, "cop", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "mycket", "mycket", Upos::Adv, 4, "advmod", ""),
            word(4, "mer", "mycket", Upos::Adv, 5, "advmod", "Degree=Cmp"),
            word(5, "intressant", "intressant", Upos::Adj, 0, "root", "Degree=Pos"),
        ])
        .unwrap();
        assert_eq!(layer.get(NodeId(5)).and_then(|feats| feats.get("Degree")), Some("Cmp"));
        assert_eq!(layer.render(NodeId(4)), "Degree=Cmp");
        assert_eq!(layer.render(NodeId(3)), "|");
    }

    #[test]
    fn test_coordinated_prepositions_keep_their_contributions() {
        // före och efter mötet
        let layer = derive(vec![
            word(1, "före", "före", Upos::Adp, 4, "case", ""),
            word(2, "och", "och", Upos::Cconj, 3, "cc", ""),
            word(3, "efter", "efter", Upos::Adp, 1, "conj", ""),
            word(4, "mötet", "möte", Upos::Noun, 0, "root", "Definite=Def|Gender=Neut|Number=Sing"),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(4)), "Case=Tan|Definite=Def|Gender=Neut|Number=Sing");
        assert_eq!(layer.render(NodeId(1)), "Case=Tps");
        assert_eq!(layer.render(NodeId(3)), "ConjType=Conj");
        assert_eq!(layer.render(NodeId(2)), "_");
    }

    #[test]
    fn test_fixed_adverb_under_verb_is_promoted() {
        // Han kom till slut hem
        let layer = derive(vec![
            word(1, "Han", "han", Upos::Pron, 2, "nsubj", ""),
            word(2, "kom", "komma", Upos::Verb, 0, "root", "Mood=Ind|Tense=Past|VerbForm=Fin|Voice=Act"),
            word(3, "till", "till", Upos::Adp, 2, "advmod", ""),
            word(4, "slut", "slut", Upos::Noun, 3, "fixed", ""),
            word(5, "hem", "hem", Upos::Adv, 2, "advmod", ""),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(3)), "|");
        assert_eq!(layer.render(NodeId(4)), "_");
    }

    #[test]
    fn test_case_marker_on_verb_rejects_sentence() {
        let err = code(vec![
            word(1, "på", "på", Upos::Adp, 2, "case", ""),
            word(2, "springa", "springa", Upos::Verb, 0, "root", "VerbForm=Inf"),
        ]);
        assert_eq!(err, "REL_CASE_VERB_1->2");
    }

    #[test]
    fn test_fronted_temporal_adverb() {
        // När han kom åt vi
        let layer = derive(vec![
            word(1, "När", "när", Upos::Adv, 3, "advmod", ""),
            word(2, "han", "han", Upos::Pron, 3, "nsubj", ""),
            word(3, "kom", "komma", Upos::Verb, 4, "advcl", "Mood=Ind|Tense=Past|VerbForm=Fin|Voice=Act"),
            word(4, "åt", "äta", Upos::Verb, 0, "root", "Mood=Ind|Tense=Past|VerbForm=Fin|Voice=Act"),
            word(5, "vi", "vi", Upos::Pron, 4, "nsubj", ""),
        ])
        .unwrap();
        assert_eq!(layer.get(NodeId(3)).and_then(|feats| feats.get("RelType")), Some("Tem"));
        assert_eq!(layer.render(NodeId(1)), "_");
    }

    #[test]
    fn test_demonstrative_multiword_determiner() {
        // den här bilen
        let layer = derive(vec![
            word(1, "den", "den", Upos::Det, 3, "det", ""),
            word(2, "här", "här", Upos::Adv, 1, "fixed", ""),
            word(3, "bilen", "bil", Upos::Noun, 0, "root", "Definite=Def|Gender=Com|Number=Sing"),
        ])
        .unwrap();
        assert_eq!(layer.render(NodeId(3)), "Definite=Def|Dem=Prox|Gender=Com|Number=Sing");
        assert_eq!(layer.render(NodeId(1)), "_");
        assert_eq!(layer.render(NodeId(2)), "_");
    }

    #[test]
    fn test_comparative_particle() {
        // Boken är mer intressant
        let layer = derive(vec![
            word(1, "Boken", "bok", Upos::Noun, 4, "nsubj", "Definite=Def|Gender=Com|Number=Sing"),
            word(2, "är", "vara", Upos::Aux, 4, "cop", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "mer", "mycket", Upos::Adv, 4, "advmod", ""),
            word(4, "intressant", "intressant", Upos::Adj, 0, "root", "Degree=Pos"),
        ])
        .unwrap();
        let feats = layer.get(NodeId(4)).unwrap();
        assert_eq!(feats.get("Degree"), Some("Cmp"));
        assert_eq!(feats.get("Tense"), Some("Pres"));
        assert_eq!(layer.render(NodeId(3)), "_");
    }

    #[test]
    fn test_annotated_node_under_absorbed_head_fails_verification() {
        // an adposition that is absorbed but heads a noun of its own
        let err = code(vec![
            word(1, "i", "i", Upos::Adp, 3, "case", ""),
            word(2, "huset", "hus", Upos::Noun, 1, "nmod", ""),
            word(3, "staden", "stad", Upos::Noun, 0, "root", "Number=Sing"),
        ]);
        assert_eq!(err, "VER_2->1");
    }

    #[test]
    fn test_two_roots_rejects_sentence() {
        let err = code(vec![
            word(1, "Hej", "hej", Upos::Intj, 0, "root", ""),
            word(2, "du", "du", Upos::Pron, 0, "root", ""),
        ]);
        assert_eq!(err, "TREE_ROOT_1-2");
    }

    #[test]
    fn test_single_word_sentence_is_promoted() {
        let layer = derive(vec![word(1, "Hej", "hej", Upos::Intj, 0, "root", "")]).unwrap();
        assert_eq!(layer.render(NodeId(1)), "|");
    }

    #[test]
    fn test_input_is_left_untouched() {
        let sentence = Sentence::new(vec![
            word(1, "Hon", "hon", Upos::Pron, 3, "nsubj", "Case=Nom"),
            word(2, "har", "ha", Upos::Aux, 3, "aux", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            word(3, "läst", "läsa", Upos::Verb, 0, "root", "VerbForm=Sup"),
        ]);
        let annotation = Annotator::swedish().annotate(sentence.clone());
        assert!(annotation.is_accepted());
        assert_eq!(annotation.sentence(), &sentence);
        assert_eq!(annotation.features().map(FeatureLayer::len), Some(2));
    }

    #[test]
    fn test_rejection_carries_reason() {
        let annotation = Annotator::swedish().annotate(Sentence::new(vec![
            word(1, "har", "ha", Upos::Aux, 3, "aux", "VerbForm=Fin"),
            word(2, "haft", "ha", Upos::Aux, 3, "aux", "VerbForm=Sup"),
            word(3, "läst", "läsa", Upos::Verb, 0, "root", ""),
        ]));
        assert!(!annotation.is_accepted());
        assert_eq!(annotation.reason().map(AnnotationError::code).as_deref(), Some("TAM_MULTIPLE_ha_1-2"));
    }

    #[test]
    fn test_annotator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Annotator>();
    }

    #[test]
    fn test_end_to_end_conllu() {
        let text = "\
# sent_id = s1
# text = Vi har inte sett det.
1\tVi\tvi\tPRON\t_\tCase=Nom\t4\tnsubj\t_\t_
2-3\thar inte\t_\t_\t_\t_\t_\t_\t_\t_
2\thar\tha\tAUX\t_\tMood=Ind|Tense=Pres|VerbForm=Fin\t4\taux\t_\t_
3\tinte\tinte\tPART\t_\t_\t4\tadvmod\t_\t_
4\tsett\tse\tVERB\t_\tVerbForm=Sup\t0\troot\t_\t_
5\tdet\tden\tPRON\t_\t_\t4\tobj\t_\t_
6\t.\t.\tPUNCT\t_\t_\t4\tpunct\t_\t_

";
        let sentences = msf_conllu::parse_str(text).unwrap();
        let annotator = Annotator::swedish();
        let annotation = annotator.annotate(sentences.into_iter().next().unwrap());
        let layer = annotation.features().unwrap();
        let out = msf_conllu::annotated_to_string(annotation.sentence(), layer);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "# sent_id = s1");
        assert!(lines[3].ends_with("\t_"));
        assert!(lines[2].ends_with("\tCase=Nom"));
        assert!(lines[5].ends_with("\t_"));
        assert!(lines[6].ends_with("\tAspect=Perf|Mood=Ind|Polarity=Neg|Tense=Pres|VerbForm=Fin|Voice=Act"));
        assert!(lines[7].ends_with("\t|"));
        assert!(lines[8].ends_with("\t_"));
    }
}
