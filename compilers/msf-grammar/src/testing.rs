use msf_lexicon::Lexicon;
use msf_protocol::{FeatureBundle, Node, Sentence, Upos};
use msf_tree::TreeIndex;

use crate::context::SentenceContext;

pub(crate) fn word(id: u32, form: &str, lemma: &str, upos: Upos, head: u32, deprel: &str, feats: &str) -> Node {
    Node::new(id, form, lemma, upos, head, deprel).with_feats(FeatureBundle::parse(feats).unwrap())
}

pub(crate) fn with_context<R>(nodes: Vec<Node>, f: impl FnOnce(&SentenceContext<'_>) -> R) -> R {
    let sentence = Sentence::new(nodes);
    let index = TreeIndex::build(&sentence).unwrap();
    let lexicon = Lexicon::swedish();
    f(&SentenceContext::new(&sentence, &index, &lexicon))
}
