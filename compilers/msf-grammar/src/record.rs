use std::collections::BTreeMap;

use msf_protocol::{FeatureBundle, FeatureLayer, Node, NodeId, Sentence};

/// What the engine has derived for one node so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRecord {
    /// `None` until the node is annotated; `Some(empty)` is the explicit empty marker.
    pub ms_feats: Option<FeatureBundle>,
    /// Lemma of the node joined with its `fixed` dependents. Dropped on finalization.
    pub fixed_lemma: Option<String>,
    /// Merged into its head and never annotated on its own.
    pub absorbed: bool,
}

/// Derived state of a sentence, kept apart from the input nodes.
#[derive(Debug, Clone, Default)]
pub struct Records {
    records: BTreeMap<NodeId, NodeRecord>,
}

impl Records {
    pub fn new(sentence: &Sentence) -> Self {
        Self {
            records: sentence
                .ids()
                .map(|id| (id, NodeRecord::default()))
                .collect(),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeRecord> {
        self.records.get(&id)
    }

    fn entry(&mut self, id: NodeId) -> &mut NodeRecord {
        self.records.entry(id).or_default()
    }

    pub fn feats(&self, id: NodeId) -> Option<&FeatureBundle> {
        self.get(id).and_then(|record| record.ms_feats.as_ref())
    }

    pub fn has_feats(&self, id: NodeId) -> bool {
        self.feats(id).is_some()
    }

    pub fn set_feats(&mut self, id: NodeId, feats: Option<FeatureBundle>) {
        self.entry(id).ms_feats = feats;
    }

    /// Gives an unannotated node a copy of its input features, which may be empty.
    pub fn pass_through(&mut self, node: &Node) {
        if !self.has_feats(node.id) {
            self.set_feats(node.id, Some(node.feats.clone()));
        }
    }

    pub fn fixed_lemma(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|record| record.fixed_lemma.as_deref())
    }

    pub fn set_fixed_lemma(&mut self, id: NodeId, lemma: String) {
        self.entry(id).fixed_lemma = Some(lemma);
    }

    /// The lemma lexical tables are consulted with.
    pub fn lookup_lemma<'a>(&'a self, node: &'a Node) -> &'a str {
        self.fixed_lemma(node.id).unwrap_or(&node.lemma)
    }

    /// Marks a node as merged into its head. Whatever it derived as a head stays.
    pub fn absorb(&mut self, id: NodeId) {
        self.entry(id).absorbed = true;
    }

    pub fn is_absorbed(&self, id: NodeId) -> bool {
        self.get(id).map_or(false, |record| record.absorbed)
    }

    /// Keeps only the derived bundles.
    pub fn into_layer(self) -> FeatureLayer {
        self.records
            .into_iter()
            .filter_map(|(id, record)| record.ms_feats.map(|feats| (id, feats)))
            .collect()
    }
}
