use msf_lexicon::Lexicon;
use msf_protocol::{deprel, Node, NodeId, Sentence};
use msf_tree::TreeIndex;

/// Read-only view of the sentence being annotated.
///
/// Passed to every rule that has to look past the head it is working on.
#[derive(Clone, Copy)]
pub struct SentenceContext<'a> {
    pub sentence: &'a Sentence,
    pub index: &'a TreeIndex,
    pub lexicon: &'a Lexicon,
}

impl<'a> SentenceContext<'a> {
    pub fn new(sentence: &'a Sentence, index: &'a TreeIndex, lexicon: &'a Lexicon) -> Self {
        Self {
            sentence,
            index,
            lexicon,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&'a Node> {
        self.sentence.node(id)
    }

    /// Governor of `node`; `None` for the root.
    pub fn head_of(&self, node: &Node) -> Option<&'a Node> {
        if node.head.is_root() {
            None
        } else {
            self.node(node.head)
        }
    }

    /// Lowest-numbered dependent of `head`, ignorable ones included.
    pub fn first_child(&self, head: NodeId) -> Option<NodeId> {
        self.index.children(head).first().copied()
    }

    /// Whether `id` heads a multiword expression.
    pub fn has_fixed_children(&self, id: NodeId) -> bool {
        self.index
            .children(id)
            .iter()
            .filter_map(|child| self.node(*child))
            .any(|child| child.has_deprel(deprel::FIXED))
    }
}
