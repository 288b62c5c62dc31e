use alloc::string::String;
use alloc::vec::Vec;

use crate::features::FeatureBundle;
use crate::ids::NodeId;
use crate::morphology::{deprel, PosClass, Upos};

/// One syntactic word of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub form: String,
    pub lemma: String,
    pub upos: Upos,
    pub xpos: Option<String>,
    pub feats: FeatureBundle,
    pub head: NodeId,
    pub deprel: String,
    pub deps: Option<String>,
    pub misc: Option<String>,
}

impl Node {
    pub fn new(
        id: u32,
        form: impl Into<String>,
        lemma: impl Into<String>,
        upos: Upos,
        head: u32,
        deprel: impl Into<String>,
    ) -> Self {
        Self {
            id: NodeId(id),
            form: form.into(),
            lemma: lemma.into(),
            upos,
            xpos: None,
            feats: FeatureBundle::new(),
            head: NodeId(head),
            deprel: deprel.into(),
            deps: None,
            misc: None,
        }
    }

    pub fn with_feats(mut self, feats: FeatureBundle) -> Self {
        self.feats = feats;
        self
    }

    pub fn class(&self) -> PosClass {
        self.upos.class()
    }

    pub fn is(&self, class: PosClass) -> bool {
        self.upos.is(class)
    }

    pub fn has_deprel(&self, label: &str) -> bool {
        self.deprel == label
    }

    pub fn is_ignorable(&self) -> bool {
        deprel::is_ignorable(&self.deprel)
    }

    /// Lower-cased surface form, used by form-keyed lexical rules.
    pub fn form_lower(&self) -> String {
        self.form.to_lowercase()
    }
}

/// A line the reader keeps verbatim but that is not a syntactic word
/// (multiword-token ranges and empty nodes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Number of nodes written before this line.
    pub position: usize,
    pub text: String,
}

/// An ordered list of nodes plus its comment lines.
///
/// The node list keeps surface order; the tree is implied by `head`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    /// Comment lines without the leading `#`, trimmed.
    pub comments: Vec<String>,
    pub nodes: Vec<Node>,
    pub raw_lines: Vec<RawLine>,
}

impl Sentence {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            comments: Vec::new(),
            nodes,
            raw_lines: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Value of a `key = value` comment.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.comments.iter().find_map(|comment| {
            let (k, v) = comment.split_once('=')?;
            (k.trim() == key).then(|| v.trim())
        })
    }

    pub fn sent_id(&self) -> Option<&str> {
        self.metadata("sent_id")
    }

    pub fn text(&self) -> Option<&str> {
        self.metadata("text")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        // Well-formed input stores node `n` at position `n - 1`.
        let guess = (id.0 as usize).checked_sub(1).and_then(|i| self.nodes.get(i));
        match guess {
            Some(node) if node.id == id => Some(node),
            _ => self.nodes.iter().find(|node| node.id == id),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|node| node.id)
    }

    /// Direct dependents of `head`, in surface order.
    pub fn children_of(&self, head: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |node| node.head == head)
    }
}
