use std::fmt;

use msf_protocol::NodeId;
use thiserror::Error;

/// A dependent and the head it hangs from, written `id->head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Link {
    pub id: NodeId,
    pub head: NodeId,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.id, self.head)
    }
}

/// `1-4-7`
pub fn join_ids(ids: &[NodeId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join("-")
}

/// `3->2|5->2`
pub fn join_links(links: &[Link]) -> String {
    links.iter().map(|link| link.to_string()).collect::<Vec<_>>().join("|")
}

/// The head relation does not describe one tree rooted at 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Nodes whose head chain never reaches the root
    #[error("head relation has a cycle through nodes {}", join_ids(.0))]
    Cycle(Vec<NodeId>),

    /// Heads that name no node of the sentence
    #[error("heads point outside the sentence: {}", join_links(.0))]
    DanglingHead(Vec<Link>),

    #[error("node ids used more than once: {}", join_ids(.0))]
    DuplicateId(Vec<NodeId>),

    #[error("sentence has no root")]
    NoRoot,

    #[error("sentence has several roots: {}", join_ids(.0))]
    MultipleRoots(Vec<NodeId>),

    /// A head is visited before it was reached as a child
    #[error("traversal order visits {0} as a head before reaching it")]
    OrderViolation(NodeId),
}

impl TreeError {
    pub fn kind(&self) -> &'static str {
        match self {
            TreeError::Cycle(_) => "CYCLE",
            TreeError::DanglingHead(_) => "DANGLING",
            TreeError::DuplicateId(_) => "DUPLICATE",
            TreeError::NoRoot | TreeError::MultipleRoots(_) => "ROOT",
            TreeError::OrderViolation(_) => "ORDER",
        }
    }

    /// Nodes the error is about, in id order.
    pub fn ids(&self) -> Vec<NodeId> {
        match self {
            TreeError::Cycle(ids) | TreeError::DuplicateId(ids) | TreeError::MultipleRoots(ids) => {
                ids.clone()
            }
            TreeError::DanglingHead(links) => links.iter().map(|link| link.id).collect(),
            TreeError::NoRoot => Vec::new(),
            TreeError::OrderViolation(id) => vec![*id],
        }
    }

    /// `TREE_<kind>_<ids>`; the id part is left out when there are none.
    pub fn code(&self) -> String {
        let ids = self.ids();
        if ids.is_empty() {
            format!("TREE_{}", self.kind())
        } else {
            format!("TREE_{}_{}", self.kind(), join_ids(&ids))
        }
    }
}
