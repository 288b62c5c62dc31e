use msf_protocol::{FeatureLayer, Sentence};
use thiserror::Error;

use crate::error::{join_links, Link};

/// Annotated nodes whose head was left unannotated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("annotated nodes hang from unannotated heads: {}", join_links(.links))]
pub struct HeadClosureError {
    pub links: Vec<Link>,
}

/// Every node carrying derived features must hang from the root or from
/// another node carrying derived features.
pub fn verify_head_closure(sentence: &Sentence, layer: &FeatureLayer) -> Result<(), HeadClosureError> {
    let links: Vec<Link> = sentence
        .nodes
        .iter()
        .filter(|node| layer.contains(node.id))
        .filter(|node| !node.head.is_root() && !layer.contains(node.head))
        .map(|node| Link {
            id: node.id,
            head: node.head,
        })
        .collect();

    if links.is_empty() {
        Ok(())
    } else {
        Err(HeadClosureError { links })
    }
}
