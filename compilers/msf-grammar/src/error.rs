use msf_protocol::NodeId;
use msf_tree::{join_ids, join_links, HeadClosureError, Link, TreeError};
use thiserror::Error;

/// Why a sentence was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The head relation is not one tree rooted at 0
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] TreeError),

    /// An auxiliary that may occur once per head occurs several times
    #[error("auxiliary '{lemma}' occurs more than once: {}", join_ids(.ids))]
    AmbiguousAuxiliary { lemma: String, ids: Vec<NodeId> },

    /// Auxiliaries or particles no rule accounts for
    #[error("untreated auxiliaries: {}", join_ids(.ids))]
    UntreatedAuxiliary { ids: Vec<NodeId> },

    /// A case marker attached to a predicate
    #[error("case marker on a verb: {}", join_links(.links))]
    StructuralAnomaly { links: Vec<Link> },

    /// Relation words that fit none of the relation tables
    #[error("unclassifiable relation words: {}", join_ids(.ids))]
    UnclassifiableRelation { ids: Vec<NodeId> },

    /// Annotated nodes left hanging from unannotated heads
    #[error("annotated nodes under unannotated heads: {}", join_links(.links))]
    VerificationFailure { links: Vec<Link> },
}

impl From<HeadClosureError> for AnnotationError {
    fn from(err: HeadClosureError) -> Self {
        AnnotationError::VerificationFailure { links: err.links }
    }
}

impl AnnotationError {
    /// Failure family, the code without its node list.
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationError::MalformedTree(_) => "TREE",
            AnnotationError::AmbiguousAuxiliary { .. } => "TAM_MULTIPLE",
            AnnotationError::UntreatedAuxiliary { .. } => "TAM_UNTREATED",
            AnnotationError::StructuralAnomaly { .. } => "REL_CASE_VERB",
            AnnotationError::UnclassifiableRelation { .. } => "REL_UNCLASSIFIED",
            AnnotationError::VerificationFailure { .. } => "VER",
        }
    }

    /// Code written to the `# error_type` line of a rejected sentence.
    pub fn code(&self) -> String {
        match self {
            AnnotationError::MalformedTree(err) => err.code(),
            AnnotationError::AmbiguousAuxiliary { lemma, ids } => {
                format!("TAM_MULTIPLE_{}_{}", lemma, join_ids(ids))
            }
            AnnotationError::UntreatedAuxiliary { ids }
            | AnnotationError::UnclassifiableRelation { ids } => {
                format!("{}_{}", self.kind(), join_ids(ids))
            }
            AnnotationError::StructuralAnomaly { links }
            | AnnotationError::VerificationFailure { links } => {
                format!("{}_{}", self.kind(), join_links(links))
            }
        }
    }
}
