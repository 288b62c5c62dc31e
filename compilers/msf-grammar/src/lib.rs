//! Bottom-up derivation of morphosyntactic features over UD dependency trees.
//!
//! Function words (auxiliaries, adpositions, subordinators, coordinators,
//! determiners) are folded into the content word they depend on. The result
//! is a [`FeatureLayer`](msf_protocol::FeatureLayer) next to the input
//! sentence, which itself is never modified.

pub mod classify;
pub mod context;
pub mod determiner;
pub mod driver;
pub mod error;
pub mod record;
pub mod relation;
pub mod report;
pub mod tam;

#[cfg(test)]
mod testing;

pub use classify::{classify, Partition, Role};
pub use context::SentenceContext;
pub use driver::{Annotation, Annotator};
pub use error::AnnotationError;
pub use record::{NodeRecord, Records};
pub use report::Summary;
