#![cfg_attr(not(any(test, feature = "std")), no_std)] // Keeps the WASM build lean

extern crate alloc;

pub mod features;
pub mod ids;
pub mod model;
pub mod morphology;

// Re-export core types for convenience
pub use features::{render_derived, FeatureBundle, FeatureLayer, FeatureParseError};
pub use ids::NodeId;
pub use model::{Node, RawLine, Sentence};
pub use morphology::*;
