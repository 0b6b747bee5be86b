//! Document model types for layout tokens and outlines.
//!
//! Tokens and layouts are what the providers hand to the analysis stage;
//! candidates and the consensus outline are what comes out of it.

mod layout;
mod outline;
mod token;

pub use layout::DocumentLayout;
pub use outline::{Confidence, ConsensusOutline, HeadingCandidate, HeadingLevel, OutlineEntry};
pub use token::{BoundingBox, FontSignature, TextToken};
