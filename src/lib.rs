//! A Rust library for parsing GEDCOM genealogy files and answering family
//! relationship queries over the resulting record graph.
//!
//! Parsing builds an id-keyed [`Dataset`] of [`Person`] and [`Family`]
//! records; a single linking pass resolves every cross-reference into
//! deduplicated parent/child/spouse/sibling lists. The [`RelationshipEngine`]
//! then answers read-only queries (ancestors, descendants, cousins to the
//! sixth degree, generation grouping, pairwise classification) over the
//! completed dataset.

pub mod analysis;
pub mod error;
pub mod models;
pub mod parser;

// Re-export the most common types for easier use
// Core types
pub use error::{GedcomReaderError, Result};
pub use models::{Dataset, Family, Person, Sex};

// Parsing entry points
pub use parser::{GedcomParser, parse, parse_and_merge, parse_file};

// Relationship queries
pub use analysis::{MAX_COUSIN_DEGREE, RelationshipEngine};
