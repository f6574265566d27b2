//! Relationship analysis over linked GEDCOM datasets

mod engine;

pub use engine::{MAX_COUSIN_DEGREE, RelationshipEngine};
