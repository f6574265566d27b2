//! Record models for GEDCOM data
//!
//! This module contains the passive record entities built by the parser: the
//! [`Person`] and [`Family`] records and the [`Dataset`] that owns both
//! id-keyed tables. Records are created empty when their level-0 line is
//! first seen, filled incrementally by subordinate lines, and cross-linked
//! once by the parser's linking pass. After linking, a dataset is read-only.

pub mod dataset;
pub mod family;
pub mod person;

pub use dataset::Dataset;
pub use family::Family;
pub use person::{Person, Sex};
