//! The complete linked set of person and family records
//!
//! A [`Dataset`] owns both id-keyed record tables. It is produced by the
//! parser once the linking pass has run and is read-only from then on, so
//! shared references to it may be handed to any number of query engines.

use rustc_hash::FxHashMap;

use crate::error::{GedcomReaderError, Result};
use crate::parser::line::strip_xref;

use super::family::Family;
use super::person::Person;

/// Container for parsed and linked GEDCOM data
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Persons indexed by cross-reference id
    persons: FxHashMap<String, Person>,
    /// Families indexed by cross-reference id
    families: FxHashMap<String, Family>,
}

impl Dataset {
    pub(crate) fn new(
        persons: FxHashMap<String, Person>,
        families: FxHashMap<String, Family>,
    ) -> Self {
        Self { persons, families }
    }

    /// Look up a person by id
    #[must_use]
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Look up a family by id
    #[must_use]
    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    /// Resolve a raw caller-supplied person id, stripping `@` delimiters.
    ///
    /// This is the one lookup that reports failure instead of returning an
    /// empty result: an id that resolves to no record is an error for the
    /// caller, not a silently absent relative.
    pub fn require_person(&self, id: &str) -> Result<&Person> {
        let clean = strip_xref(id);
        self.persons
            .get(clean)
            .ok_or_else(|| GedcomReaderError::PersonNotFound(clean.to_string()))
    }

    /// Get the number of persons in the dataset
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Get the number of families in the dataset
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Iterate over all persons, in no particular order
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Iterate over all families, in no particular order
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }
}
