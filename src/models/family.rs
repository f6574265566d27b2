//! Family unit representation
//!
//! This module contains the Family model, the record created by a level-0
//! `FAM` line. A family records its spouses and children by cross-reference
//! id; the resolving accessors look those ids up in the owning [`Dataset`]
//! and silently drop ids that never resolved to a person record.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::person::Person;

/// A family record in a GEDCOM dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Family {
    /// Cross-reference id, unique within a dataset
    pub id: String,
    /// Recorded husband id from `HUSB`
    pub husband_id: Option<String>,
    /// Recorded wife id from `WIFE`
    pub wife_id: Option<String>,
    /// Recorded child ids from `CHIL`, in source order
    pub child_ids: Vec<String>,
    /// Marriage date as recorded (free text)
    pub marriage_date: Option<String>,
    /// Marriage place as recorded
    pub marriage_place: Option<String>,
    /// Divorce date as recorded
    pub divorce_date: Option<String>,
}

impl Family {
    /// Create a new empty family with the given id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Record a child of this family
    pub fn add_child(&mut self, child_id: String) {
        if !self.child_ids.contains(&child_id) {
            self.child_ids.push(child_id);
        }
    }

    /// Resolve the recorded husband, if any
    #[must_use]
    pub fn husband<'a>(&self, data: &'a Dataset) -> Option<&'a Person> {
        self.husband_id.as_deref().and_then(|id| data.person(id))
    }

    /// Resolve the recorded wife, if any
    #[must_use]
    pub fn wife<'a>(&self, data: &'a Dataset) -> Option<&'a Person> {
        self.wife_id.as_deref().and_then(|id| data.person(id))
    }

    /// Resolve the recorded children, dropping ids with no person record
    #[must_use]
    pub fn children<'a>(&self, data: &'a Dataset) -> Vec<&'a Person> {
        self.child_ids
            .iter()
            .filter_map(|id| data.person(id))
            .collect()
    }

    /// Resolve the spouses present in this family, husband first
    #[must_use]
    pub fn parents<'a>(&self, data: &'a Dataset) -> Vec<&'a Person> {
        self.husband(data)
            .into_iter()
            .chain(self.wife(data))
            .collect()
    }

    /// Get the recorded id of the opposite spouse of `person_id` in this
    /// family, or `None` when `person_id` is not a recorded spouse here
    #[must_use]
    pub fn spouse_of(&self, person_id: &str) -> Option<&str> {
        if self.husband_id.as_deref() == Some(person_id) {
            self.wife_id.as_deref()
        } else if self.wife_id.as_deref() == Some(person_id) {
            self.husband_id.as_deref()
        } else {
            None
        }
    }

    /// Get marriage and divorce information as a display string, e.g.
    /// `m. 12 JUN 1880 in Warsaw - div. 1890`. Empty when nothing is
    /// recorded.
    #[must_use]
    pub fn marriage_info(&self) -> String {
        let mut info = String::new();

        if let Some(date) = trimmed(self.marriage_date.as_deref()) {
            info.push_str("m. ");
            info.push_str(date);
        }

        if let Some(place) = trimmed(self.marriage_place.as_deref()) {
            if !info.is_empty() {
                info.push_str(" in ");
            }
            info.push_str(place);
        }

        if let Some(divorce) = trimmed(self.divorce_date.as_deref()) {
            if !info.is_empty() {
                info.push_str(" - ");
            }
            info.push_str("div. ");
            info.push_str(divorce);
        }

        info
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
