//! Individual record representation
//!
//! This module contains the Person model, the individual record created by a
//! level-0 `INDI` line. Names, events and family memberships are filled in
//! by subordinate lines; the derived relationship lists are populated once by
//! the parser's linking pass and hold only ids that resolved to a record.

use serde::{Deserialize, Serialize};

/// Sex of an individual as recorded by the `SEX` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    /// Recorded as male (`M`)
    Male,
    /// Recorded as female (`F`)
    Female,
    /// Not recorded, or recorded with an unrecognized value
    #[default]
    Unknown,
}

impl From<&str> for Sex {
    fn from(value: &str) -> Self {
        match value.trim() {
            "M" | "m" => Sex::Male,
            "F" | "f" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// An individual record in a GEDCOM dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    /// Cross-reference id, unique within a dataset
    pub id: String,
    /// Given name from `NAME` or a `GIVN` sub-line
    pub given_name: Option<String>,
    /// Surname from `NAME` or a `SURN` sub-line
    pub surname: Option<String>,
    /// Full display name, either built from the name parts or taken verbatim
    /// from a `NAME` value without surname delimiters
    pub full_name: Option<String>,
    /// Birth date as recorded (GEDCOM dates are free text)
    pub birth_date: Option<String>,
    /// Birth place as recorded
    pub birth_place: Option<String>,
    /// Death date as recorded
    pub death_date: Option<String>,
    /// Death place as recorded
    pub death_place: Option<String>,
    /// Sex of the individual
    pub sex: Sex,
    /// Ids of the families where this person is recorded as a child, in
    /// source order
    pub child_family_ids: Vec<String>,
    /// Ids of the families where this person is recorded as a spouse, in
    /// source order
    pub spouse_family_ids: Vec<String>,
    /// Resolved parent ids, filled by the linking pass
    pub parents: Vec<String>,
    /// Resolved child ids, filled by the linking pass
    pub children: Vec<String>,
    /// Resolved spouse ids, filled by the linking pass
    pub spouses: Vec<String>,
    /// Resolved sibling ids, filled by the linking pass; symmetric by
    /// construction and never containing this person
    pub siblings: Vec<String>,
}

impl Person {
    /// Create a new empty person with the given id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Record a family in which this person is a child
    pub fn add_family_as_child(&mut self, family_id: String) {
        if !self.child_family_ids.contains(&family_id) {
            self.child_family_ids.push(family_id);
        }
    }

    /// Record a family in which this person is a spouse
    pub fn add_family_as_spouse(&mut self, family_id: String) {
        if !self.spouse_family_ids.contains(&family_id) {
            self.spouse_family_ids.push(family_id);
        }
    }

    /// Get a display name for the person.
    ///
    /// Prefers the full name, falls back to given name plus surname, and
    /// labels a person with no recorded name at all as `Unknown (<id>)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref() {
            if !full.trim().is_empty() {
                return full.to_string();
            }
        }

        let mut name = String::new();
        if let Some(given) = self.given_name.as_deref().map(str::trim) {
            name.push_str(given);
        }
        if let Some(surname) = self.surname.as_deref().map(str::trim) {
            if !surname.is_empty() {
                if !name.is_empty() {
                    name.push(' ');
                }
                name.push_str(surname);
            }
        }

        if name.is_empty() {
            format!("Unknown ({})", self.id)
        } else {
            name
        }
    }

    /// Get birth and death information as a display string, e.g.
    /// `b. 1 JAN 1850 - d. 3 MAR 1920`. Empty when neither date is recorded.
    #[must_use]
    pub fn life_dates(&self) -> String {
        let mut dates = String::new();

        if let Some(birth) = trimmed(self.birth_date.as_deref()) {
            dates.push_str("b. ");
            dates.push_str(birth);
        }

        if let Some(death) = trimmed(self.death_date.as_deref()) {
            if !dates.is_empty() {
                dates.push_str(" - ");
            }
            dates.push_str("d. ");
            dates.push_str(death);
        }

        dates
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
