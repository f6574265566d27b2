//! GEDCOM source parsing and dataset construction
//!
//! [`GedcomParser`] accumulates records from one or more sources into a
//! shared working set and then runs a single linking pass that resolves all
//! cross-references into the derived relationship lists. Parser state is
//! explicit and scoped to the parser value; the per-source line cursor is
//! scoped to each parse call, so source order only matters for id-collision
//! precedence (the first-seen definition of an id wins and later duplicates
//! are discarded wholesale).

pub mod line;
mod name;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Result;
use crate::models::{Dataset, Family, Person, Sex};

use line::{GedcomLine, LineDecoder, strip_xref};

/// Parse a single in-memory source into a linked dataset
#[must_use]
pub fn parse(source: &str) -> Dataset {
    let mut parser = GedcomParser::new();
    parser.parse_text(source);
    parser.finish()
}

/// Parse a single source file into a linked dataset
pub fn parse_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let mut parser = GedcomParser::new();
    parser.parse_path(path.as_ref())?;
    Ok(parser.finish())
}

/// Parse multiple source files, in the given order, into one linked dataset.
///
/// An id already defined by an earlier source causes the later record to be
/// discarded in full; the linking pass runs once after all sources are read.
pub fn parse_and_merge<I, P>(paths: I) -> Result<Dataset>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut parser = GedcomParser::new();
    for path in paths {
        parser.parse_path(path.as_ref())?;
    }
    Ok(parser.finish())
}

/// Per-source line cursor: the open record, the active level-1 tag and the
/// duplicate-record skip flag
#[derive(Debug, Default)]
struct Cursor {
    current_id: Option<String>,
    current_tag: Option<String>,
    skip_record: bool,
}

/// Incremental parser accumulating person and family records from one or
/// more GEDCOM sources
#[derive(Debug, Default)]
pub struct GedcomParser {
    decoder: LineDecoder,
    persons: FxHashMap<String, Person>,
    families: FxHashMap<String, Family>,
}

impl GedcomParser {
    /// Create a parser with an empty working set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one in-memory source into the working set.
    ///
    /// Lines that do not match the record grammar are skipped; a level-0 id
    /// already present in the working set puts the cursor in skip mode until
    /// the next level-0 line.
    pub fn parse_text(&mut self, source: &str) {
        let mut cursor = Cursor::default();
        for raw in source.lines() {
            match self.decoder.decode(raw) {
                Some(line) => self.apply_line(&mut cursor, &line),
                None => {
                    if !raw.trim().is_empty() {
                        debug!("skipping unrecognized line: {}", raw.trim());
                    }
                }
            }
        }
    }

    /// Parse one source from a reader into the working set
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let text = io::read_to_string(reader)?;
        self.parse_text(&text);
        Ok(())
    }

    /// Parse one source file into the working set
    pub fn parse_path(&mut self, path: &Path) -> Result<()> {
        info!("parsing GEDCOM source: {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Run the linking pass and freeze the working set into a [`Dataset`]
    #[must_use]
    pub fn finish(mut self) -> Dataset {
        self.link();
        info!(
            "linked {} persons and {} families",
            self.persons.len(),
            self.families.len()
        );
        Dataset::new(self.persons, self.families)
    }

    fn apply_line(&mut self, cursor: &mut Cursor, line: &GedcomLine) {
        match line.level {
            0 => self.open_record(cursor, line),
            1 => {
                cursor.current_tag = Some(line.tag.to_string());
                if let Some(id) = cursor.current_id.clone() {
                    if !cursor.skip_record {
                        self.apply_field(&id, line.tag, line.value);
                    }
                }
            }
            2 => {
                if cursor.skip_record {
                    return;
                }
                if let (Some(id), Some(parent_tag)) =
                    (cursor.current_id.clone(), cursor.current_tag.clone())
                {
                    self.apply_subfield(&id, &parent_tag, line.tag, line.value);
                }
            }
            _ => {}
        }
    }

    fn open_record(&mut self, cursor: &mut Cursor, line: &GedcomLine) {
        // Level-0 lines without a cross-reference id (HEAD, TRLR, ...) leave
        // the cursor untouched.
        let Some(id) = line.xref else { return };

        cursor.current_id = Some(id.to_string());
        cursor.current_tag = None;

        if self.persons.contains_key(id) || self.families.contains_key(id) {
            debug!("duplicate record id {id}, keeping the earlier definition");
            cursor.skip_record = true;
            return;
        }
        cursor.skip_record = false;

        match line.tag {
            "INDI" => {
                self.persons.insert(id.to_string(), Person::new(id));
            }
            "FAM" => {
                self.families.insert(id.to_string(), Family::new(id));
            }
            _ => {}
        }
    }

    fn apply_field(&mut self, id: &str, tag: &str, value: &str) {
        if let Some(person) = self.persons.get_mut(id) {
            match tag {
                "NAME" => name::apply_name(person, value),
                "SEX" => person.sex = Sex::from(value),
                // BIRT and DEAT carry their payload in level-2 DATE/PLAC lines
                "FAMS" => person.add_family_as_spouse(strip_xref(value).to_string()),
                "FAMC" => person.add_family_as_child(strip_xref(value).to_string()),
                _ => {}
            }
        } else if let Some(family) = self.families.get_mut(id) {
            match tag {
                "HUSB" => family.husband_id = Some(strip_xref(value).to_string()),
                "WIFE" => family.wife_id = Some(strip_xref(value).to_string()),
                "CHIL" => family.add_child(strip_xref(value).to_string()),
                "DIV" => family.divorce_date = Some(value.to_string()),
                // MARR carries its payload in level-2 DATE/PLAC lines
                _ => {}
            }
        }
    }

    fn apply_subfield(&mut self, id: &str, parent_tag: &str, tag: &str, value: &str) {
        if let Some(person) = self.persons.get_mut(id) {
            match (parent_tag, tag) {
                ("NAME", "GIVN") => person.given_name = Some(value.to_string()),
                ("NAME", "SURN") => person.surname = Some(value.to_string()),
                ("BIRT", "DATE") => person.birth_date = Some(value.to_string()),
                ("BIRT", "PLAC") => person.birth_place = Some(value.to_string()),
                ("DEAT", "DATE") => person.death_date = Some(value.to_string()),
                ("DEAT", "PLAC") => person.death_place = Some(value.to_string()),
                _ => {}
            }
        } else if let Some(family) = self.families.get_mut(id) {
            match (parent_tag, tag) {
                ("MARR", "DATE") => family.marriage_date = Some(value.to_string()),
                ("MARR", "PLAC") => family.marriage_place = Some(value.to_string()),
                _ => {}
            }
        }
    }

    /// Resolve every cross-reference into the derived relationship lists.
    ///
    /// Runs exactly once, after all sources are parsed. Ids that resolve to
    /// no record are dropped silently; every derived list is deduplicated in
    /// first-encountered order and never contains the person themselves,
    /// even when a record names its own id as a relative.
    fn link(&mut self) {
        // Child membership seen from both sides: the person's own FAMC list
        // extended with any family whose CHIL list records them. A child a
        // family records one-sidedly still gets its siblings this way.
        let mut child_memberships: FxHashMap<String, Vec<String>> = self
            .persons
            .iter()
            .map(|(id, person)| (id.clone(), person.child_family_ids.clone()))
            .collect();
        for family in self.families.values() {
            for cid in &family.child_ids {
                if let Some(family_ids) = child_memberships.get_mut(cid) {
                    if !family_ids.contains(&family.id) {
                        family_ids.push(family.id.clone());
                    }
                }
            }
        }

        let mut derived: FxHashMap<String, DerivedLinks> = FxHashMap::default();

        for (id, person) in &self.persons {
            let mut links = DerivedLinks::default();

            // Parents: the resolved spouses of every family this person is a
            // child in.
            for family in person
                .child_family_ids
                .iter()
                .filter_map(|fid| self.families.get(fid))
            {
                for parent_id in family.husband_id.iter().chain(family.wife_id.iter()) {
                    if parent_id != id
                        && self.persons.contains_key(parent_id)
                        && !links.parents.contains(parent_id)
                    {
                        links.parents.push(parent_id.clone());
                    }
                }
            }

            // Spouses: the opposite recorded spouse in every family this
            // person heads.
            for family in person
                .spouse_family_ids
                .iter()
                .filter_map(|fid| self.families.get(fid))
            {
                if let Some(spouse_id) = family.spouse_of(id) {
                    if spouse_id != id.as_str()
                        && self.persons.contains_key(spouse_id)
                        && !links.spouses.iter().any(|s| s == spouse_id)
                    {
                        links.spouses.push(spouse_id.to_string());
                    }
                }
            }

            // Siblings: every other resolved child across the families this
            // person belongs to as a child, from either side. Symmetric by
            // construction, since membership itself is symmetric.
            links.siblings = child_memberships
                .get(id.as_str())
                .into_iter()
                .flatten()
                .filter_map(|fid| self.families.get(fid))
                .flat_map(|family| family.child_ids.iter())
                .filter(|cid| cid.as_str() != id && self.persons.contains_key(cid.as_str()))
                .unique()
                .cloned()
                .collect();

            // Children: every resolved child of every family this person
            // heads.
            links.children = person
                .spouse_family_ids
                .iter()
                .filter_map(|fid| self.families.get(fid))
                .flat_map(|family| family.child_ids.iter())
                .filter(|cid| cid.as_str() != id && self.persons.contains_key(cid.as_str()))
                .unique()
                .cloned()
                .collect();

            derived.insert(id.clone(), links);
        }

        for (id, links) in derived {
            if let Some(person) = self.persons.get_mut(&id) {
                person.parents = links.parents.into_vec();
                person.children = links.children;
                person.spouses = links.spouses.into_vec();
                person.siblings = links.siblings;
            }
        }
    }
}

/// Derived relationship lists for one person, accumulated before being
/// written back into the working table
#[derive(Debug, Default)]
struct DerivedLinks {
    parents: SmallVec<[String; 2]>,
    children: Vec<String>,
    spouses: SmallVec<[String; 2]>,
    siblings: Vec<String>,
}
