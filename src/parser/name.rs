//! GEDCOM `NAME` value handling
//!
//! A `NAME` value of the form `Given /Surname/` splits into trimmed given
//! name and surname; a value without surname delimiters becomes the full
//! display name unmodified.
//!
//! Name preference policy (fixed, no locale configuration): a name is
//! "foreign" if it contains any non-ASCII character. An already-stored ASCII
//! given name is never overwritten by a later foreign name, and a later
//! ASCII name replaces a stored foreign name wholesale, clearing given name,
//! surname and full name together before applying the new value.

use crate::models::Person;

/// Apply a `NAME` value to a person under the name preference policy
pub(crate) fn apply_name(person: &mut Person, value: &str) {
    let foreign = !value.is_ascii();

    // An ASCII given name already in place wins over a later foreign name.
    if foreign && person.given_name.as_deref().is_some_and(str::is_ascii) {
        return;
    }

    // A later ASCII name displaces a stored foreign name wholesale.
    if !foreign
        && person
            .given_name
            .as_deref()
            .is_some_and(|given| !given.is_ascii())
    {
        person.given_name = None;
        person.surname = None;
        person.full_name = None;
    }

    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() >= 2 {
        let given = parts[0].trim();
        let surname = parts[1].trim();
        person.given_name = Some(given.to_string());
        person.surname = Some(surname.to_string());
        person.full_name = Some(join_name(given, surname));
    } else {
        person.full_name = Some(value.trim().to_string());
    }
}

fn join_name(given: &str, surname: &str) -> String {
    match (given.is_empty(), surname.is_empty()) {
        (false, false) => format!("{given} {surname}"),
        (false, true) => given.to_string(),
        (true, _) => surname.to_string(),
    }
}
