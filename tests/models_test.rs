//! Tests for the record models and dataset lookups

use ged_reader::{GedcomReaderError, Person, parse};

#[test]
fn test_display_name_prefers_full_name() {
    let data = parse("0 @I1@ INDI\n1 NAME John /Smith/\n");
    assert_eq!(data.person("I1").unwrap().display_name(), "John Smith");
}

#[test]
fn test_display_name_falls_back_to_name_parts() {
    let data = parse("0 @I1@ INDI\n1 NAME placeholder\n2 GIVN Jon\n2 SURN Smythe\n");
    let mut person = data.person("I1").unwrap().clone();
    person.full_name = None;
    assert_eq!(person.display_name(), "Jon Smythe");

    person.surname = None;
    assert_eq!(person.display_name(), "Jon");
}

#[test]
fn test_display_name_for_unnamed_person() {
    let data = parse("0 @I1@ INDI\n1 SEX M\n");
    assert_eq!(data.person("I1").unwrap().display_name(), "Unknown (I1)");
}

#[test]
fn test_life_dates() {
    let data = parse(
        "0 @I1@ INDI\n1 BIRT\n2 DATE 1 JAN 1850\n1 DEAT\n2 DATE 2 FEB 1910\n\
         0 @I2@ INDI\n1 BIRT\n2 DATE 1850\n\
         0 @I3@ INDI\n1 DEAT\n2 DATE 1910\n\
         0 @I4@ INDI\n",
    );

    assert_eq!(
        data.person("I1").unwrap().life_dates(),
        "b. 1 JAN 1850 - d. 2 FEB 1910"
    );
    assert_eq!(data.person("I2").unwrap().life_dates(), "b. 1850");
    assert_eq!(data.person("I3").unwrap().life_dates(), "d. 1910");
    assert_eq!(data.person("I4").unwrap().life_dates(), "");
}

#[test]
fn test_marriage_info() {
    let data = parse(
        "0 @F1@ FAM\n1 MARR\n2 DATE 5 MAY 1875\n2 PLAC Leeds\n1 DIV 1890\n\
         0 @F2@ FAM\n1 MARR\n2 PLAC Leeds\n\
         0 @F3@ FAM\n",
    );

    assert_eq!(
        data.family("F1").unwrap().marriage_info(),
        "m. 5 MAY 1875 in Leeds - div. 1890"
    );
    assert_eq!(data.family("F2").unwrap().marriage_info(), "Leeds");
    assert_eq!(data.family("F3").unwrap().marriage_info(), "");
}

#[test]
fn test_family_resolving_accessors() {
    let data = parse(
        "0 @I1@ INDI\n0 @I2@ INDI\n0 @I3@ INDI\n\
         0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n1 CHIL @I3@\n",
    );
    let family = data.family("F1").unwrap();

    assert_eq!(family.husband(&data).unwrap().id, "I1");
    assert_eq!(family.wife(&data).unwrap().id, "I2");

    let parents = family.parents(&data);
    assert_eq!(parents.len(), 2);
    assert_eq!(parents[0].id, "I1");
    assert_eq!(parents[1].id, "I2");

    assert_eq!(family.spouse_of("I1"), Some("I2"));
    assert_eq!(family.spouse_of("I2"), Some("I1"));
    assert_eq!(family.spouse_of("I3"), None);
}

#[test]
fn test_require_person_strips_xref_delimiters() {
    let data = parse("0 @I1@ INDI\n1 NAME John /Smith/\n");

    assert_eq!(data.require_person("@I1@").unwrap().id, "I1");
    assert_eq!(data.require_person("I1").unwrap().id, "I1");
}

#[test]
fn test_require_person_reports_unknown_ids() {
    let data = parse("0 @I1@ INDI\n");

    match data.require_person("@I99@") {
        Err(GedcomReaderError::PersonNotFound(id)) => assert_eq!(id, "I99"),
        other => panic!("expected PersonNotFound, got {other:?}"),
    }
}

#[test]
fn test_person_serde_round_trip() {
    let data = parse(
        "0 @I1@ INDI\n1 NAME John /Smith/\n1 SEX M\n1 BIRT\n2 DATE 1850\n1 FAMS @F1@\n\
         0 @I2@ INDI\n1 FAMS @F1@\n\
         0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I2@\n",
    );
    let person = data.person("I1").unwrap();

    let json = serde_json::to_string(person).unwrap();
    let decoded: Person = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.id, person.id);
    assert_eq!(decoded.full_name, person.full_name);
    assert_eq!(decoded.sex, person.sex);
    assert_eq!(decoded.birth_date, person.birth_date);
    assert_eq!(decoded.spouse_family_ids, person.spouse_family_ids);
    assert_eq!(decoded.spouses, person.spouses);
}
