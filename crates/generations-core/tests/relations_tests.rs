#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{database, PersonBuilder};
use generations_core::errors::GenealogyError;
use generations_core::queries::{split_persons, PersonRef};
use generations_core::model::PLACEHOLDER_ID;

fn ids(persons: &[PersonRef<'_>]) -> Vec<String> {
    persons.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_children_of_both_parents() {
    let db = database(vec![
        PersonBuilder::new("gauss").male(),
        PersonBuilder::new("frau-gauss").female(),
        PersonBuilder::new("sohn").mom("frau-gauss").dad("gauss"),
        PersonBuilder::new("tochter").mom("frau-gauss").dad("gauss"),
    ]);
    assert_eq!(ids(&db.get("gauss").unwrap().children()), vec!["sohn", "tochter"]);
    assert_eq!(
        ids(&db.get("frau-gauss").unwrap().children()),
        vec!["sohn", "tochter"]
    );
    assert!(db.get("sohn").unwrap().children().is_empty());
}

#[test]
fn test_children_parents() {
    let db = database(vec![
        PersonBuilder::new("gauss").male(),
        PersonBuilder::new("frau1").female(),
        PersonBuilder::new("frau2").female(),
        PersonBuilder::new("kind1").mom("frau1").dad("gauss"),
        PersonBuilder::new("kind2").mom("frau2").dad("gauss"),
        PersonBuilder::new("kind3").mom("frau1").dad("gauss"),
        PersonBuilder::new("kind4").dad("gauss"),
    ]);
    let gauss = db.get("gauss").unwrap();
    assert_eq!(
        ids(&gauss.children_parents().unwrap()),
        vec!["frau1", "frau2", PLACEHOLDER_ID]
    );
    assert_eq!(ids(&db.get("frau1").unwrap().children_parents().unwrap()), vec!["gauss"]);
}

#[test]
fn test_single_parent_has_placeholder_co_parent() {
    let db = database(vec![
        PersonBuilder::new("mama").female(),
        PersonBuilder::new("gauss").mom("mama"),
    ]);
    let parents = db.get("mama").unwrap().children_parents().unwrap();
    assert_eq!(parents.len(), 1);
    assert!(parents[0].is_placeholder());
}

#[test]
fn test_partners_from_partnership_only_one_way() {
    let db = database(vec![
        PersonBuilder::new("gauss").partner("frau-gauss"),
        PersonBuilder::new("frau-gauss"),
    ]);
    assert_eq!(ids(&db.get("gauss").unwrap().partners().unwrap()), vec!["frau-gauss"]);
    assert!(db.get("frau-gauss").unwrap().partners().unwrap().is_empty());
}

#[test]
fn test_partners_from_children_both_ways() {
    let db = database(vec![
        PersonBuilder::new("gauss").partner("frau-gauss"),
        PersonBuilder::new("frau-gauss"),
        PersonBuilder::new("sohn").mom("frau-gauss").dad("gauss"),
    ]);
    assert_eq!(ids(&db.get("gauss").unwrap().partners().unwrap()), vec!["frau-gauss"]);
    assert_eq!(ids(&db.get("frau-gauss").unwrap().partners().unwrap()), vec!["gauss"]);
}

#[test]
fn test_partners_merged_then_reversed() {
    let db = database(vec![
        PersonBuilder::new("gauss").partner("frau2").partner("frau3"),
        PersonBuilder::new("frau1"),
        PersonBuilder::new("frau2"),
        PersonBuilder::new("frau3"),
        PersonBuilder::new("kind1").mom("frau1").dad("gauss"),
        PersonBuilder::new("kind2").mom("frau2").dad("gauss"),
    ]);
    assert_eq!(
        ids(&db.get("gauss").unwrap().partners().unwrap()),
        vec!["frau3", "frau2", "frau1"]
    );
}

#[test]
fn test_unknown_partner_is_an_error() {
    let db = database(vec![PersonBuilder::new("gauss").partner("ghost")]);
    let err = db.get("gauss").unwrap().partners().unwrap_err();
    assert_eq!(
        err,
        GenealogyError::IdNotFound {
            id: "ghost".to_string()
        }
    );
}

#[test]
fn test_unknown_parent_is_an_error() {
    let db = database(vec![PersonBuilder::new("gauss").dad("ghost")]);
    let gauss = db.get("gauss").unwrap();
    assert!(gauss.mom().unwrap().is_placeholder());
    assert!(matches!(
        gauss.dad(),
        Err(GenealogyError::IdNotFound { .. })
    ));
}

#[test]
fn test_children_with_partner() {
    let db = database(vec![
        PersonBuilder::new("gauss"),
        PersonBuilder::new("frau1"),
        PersonBuilder::new("frau2"),
        PersonBuilder::new("kind1").mom("frau1").dad("gauss"),
        PersonBuilder::new("kind2").mom("frau2").dad("gauss"),
        PersonBuilder::new("kind3").dad("gauss"),
    ]);
    let gauss = db.get("gauss").unwrap();
    let frau2 = db.get("frau2").unwrap();
    assert_eq!(ids(&gauss.children_with(&frau2).unwrap()), vec!["kind2"]);
    assert_eq!(
        ids(&gauss.children_with(&db.placeholder()).unwrap()),
        vec!["kind3"]
    );
}

#[test]
fn test_split_persons() {
    let db = database(vec![
        PersonBuilder::new("a"),
        PersonBuilder::new("b"),
        PersonBuilder::new("c"),
    ]);
    let all: Vec<_> = db.iter().collect();
    let (older, younger) = split_persons(&all, &db.get("b").unwrap());
    assert_eq!(ids(&older), vec!["a"]);
    assert_eq!(ids(&younger), vec!["c"]);

    let (older, younger) = split_persons(&all[..2], &db.get("c").unwrap());
    assert_eq!(ids(&older), vec!["a", "b"]);
    assert!(younger.is_empty());
}
