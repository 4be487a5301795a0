//! Integration tests for the shared name contract across both backings

use nametree::contract::ContractKind;
use nametree::name::{ArrayName, Name, StringName};

fn owned(components: &[&str]) -> Vec<String> {
    components.iter().map(|c| c.to_string()).collect()
}

/// Test that both backings agree on canonical content, equality, and hashing
#[test]
fn test_backings_agree_on_canonical_content() {
    let packed = StringName::new("oss.cs.fau.de").unwrap();
    let listed = ArrayName::new(owned(&["oss", "cs", "fau", "de"])).unwrap();

    assert_eq!(packed.component_count(), listed.component_count());
    assert_eq!(packed.as_data_string(), listed.as_data_string());
    assert!(packed.is_equal(&listed).unwrap());
    assert!(listed.is_equal(&packed).unwrap());
    assert_eq!(packed.hash_code(), listed.hash_code());
    assert_eq!(packed.canonical_digest(), listed.canonical_digest());
}

/// Test that a chain of mutations keeps every intermediate name valid
#[test]
fn test_mutation_chain_stays_well_formed() {
    let name = StringName::new("oss.fau").unwrap();

    let name = name.insert(1, "cs").unwrap();
    assert_eq!(name.as_string(), "oss.cs.fau");

    let name = name.append("de").unwrap();
    assert_eq!(name.as_string(), "oss.cs.fau.de");

    let name = name.with_component(0, "www").unwrap();
    assert_eq!(name.as_string(), "www.cs.fau.de");

    let name = name.remove(2).unwrap();
    assert_eq!(name.as_string(), "www.cs.de");
    assert_eq!(name.component_count(), 3);
}

/// Test that mutators return new values and never touch the receiver
#[test]
fn test_mutation_is_value_style_on_both_backings() {
    let packed = StringName::new("a.b").unwrap();
    let grown = packed.append("c").unwrap();
    assert_eq!(packed.component_count(), 2);
    assert_eq!(grown.component_count(), 3);

    let listed = ArrayName::new(owned(&["a", "b"])).unwrap();
    let shrunk = listed.remove(0).unwrap();
    assert_eq!(listed.component_count(), 2);
    assert_eq!(shrunk.component_count(), 1);
}

/// Test that components holding escaped delimiters survive the data round trip
#[test]
fn test_escaped_components_survive_the_data_round_trip() {
    let name = StringName::new(r"archive\.2024.rows").unwrap();
    assert_eq!(name.component_count(), 2);
    assert_eq!(name.component(0).unwrap(), r"archive\.2024");
    assert_eq!(name.as_string(), "archive.2024.rows");

    let reparsed = StringName::new(&name.as_data_string()).unwrap();
    assert!(name.is_equal(&reparsed).unwrap());

    let listed = ArrayName::parse(&name.as_data_string(), '.').unwrap();
    assert!(listed.is_equal(&name).unwrap());
}

/// Test that concat carries every component across backings
#[test]
fn test_concat_joins_across_backings() {
    let left = ArrayName::new(owned(&["oss", "cs"])).unwrap();
    let right = StringName::new(r"fau\.de").unwrap();

    let joined = left.concat(&right).unwrap();
    assert_eq!(joined.component_count(), 3);
    assert_eq!(joined.component(2).unwrap(), r"fau\.de");
    assert_eq!(joined.as_string(), "oss.cs.fau.de");
}

/// Test that comparing or joining names with different delimiters is a caller error
#[test]
fn test_delimiter_mismatch_is_a_precondition() {
    let dotted = StringName::new("a.b").unwrap();
    let slashed = StringName::with_delimiter("a/b", '/').unwrap();

    let err = dotted.is_equal(&slashed).unwrap_err();
    assert_eq!(err.kind, ContractKind::Precondition);

    let err = dotted.concat(&slashed).unwrap_err();
    assert_eq!(err.kind, ContractKind::Precondition);
}

/// Test that contract failures report the violated clause
#[test]
fn test_violations_name_the_violated_clause() {
    let name = ArrayName::new(owned(&["solo"])).unwrap();

    let err = name.component(1).unwrap_err();
    assert_eq!(err.kind, ContractKind::Precondition);
    assert!(err.to_string().starts_with("precondition violated"));

    let err = name.insert(3, "x").unwrap_err();
    assert_eq!(err.kind, ContractKind::Precondition);

    let err = name.append("not.escaped").unwrap_err();
    assert_eq!(err.kind, ContractKind::Precondition);
}
