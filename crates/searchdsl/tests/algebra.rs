//! End-to-end checks of the operator algebra against the wire documents.

use searchdsl::{BoolQuery, Exists, Prefix, Query, Range, Term, Terms};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

fn name(value: &str) -> Query {
    Term::new("name", value).unwrap().into()
}

fn name_doc(value: &str) -> Value {
    json!({"term": {"name": {"value": value}}})
}

fn must(clauses: Vec<Query>) -> Query {
    BoolQuery::new().with_must(clauses).into()
}

fn should(clauses: Vec<Query>) -> Query {
    BoolQuery::new().with_should(clauses).into()
}

/// One of each node kind, for checks that should hold across all of them.
fn samples() -> Vec<Query> {
    vec![
        Query::match_all(),
        Query::match_none(),
        name("Bob"),
        Terms::new("name", ["john", "dave"]).unwrap().into(),
        Range::new("size")
            .and_then(|r| r.gt(1))
            .and_then(|r| r.lte(10))
            .unwrap()
            .into(),
        Exists::new("description").unwrap().into(),
        Prefix::new("qualifiedName", "default/").unwrap().into(),
        BoolQuery::new().into(),
        must(vec![name("a"), name("b")]),
        should(vec![name("a"), name("b")]),
        BoolQuery::new()
            .with_must([name("a")])
            .with_should([name("b")])
            .with_must_not([name("c")])
            .with_filter([name("d")])
            .into(),
    ]
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn adding_two_terms_builds_a_must_group() {
    let q = name("Bob").add(&name("Dave"));
    assert_eq!(
        q.to_document(),
        json!({"bool": {"must": [name_doc("Bob"), name_doc("Dave")]}})
    );
}

#[test]
fn negating_a_term_builds_a_must_not_group() {
    assert_eq!(
        name("Bob").negate().to_document(),
        json!({"bool": {"must_not": [name_doc("Bob")]}})
    );
}

#[test]
fn negating_a_must_group_applies_de_morgan() {
    let q = must(vec![name("Fred"), name("Dave")]);
    assert_eq!(
        q.negate().to_document(),
        json!({"bool": {"should": [
            {"bool": {"must_not": [name_doc("Fred")]}},
            {"bool": {"must_not": [name_doc("Dave")]}}
        ]}})
    );
}

#[test]
fn negating_an_empty_group_matches_nothing() {
    let q: Query = BoolQuery::new().into();
    assert_eq!(q.negate(), Query::MatchNone);
    assert_eq!(q.negate().to_document(), json!({"match_none": {}}));
}

#[test]
fn negating_single_clause_groups_unwraps() {
    assert_eq!(
        must(vec![name("Fred")]).negate().to_document(),
        json!({"bool": {"must_not": [name_doc("Fred")]}})
    );
    assert_eq!(
        should(vec![name("Fred")]).negate().to_document(),
        json!({"bool": {"must_not": [name_doc("Fred")]}})
    );
}

// ============================================================================
// ADD
// ============================================================================

#[test]
fn add_flattens_chains() {
    let chained = name("A").add(&name("B")).add(&name("C"));
    let flat = must(vec![name("A"), name("B"), name("C")]);
    assert_eq!(chained.to_document(), flat.to_document());
}

#[test]
fn add_merges_all_buckets_of_two_groups() {
    let left = must(vec![name("Bob")]);
    let right = must(vec![name("Dave")]);
    assert_eq!(
        left.add(&right).to_document(),
        json!({"bool": {"must": [name_doc("Bob"), name_doc("Dave")]}})
    );

    let left: Query = BoolQuery::new()
        .with_must([name("a")])
        .with_should([name("b")])
        .into();
    let right: Query = BoolQuery::new()
        .with_must_not([name("c")])
        .with_filter([name("d")])
        .with_should([name("e")])
        .into();
    assert_eq!(
        left.add(&right).to_document(),
        json!({"bool": {
            "must": [name_doc("a")],
            "should": [name_doc("b"), name_doc("e")],
            "must_not": [name_doc("c")],
            "filter": [name_doc("d")]
        }})
    );
}

#[test]
fn add_with_leaf_on_either_side_appends_to_must() {
    let fred = must(vec![name("Fred")]);
    let expected = json!({"bool": {"must": [name_doc("Fred"), name_doc("Bob")]}});
    assert_eq!(name("Bob").add(&fred).to_document(), expected);
    assert_eq!(fred.add(&name("Bob")).to_document(), expected);
}

// ============================================================================
// AND
// ============================================================================

#[test]
fn and_on_leaves_matches_add() {
    assert_eq!(name("Bob").and(&name("Dave")), name("Bob").add(&name("Dave")));
}

#[test]
fn and_pins_minimum_when_optional_group_gains_a_mandatory_clause() {
    let q = should(vec![name("Dave")]).and(&name("Bob"));
    assert_eq!(
        q.to_document(),
        json!({"bool": {
            "must": [name_doc("Bob")],
            "should": [name_doc("Dave")],
            "minimum_should_match": 1
        }})
    );
}

#[test]
fn and_keeps_an_explicit_minimum() {
    let group: Query = BoolQuery::new()
        .with_should([name("a"), name("b"), name("c")])
        .with_minimum_should_match(2)
        .into();
    let q = group.and(&name("x"));
    assert_eq!(q.to_document()["bool"]["minimum_should_match"], json!(2));
}

#[test]
fn and_promotes_a_single_required_optional_clause() {
    let q = should(vec![name("Dave")]).and(&must(vec![name("Bob")]));
    assert_eq!(
        q.to_document(),
        json!({"bool": {"must": [name_doc("Bob"), name_doc("Dave")]}})
    );
}

#[test]
fn and_does_not_pin_minimum_when_mandatory_clauses_exist() {
    let group: Query = BoolQuery::new()
        .with_should([name("X")])
        .with_must([name("Y")])
        .into();
    let doc = group.and(&name("Z")).to_document();
    assert!(doc["bool"].get("minimum_should_match").is_none());
    assert_eq!(doc["bool"]["must"], json!([name_doc("Y"), name_doc("Z")]));
}

// ============================================================================
// OR
// ============================================================================

#[test]
fn or_wraps_a_non_optional_group() {
    let q = name("Bob").or(&must(vec![name("Fred")]));
    assert_eq!(
        q.to_document(),
        json!({"bool": {"should": [
            {"bool": {"must": [name_doc("Fred")]}},
            name_doc("Bob")
        ]}})
    );
}

#[test]
fn or_extends_optional_groups() {
    let q = should(vec![name("a")]).or(&name("b"));
    assert_eq!(
        q.to_document(),
        json!({"bool": {"should": [name_doc("a"), name_doc("b")]}})
    );
}

#[test]
fn or_does_not_merge_groups_with_explicit_minimum() {
    let pinned: Query = BoolQuery::new()
        .with_should([name("a"), name("b")])
        .with_minimum_should_match(2)
        .into();
    let q = pinned.or(&name("c"));
    assert_eq!(q, should(vec![pinned.clone(), name("c")]));
}

// ============================================================================
// Algebraic laws
// ============================================================================

#[test]
fn match_all_is_the_identity_of_and() {
    for x in samples() {
        assert_eq!(x.and(&Query::match_all()), x, "{x:?}");
        assert_eq!(Query::match_all().and(&x), x, "{x:?}");
    }
}

#[test]
fn match_none_is_the_identity_of_or() {
    for x in samples() {
        assert_eq!(x.or(&Query::match_none()), x, "{x:?}");
        assert_eq!(Query::match_none().or(&x), x, "{x:?}");
    }
}

#[test]
fn constants_absorb() {
    for x in samples() {
        assert_eq!(x.and(&Query::match_none()), Query::match_none(), "{x:?}");
        assert_eq!(x.or(&Query::match_all()), Query::match_all(), "{x:?}");
    }
}

#[test]
fn double_negation_of_leaves_is_identity() {
    for x in samples().into_iter().filter(Query::is_leaf) {
        assert_eq!(x.negate().negate(), x, "{x:?}");
    }
    assert_eq!(Query::match_all().negate().negate(), Query::match_all());
    assert_eq!(Query::match_none().negate().negate(), Query::match_none());
}

#[test]
fn derived_minimum_is_never_serialized() {
    let group: Query = BoolQuery::new()
        .with_should([name("X")])
        .with_must([name("Y")])
        .into();
    assert!(group.to_document()["bool"]
        .get("minimum_should_match")
        .is_none());
    assert!(should(vec![name("X")]).to_document()["bool"]
        .get("minimum_should_match")
        .is_none());
}

#[test]
fn operators_never_modify_their_operands() {
    let all = samples();
    for x in &all {
        for y in &all {
            let (x_before, y_before) = (x.clone(), y.clone());
            let _ = x.and(y);
            let _ = x.or(y);
            let _ = x.add(y);
            let _ = x.negate();
            assert_eq!(x, &x_before);
            assert_eq!(y, &y_before);
        }
    }
}

#[test]
fn results_do_not_alias_their_operands() {
    let group = should(vec![name("a")]);
    let combined = group.or(&name("b"));
    let Query::Bool(combined) = combined else {
        panic!("expected bool");
    };
    let Query::Bool(source) = &group else {
        unreachable!();
    };
    assert_eq!(source.should().len(), 1);
    assert_eq!(combined.should().len(), 2);
}
