use super::helpers::*;
use model::{Literal, ViewBuilder};
use planner::{Planner, PlannerConfig, extract_fields, generate_key_path};

/// `chain()` with guards on every source:
/// `a.region = 'eu'`, `b.state = 'open'`, `c.id = 42`.
fn guarded_chain() -> model::ViewSpec {
    ViewBuilder::new("guarded")
        .literal("p0", "'eu'")
        .literal("p1", "'open'")
        .literal("p2", "42")
        .main("a", table("a", &["id", "name", "region"], &["id"]))
        .on_literal("a", "region", "p0")
        .inner("b", table("b", &["id", "a_id", "state"], &["id"]))
        .on("a", "id", "b", "a_id")
        .on_literal("b", "state", "p1")
        .inner("c", table("c", &["id", "b_id"], &["id"]))
        .on("b", "id", "c", "b_id")
        .on_literal("c", "id", "p2")
        .build()
        .unwrap()
}

fn literal_ids(slice: &model::ViewSpec) -> Vec<&str> {
    slice.literals.iter().map(|l| l.id.as_str()).collect()
}

#[test]
fn test_guards_of_surviving_sources_are_kept() {
    let slice = generate_key_path(&guarded_chain(), "c").unwrap().unwrap();

    assert_valid_slice(&slice);
    assert_eq!(aliases(&slice), vec!["c", "b", "a"]);
    assert_eq!(literal_ids(&slice), vec!["p2", "p1", "p0"]);

    // anchor: its own guard only
    assert_eq!(slice.sources[0].conditions.len(), 1);
    // intermediate hop keeps its filter after the join
    assert_eq!(slice.sources[1].conditions.len(), 2);
    assert!(slice.sources[1].conditions[0].is_join());
    assert_eq!(
        slice.sources[1].conditions[1].literals().next(),
        Some(&Literal::new("p1", "'open'"))
    );
    assert_eq!(slice.sources[1].conditions[1].references().next().unwrap().source, idx(1));
    // the MAIN table's filter moves with it to the last position
    assert_eq!(slice.sources[2].conditions.len(), 2);
    assert_eq!(slice.sources[2].conditions[1].references().next().unwrap().source, idx(2));
}

#[test]
fn test_guards_of_shortcut_sources_are_dropped() {
    let slice = generate_key_path(&guarded_chain(), "b").unwrap().unwrap();

    assert_valid_slice(&slice);
    assert_eq!(aliases(&slice), vec!["b"]);
    assert_eq!(literal_ids(&slice), vec!["p1"]);
    assert_eq!(slice.sources[0].conditions.len(), 1);
}

#[test]
fn test_guards_kept_when_shortcut_disabled() {
    let slice = Planner::new(PlannerConfig { shortcuts: false })
        .generate_key_path(&guarded_chain(), "b")
        .unwrap()
        .unwrap();

    assert_eq!(aliases(&slice), vec!["b", "a"]);
    assert_eq!(literal_ids(&slice), vec!["p1", "p0"]);
}

#[test]
fn test_literal_values_and_identities_unchanged() {
    let view = guarded_chain();
    let slice = generate_key_path(&view, "c").unwrap().unwrap();

    for literal in &slice.literals {
        assert_eq!(view.literal(&literal.id), Some(literal));
    }
}

#[test]
fn test_guard_declared_by_a_later_source() {
    // `b` declares the filter on `a`; it stays with `a`
    let view = ViewBuilder::new("v")
        .literal("k", "'gold'")
        .main("a", table("a", &["id", "tier"], &["id"]))
        .inner("b", table("b", &["id", "a_id"], &["id"]))
        .on("a", "id", "b", "a_id")
        .on_literal("a", "tier", "k")
        .inner("c", table("c", &["id", "b_id"], &["id"]))
        .on("b", "id", "c", "b_id")
        .build()
        .unwrap();

    let kept = generate_key_path(&view, "c").unwrap().unwrap();
    assert_valid_slice(&kept);
    assert_eq!(kept.sources[1].conditions.len(), 1);
    assert_eq!(kept.sources[2].conditions.len(), 2);
    assert_eq!(literal_ids(&kept), vec!["k"]);

    let dropped = generate_key_path(&view, "b").unwrap().unwrap();
    assert_eq!(aliases(&dropped), vec!["b"]);
    assert!(dropped.literals.is_empty());
}

#[test]
fn test_unused_literals_are_not_carried() {
    let view = ViewBuilder::new("v")
        .literal("unused", "'x'")
        .main("a", table("a", &["id"], &["id"]))
        .build()
        .unwrap();

    let slice = extract_fields(&view, "a", &[]).unwrap().unwrap();

    assert!(slice.literals.is_empty());
}

#[test]
fn test_shared_literal_listed_once() {
    let view = ViewBuilder::new("v")
        .literal("flag", "1")
        .main("a", table("a", &["id", "active"], &["id"]))
        .on_literal("a", "active", "flag")
        .inner("b", table("b", &["id", "a_ref", "active"], &["id"]))
        .on("a", "id", "b", "a_ref")
        .on_literal("b", "active", "flag")
        .build()
        .unwrap();

    let slice = Planner::new(PlannerConfig { shortcuts: false })
        .generate_key_path(&view, "b")
        .unwrap()
        .unwrap();

    assert_valid_slice(&slice);
    assert_eq!(literal_ids(&slice), vec!["flag"]);
    assert_eq!(slice.condition_count(), 3);
}
