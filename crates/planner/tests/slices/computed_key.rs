use super::helpers::*;
use model::{OutputSource, ViewBuilder, ViewSpec};
use planner::{PlanError, extract_keys_reverse};

/// Rows of `a` exposed under a constant `kind` discriminator, so several
/// such views can share one key space.
fn kinded_view() -> ViewSpec {
    chain()
        .literal("kind_a", "'a'")
        .computed("kind", "'a'", Some("kind_a"))
        .key(&["kind", "id"])
        .build()
        .unwrap()
}

#[test]
fn test_computed_columns_copied_and_references_routed() {
    let view = kinded_view();

    let slice = extract_keys_reverse(&view, "c").unwrap().unwrap();

    assert_valid_slice(&slice);
    assert_eq!(aliases(&slice), vec!["c", "b", "a"]);
    assert_eq!(
        slice.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["kind", "id"]
    );
    assert_eq!(column(&slice, "kind"), view.column("kind").unwrap());
    assert_eq!(column(&slice, "id").source, reference(2, "id"));
    assert_eq!(slice.literals, vec![model::Literal::new("kind_a", "'a'")]);
}

#[test]
fn test_computed_key_with_shortcut() {
    let slice = extract_keys_reverse(&kinded_view(), "b").unwrap().unwrap();

    assert_eq!(aliases(&slice), vec!["b"]);
    assert!(matches!(column(&slice, "kind").source, OutputSource::Computation { .. }));
    assert_eq!(column(&slice, "id").source, reference(0, "a_id"));
}

#[test]
fn test_fully_computed_key_still_requires_a_path() {
    let view = chain()
        .inner("orphan", table("orphan", &["id"], &["id"]))
        .computed("kind", "'a'", None)
        .key(&["kind"])
        .build()
        .unwrap();

    let slice = extract_keys_reverse(&view, "c").unwrap().unwrap();
    assert_eq!(aliases(&slice), vec!["c", "b", "a"]);
    assert_eq!(slice.columns.len(), 1);

    assert_eq!(extract_keys_reverse(&view, "orphan").unwrap(), None);
}

#[test]
fn test_key_column_of_non_main_source() {
    let view = chain()
        .column("b_id", "b", "id")
        .computed("kind", "'b'", None)
        .key(&["kind", "b_id"])
        .build()
        .unwrap();

    let slice = extract_keys_reverse(&view, "c").unwrap().unwrap();

    assert_eq!(aliases(&slice), vec!["c"]);
    assert_eq!(column(&slice, "b_id").source, reference(0, "b_id"));
}

#[test]
fn test_view_without_key_override() {
    let view = chain().build().unwrap();

    assert!(matches!(
        extract_keys_reverse(&view, "c"),
        Err(PlanError::InvalidArgument(_))
    ));
}

#[test]
fn test_empty_key_override() {
    let view = ViewBuilder::new("v")
        .main("a", table("a", &["id"], &["id"]))
        .key(&[])
        .build()
        .unwrap();

    assert!(matches!(
        extract_keys_reverse(&view, "a"),
        Err(PlanError::InvalidArgument(_))
    ));
}
