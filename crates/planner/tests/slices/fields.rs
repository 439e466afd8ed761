use super::helpers::*;
use planner::{PlanError, Planner, extract_fields};

#[test]
fn test_fields_of_main_from_distant_anchor() {
    let view = chain().build().unwrap();

    let slice = extract_fields(&view, "c", &["name", "region"]).unwrap().unwrap();

    assert_valid_slice(&slice);
    assert_eq!(aliases(&slice), vec!["c", "b", "a"]);
    assert_eq!(column(&slice, "name").source, reference(2, "name"));
    assert_eq!(column(&slice, "region").source, reference(2, "region"));
}

#[test]
fn test_empty_field_list_selects_all_columns() {
    let view = chain().build().unwrap();

    let slice = extract_fields(&view, "c", &[]).unwrap().unwrap();

    assert_eq!(
        slice.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["id", "name", "region"]
    );
}

#[test]
fn test_field_stored_on_anchor_is_a_shortcut() {
    let view = chain().build().unwrap();

    let shortcut = extract_fields(&view, "b", &["id"]).unwrap().unwrap();
    assert_eq!(aliases(&shortcut), vec!["b"]);
    assert_eq!(column(&shortcut, "id").source, reference(0, "a_id"));

    let joined = extract_fields(&view, "b", &["id", "name"]).unwrap().unwrap();
    assert_eq!(aliases(&joined), vec!["b", "a"]);
    assert_eq!(column(&joined, "id").source, reference(1, "id"));
}

#[test]
fn test_fields_of_arbitrary_target() {
    let view = chain().build().unwrap();

    let slice = Planner::default()
        .extract_fields_from(&view, "a", "c", &["id"])
        .unwrap()
        .unwrap();

    assert_valid_slice(&slice);
    assert_eq!(aliases(&slice), vec!["a", "b", "c"]);
    assert_eq!(column(&slice, "id").source, reference(2, "id"));
}

#[test]
fn test_fields_of_anchor_itself() {
    let view = chain().build().unwrap();

    let slice = Planner::default()
        .extract_fields_from(&view, "b", "b", &["state"])
        .unwrap()
        .unwrap();

    assert_eq!(aliases(&slice), vec!["b"]);
    assert_eq!(column(&slice, "state").source, reference(0, "state"));
}

#[test]
fn test_repeated_field_is_projected_once() {
    let view = chain().build().unwrap();

    let slice = extract_fields(&view, "c", &["name", "id", "name"]).unwrap().unwrap();

    assert_valid_slice(&slice);
    assert_eq!(
        slice.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["name", "id"]
    );
}

#[test]
fn test_unknown_field_fails_whole_call() {
    let view = chain().build().unwrap();

    assert_eq!(
        extract_fields(&view, "c", &["name", "nope"]),
        Err(PlanError::UnknownField {
            alias: "a".to_string(),
            field: "nope".to_string(),
        })
    );
}

#[test]
fn test_unknown_field_reported_even_without_path() {
    let view = chain()
        .inner("orphan", table("orphan", &["id"], &["id"]))
        .build()
        .unwrap();

    assert!(matches!(
        extract_fields(&view, "orphan", &["nope"]),
        Err(PlanError::UnknownField { .. })
    ));
    assert_eq!(extract_fields(&view, "orphan", &["name"]), Ok(None));
}

#[test]
fn test_unknown_target() {
    let view = chain().build().unwrap();

    assert!(matches!(
        Planner::default().extract_fields_from(&view, "c", "zzz", &[]),
        Err(PlanError::InvalidArgument(_))
    ));
}
