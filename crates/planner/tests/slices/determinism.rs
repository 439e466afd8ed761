use super::helpers::*;
use model::ViewSpec;
use planner::{Planner, fingerprint, generate_key_path};
use std::{sync::Arc, thread};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_identical_inputs_give_equal_slices() {
    let view = chain().build().unwrap();

    let first = generate_key_path(&view, "c").unwrap().unwrap();
    let second = generate_key_path(&view, "c").unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(fingerprint(&first).unwrap(), fingerprint(&second).unwrap());
}

#[test]
fn test_fingerprint_distinguishes_slices() {
    let view = chain().build().unwrap();

    let from_b = generate_key_path(&view, "b").unwrap().unwrap();
    let from_c = generate_key_path(&view, "c").unwrap().unwrap();

    assert_ne!(fingerprint(&from_b).unwrap(), fingerprint(&from_c).unwrap());
    assert_eq!(fingerprint(&from_c).unwrap().len(), 32);
}

#[test]
fn test_concurrent_planning_on_shared_view() {
    assert_send_sync::<ViewSpec>();
    assert_send_sync::<Planner>();

    let view = Arc::new(chain().build().unwrap());
    let planner = Arc::new(Planner::default());
    let expected = planner.generate_key_path(&view, "c").unwrap();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let view = Arc::clone(&view);
                let planner = Arc::clone(&planner);
                scope.spawn(move || planner.generate_key_path(&view, "c").unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|r| *r == expected));
}
