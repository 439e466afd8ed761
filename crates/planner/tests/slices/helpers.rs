use model::{
    ColumnRef, JoinMode, OutputColumn, OutputSource, SourceIndex, TableSchema, ViewBuilder,
    ViewSpec,
};

pub fn table(name: &str, columns: &[&str], key: &[&str]) -> TableSchema {
    columns
        .iter()
        .fold(TableSchema::new(name), |schema, c| schema.with_column(c, "int"))
        .with_key(key)
}

pub fn idx(i: usize) -> SourceIndex {
    SourceIndex::new(i)
}

pub fn reference(source: usize, column: &str) -> OutputSource {
    OutputSource::Reference(ColumnRef::new(idx(source), column))
}

pub fn aliases(slice: &ViewSpec) -> Vec<&str> {
    slice.aliases().map(|a| a.as_str()).collect()
}

pub fn column<'a>(slice: &'a ViewSpec, name: &str) -> &'a OutputColumn {
    slice
        .column(name)
        .unwrap_or_else(|| panic!("slice has no output column `{name}`"))
}

/// Slice invariants every planner result must satisfy.
pub fn assert_valid_slice(slice: &ViewSpec) {
    assert!(!slice.sources.is_empty());

    for (pos, source) in slice.sources.iter().enumerate() {
        assert_eq!(source.index, idx(pos));
        let expected = if pos == 0 {
            JoinMode::Main
        } else {
            JoinMode::Inner
        };
        assert_eq!(source.mode, expected, "mode of `{}`", source.alias);

        for condition in &source.conditions {
            for r in condition.references() {
                assert!(
                    r.source <= source.index,
                    "condition of `{}` references later source {}",
                    source.alias,
                    r.source
                );
                assert!(slice.sources[r.source.get()].schema.has_column(&r.column));
            }
            for literal in condition.literals() {
                assert!(slice.literal(&literal.id).is_some());
            }
        }
    }

    let mut ids: Vec<&str> = slice.literals.iter().map(|l| l.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), slice.literals.len(), "duplicate literal identities");
}

/// `a` (MAIN) <- `b` <- `c`, every source keyed by `id`.
///
/// `a`: id, name, region
/// `b`: id, a_id, state
/// `c`: id, b_id
pub fn chain() -> ViewBuilder {
    ViewBuilder::new("chain")
        .main("a", table("a", &["id", "name", "region"], &["id"]))
        .inner("b", table("b", &["id", "a_id", "state"], &["id"]))
        .on("a", "id", "b", "a_id")
        .left("c", table("c", &["id", "b_id"], &["id"]))
        .on("b", "id", "c", "b_id")
        .column("id", "a", "id")
        .column("name", "a", "name")
}
