use pretty_assertions::assert_eq;
use std::sync::Arc;
use vecframe_udf::{
    Column, ColumnError, ColumnFactory, Domain, Enums, RawAccess, Storage, StorageOptions,
    TypeCode,
};

fn storage() -> Storage {
    Storage::new(StorageOptions {
        chunk_size_rows: 3,
        max_rows: None,
    })
}

fn labels(col: &vecframe_udf::EnumColumn) -> Vec<Option<String>> {
    col.labels()
        .unwrap()
        .into_iter()
        .map(|l| l.map(|s| s.to_string()))
        .collect()
}

#[test]
fn yes_no_from_list() {
    let factory = Enums::new(["NO", "YES"]).unwrap();
    let col = factory
        .materialize_from_list(&storage(), &[0, 1, 1, 0])
        .unwrap();
    assert_eq!(col.type_code(), TypeCode::Cat);
    assert_eq!(col.cardinality(), Some(2));
    assert_eq!(
        labels(&col),
        vec![
            Some("NO".to_string()),
            Some("YES".to_string()),
            Some("YES".to_string()),
            Some("NO".to_string()),
        ]
    );
}

#[test]
fn bound_factory_overwrites_recorded_domain() {
    let vec = storage().allocate(3, TypeCode::Cat).unwrap();
    let stale: Arc<[Arc<str>]> = vec![Arc::from("x"), Arc::from("y")].into();
    vec.set_domain(Some(stale));

    let col = Enums::new(["A", "B", "C"]).unwrap().wrap_column(vec).unwrap();
    col.set(0, Some(0));
    col.set(1, Some(1));
    col.set(2, Some(2));

    col.ensure_domain(&["A", "B", "C"]).unwrap();
    assert_eq!(
        labels(&col),
        vec![
            Some("A".to_string()),
            Some("B".to_string()),
            Some("C".to_string()),
        ]
    );
}

#[test]
fn rewrapping_reinterprets_the_column() {
    let col = Enums::new(["lo", "hi"])
        .unwrap()
        .materialize(&storage(), 2, |i| Some(i as i32))
        .unwrap();
    let vec = col.into_vec();

    let again = Enums::new(["off", "on"]).unwrap().wrap_column(vec).unwrap();
    assert_eq!(again.factor(1).unwrap().as_deref(), Some("on"));
}

#[test]
fn unbound_factory_defers_to_recorded_domain() {
    let vec = storage().allocate(2, TypeCode::Cat).unwrap();
    let recorded: Arc<[Arc<str>]> = vec![Arc::from("red"), Arc::from("blue")].into();
    vec.set_domain(Some(recorded.clone()));

    let factory = Enums::unbound();
    assert_eq!(factory.domain(), &Domain::Unbound);
    let col = factory.wrap_column(vec).unwrap();
    col.set(0, Some(1));

    assert_eq!(col.domain(), Some(recorded));
    assert_eq!(col.factor(0).unwrap().as_deref(), Some("blue"));
    assert_eq!(col.factor(1).unwrap().as_deref(), Some("red"));
}

#[test]
fn unbound_without_recorded_domain_cannot_decode() {
    let col = Enums::unbound()
        .materialize(&storage(), 2, |_| Some(0))
        .unwrap();
    assert_eq!(col.domain(), None);
    assert!(matches!(col.factor(0), Err(ColumnError::MissingDomain)));
    assert!(matches!(col.labels(), Err(ColumnError::MissingDomain)));
}

#[test]
fn out_of_range_codes_surface_on_decode() {
    let factory = Enums::new(["a", "b"]).unwrap();
    let col = factory
        .materialize_from_list(&storage(), &[0, 2, -1])
        .unwrap();

    assert_eq!(col.get(1), Some(2));
    assert!(matches!(
        col.factor(1),
        Err(ColumnError::CodeOutOfDomain {
            code: 2,
            cardinality: 2
        })
    ));
    assert!(matches!(
        col.factor(2),
        Err(ColumnError::CodeOutOfDomain { code: -1, .. })
    ));
    assert!(col.labels().is_err());
}

#[test]
fn missing_codes_decode_to_none() {
    let factory = Enums::new(["a"]).unwrap();
    let col = factory
        .materialize(&storage(), 4, |i| (i != 2).then_some(0))
        .unwrap();
    assert_eq!(col.factor(2).unwrap(), None);
    assert_eq!(
        labels(&col),
        vec![
            Some("a".to_string()),
            Some("a".to_string()),
            None,
            Some("a".to_string()),
        ]
    );
}

#[test]
fn ensure_domain_reports_mismatch() {
    let col = Enums::new(["a", "b"])
        .unwrap()
        .materialize_constant(&storage(), 0, 1)
        .unwrap();
    let err = col.ensure_domain(&["b", "a"]).unwrap_err();
    match err {
        ColumnError::DomainMismatch { expected, actual } => {
            assert_eq!(expected, vec!["b".to_string(), "a".to_string()]);
            assert_eq!(actual, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_labels_are_rejected() {
    assert!(matches!(
        Enums::new(["a", "b", "a"]),
        Err(ColumnError::DuplicateLabel(label)) if label == "a"
    ));
}

#[test]
fn bind_turns_unbound_into_bound() {
    let factory = Enums::unbound().bind(vec!["p".to_string(), "q".to_string()]).unwrap();
    assert!(factory.domain().is_bound());
    assert_eq!(factory.domain().labels().map(|l| l.len()), Some(2));
}

#[test]
fn aligned_copy_keeps_codes_and_installs_domain() {
    let store = storage();
    let source = Enums::new(["a", "b", "c"])
        .unwrap()
        .materialize(&store, 7, |i| Some((i % 3) as i32))
        .unwrap();

    let target = Enums::new(["x", "y", "z"]).unwrap();
    let copy = target.materialize_aligned(&store, &source).unwrap();
    assert_eq!(copy.values(), source.values());
    assert_eq!(copy.vec().chunk_starts(), source.vec().chunk_starts());
    copy.ensure_domain(&["x", "y", "z"]).unwrap();
    source.ensure_domain(&["a", "b", "c"]).unwrap();
}

#[test]
fn wide_raw_codes_do_not_wrap_into_the_domain() {
    let vec = storage().allocate(2, TypeCode::Cat).unwrap();
    vec.set_long(0, 1i64 << 32);
    vec.set_long(1, 1);

    let col = Enums::new(["A", "B"]).unwrap().wrap_column(vec).unwrap();
    assert!(matches!(
        col.factor(0),
        Err(ColumnError::CodeOutOfDomain {
            code,
            cardinality: 2
        }) if code == 1i64 << 32
    ));
    assert_eq!(col.factor(1).unwrap().as_deref(), Some("B"));
    assert!(matches!(
        col.labels(),
        Err(ColumnError::CodeOutOfDomain { .. })
    ));
    assert_eq!(col.get(0), None);
}
