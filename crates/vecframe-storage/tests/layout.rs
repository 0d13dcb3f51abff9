use pretty_assertions::assert_eq;
use std::sync::Arc;
use vecframe_storage::{RawAccess, Storage, StorageError, StorageOptions, TypeCode};

fn storage(chunk_size_rows: usize) -> Storage {
    Storage::new(StorageOptions {
        chunk_size_rows,
        max_rows: None,
    })
}

#[test]
fn allocate_partitions_cover_every_row() {
    let col = storage(4).allocate(10, TypeCode::Num).unwrap();
    assert_eq!(col.len(), 10);
    assert_eq!(col.type_code(), TypeCode::Num);
    assert_eq!(col.chunk_starts(), vec![0, 4, 8]);

    let ranges: Vec<_> = col.chunks().iter().map(|c| c.range()).collect();
    assert_eq!(ranges, vec![0..4, 4..8, 8..10]);

    for row in 0..10 {
        assert_eq!(col.at(row), 0.0);
        assert!(!col.is_na(row));
    }
}

#[test]
fn empty_column_has_one_empty_chunk() {
    let col = storage(4).allocate(0, TypeCode::Cat).unwrap();
    assert!(col.is_empty());
    assert_eq!(col.n_chunks(), 1);
    assert!(col.chunk_for_row(0).is_none());
}

#[test]
fn unsupported_types_are_rejected() {
    let err = storage(4).allocate(3, TypeCode::Uuid).unwrap_err();
    assert!(matches!(err, StorageError::UnsupportedType(TypeCode::Uuid)));
}

#[test]
fn allocation_limit_is_enforced() {
    let storage = Storage::new(StorageOptions {
        chunk_size_rows: 4,
        max_rows: Some(8),
    });
    assert!(storage.allocate(8, TypeCode::Num).is_ok());
    let err = storage.allocate(9, TypeCode::Num).unwrap_err();
    assert!(matches!(err, StorageError::AllocationFailed { len: 9, .. }));
}

#[test]
fn chunk_lookup_by_row() {
    let col = storage(4)
        .allocate_with_chunk_sizes(TypeCode::Num, &[3, 0, 5, 2])
        .unwrap();
    assert_eq!(col.chunk_starts(), vec![0, 3, 8]);
    assert_eq!(col.chunk_for_row(2).unwrap().start(), 0);
    assert_eq!(col.chunk_for_row(3).unwrap().start(), 3);
    assert_eq!(col.chunk_for_row(9).unwrap().start(), 8);
    assert!(col.chunk_for_row(10).is_none());

    let overlapping: Vec<_> = col.chunks_in_range(2..4).iter().map(|c| c.start()).collect();
    assert_eq!(overlapping, vec![0, 3]);
}

#[test]
fn global_and_local_writes_agree() {
    let col = storage(4).allocate(6, TypeCode::Num).unwrap();
    col.set(5, 1.5);
    let chunk = col.chunk(1).unwrap();
    assert_eq!(chunk.at(1), 1.5);

    chunk.set_na(0);
    assert!(col.is_na(4));
    assert_eq!(col.missing_count(), 1);
}

#[test]
fn align_matches_master_boundaries_and_keeps_values() {
    let store = storage(4);
    let master = store
        .allocate_with_chunk_sizes(TypeCode::Num, &[2, 5, 3])
        .unwrap();
    let col = store.allocate(10, TypeCode::Cat).unwrap();
    for row in 0..10 {
        col.set_long(row, row as i64 * 10);
    }
    col.set_na(6);

    col.align(&master).unwrap();
    assert_eq!(col.chunk_starts(), master.chunk_starts());
    assert_eq!(col.len(), master.len());

    for row in 0..10 {
        if row == 6 {
            assert!(col.is_na(row));
        } else {
            assert_eq!(col.at_long(row), Some(row as i64 * 10));
        }
    }
}

#[test]
fn align_rejects_length_mismatch() {
    let store = storage(4);
    let master = store.allocate(5, TypeCode::Num).unwrap();
    let col = store.allocate(6, TypeCode::Num).unwrap();
    let err = col.align(&master).unwrap_err();
    assert!(matches!(
        err,
        StorageError::LengthMismatch {
            expected: 5,
            actual: 6
        }
    ));
}

#[test]
fn domain_is_replaced_not_merged() {
    let col = storage(4).allocate(3, TypeCode::Cat).unwrap();
    assert_eq!(col.domain(), None);

    let first: Arc<[Arc<str>]> = vec![Arc::from("a"), Arc::from("b")].into();
    col.set_domain(Some(first));
    assert_eq!(col.cardinality(), Some(2));

    let second: Arc<[Arc<str>]> = vec![Arc::from("x")].into();
    col.set_domain(Some(second.clone()));
    assert_eq!(col.domain(), Some(second));
}

#[test]
fn clones_share_cells() {
    let col = storage(4).allocate(3, TypeCode::Str).unwrap();
    let other = col.clone();
    other.set_str(2, Arc::from("hi"));
    assert!(col.same_column(&other));
    assert_eq!(col.at_str(2).as_deref(), Some("hi"));
}
