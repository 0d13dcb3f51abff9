#![cfg(not(target_arch = "wasm32"))]

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use vecframe_udf::{
    Column, ColumnFactory, Dates, Doubles, Enums, Integers, Storage, StorageOptions, Strings,
};

fn storage(chunk_size_rows: usize) -> Storage {
    Storage::new(StorageOptions {
        chunk_size_rows,
        max_rows: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn integer_function_reads_back(len in 0usize..300, chunk in 1usize..40, a in -50i32..50, b in -1000i32..1000) {
        let f = |i: usize| (i as i32).wrapping_mul(a).wrapping_add(b);
        let col = Integers.materialize(&storage(chunk), len, |i| Some(f(i))).unwrap();
        prop_assert_eq!(col.len(), len);
        for i in 0..len {
            prop_assert_eq!(col.get(i), Some(f(i)));
        }
    }

    #[test]
    fn double_list_reads_back(
        xs in proptest::collection::vec(proptest::option::of(-1e9f64..1e9), 0..200),
        chunk in 1usize..32,
    ) {
        let col = Doubles.materialize(&storage(chunk), xs.len(), |i| xs[i]).unwrap();
        prop_assert_eq!(col.values(), xs);
    }

    #[test]
    fn string_list_reads_back(
        xs in proptest::collection::vec("[a-z]{0,6}", 0..100),
        chunk in 1usize..16,
    ) {
        let col = Strings.materialize_from_list(&storage(chunk), &xs).unwrap();
        let read: Vec<String> = col.values().into_iter().flatten().collect();
        prop_assert_eq!(read, xs);
    }

    #[test]
    fn date_function_reads_back(
        len in 0usize..200,
        chunk in 1usize..24,
        base in -4_000_000_000_000i64..4_000_000_000_000,
        step in 1i64..86_400_000,
    ) {
        let at = |i: usize| DateTime::<Utc>::from_timestamp_millis(base + step * i as i64);
        let col = Dates.materialize(&storage(chunk), len, at).unwrap();
        prop_assert_eq!(col.len(), len);
        for i in 0..len {
            prop_assert_eq!(col.get(i), at(i));
        }
    }

    #[test]
    fn enum_codes_read_back_and_decode(
        codes in proptest::collection::vec(proptest::option::of(0i32..4), 0..150),
        chunk in 1usize..20,
    ) {
        let domain = ["north", "south", "east", "west"];
        let factory = Enums::new(domain).unwrap();
        let col = factory.materialize(&storage(chunk), codes.len(), |i| codes[i]).unwrap();
        prop_assert_eq!(col.values(), codes.clone());

        let labels = col.labels().unwrap();
        for (label, code) in labels.iter().zip(&codes) {
            prop_assert_eq!(label.as_deref(), code.map(|c| domain[c as usize]));
        }
    }
}
