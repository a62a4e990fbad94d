#![no_main]

use arena_trie::{visitor::WellFormedChecker, InsertError, TrieMap, MAX_VALUE};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use std::collections::BTreeMap;

#[derive(Arbitrary, Debug)]
enum Action {
    Clear,
    ContainsKey(Box<[u8]>),
    GetKey(Box<[u8]>),
    CheckLen,
    CheckIter,
    CheckWellFormed,
    Tombstone(Box<[u8]>),
    Insert(Box<[u8]>),
    InsertValue(Box<[u8]>, usize),
    Extend(Vec<Box<[u8]>>),
}

libfuzzer_sys::fuzz_target!(|actions: Vec<Action>| {
    let mut map = TrieMap::new();
    let mut model = BTreeMap::<Box<[u8]>, usize>::new();
    let mut next_value = 1;

    for action in actions {
        match action {
            Action::Clear => {
                map.clear();
                model.clear();
            },
            Action::ContainsKey(key) => {
                assert_eq!(map.contains_key(key.as_ref()), model.contains_key(&key));
            },
            Action::GetKey(key) => {
                assert_eq!(map.get(key.as_ref()), model.get(&key).copied());
            },
            Action::CheckLen => {
                assert_eq!(map.len(), model.len());
                assert_eq!(map.is_empty(), model.is_empty());
            },
            Action::CheckIter => {
                assert!(map.iter().eq(model
                    .iter()
                    .map(|(key, value)| (key.to_vec(), *value))));
                assert_eq!(map.keys().len(), model.len());
            },
            Action::CheckWellFormed => {
                assert_eq!(WellFormedChecker::check(&map), Ok(model.len()));
            },
            Action::Tombstone(key) => {
                assert_eq!(map.tombstone(key.as_ref()), model.remove(&key));
            },
            Action::Insert(key) => {
                let value = next_value;
                next_value += 1;

                insert_both(&mut map, &mut model, key, value);
            },
            Action::InsertValue(key, value) => {
                insert_both(&mut map, &mut model, key, value);
            },
            Action::Extend(new_keys) => {
                for key in new_keys {
                    let value = next_value;
                    next_value += 1;

                    insert_both(&mut map, &mut model, key, value);
                }
            },
        }
    }

    assert_eq!(WellFormedChecker::check(&map), Ok(model.len()));
});

fn insert_both(
    map: &mut TrieMap,
    model: &mut BTreeMap<Box<[u8]>, usize>,
    key: Box<[u8]>,
    value: usize,
) {
    let before = map.stats();
    match map.try_insert(key.as_ref(), value) {
        Ok(previous) => {
            assert_eq!(previous, model.insert(key, value));
        },
        Err(InsertError::InvalidValue { value: rejected }) => {
            assert_eq!(rejected, value);
            assert!(value == 0 || value > MAX_VALUE);
            assert_eq!(map.stats(), before);
        },
        Err(InsertError::InteriorNul { position }) => {
            assert_eq!(key[position], 0);
            assert_eq!(map.stats(), before);
        },
        Err(err @ InsertError::Alloc(_)) => panic!("{err}"),
    }
}
