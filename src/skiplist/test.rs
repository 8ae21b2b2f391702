// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

#[cfg(test)]
mod e2e_tests {
    use bytes::Bytes;
    use crossbeam_skiplist::SkipMap;
    use proptest::{
        collection::vec,
        proptest,
    };

    use crate::{
        config::Config,
        order::Less,
        skiplist::SkipList,
    };

    /// A string key that orders ignoring ASCII case and has no `Ord` of its
    /// own.
    #[derive(Debug, Clone)]
    struct Caseless(String);

    impl Less for Caseless {
        fn less(&self, other: &Self) -> bool {
            self.0.to_ascii_lowercase() < other.0.to_ascii_lowercase()
        }
    }

    fn seeded<K, V>(seed: u64) -> SkipList<K, V> {
        SkipList::with_config(Config::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_equality_follows_the_order() {
        let mut list = seeded(5);
        assert!(list.insert(Caseless("Key".into()), 1).is_none());
        assert_eq!(list.insert(Caseless("KEY".into()), 2), Some(1));
        assert_eq!(list.len(), 1);

        // the first spelling stays, the value is replaced
        let node = list.search_node(&Caseless("key".into())).unwrap();
        assert_eq!(node.key().0, "Key");
        assert_eq!(*node.value(), 2);

        let removed = list.delete_node(&Caseless("kEy".into())).unwrap();
        assert_eq!(removed.key().0, "Key");
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn test_bytes_keys() {
        let mut list = seeded(6);
        for i in 0..64u32 {
            let key = Bytes::from(format!("key-{:04}", i));
            list.insert(key, i);
        }
        assert_eq!(list.search(&Bytes::from_static(b"key-0042")), Some(&42));

        // lower bound with a borrowed prefix query instead of a full key
        let node = list
            .lower_bound_node_by(b"key-003".as_slice(), |k: &Bytes, q: &[u8]| &k[..] < q)
            .unwrap();
        assert_eq!(&node.key()[..], b"key-0030");
        list.check_invariants();
    }

    #[test]
    fn test_small_max_level() {
        let mut list = SkipList::with_config(
            Config::default()
                .with_max_level(1)
                .with_probability(0.9)
                .with_seed(9),
        )
        .unwrap();
        for i in (0..200u32).rev() {
            list.insert(i, ());
        }
        // every node is level 0 only, the list degrades to a linked list
        assert_eq!(list.level(), 1);
        assert!(std::iter::successors(list.first(), |n| n.next()).all(|n| n.height() == 1));
        assert_eq!(*list.lower_bound_node(&150).unwrap().key(), 150);
        list.check_invariants();
    }

    proptest! {
        #[test]
        fn test_matches_reference_map(
            inserts in vec((0u32..2048, 0u64..u64::MAX), 1..300),
            deletes in vec(0u32..2048, 0..300),
            seed in 0u64..u64::MAX,
        ) {
            let mut list: SkipList<u32, u64> = seeded(seed);
            let reference = SkipMap::new();

            for (k, v) in &inserts {
                list.insert(*k, *v);
                reference.insert(*k, *v);
            }
            list.check_invariants();

            for k in &deletes {
                let removed = list.delete_node(k).map(|e| *e.value());
                let expected = reference.remove(k).map(|e| *e.value());
                assert_eq!(removed, expected);
            }
            list.check_invariants();

            assert_eq!(list.len(), reference.len());
            for entry in reference.iter() {
                assert_eq!(list.search(entry.key()), Some(entry.value()));
            }
            for k in &deletes {
                assert!(!list.contains_key(k));
            }
            let keys: Vec<u32> = list.iter().map(|(k, _)| *k).collect();
            let expected: Vec<u32> = reference.iter().map(|e| *e.key()).collect();
            assert_eq!(keys, expected);
        }

        #[test]
        fn test_lower_bound_is_smallest_not_less(
            keys in vec(0u32..10_000, 0..200),
            queries in vec(0u32..10_500, 1..50),
        ) {
            let list: SkipList<u32, ()> = keys.iter().map(|k| (*k, ())).collect();
            let reference = SkipMap::new();
            for k in &keys {
                reference.insert(*k, ());
            }

            for query in &queries {
                let got = list.lower_bound_node(query).map(|n| *n.key());
                let expected = reference.lower_bound(std::ops::Bound::Included(query)).map(|e| *e.key());
                assert_eq!(got, expected);
            }
            // bind the entry so it drops before the map does
            let min = reference.front().map(|e| *e.key());
            if let Some(min) = min {
                assert_eq!(list.lower_bound_node(&min).map(|n| *n.key()), Some(min));
            }
        }

        #[test]
        fn test_delete_everything_resets(
            keys in vec(0u32..5_000, 1..200),
            backward in proptest::bool::ANY,
        ) {
            let mut list: SkipList<u32, u32> = keys.iter().map(|k| (*k, *k)).collect();
            loop {
                let next = if backward { list.last() } else { list.first() };
                let Some(key) = next.map(|n| *n.key()) else { break };
                let before = list.len();
                assert!(list.delete_node(&key).is_some());
                assert_eq!(list.len(), before - 1);
            }
            assert_eq!(list.len(), 0);
            assert!(list.first().is_none());
            assert_eq!(list.level(), 1);
            list.check_invariants();
        }
    }
}
