use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Alphabet used by the generated tries; keys may also contain '!' to
/// exercise rejection.
const ALPHABET: &str = "abc";

fn charset() -> CharacterSet {
    CharacterSet::new(ALPHABET).unwrap()
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A tiny alphabet forces shared prefixes, suffixes and overwrites.
    "[abc!]{0,6}"
}

fn kind_strategy() -> impl Strategy<Value = TrieKind> {
    prop_oneof![Just(TrieKind::Prefix), Just(TrieKind::Suffix)]
}

fn pairs_strategy() -> impl Strategy<Value = Vec<(String, u32)>> {
    prop::collection::vec((key_strategy(), 0u32..50), 0..=200)
}

/// Build a trie and the equivalent model, checking `put` and the rejection
/// counter along the way.
fn build(kind: TrieKind, pairs: &[(String, u32)]) -> (Trie<u32>, BTreeMap<String, u32>, u64) {
    let mut builder = TrieBuilder::with_charset(kind, charset());
    let mut model = BTreeMap::new();
    let mut rejected = 0u64;

    for (key, value) in pairs {
        let supported = key.chars().all(|c| ALPHABET.contains(c));
        assert_eq!(builder.put(key, *value).unwrap(), supported);
        if supported {
            model.insert(key.clone(), *value);
        } else {
            rejected += 1;
        }
        assert_eq!(builder.failed_count(), rejected);
        assert_eq!(builder.len(), model.len());
    }

    (builder.finalize().unwrap(), model, rejected)
}

fn matches(kind: TrieKind, key: &str, fragment: &str) -> bool {
    match kind {
        TrieKind::Prefix => key.starts_with(fragment),
        TrieKind::Suffix => key.ends_with(fragment),
    }
}

/// Validate structural invariants of a sealed trie.
fn validate_trie<V: std::fmt::Debug>(t: &Trie<V>) {
    let mut stack = vec![t.root()];
    let mut terminals = 0usize;
    let mut nodes = 0usize;

    while let Some(node) = stack.pop() {
        nodes += 1;
        if node.is_terminal() {
            terminals += 1;
            assert!(node.value().is_some(), "terminal node must carry a value");
        }
        for child in node.children() {
            assert_eq!(child.level(), node.level() + 1, "child level must be parent + 1");
            assert_eq!(child.parent(), Some(node));
            stack.push(child);
        }

        let expected = node.ancestors().count();
        assert_eq!(expected, node.level(), "one ancestor per level");

        // The memoized list equals a fresh pre-order walk of the subtree.
        let mut fresh = Vec::new();
        let mut walk = vec![node];
        while let Some(n) = walk.pop() {
            if n.is_terminal() {
                fresh.push(n);
            }
            let children: Vec<_> = n.children().collect();
            walk.extend(children.into_iter().rev());
        }
        let memo: Vec<_> = node.terminal_descendants().collect();
        assert_eq!(memo, fresh, "memoized terminals must be the pre-order walk");
    }

    assert_eq!(terminals, t.len(), "terminal count must match Trie::len");
    assert_eq!(nodes, t.node_count(), "every node reachable from the root");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(kind in kind_strategy(), pairs in pairs_strategy()) {
        let (trie, model, rejected) = build(kind, &pairs);

        prop_assert_eq!(trie.len(), model.len());
        prop_assert_eq!(rejected as usize, pairs.iter().filter(|(k, _)| k.contains('!')).count());
        for (key, value) in &model {
            prop_assert_eq!(trie.get(key), Some(value));
            let node = trie.node(key).unwrap();
            prop_assert_eq!(node.key(), key.clone());
        }
        for (key, _) in &pairs {
            if !model.contains_key(key) {
                prop_assert_eq!(trie.get(key), None);
            }
        }

        let mut entries: Vec<(String, u32)> = trie
            .entries()
            .into_iter()
            .map(|e| (e.key().to_string(), *e.value()))
            .collect();
        entries.sort();
        let expected: Vec<(String, u32)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);

        validate_trie(&trie);
    }

    #[test]
    fn prop_with_matches_model(
        kind in kind_strategy(),
        pairs in pairs_strategy(),
        fragment in "[abc]{0,3}",
    ) {
        let (trie, model, _) = build(kind, &pairs);

        let mut found: Vec<String> = trie.with(&fragment).into_iter().map(Entry::into_key).collect();
        found.sort();
        let expected: Vec<String> = model
            .keys()
            .filter(|k| matches(kind, k, &fragment))
            .cloned()
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_best_n_is_sorted_prefix_of_ranking(
        kind in kind_strategy(),
        pairs in pairs_strategy(),
        fragment in "[abc]{0,2}",
        n in 1usize..8,
    ) {
        let (trie, model, _) = build(kind, &pairs);

        let best = trie.best_nodes_with(&fragment, n).unwrap();
        let in_scope: Vec<u32> = model
            .iter()
            .filter(|(k, _)| matches(kind, k, &fragment))
            .map(|(_, v)| *v)
            .collect();
        prop_assert_eq!(best.len(), n.min(in_scope.len()));

        let values: Vec<u32> = best.iter().map(|node| *node.value().unwrap()).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", values);

        let mut ranking = in_scope;
        ranking.sort_unstable_by(|a, b| b.cmp(a));
        ranking.truncate(n);
        prop_assert_eq!(&values, &ranking);

        prop_assert_eq!(best.first().copied(), trie.best_node_with(&fragment));
        let single = trie.best_nodes_with(&fragment, 1).unwrap();
        prop_assert_eq!(single.first().copied(), best.first().copied());
    }

    #[test]
    fn prop_longest_common_part(
        kind in kind_strategy(),
        pairs in pairs_strategy(),
        word in "[abc!]{0,6}",
        length in 0usize..8,
    ) {
        let (trie, _, _) = build(kind, &pairs);
        let max = word.chars().count();

        match trie.longest_common_part(&word, length) {
            Ok(node) => {
                prop_assert!(length <= max);
                prop_assert!(node.level() <= length);
                let key = node.key();
                prop_assert!(matches(kind, &word, &key), "{:?} does not match {:?}", key, word);
                prop_assert_eq!(trie.node_len(&word, length).unwrap().is_some(), node.level() == length);
            }
            Err(err) => {
                prop_assert!(length > max);
                prop_assert_eq!(err, TrieError::LengthOutOfRange { length, max });
            }
        }
    }
}

#[test]
fn sealed_builder_after_many_keys() {
    let mut builder = TrieBuilder::with_charset(TrieKind::Prefix, charset());
    for i in 0..500u32 {
        let key: String = format!("{i:b}").replace('0', "a").replace('1', "b");
        builder.put(&key, i).unwrap();
    }
    let trie = builder.finalize().unwrap();
    validate_trie(&trie);
    assert_eq!(builder.put("abc", 1), Err(TrieError::Sealed));
}
