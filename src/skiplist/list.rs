// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::fmt;

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::{
        Config,
        MAX_LEVEL_LIMIT,
    },
    errs::Error,
    order::Less,
    skiplist::{
        iter::{
            Iter,
            Range,
        },
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        node::{
            Entry,
            Link,
            NodeArena,
            NodeId,
            NodeRef,
            Position,
            SkipNode,
        },
    },
};

/// An ordered map over unique keys backed by a skip list.
///
/// Every key sits on level 0; each node is additionally linked into a random
/// number of higher levels chosen by the list's [`LevelGenerator`]. Searches
/// start on the highest populated level and drop down whenever the next key
/// on the current level would overshoot, which gives expected `O(log n)`
/// lookups, insertions and removals.
///
/// The list is single-writer: mutation needs `&mut self`, so sharing it across
/// threads requires an outer lock.
pub struct SkipList<K, V, G = GeometricalLevelGenerator> {
    arena: NodeArena<K, V>,
    tail: Link,
    length: usize,
    /// Number of levels currently in use, always `>= 1`.
    level: usize,
    generator: G,
}

impl<K, V> SkipList<K, V> {
    /// Creates an empty list with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default()).expect("default config is valid")
    }

    pub fn with_config(config: Config) -> Result<Self, Error> {
        let generator = GeometricalLevelGenerator::from_config(&config)?;
        debug!(
            max_level = config.max_level(),
            probability = config.probability(),
            seeded = config.seed().is_some(),
            "creating skiplist"
        );
        Ok(Self::with_generator(generator))
    }
}

impl<K, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, G: LevelGenerator> SkipList<K, V, G> {
    /// Creates an empty list drawing node heights from `generator`. The header
    /// reaches `generator.total()` levels.
    ///
    /// The header height is clamped to `[1, MAX_LEVEL_LIMIT]`.
    pub fn with_generator(generator: G) -> Self {
        SkipList {
            arena: NodeArena::new(generator.total().clamp(1, MAX_LEVEL_LIMIT)),
            tail: None,
            length: 0,
            level: 1,
            generator,
        }
    }
}

impl<K, V, G> SkipList<K, V, G> {
    /// Number of entries in the list.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Height of the tallest node present, or 1 for an empty list.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.arena.max_level()
    }

    /// The node with the smallest key.
    pub fn first(&self) -> Option<NodeRef<'_, K, V>> {
        self.arena
            .forward(Position::Head, 0)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    /// The node with the largest key.
    pub fn last(&self) -> Option<NodeRef<'_, K, V>> {
        self.tail.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.arena.forward(Position::Head, 0), self.tail, self.length)
    }

    /// Removes every entry. The level generator is kept as-is.
    #[instrument(level = "debug", skip_all)]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.tail = None;
        self.length = 0;
        self.level = 1;
    }
}

impl<K: Less, V, G: LevelGenerator> SkipList<K, V, G> {
    /// Inserts `value` under `key`.
    ///
    /// If an equivalent key is already present its value is swapped in place
    /// and the old value is returned; the stored key is left untouched and the
    /// length does not change.
    #[instrument(level = "debug", skip_all)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = self.descend(&key);

        let candidate = self.arena.forward(update[0], 0);
        if let Some(id) = candidate {
            let node = self.arena.node_mut(id);
            if key.equivalent(&node.key) {
                return Some(node.replace_value(value));
            }
        }

        // a misbehaving generator must not be able to break the link arrays
        let height = self.generator.random().clamp(1, self.arena.max_level());
        if height > self.level {
            // newly exposed levels hang straight off the header
            for slot in update.iter_mut().take(height).skip(self.level) {
                *slot = Position::Head;
            }
            trace!(from = self.level, to = height, "raising list level");
            self.level = height;
        }

        let id = self.arena.allocate(SkipNode::new(key, value, height));
        for (level, &at) in update.iter().enumerate().take(height) {
            let succ = self.arena.forward(at, level);
            self.arena.node_mut(id).forward[level] = succ;
            self.arena.set_forward(at, level, Some(id));
        }

        self.arena.node_mut(id).backward = update[0].as_backward();
        match self.arena.node(id).forward[0] {
            | Some(succ) => self.arena.node_mut(succ).backward = Some(id),
            | None => self.tail = Some(id),
        }

        self.length += 1;
        None
    }

    /// Removes `key` and hands the unlinked entry back to the caller.
    #[instrument(level = "debug", skip_all)]
    pub fn delete_node(&mut self, key: &K) -> Option<Entry<K, V>> {
        let update = self.descend(key);

        let target = self.arena.forward(update[0], 0)?;
        if !key.equivalent(&self.arena.node(target).key) {
            return None;
        }

        for (level, &at) in update.iter().enumerate().take(self.level) {
            // once a level skips the target, every level above does too
            if self.arena.forward(at, level) != Some(target) {
                break;
            }
            let succ = self.arena.node(target).forward[level];
            self.arena.set_forward(at, level, succ);
        }

        let (succ, pred) = {
            let node = self.arena.node(target);
            (node.forward[0], node.backward)
        };
        match succ {
            | Some(succ) => self.arena.node_mut(succ).backward = pred,
            | None => self.tail = pred,
        }

        let old_level = self.level;
        while self.level > 1 && self.arena.forward(Position::Head, self.level - 1).is_none() {
            self.level -= 1;
        }
        if self.level != old_level {
            trace!(from = old_level, to = self.level, "shrinking list level");
        }

        self.length -= 1;
        Some(Entry::from(self.arena.release(target)))
    }
}

impl<K: Less, V, G> SkipList<K, V, G> {
    /// Walks from the top level down to level 0, recording on every level the
    /// last position whose key is still less than `key`. Levels at or above
    /// the current list level are left pointing at the header.
    fn descend(&self, key: &K) -> [Position; MAX_LEVEL_LIMIT] {
        let mut update = [Position::Head; MAX_LEVEL_LIMIT];
        let mut x = Position::Head;
        for level in (0..self.level).rev() {
            while let Some(next) = self.arena.forward(x, level) {
                if !self.arena.node(next).key.less(key) {
                    break;
                }
                x = Position::Node(next);
            }
            update[level] = x;
        }
        update
    }

    /// Same walk as [`SkipList::descend`] but only reports the first node not
    /// ordered before the query.
    fn seek<Q: ?Sized, F>(&self, key: &Q, less: F) -> Link
    where
        F: Fn(&K, &Q) -> bool,
    {
        let mut x = Position::Head;
        for level in (0..self.level).rev() {
            while let Some(next) = self.arena.forward(x, level) {
                if !less(&self.arena.node(next).key, key) {
                    break;
                }
                x = Position::Node(next);
            }
        }
        self.arena.forward(x, 0)
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        self.seek(key, K::less)
            .filter(|&id| key.equivalent(&self.arena.node(id).key))
    }

    /// Finds the node stored under `key`.
    #[instrument(level = "trace", skip_all)]
    pub fn search_node(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.find(key).map(|id| NodeRef::new(&self.arena, id))
    }

    /// Looks up the value stored under `key`.
    #[instrument(level = "trace", skip_all)]
    pub fn search(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.arena.node(id).value)
    }

    #[instrument(level = "trace", skip_all)]
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.arena.node_mut(id).value)
    }

    #[instrument(level = "trace", skip_all)]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// The first node whose key is not less than `key`, or `None` when every
    /// key in the list is smaller.
    #[instrument(level = "trace", skip_all)]
    pub fn lower_bound_node(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.seek(key, K::less)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    /// Like [`SkipList::lower_bound_node`], ordering with `less(node_key,
    /// query)` instead of the key's own order.
    ///
    /// `less` must agree with the order the list is sorted by: for any query,
    /// the keys it reports as less must form a prefix of the list. Nothing
    /// checks this, and an inconsistent predicate yields an arbitrary node.
    #[instrument(level = "trace", skip_all)]
    pub fn lower_bound_node_by<Q: ?Sized, F>(&self, key: &Q, less: F) -> Option<NodeRef<'_, K, V>>
    where
        F: Fn(&K, &Q) -> bool,
    {
        self.seek(key, less).map(|id| NodeRef::new(&self.arena, id))
    }

    /// Iterates in ascending order starting at the lower bound of `key`.
    #[instrument(level = "trace", skip_all)]
    pub fn range_from(&self, key: &K) -> Range<'_, K, V> {
        let start = self.seek(key, K::less);
        Range::new(&self.arena, start, self.tail)
    }
}

impl<K: Less, V, G: LevelGenerator> Extend<(K, V)> for SkipList<K, V, G> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Less, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipList<K, V, G> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, G> fmt::Debug for SkipList<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<K: Less + fmt::Debug, V, G> SkipList<K, V, G> {
    /// Walks every level and panics on the first broken structural invariant.
    pub(crate) fn check_invariants(&self) {
        let arena = &self.arena;
        assert!(self.level >= 1 && self.level <= arena.max_level());

        // level 0: ascending, backward links, tail, length
        let mut count = 0;
        let mut prev: Link = None;
        let mut cursor = arena.forward(Position::Head, 0);
        while let Some(id) = cursor {
            let node = arena.node(id);
            assert!(node.height() >= 1 && node.height() <= self.level);
            assert_eq!(node.backward, prev, "backward link of {:?}", node.key);
            if let Some(p) = prev {
                let pk = &arena.node(p).key;
                assert!(pk.less(&node.key), "{:?} not before {:?}", pk, node.key);
            }
            count += 1;
            prev = Some(id);
            cursor = node.forward[0];
        }
        assert_eq!(count, self.length);
        assert_eq!(self.tail, prev);

        // upper levels: ascending subsequences of level 0
        for level in 1..arena.max_level() {
            let mut below = arena.forward(Position::Head, 0);
            let mut cursor = arena.forward(Position::Head, level);
            if level >= self.level {
                assert!(cursor.is_none(), "level {} populated above list level", level);
            }
            while let Some(id) = cursor {
                // advance the level-0 walk until it meets this node
                loop {
                    match below {
                        | Some(b) if b == id => break,
                        | Some(b) => below = arena.node(b).forward[0],
                        | None => panic!("node on level {} missing from level 0", level),
                    }
                }
                assert!(arena.node(id).height() > level);
                cursor = arena.node(id).forward[level];
            }
        }

        // the top in-use level must be populated unless the list is empty
        if self.level > 1 {
            assert!(arena.forward(Position::Head, self.level - 1).is_some());
        }
    }
}
