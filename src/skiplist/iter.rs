// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::iter::FusedIterator;

use crate::skiplist::node::{
    Link,
    NodeArena,
};

/// The two open ends of a walk over level 0. They move towards each other
/// and the walk is over once they have met.
struct Links<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    front: Link,
    back: Link,
}

impl<'a, K, V> Links<'a, K, V> {
    fn new(arena: &'a NodeArena<K, V>, front: Link, back: Link) -> Self {
        Links {
            arena,
            // nothing to walk when there is no front
            back: front.and(back),
            front,
        }
    }

    fn is_done(&self) -> bool {
        self.front.is_none()
    }

    fn finish_if_met(&mut self, id: usize) -> bool {
        if self.front == Some(id) && self.back == Some(id) {
            self.front = None;
            self.back = None;
            true
        } else {
            false
        }
    }

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let id = self.front?;
        let node = self.arena.node(id);
        if !self.finish_if_met(id) {
            self.front = node.forward[0];
        }
        Some((&node.key, &node.value))
    }

    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        let id = self.back?;
        let node = self.arena.node(id);
        if !self.finish_if_met(id) {
            self.back = node.backward;
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V> Clone for Links<'_, K, V> {
    fn clone(&self) -> Self {
        Links {
            arena: self.arena,
            front: self.front,
            back: self.back,
        }
    }
}

/// Borrowing iterator over a whole [`SkipList`](crate::SkipList) in key order.
///
/// Walks level 0 forward from the front and follows backward links from the
/// back; the two ends meet in the middle.
pub struct Iter<'a, K, V> {
    links: Links<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(arena: &'a NodeArena<K, V>, front: Link, back: Link, len: usize) -> Self {
        Iter {
            links: Links::new(arena, front, back),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.links.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.links.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            links: self.links.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator from a lower bound to the end of a [`SkipList`](crate::SkipList).
///
/// Its length is not known without walking, so it only stops on links.
pub struct Range<'a, K, V> {
    links: Links<'a, K, V>,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(crate) fn new(arena: &'a NodeArena<K, V>, front: Link, back: Link) -> Self {
        Range {
            links: Links::new(arena, front, back),
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.links.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.links.is_done() {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.links.next_back()
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            links: self.links.clone(),
        }
    }
}
