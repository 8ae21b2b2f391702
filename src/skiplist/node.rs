// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    fmt,
    mem,
};

/// Stable index of a node inside its [`NodeArena`].
pub(crate) type NodeId = usize;

/// A forward or backward link. `None` marks the end of a chain.
pub(crate) type Link = Option<NodeId>;

/// Where a level-by-level descent currently stands: on the header sentinel or
/// on a real node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(NodeId),
}

impl Position {
    /// The backward link a node gets when its level-0 predecessor is `self`.
    pub(crate) fn as_backward(self) -> Link {
        match self {
            | Position::Head => None,
            | Position::Node(id) => Some(id),
        }
    }
}

/// A real entry in the list.
///
/// `forward` has one slot per level the node reaches, so its length is the
/// node's drawn height. `backward` only tracks level 0 and is `None` for the
/// first node.
pub(crate) struct SkipNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) backward: Link,
    pub(crate) forward: Vec<Link>,
}

impl<K, V> SkipNode<K, V> {
    pub(crate) fn new(key: K, value: V, height: usize) -> Self {
        SkipNode {
            key,
            value,
            backward: None,
            forward: vec![None; height],
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }
}

/// Owns every node of a list plus the header's forward links.
///
/// Nodes are addressed by index so the forward/backward graph never forms
/// ownership cycles. Vacated slots go on a free list and are handed out again
/// by the next allocation.
pub(crate) struct NodeArena<K, V> {
    head: Vec<Link>,
    slots: Vec<Option<SkipNode<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn new(max_level: usize) -> Self {
        NodeArena {
            head: vec![None; max_level],
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Height of the header sentinel.
    pub(crate) fn max_level(&self) -> usize {
        self.head.len()
    }

    /// Number of slots ever handed out, live or free.
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn allocate(&mut self, node: SkipNode<K, V>) -> NodeId {
        match self.free.pop() {
            | Some(id) => {
                self.slots[id] = Some(node);
                id
            },
            | None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> SkipNode<K, V> {
        let node = self.slots[id].take().expect("released a vacant arena slot");
        self.free.push(id);
        node
    }

    pub(crate) fn node(&self, id: NodeId) -> &SkipNode<K, V> {
        self.slots[id].as_ref().expect("dangling node link")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SkipNode<K, V> {
        self.slots[id].as_mut().expect("dangling node link")
    }

    /// The forward link out of `pos` at `level`.
    #[inline]
    pub(crate) fn forward(&self, pos: Position, level: usize) -> Link {
        match pos {
            | Position::Head => self.head[level],
            | Position::Node(id) => self.node(id).forward[level],
        }
    }

    #[inline]
    pub(crate) fn set_forward(&mut self, pos: Position, level: usize, link: Link) {
        match pos {
            | Position::Head => self.head[level] = link,
            | Position::Node(id) => self.node_mut(id).forward[level] = link,
        }
    }

    /// Drops every node and resets the header.
    pub(crate) fn clear(&mut self) {
        self.head.iter_mut().for_each(|link| *link = None);
        self.slots.clear();
        self.free.clear();
    }
}

/// A borrowed view of one node in a [`SkipList`](crate::SkipList).
///
/// The view can walk to its neighbours on level 0 in either direction.
pub struct NodeRef<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    id: NodeId,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(arena: &'a NodeArena<K, V>, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    fn inner(&self) -> &'a SkipNode<K, V> {
        self.arena.node(self.id)
    }

    pub fn key(&self) -> &'a K {
        &self.inner().key
    }

    pub fn value(&self) -> &'a V {
        &self.inner().value
    }

    /// How many levels this node takes part in.
    pub fn height(&self) -> usize {
        self.inner().height()
    }

    /// The following node, or `None` at the tail.
    pub fn next(&self) -> Option<NodeRef<'a, K, V>> {
        self.inner().forward[0].map(|id| NodeRef::new(self.arena, id))
    }

    /// The preceding node, or `None` for the first node.
    pub fn prev(&self) -> Option<NodeRef<'a, K, V>> {
        self.inner().backward.map(|id| NodeRef::new(self.arena, id))
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

/// Two views are equal when they point at the same node of the same list.
impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}

/// A node that has been unlinked from its list. The caller owns the key and
/// the value from here on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<SkipNode<K, V>> for Entry<K, V> {
    fn from(node: SkipNode<K, V>) -> Self {
        Entry {
            key: node.key,
            value: node.value,
        }
    }
}
