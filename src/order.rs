// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// The ordering a key must provide to be indexed.
///
/// `less` must be a strict total order: irreflexive, transitive and
/// asymmetric, and it must not change while the key is stored in a list.
/// Every `Ord` type gets this for free. Keys that only know how to answer
/// "is this before that" can implement it directly.
pub trait Less {
    fn less(&self, other: &Self) -> bool;

    /// Two keys are equivalent when neither orders before the other. This is
    /// the only notion of key equality the list uses.
    #[inline]
    fn equivalent(&self, other: &Self) -> bool {
        !self.less(other) && !other.less(self)
    }
}

impl<T: Ord + ?Sized> Less for T {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        self < other
    }
}
