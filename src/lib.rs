// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An in-memory ordered index built on a [`skip list`].
//!
//! [`SkipList`] maps unique keys to values and answers exact lookups and lower
//! bound queries in expected `O(log n)`. Keys only need to implement [`Less`],
//! which every `Ord` type already does.
//!
//! ```
//! use skipindex::SkipList;
//!
//! let mut index = SkipList::new();
//! for key in 10..20u32 {
//!     index.insert(key, format!("test-{}", key));
//! }
//!
//! assert_eq!(index.search(&12).map(String::as_str), Some("test-12"));
//! assert_eq!(*index.lower_bound_node(&0).unwrap().key(), 10);
//! assert!(index.lower_bound_node(&40).is_none());
//!
//! let removed = index.delete_node(&12).unwrap();
//! assert_eq!(removed.value(), "test-12");
//! assert_eq!(index.len(), 9);
//! ```
//!
//! [`skip list`]: https://en.wikipedia.org/wiki/Skip_list

pub mod config;
pub mod skiplist;

mod errs;
mod order;

pub use crate::{
    config::Config,
    errs::Error,
    order::Less,
    skiplist::{
        Entry,
        GeometricalLevelGenerator,
        Iter,
        LevelGenerator,
        NodeRef,
        Range,
        SkipList,
    },
};
