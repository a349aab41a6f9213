//! This crate provides [`BiMap`], an ordered bidirectional map based off
//! two treaps sharing the same pair records.
//!
//! Every pair `(L, R)` is stored once and linked into two trees at the
//! same time: one ordered by the left values and one ordered by the right
//! values. Both sides are unique, so a left value identifies exactly one
//! right value and the other way around.
//!
//! Positions in the map are [`Cursor`]s. A cursor belongs to one side,
//! moves along the order of that side with [`BiMap::next()`] and
//! [`BiMap::prev()`], and can be moved to the other half of its pair in
//! constant time with [`Cursor::flip()`].
//!
//! ## Example
//!
//! ```rust
//! use bitreap::BiMap;
//!
//! let mut ports = BiMap::new();
//!
//! ports.insert("http", 80);
//! ports.insert("https", 443);
//! ports.insert("ssh", 22);
//!
//! assert_eq!(ports.at_left(&"ssh"), Ok(&22));
//! assert_eq!(ports.at_right(&443), Ok(&"https"));
//!
//! // Walk the right side in ascending order
//! let mut cursor = ports.begin_right();
//! let mut names = Vec::new();
//! while cursor != ports.end_right() {
//! 	names.push(*ports.value(cursor.flip()).unwrap());
//! 	cursor = ports.next(cursor);
//! }
//! assert_eq!(names, ["ssh", "http", "https"]);
//!
//! // Neither side accepts a duplicate
//! assert_eq!(ports.insert("telnet", 22), ports.end_left());
//! ```
//!
//! ## Example using custom orderings
//!
//! Each side is ordered by its own [`Comparator`], values that compare
//! neither less nor greater than each other are the same value as far as
//! the map is concerned.
//!
//! ```rust
//! use bitreap::{BiMap, FnComparator, ReverseOrder};
//!
//! let case_insensitive = FnComparator(|a: &String, b: &String| {
//! 	a.to_lowercase() < b.to_lowercase()
//! });
//! let mut map = BiMap::with_comparators(case_insensitive, ReverseOrder);
//!
//! map.insert(String::from("Alpha"), 1);
//! map.insert(String::from("beta"), 2);
//!
//! assert_eq!(map.at_left(&String::from("ALPHA")), Ok(&1));
//! assert!(map.contains_left(&String::from("BETA")));
//! assert_eq!(map.right_values().collect::<Vec<_>>(), [&2, &1]);
//! ```
//!
//! # Logging
//!
//! Structural changes are reported through the [`log`] facade: every
//! pair linked or unlinked at the `trace` level and rejected insertions
//! or evictions done by [`BiMap::at_left_or_default()`] at the `debug`
//! level. Nothing is emitted unless the application installs a logger.
//!
//! [`log`]: https://docs.rs/log

#![no_std]
#![allow(clippy::tabs_in_doc_comments)]

extern crate alloc;

pub mod bimap;
pub mod comparator;
pub mod cursor;
pub mod error;

pub(crate) mod record;
pub(crate) mod treap;

pub use crate::bimap::BiMap;
pub use crate::comparator::{
	Comparator, FnComparator, NaturalOrder, ReverseOrder,
};
pub use crate::cursor::{Cursor, IntoIter, Iter, LeftCursor, RightCursor};
pub use crate::error::OutOfRangeError;
pub use crate::record::{Left, Right, Side};
