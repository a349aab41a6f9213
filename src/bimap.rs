//! A module containing [`BiMap`].

use core::fmt;

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::comparator::{Comparator, NaturalOrder};
use crate::cursor::{Cursor, IntoIter, Iter, LeftCursor, RightCursor};
use crate::error::OutOfRangeError;
use crate::record::{Arena, Handle, Left, Record, Right, Side};
use crate::treap::{self, Treap};

/// The seed of the priority generator used by the constructors that do
/// not take one.
const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// An ordered bidirectional map of unique `L` values to unique `R`
/// values, based on two treaps sharing the same pair records.
///
/// `L` is the generic type parameter for the left values and `R` for the
/// right values. `CL` and `CR` are the [`Comparator`]s ordering each side,
/// both default to [`NaturalOrder`].
///
/// Every left value and every right value appears at most once in the
/// map, and each side can be searched and walked in its own sorted order
/// in expected `O(log n)` time per step. Positions are represented by
/// [`Cursor`]s which can be flipped from one side of a pair to the other
/// in constant time.
///
/// # Examples
/// ```
/// use bitreap::BiMap;
///
/// let mut map = BiMap::new();
///
/// map.insert(1, "one");
/// map.insert(2, "two");
/// map.insert(3, "three");
///
/// assert_eq!(map.at_left(&2), Ok(&"two"));
/// assert_eq!(map.at_right(&"three"), Ok(&3));
///
/// // The right values are sorted independently of the left values
/// assert_eq!(
/// 	map.right_values().collect::<Vec<_>>(),
/// 	[&"one", &"three", &"two"]
/// );
///
/// // Cursors move along one side and flip to the other
/// let two = map.find_left(&2);
/// assert_eq!(map.value(map.next(two)), Some(&3));
/// assert_eq!(map.value(two.flip()), Some(&"two"));
/// ```
#[derive(Clone)]
pub struct BiMap<L, R, CL = NaturalOrder, CR = NaturalOrder> {
	arena: Arena<L, R>,
	left_tree: Treap<Left, CL>,
	right_tree: Treap<Right, CR>,
	len: usize,
	rng: SmallRng,
}

impl<L, R> BiMap<L, R> {
	/// Makes a new, empty `BiMap` ordering both sides by their [`Ord`]
	/// implementation.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let map: BiMap<u8, char> = BiMap::new();
	/// assert!(map.is_empty());
	/// ```
	pub fn new() -> Self {
		BiMap::with_seed(DEFAULT_SEED)
	}

	/// Makes a new, empty `BiMap` whose treap priorities are drawn from a
	/// generator seeded with `seed`.
	///
	/// Two maps built with the same seed and the same sequence of
	/// operations have the same shape.
	pub fn with_seed(seed: u64) -> Self {
		BiMap::with_comparators_and_seed(NaturalOrder, NaturalOrder, seed)
	}

	/// Collects a `BiMap` from an array of pairs using
	/// [`BiMap::insert()`], pairs conflicting with an earlier pair are
	/// skipped.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let map = BiMap::from_slice([(1, 'a'), (2, 'b'), (3, 'a')]);
	///
	/// assert_eq!(map.len(), 2);
	/// assert_eq!(map.at_right(&'a'), Ok(&1));
	/// ```
	pub fn from_slice<const N: usize>(slice: [(L, R); N]) -> Self
	where
		L: Ord,
		R: Ord,
	{
		slice.into_iter().collect()
	}
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR> {
	/// Makes a new, empty `BiMap` ordering the left values with
	/// `left_comparator` and the right values with `right_comparator`.
	///
	/// # Examples
	/// ```
	/// use bitreap::{BiMap, NaturalOrder, ReverseOrder};
	///
	/// let mut map = BiMap::with_comparators(NaturalOrder, ReverseOrder);
	/// map.insert(1, 10);
	/// map.insert(2, 20);
	///
	/// assert_eq!(map.right_values().collect::<Vec<_>>(), [&20, &10]);
	/// ```
	pub fn with_comparators(left_comparator: CL, right_comparator: CR) -> Self {
		BiMap::with_comparators_and_seed(
			left_comparator,
			right_comparator,
			DEFAULT_SEED,
		)
	}

	/// Makes a new, empty `BiMap` with the given comparators and priority
	/// seed. See [`BiMap::with_comparators()`] and [`BiMap::with_seed()`].
	pub fn with_comparators_and_seed(
		left_comparator: CL,
		right_comparator: CR,
		seed: u64,
	) -> Self {
		BiMap {
			arena: Arena::new(),
			left_tree: Treap::new(left_comparator),
			right_tree: Treap::new(right_comparator),
			len: 0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Returns the number of pairs in the map.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::new();
	///
	/// assert_eq!(map.len(), 0);
	/// map.insert(0, 'a');
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the map contains no pairs, and `false` if it
	/// does.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Removes every pair from the map, invalidating every cursor.
	pub fn clear(&mut self) {
		self.arena.clear();
		self.left_tree.clear();
		self.right_tree.clear();
		self.len = 0;
	}

	fn root<S: Side>(&self) -> Option<Handle> {
		S::select(self.left_tree.root(), self.right_tree.root())
	}

	fn begin<S: Side>(&self) -> Cursor<S> {
		Cursor::new(treap::first::<S, L, R>(&self.arena, self.root::<S>()))
	}

	/// Returns a cursor at the smallest left value, or [`end_left()`] if
	/// the map is empty.
	///
	/// [`end_left()`]: BiMap::end_left
	pub fn begin_left(&self) -> LeftCursor {
		self.begin()
	}

	/// Returns the cursor one past the largest left value.
	pub fn end_left(&self) -> LeftCursor {
		Cursor::end()
	}

	/// Returns a cursor at the smallest right value, or [`end_right()`]
	/// if the map is empty.
	///
	/// [`end_right()`]: BiMap::end_right
	pub fn begin_right(&self) -> RightCursor {
		self.begin()
	}

	/// Returns the cursor one past the largest right value.
	pub fn end_right(&self) -> RightCursor {
		Cursor::end()
	}

	/// Returns the value at `cursor`, or `None` for an end cursor.
	///
	/// # Panics
	///
	/// Panics if the pair `cursor` pointed at has been erased, even when
	/// its storage now holds another pair.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::new();
	/// let cursor = map.insert('x', 24);
	///
	/// assert_eq!(map.value(cursor), Some(&'x'));
	/// assert_eq!(map.value(cursor.flip()), Some(&24));
	/// assert_eq!(map.value(map.end_left()), None);
	/// ```
	pub fn value<S: Side>(&self, cursor: Cursor<S>) -> Option<&S::Value<L, R>> {
		cursor.node().map(|node| S::value(&self.arena[node]))
	}

	/// Returns both values of the pair at `cursor`, the value of the
	/// cursor's side first, or `None` for an end cursor.
	pub fn pair<S: Side>(
		&self,
		cursor: Cursor<S>,
	) -> Option<(&S::Value<L, R>, &<S::Opposite as Side>::Value<L, R>)> {
		cursor.node().map(|node| {
			let record = &self.arena[node];
			(S::value(record), <S::Opposite as Side>::value(record))
		})
	}

	/// Returns the cursor following `cursor` in the order of its side,
	/// which is the end cursor after the largest value.
	///
	/// # Panics
	///
	/// Panics if `cursor` is an end cursor.
	pub fn next<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
		let Some(node) = cursor.node() else {
			panic!("cannot move a cursor past the end");
		};
		Cursor::new(treap::next::<S, L, R>(&self.arena, node))
	}

	/// Returns the cursor preceding `cursor` in the order of its side.
	///
	/// Moving back from the end cursor gives the largest value of that
	/// side, searched from the root each time.
	///
	/// # Panics
	///
	/// Panics if `cursor` is at the smallest value of its side or if it
	/// is the end cursor of an empty map.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let map = BiMap::from_slice([(1, 'c'), (2, 'b'), (3, 'a')]);
	///
	/// let last_right = map.prev(map.end_right());
	/// assert_eq!(map.pair(last_right), Some((&'c', &1)));
	/// assert_eq!(map.value(map.prev(last_right)), Some(&'b'));
	/// ```
	pub fn prev<S: Side>(&self, cursor: Cursor<S>) -> Cursor<S> {
		let previous = match cursor.node() {
			Some(node) => treap::prev::<S, L, R>(&self.arena, node),
			None => treap::last::<S, L, R>(&self.arena, self.root::<S>()),
		};
		match previous {
			Some(_) => Cursor::new(previous),
			None => panic!("cannot move a cursor before the first element"),
		}
	}

	/// Returns an iterator over every pair in ascending order of the left
	/// values.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let map = BiMap::from_slice([(3, 'a'), (1, 'c'), (2, 'b')]);
	///
	/// let mut iter = map.iter();
	///
	/// assert_eq!(iter.next(), Some((&1, &'c')));
	/// assert_eq!(iter.next_back(), Some((&3, &'a')));
	/// assert_eq!(iter.next(), Some((&2, &'b')));
	/// assert_eq!(iter.next(), None);
	/// ```
	pub fn iter(&self) -> Iter<'_, L, R, Left> {
		Iter::new(&self.arena, self.left_tree.root(), self.len)
	}

	/// Returns an iterator over every pair as `(right, left)` in ascending
	/// order of the right values.
	pub fn iter_right(&self) -> Iter<'_, L, R, Right> {
		Iter::new(&self.arena, self.right_tree.root(), self.len)
	}

	/// Returns an iterator over the left values in ascending order.
	pub fn left_values(
		&self,
	) -> impl DoubleEndedIterator<Item = &L> + ExactSizeIterator {
		self.iter().map(|(left, _)| left)
	}

	/// Returns an iterator over the right values in ascending order.
	pub fn right_values(
		&self,
	) -> impl DoubleEndedIterator<Item = &R> + ExactSizeIterator {
		self.iter_right().map(|(right, _)| right)
	}

	/// Returns the pair with the smallest left value, if any.
	pub fn first(&self) -> Option<(&L, &R)> {
		self.iter().next()
	}

	/// Returns the pair with the largest left value, if any.
	pub fn last(&self) -> Option<(&L, &R)> {
		self.iter().next_back()
	}
}

impl<L, R, CL, CR> BiMap<L, R, CL, CR>
where
	CL: Comparator<L>,
	CR: Comparator<R>,
{
	/// Adds the pair `(left, right)` to the map and returns a cursor at
	/// its left value.
	///
	/// If `left` is already present on the left side or `right` is already
	/// present on the right side, nothing is inserted and
	/// [`end_left()`](BiMap::end_left) is returned.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::new();
	///
	/// let cursor = map.insert(1, "a");
	/// assert_eq!(map.value(cursor), Some(&1));
	///
	/// assert_eq!(map.insert(1, "b"), map.end_left());
	/// assert_eq!(map.insert(2, "a"), map.end_left());
	/// assert_eq!(map.len(), 1);
	/// ```
	pub fn insert(&mut self, left: L, right: R) -> LeftCursor {
		if self.left_tree.exists(&self.arena, &left).is_some()
			|| self.right_tree.exists(&self.arena, &right).is_some()
		{
			debug!("rejected a pair whose left or right value is present");
			return self.end_left();
		}

		Cursor::new(Some(self.link(left, right)))
	}

	fn link(&mut self, left: L, right: R) -> Handle {
		let record =
			Record::new(left, right, self.rng.random(), self.rng.random());
		let node = self.arena.alloc(record);

		self.left_tree.insert(&mut self.arena, node);
		self.right_tree.insert(&mut self.arena, node);
		self.len += 1;

		trace!("linked {node:?}, {} pairs stored", self.len);
		node
	}

	fn unlink(&mut self, node: Handle) -> (L, R) {
		self.left_tree.erase(&mut self.arena, node);
		self.right_tree.erase(&mut self.arena, node);
		self.len -= 1;

		trace!("unlinked {node:?}, {} pairs stored", self.len);
		let record = self.arena.free(node);
		(record.left, record.right)
	}

	fn erase_at<S: Side>(&mut self, cursor: Cursor<S>) -> Cursor<S> {
		let Some(node) = cursor.node() else {
			panic!("cannot erase the end cursor");
		};
		let following = treap::next::<S, L, R>(&self.arena, node);
		self.unlink(node);
		Cursor::new(following)
	}

	fn erase_range_at<S: Side>(
		&mut self,
		first: Cursor<S>,
		last: Cursor<S>,
	) -> Cursor<S> {
		let mut current = first;
		while current != last {
			current = self.erase_at(current);
		}
		last
	}

	/// Removes the pair whose left value is at `cursor` and returns a
	/// cursor at the following left value.
	///
	/// Only cursors pointing at the removed pair are invalidated.
	///
	/// # Panics
	///
	/// Panics if `cursor` is the end cursor or points at an erased pair.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::from_slice([(1, 'a'), (2, 'b'), (3, 'c')]);
	///
	/// let three = map.find_left(&3);
	/// let after = map.erase_left(map.find_left(&2));
	///
	/// assert_eq!(after, three);
	/// assert_eq!(map.find_right(&'b'), map.end_right());
	/// assert_eq!(map.len(), 2);
	/// ```
	pub fn erase_left(&mut self, cursor: LeftCursor) -> LeftCursor {
		self.erase_at(cursor)
	}

	/// Removes the pair whose right value is at `cursor` and returns a
	/// cursor at the following right value. See [`BiMap::erase_left()`].
	///
	/// # Panics
	///
	/// Panics if `cursor` is the end cursor or points at an erased pair.
	pub fn erase_right(&mut self, cursor: RightCursor) -> RightCursor {
		self.erase_at(cursor)
	}

	/// Removes the pair with the left value `left`, if any, and returns
	/// whether a pair was removed.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::from_slice([(1, 'a'), (2, 'b')]);
	///
	/// assert_eq!(map.erase_left_key(&1), true);
	/// assert_eq!(map.erase_left_key(&1), false);
	/// assert_eq!(map.contains_right(&'a'), false);
	/// ```
	pub fn erase_left_key(&mut self, left: &L) -> bool {
		match self.left_tree.exists(&self.arena, left) {
			Some(node) => {
				self.unlink(node);
				true
			}
			None => false,
		}
	}

	/// Removes the pair with the right value `right`, if any, and returns
	/// whether a pair was removed.
	pub fn erase_right_key(&mut self, right: &R) -> bool {
		match self.right_tree.exists(&self.arena, right) {
			Some(node) => {
				self.unlink(node);
				true
			}
			None => false,
		}
	}

	/// Removes every pair whose left value is in `[first, last)` and
	/// returns `last`.
	///
	/// # Panics
	///
	/// Panics if `last` is not reachable from `first` by moving forward.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map =
	/// 	BiMap::from_slice([(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')]);
	///
	/// let last = map.erase_left_range(map.find_left(&2), map.find_left(&4));
	///
	/// assert_eq!(map.value(last), Some(&4));
	/// assert_eq!(map.left_values().collect::<Vec<_>>(), [&1, &4]);
	/// ```
	pub fn erase_left_range(
		&mut self,
		first: LeftCursor,
		last: LeftCursor,
	) -> LeftCursor {
		self.erase_range_at(first, last)
	}

	/// Removes every pair whose right value is in `[first, last)` and
	/// returns `last`. See [`BiMap::erase_left_range()`].
	pub fn erase_right_range(
		&mut self,
		first: RightCursor,
		last: RightCursor,
	) -> RightCursor {
		self.erase_range_at(first, last)
	}

	/// Returns a cursor at the left value `left`, or
	/// [`end_left()`](BiMap::end_left) if it is not present.
	pub fn find_left(&self, left: &L) -> LeftCursor {
		Cursor::new(self.left_tree.exists(&self.arena, left))
	}

	/// Returns a cursor at the right value `right`, or
	/// [`end_right()`](BiMap::end_right) if it is not present.
	pub fn find_right(&self, right: &R) -> RightCursor {
		Cursor::new(self.right_tree.exists(&self.arena, right))
	}

	/// Returns `true` if `left` is present on the left side.
	pub fn contains_left(&self, left: &L) -> bool {
		self.left_tree.exists(&self.arena, left).is_some()
	}

	/// Returns `true` if `right` is present on the right side.
	pub fn contains_right(&self, right: &R) -> bool {
		self.right_tree.exists(&self.arena, right).is_some()
	}

	/// Returns the right value paired with `left`, if any.
	pub fn get_left(&self, left: &L) -> Option<&R> {
		self.left_tree
			.exists(&self.arena, left)
			.map(|node| &self.arena[node].right)
	}

	/// Returns the left value paired with `right`, if any.
	pub fn get_right(&self, right: &R) -> Option<&L> {
		self.right_tree
			.exists(&self.arena, right)
			.map(|node| &self.arena[node].left)
	}

	/// Returns the right value paired with `left`.
	///
	/// # Errors
	///
	/// Returns [`OutOfRangeError`] if `left` is not present.
	///
	/// # Examples
	/// ```
	/// use bitreap::{BiMap, OutOfRangeError};
	///
	/// let map = BiMap::from_slice([(1, 'a')]);
	///
	/// assert_eq!(map.at_left(&1), Ok(&'a'));
	/// assert_eq!(map.at_left(&2), Err(OutOfRangeError));
	/// ```
	pub fn at_left(&self, left: &L) -> Result<&R, OutOfRangeError> {
		self.get_left(left).ok_or(OutOfRangeError)
	}

	/// Returns the left value paired with `right`.
	///
	/// # Errors
	///
	/// Returns [`OutOfRangeError`] if `right` is not present.
	pub fn at_right(&self, right: &R) -> Result<&L, OutOfRangeError> {
		self.get_right(right).ok_or(OutOfRangeError)
	}

	/// Returns the right value paired with `left`, inserting
	/// `(left, R::default())` first if `left` is not present.
	///
	/// If the default right value is already paired with another left
	/// value, that pair is removed so the default becomes paired with
	/// `left`.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::from_slice([(1, String::from("a"))]);
	///
	/// assert_eq!(map.at_left_or_default(1), "a");
	///
	/// assert_eq!(map.at_left_or_default(3), "");
	/// assert_eq!(map.len(), 2);
	///
	/// // "" now moves from 3 to 4
	/// assert_eq!(map.at_left_or_default(4), "");
	/// assert_eq!(map.len(), 2);
	/// assert_eq!(map.contains_left(&3), false);
	/// ```
	pub fn at_left_or_default(&mut self, left: L) -> &R
	where
		R: Default,
	{
		if let Some(node) = self.left_tree.exists(&self.arena, &left) {
			return &self.arena[node].right;
		}

		let right = R::default();
		if let Some(holder) = self.right_tree.exists(&self.arena, &right) {
			debug!("moving the default right value away from {holder:?}");
			self.unlink(holder);
		}

		let node = self.link(left, right);
		&self.arena[node].right
	}

	/// Returns the left value paired with `right`, inserting
	/// `(L::default(), right)` first if `right` is not present. See
	/// [`BiMap::at_left_or_default()`].
	pub fn at_right_or_default(&mut self, right: R) -> &L
	where
		L: Default,
	{
		if let Some(node) = self.right_tree.exists(&self.arena, &right) {
			return &self.arena[node].left;
		}

		let left = L::default();
		if let Some(holder) = self.left_tree.exists(&self.arena, &left) {
			debug!("moving the default left value away from {holder:?}");
			self.unlink(holder);
		}

		let node = self.link(left, right);
		&self.arena[node].left
	}

	/// Returns a cursor at the first left value not less than `left`.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let map = BiMap::from_slice([(1, 10), (3, 30), (5, 50), (7, 70)]);
	///
	/// assert_eq!(map.value(map.lower_bound_left(&4)), Some(&5));
	/// assert_eq!(map.value(map.lower_bound_left(&5)), Some(&5));
	/// assert_eq!(map.lower_bound_left(&8), map.end_left());
	/// ```
	pub fn lower_bound_left(&self, left: &L) -> LeftCursor {
		Cursor::new(self.left_tree.lower_bound(&self.arena, left))
	}

	/// Returns a cursor at the first left value greater than `left`.
	pub fn upper_bound_left(&self, left: &L) -> LeftCursor {
		Cursor::new(self.left_tree.upper_bound(&self.arena, left))
	}

	/// Returns a cursor at the first right value not less than `right`.
	pub fn lower_bound_right(&self, right: &R) -> RightCursor {
		Cursor::new(self.right_tree.lower_bound(&self.arena, right))
	}

	/// Returns a cursor at the first right value greater than `right`.
	pub fn upper_bound_right(&self, right: &R) -> RightCursor {
		Cursor::new(self.right_tree.upper_bound(&self.arena, right))
	}

	/// Checks every structural invariant of both trees and that they hold
	/// exactly the same pairs.
	///
	/// # Panics
	///
	/// Panics on the first broken invariant.
	#[doc(hidden)]
	pub fn check_invariants(&self) {
		let mut left_nodes = self.left_tree.validate(&self.arena);
		let mut right_nodes = self.right_tree.validate(&self.arena);

		assert_eq!(left_nodes.len(), self.len, "left tree size mismatch");
		assert_eq!(right_nodes.len(), self.len, "right tree size mismatch");

		left_nodes.sort_unstable();
		right_nodes.sort_unstable();
		assert_eq!(left_nodes, right_nodes, "trees link different pairs");
	}
}

// Trait Impls ==========================

impl<L, R, CL, CR> Default for BiMap<L, R, CL, CR>
where
	CL: Default,
	CR: Default,
{
	fn default() -> Self {
		BiMap::with_comparators(CL::default(), CR::default())
	}
}

impl<L, R, CL, CR> PartialEq for BiMap<L, R, CL, CR>
where
	L: PartialEq,
	R: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.len == other.len && self.iter().eq(other.iter())
	}
}

impl<L, R, CL, CR> Eq for BiMap<L, R, CL, CR>
where
	L: Eq,
	R: Eq,
{
}

impl<L, R, CL, CR> fmt::Debug for BiMap<L, R, CL, CR>
where
	L: fmt::Debug,
	R: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<L, R, CL, CR> Extend<(L, R)> for BiMap<L, R, CL, CR>
where
	CL: Comparator<L>,
	CR: Comparator<R>,
{
	fn extend<T: IntoIterator<Item = (L, R)>>(&mut self, iter: T) {
		for (left, right) in iter {
			self.insert(left, right);
		}
	}
}

impl<L, R, CL, CR> FromIterator<(L, R)> for BiMap<L, R, CL, CR>
where
	CL: Comparator<L> + Default,
	CR: Comparator<R> + Default,
{
	fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
		let mut map = BiMap::default();
		map.extend(iter);
		map
	}
}

impl<L, R, CL, CR> IntoIterator for BiMap<L, R, CL, CR> {
	type Item = (L, R);
	type IntoIter = IntoIter<L, R>;
	fn into_iter(self) -> Self::IntoIter {
		IntoIter::new(self.arena, self.left_tree.root())
	}
}

impl<'a, L, R, CL, CR> IntoIterator for &'a BiMap<L, R, CL, CR> {
	type Item = (&'a L, &'a R);
	type IntoIter = Iter<'a, L, R, Left>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use alloc::string::String;
	use alloc::vec;
	use alloc::vec::Vec;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::comparator::ReverseOrder;

	fn basic() -> BiMap<i32, &'static str> {
		BiMap::from_slice([(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")])
	}

	fn contents<CL, CR>(
		map: &BiMap<i32, &'static str, CL, CR>,
	) -> Vec<(i32, &'static str)> {
		map.iter().map(|(left, right)| (*left, *right)).collect()
	}

	#[test]
	fn insert_rejects_collisions() {
		let mut map = BiMap::new();
		let inserted = map.insert(1, "a");
		assert_eq!(map.value(inserted), Some(&1));

		assert_eq!(map.insert(1, "b"), map.end_left());
		assert_eq!(map.len(), 1);
		assert_eq!(map.insert(2, "a"), map.end_left());
		assert_eq!(map.len(), 1);
		assert_eq!(map.at_left(&1), Ok(&"a"));
		map.check_invariants();
	}

	#[test]
	fn erase_after_insert_round_trips() {
		let mut map = basic();
		let before = map.clone();

		let cursor = map.insert(10, "z");
		assert_eq!(map.len(), 6);
		assert_eq!(map.erase_left(cursor), map.end_left());

		assert_eq!(map, before);
		map.check_invariants();
	}

	#[test]
	fn flip_is_symmetric() {
		let map = basic();
		let mut cursor = map.begin_left();
		while cursor != map.end_left() {
			let (left, right) = map.pair(cursor).unwrap();
			assert_eq!(map.value(cursor.flip()), Some(right));
			assert_eq!(map.at_right(right), Ok(left));
			assert_eq!(cursor.flip().flip(), cursor);
			cursor = map.next(cursor);
		}
	}

	#[test]
	fn both_sides_are_sorted() {
		let map: BiMap<i32, i32> =
			[(5, 50), (1, 70), (4, 10), (2, 30), (3, 60)].into_iter().collect();

		assert_eq!(
			map.left_values().copied().collect::<Vec<_>>(),
			[1, 2, 3, 4, 5]
		);
		assert_eq!(
			map.right_values().copied().collect::<Vec<_>>(),
			[10, 30, 50, 60, 70]
		);
		assert_eq!(
			map.iter_right().map(|(r, l)| (*r, *l)).collect::<Vec<_>>(),
			[(10, 4), (30, 2), (50, 5), (60, 3), (70, 1)]
		);
	}

	#[test]
	fn default_value_is_moved_to_the_requested_key() {
		let mut map = BiMap::new();
		map.insert(1, String::from("a"));
		map.insert(2, String::from("b"));

		assert_eq!(map.at_left_or_default(3), "");
		assert_eq!(map.len(), 3);

		assert_eq!(map.at_left_or_default(4), "");
		assert_eq!(map.len(), 3);
		assert_eq!(map.find_left(&3), map.end_left());
		assert_eq!(map.at_right(&String::new()), Ok(&4));

		assert_eq!(map.at_left_or_default(1), "a");
		assert_eq!(map.len(), 3);
		map.check_invariants();
	}

	#[test]
	fn default_left_value_is_moved_to_the_requested_key() {
		let mut map = BiMap::new();
		map.insert(0, 'a');
		map.insert(1, 'b');

		assert_eq!(*map.at_right_or_default('z'), 0);
		assert_eq!(map.len(), 2);
		assert_eq!(map.find_right(&'a'), map.end_right());
		assert_eq!(*map.at_right_or_default('b'), 1);
		map.check_invariants();
	}

	#[test]
	fn bounds() {
		let map: BiMap<i32, i32> =
			[1, 3, 5, 7].into_iter().map(|key| (key, -key)).collect();

		assert_eq!(map.value(map.lower_bound_left(&4)), Some(&5));
		assert_eq!(map.value(map.upper_bound_left(&5)), Some(&7));
		assert_eq!(map.lower_bound_left(&8), map.end_left());
		assert_eq!(map.upper_bound_left(&7), map.end_left());
		assert_eq!(map.lower_bound_left(&0), map.begin_left());

		assert_eq!(map.value(map.lower_bound_right(&-4)), Some(&-3));
		assert_eq!(map.value(map.upper_bound_right(&-7)), Some(&-5));
		assert_eq!(map.upper_bound_right(&-1), map.end_right());
	}

	#[test]
	fn bounds_follow_the_comparator() {
		let mut map = BiMap::with_comparators(ReverseOrder, NaturalOrder);
		for key in [1, 3, 5, 7] {
			map.insert(key, key);
		}
		assert_eq!(
			map.left_values().copied().collect::<Vec<_>>(),
			[7, 5, 3, 1]
		);
		assert_eq!(map.value(map.lower_bound_left(&4)), Some(&3));
		assert_eq!(map.value(map.upper_bound_left(&5)), Some(&3));
		assert_eq!(map.lower_bound_left(&0), map.end_left());
	}

	#[test]
	fn equality_ignores_insertion_order() {
		let a = BiMap::from_slice([(1, "a"), (2, "b"), (3, "c")]);
		let b = BiMap::from_slice([(3, "c"), (1, "a"), (2, "b")]);
		assert_eq!(a, b);

		let mut c = b.clone();
		c.insert(4, "d");
		assert!(a != c);

		let d = BiMap::from_slice([(1, "a"), (2, "c"), (3, "b")]);
		assert!(a != d);
	}

	#[test]
	fn erase_by_key() {
		let mut map = basic();
		assert!(map.erase_left_key(&3));
		assert!(!map.erase_left_key(&3));
		assert!(map.erase_right_key(&"e"));
		assert!(!map.erase_right_key(&"e"));
		assert_eq!(contents(&map), [(1, "a"), (2, "b"), (4, "d")]);
		map.check_invariants();
	}

	#[test]
	fn erase_by_right_cursor_returns_the_next_right_value() {
		let mut map = BiMap::from_slice([(1, 'c'), (2, 'a'), (3, 'b')]);
		let next = map.erase_right(map.find_right(&'a'));
		assert_eq!(map.value(next), Some(&'b'));
		assert_eq!(map.get_left(&2), None);
		map.check_invariants();
	}

	#[test]
	fn erase_ranges() {
		let mut map = basic();
		let last = map.erase_left_range(map.find_left(&2), map.find_left(&4));
		assert_eq!(map.value(last), Some(&4));
		assert_eq!(contents(&map), [(1, "a"), (4, "d"), (5, "e")]);

		let last = map.erase_right_range(map.find_right(&"d"), map.end_right());
		assert_eq!(last, map.end_right());
		assert_eq!(contents(&map), [(1, "a")]);

		let begin = map.begin_left();
		assert_eq!(map.erase_left_range(begin, begin), begin);
		assert_eq!(map.len(), 1);
		map.check_invariants();
	}

	#[test]
	fn unrelated_cursors_survive_erasure() {
		let mut map = basic();
		let two = map.find_left(&2);
		let four_right = map.find_right(&"d");

		map.erase_left_key(&3);
		map.erase_right(map.find_right(&"a"));
		map.insert(6, "f");

		assert_eq!(map.value(two), Some(&2));
		assert_eq!(map.value(map.next(two)), Some(&4));
		assert_eq!(map.value(four_right.flip()), Some(&4));
	}

	#[test]
	fn stepping_back_from_end_finds_the_maximum() {
		let mut map = basic();
		assert_eq!(map.value(map.prev(map.end_left())), Some(&5));

		map.erase_left_key(&5);
		assert_eq!(map.value(map.prev(map.end_left())), Some(&4));
		assert_eq!(map.value(map.prev(map.end_right())), Some(&"d"));

		let mut cursor = map.end_left();
		let mut seen = vec![];
		while cursor != map.begin_left() {
			cursor = map.prev(cursor);
			seen.push(*map.value(cursor).unwrap());
		}
		assert_eq!(seen, [4, 3, 2, 1]);
	}

	#[test]
	#[should_panic(expected = "before the first element")]
	fn stepping_back_from_begin_panics() {
		let map = basic();
		map.prev(map.begin_left());
	}

	#[test]
	#[should_panic(expected = "past the end")]
	fn stepping_past_end_panics() {
		let map = basic();
		map.next(map.end_right());
	}

	#[test]
	#[should_panic(expected = "end cursor")]
	fn erasing_end_panics() {
		let mut map = basic();
		map.erase_left(map.end_left());
	}

	#[test]
	#[should_panic(expected = "no longer valid")]
	fn erasing_through_a_stale_cursor_panics_after_slot_reuse() {
		let mut map = BiMap::new();
		let stale = map.insert(1, 'a');
		map.erase_left(stale);
		map.insert(2, 'b');
		map.erase_left(stale);
	}

	#[test]
	fn stale_cursor_never_reaches_the_pair_reusing_its_slot() {
		let mut map = BiMap::new();
		let stale = map.insert(1, 'a');
		map.erase_left(stale);
		let fresh = map.insert(2, 'b');

		assert!(fresh != stale);
		assert_eq!(map.value(fresh), Some(&2));
		assert_eq!(map.len(), 1);
	}

	#[test]
	#[should_panic(expected = "no longer valid")]
	fn cursors_from_before_clear_panic() {
		let mut map = basic();
		let stale = map.find_right(&"c");
		map.clear();
		map.insert(3, "c");
		map.value(stale);
	}

	#[test]
	fn empty_map() {
		let mut map: BiMap<u8, u8> = BiMap::new();
		assert!(map.is_empty());
		assert_eq!(map.begin_left(), map.end_left());
		assert_eq!(map.begin_right(), map.end_right());
		assert_eq!(map.first(), None);
		assert_eq!(map.at_left(&0), Err(OutOfRangeError));
		assert_eq!(map.at_right(&0), Err(OutOfRangeError));
		assert!(!map.erase_left_key(&0));
		map.check_invariants();
	}

	#[test]
	fn clear_and_reuse() {
		let mut map = basic();
		map.clear();
		assert!(map.is_empty());
		assert_eq!(map.iter().next(), None);

		map.insert(9, "i");
		assert_eq!(contents(&map), [(9, "i")]);
		map.check_invariants();
	}

	#[test]
	fn clone_is_deep() {
		let original = basic();
		let mut copy = original.clone();
		copy.erase_left_key(&1);
		copy.insert(1, "z");

		assert_eq!(original.at_left(&1), Ok(&"a"));
		assert_eq!(copy.at_left(&1), Ok(&"z"));
		original.check_invariants();
		copy.check_invariants();
	}

	#[test]
	fn into_iter_yields_left_order() {
		let map = BiMap::from_slice([(3, 'x'), (1, 'y'), (2, 'z')]);
		assert_eq!(map.first(), Some((&1, &'y')));
		assert_eq!(map.last(), Some((&3, &'x')));
		assert_eq!(
			map.into_iter().collect::<Vec<_>>(),
			[(1, 'y'), (2, 'z'), (3, 'x')]
		);
	}

	#[test]
	fn debug_prints_left_order() {
		let map = BiMap::from_slice([(2, 'b'), (1, 'a')]);
		assert_eq!(alloc::format!("{map:?}"), "{1: 'a', 2: 'b'}");
	}

	#[test]
	fn same_seed_gives_same_shape() {
		let mut a = BiMap::with_seed(42);
		let mut b = BiMap::with_seed(42);
		for key in 0..64 {
			a.insert(key, 64 - key);
			b.insert(key, 64 - key);
		}
		assert_eq!(a.left_tree.root(), b.left_tree.root());
		assert_eq!(a.right_tree.root(), b.right_tree.root());
	}
}
