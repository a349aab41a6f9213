//! A module containing [`Cursor`] and the iterators of a
//! [`BiMap`](crate::BiMap).

use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::record::{Arena, Handle, Left, Right, Side};
use crate::treap;

/// A position on one side of a [`BiMap`](crate::BiMap): either a stored
/// value or the end of that side.
///
/// A cursor does not borrow the map, values are read and cursors are
/// moved through the map's [`value()`], [`next()`] and [`prev()`]
/// methods. Erasing a pair only invalidates the cursors pointing at that
/// pair (on both sides), every other cursor stays valid. Using an
/// invalidated cursor panics.
///
/// Two cursors are equal when they point at the same pair or when both
/// are the end of their side.
///
/// [`value()`]: crate::BiMap::value
/// [`next()`]: crate::BiMap::next
/// [`prev()`]: crate::BiMap::prev
pub struct Cursor<S> {
	node: Option<Handle>,
	side: PhantomData<S>,
}

/// A cursor over the left values of a map.
pub type LeftCursor = Cursor<Left>;
/// A cursor over the right values of a map.
pub type RightCursor = Cursor<Right>;

impl<S> Cursor<S>
where
	S: Side,
{
	pub(crate) fn new(node: Option<Handle>) -> Self {
		Cursor {
			node,
			side: PhantomData,
		}
	}

	pub(crate) fn end() -> Self {
		Cursor::new(None)
	}

	pub(crate) fn node(self) -> Option<Handle> {
		self.node
	}

	/// Returns `true` if this is the end cursor of its side.
	pub fn is_end(self) -> bool {
		self.node.is_none()
	}

	/// Returns the cursor at the other half of the same pair, or the end
	/// cursor of the other side if this is an end cursor.
	///
	/// This is a constant-time operation that does not touch the map.
	///
	/// # Examples
	/// ```
	/// use bitreap::BiMap;
	///
	/// let mut map = BiMap::new();
	/// let left = map.insert(1, "one");
	/// let right = left.flip();
	///
	/// assert_eq!(map.value(right), Some(&"one"));
	/// assert_eq!(right.flip(), left);
	/// ```
	pub fn flip(self) -> Cursor<S::Opposite> {
		Cursor::new(self.node)
	}
}

impl<S> Clone for Cursor<S> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<S> Copy for Cursor<S> {}

impl<S> PartialEq for Cursor<S> {
	fn eq(&self, other: &Self) -> bool {
		self.node == other.node
	}
}
impl<S> Eq for Cursor<S> {}

impl<S> Hash for Cursor<S> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.node.hash(state);
	}
}

impl<S> fmt::Debug for Cursor<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.node {
			Some(node) => f.debug_tuple("Cursor").field(&node).finish(),
			None => f.write_str("Cursor(end)"),
		}
	}
}

/// An iterator over the pairs of a [`BiMap`](crate::BiMap) in the order
/// of side `S`, yielding the value of side `S` first.
///
/// This `struct` is created by [`BiMap::iter()`] and
/// [`BiMap::iter_right()`].
///
/// [`BiMap::iter()`]: crate::BiMap::iter
/// [`BiMap::iter_right()`]: crate::BiMap::iter_right
pub struct Iter<'a, L, R, S> {
	arena: &'a Arena<L, R>,
	front: Option<Handle>,
	back: Option<Handle>,
	remaining: usize,
	side: PhantomData<S>,
}

impl<'a, L, R, S> Iter<'a, L, R, S>
where
	S: Side,
{
	pub(crate) fn new(
		arena: &'a Arena<L, R>,
		root: Option<Handle>,
		len: usize,
	) -> Self {
		Iter {
			arena,
			front: treap::first::<S, L, R>(arena, root),
			back: treap::last::<S, L, R>(arena, root),
			remaining: len,
			side: PhantomData,
		}
	}

	fn pair(
		&self,
		node: Handle,
	) -> (&'a S::Value<L, R>, &'a <S::Opposite as Side>::Value<L, R>) {
		let arena: &'a Arena<L, R> = self.arena;
		let record = &arena[node];
		(S::value(record), <S::Opposite as Side>::value(record))
	}
}

impl<'a, L, R, S> Iterator for Iter<'a, L, R, S>
where
	S: Side,
{
	type Item = (&'a S::Value<L, R>, &'a <S::Opposite as Side>::Value<L, R>);

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let node = self.front?;
		self.remaining -= 1;
		self.front = treap::next::<S, L, R>(self.arena, node);
		Some(self.pair(node))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<L, R, S> DoubleEndedIterator for Iter<'_, L, R, S>
where
	S: Side,
{
	fn next_back(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		let node = self.back?;
		self.remaining -= 1;
		self.back = treap::prev::<S, L, R>(self.arena, node);
		Some(self.pair(node))
	}
}

impl<L, R, S> ExactSizeIterator for Iter<'_, L, R, S> where S: Side {}
impl<L, R, S> FusedIterator for Iter<'_, L, R, S> where S: Side {}

impl<L, R, S> Clone for Iter<'_, L, R, S> {
	fn clone(&self) -> Self {
		Iter {
			arena: self.arena,
			front: self.front,
			back: self.back,
			remaining: self.remaining,
			side: PhantomData,
		}
	}
}

/// An owning iterator over the pairs of a [`BiMap`](crate::BiMap) in
/// ascending order of the left values.
///
/// This `struct` is created by the [`into_iter`] method on
/// [`BiMap`](crate::BiMap) (provided by the [`IntoIterator`] trait). See
/// its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<L, R> {
	inner: alloc::vec::IntoIter<(L, R)>,
}

impl<L, R> IntoIter<L, R> {
	pub(crate) fn new(mut arena: Arena<L, R>, root: Option<Handle>) -> Self {
		let order: Vec<Handle> = core::iter::successors(
			treap::first::<Left, L, R>(&arena, root),
			|node| treap::next::<Left, L, R>(&arena, *node),
		)
		.collect();

		let pairs = order
			.into_iter()
			.map(|node| {
				let record = arena.free(node);
				(record.left, record.right)
			})
			.collect::<Vec<_>>();

		IntoIter {
			inner: pairs.into_iter(),
		}
	}
}

impl<L, R> Iterator for IntoIter<L, R> {
	type Item = (L, R);
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}
impl<L, R> DoubleEndedIterator for IntoIter<L, R> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.inner.next_back()
	}
}
impl<L, R> ExactSizeIterator for IntoIter<L, R> {}
impl<L, R> FusedIterator for IntoIter<L, R> {}
