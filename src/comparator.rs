//! A module containing the [`Comparator`] trait used to order each side
//! of a [`BiMap`](crate::BiMap).

use core::cmp::Ordering;

/// A strict weak ordering over `T`.
///
/// Two values `a` and `b` are treated as the same value by a map when
/// neither `less(a, b)` nor `less(b, a)` holds, so an implementation must
/// be irreflexive and transitive for the map to stay consistent.
pub trait Comparator<T: ?Sized> {
	/// Returns `true` if `a` is ordered strictly before `b`.
	fn less(&self, a: &T, b: &T) -> bool;

	/// Returns `true` if neither value is ordered before the other.
	fn equivalent(&self, a: &T, b: &T) -> bool {
		!self.less(a, b) && !self.less(b, a)
	}
}

/// Orders values by their [`Ord`] implementation, this is the default
/// comparator of both sides of a `BiMap`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
	T: Ord + ?Sized,
{
	fn less(&self, a: &T, b: &T) -> bool {
		a.cmp(b) == Ordering::Less
	}
}

/// Orders values by the reverse of their [`Ord`] implementation.
///
/// # Examples
/// ```
/// use bitreap::{BiMap, NaturalOrder, ReverseOrder};
///
/// let mut map = BiMap::with_comparators(ReverseOrder, NaturalOrder);
/// map.insert(1, 'a');
/// map.insert(2, 'b');
///
/// assert_eq!(map.first(), Some((&2, &'b')));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T> Comparator<T> for ReverseOrder
where
	T: Ord + ?Sized,
{
	fn less(&self, a: &T, b: &T) -> bool {
		b.cmp(a) == Ordering::Less
	}
}

/// Wraps a closure returning whether its first argument is ordered
/// strictly before its second.
///
/// # Examples
/// ```
/// use bitreap::{BiMap, FnComparator, NaturalOrder};
///
/// let by_len = FnComparator(|a: &&str, b: &&str| a.len() < b.len());
/// let mut map = BiMap::with_comparators(NaturalOrder, by_len);
///
/// map.insert(1, "one");
/// // "two" has the same length as "one" so it counts as the same value
/// assert!(map.insert(2, "two") == map.end_left());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T, F> Comparator<T> for FnComparator<F>
where
	T: ?Sized,
	F: Fn(&T, &T) -> bool,
{
	fn less(&self, a: &T, b: &T) -> bool {
		(self.0)(a, b)
	}
}

impl<T, C> Comparator<T> for &C
where
	T: ?Sized,
	C: Comparator<T> + ?Sized,
{
	fn less(&self, a: &T, b: &T) -> bool {
		(**self).less(a, b)
	}
}
