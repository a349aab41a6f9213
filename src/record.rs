//! The pair records shared by both trees of a [`BiMap`] and the arena
//! that owns them.
//!
//! Every stored pair is exactly one [`Record`], and every record embeds
//! two independent [`Links`] headers: one for the tree ordered by the
//! left values and one for the tree ordered by the right values. Both
//! trees refer to a record by the same [`Handle`], so moving from one
//! side of a pair to the other is a reinterpretation of the handle and
//! never a lookup.
//!
//! [`BiMap`]: crate::BiMap

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{Index, IndexMut};

/// The address of a [`Record`] inside an [`Arena`].
///
/// The generation tells apart the successive records stored in the same
/// slot, a handle only names the record it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
	index: usize,
	generation: u32,
}

/// The node header of one tree: child and parent links plus the
/// randomized heap priority of the node in that tree.
#[derive(Debug, Clone)]
pub struct Links {
	/// `None` for the root of the tree.
	pub parent: Option<Handle>,
	/// Root of the subtree of smaller keys.
	pub left: Option<Handle>,
	/// Root of the subtree of greater keys.
	pub right: Option<Handle>,
	/// Drawn once when the record is made, never changes.
	pub priority: u64,
}

impl Links {
	fn detached(priority: u64) -> Self {
		Links {
			parent: None,
			left: None,
			right: None,
			priority,
		}
	}

	/// Forget every link, keeping the priority.
	pub fn reset(&mut self) {
		*self = Links::detached(self.priority);
	}
}

/// One stored pair, simultaneously a node of the left tree and a node of
/// the right tree.
#[derive(Debug, Clone)]
pub struct Record<L, R> {
	/// Header in the tree ordered by `left`.
	pub left_links: Links,
	/// Header in the tree ordered by `right`.
	pub right_links: Links,
	/// The left value.
	pub left: L,
	/// The right value.
	pub right: R,
}

impl<L, R> Record<L, R> {
	/// Makes an unlinked record with one priority per tree.
	pub fn new(
		left: L,
		right: R,
		left_priority: u64,
		right_priority: u64,
	) -> Self {
		Record {
			left_links: Links::detached(left_priority),
			right_links: Links::detached(right_priority),
			left,
			right,
		}
	}
}

/// Slot storage for the records of a map.
///
/// Handles stay valid until the record they name is freed. The slot may
/// then be handed out again, but under a new generation, so the old
/// handle keeps failing.
#[derive(Debug, Clone)]
pub struct Arena<L, R> {
	slots: Vec<Slot<L, R>>,
	vacant: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Slot<L, R> {
	generation: u32,
	record: Option<Record<L, R>>,
}

impl<L, R> Arena<L, R> {
	pub fn new() -> Self {
		Arena {
			slots: Vec::new(),
			vacant: Vec::new(),
		}
	}

	pub fn alloc(&mut self, record: Record<L, R>) -> Handle {
		match self.vacant.pop() {
			Some(index) => {
				let slot = &mut self.slots[index];
				slot.record = Some(record);
				Handle {
					index,
					generation: slot.generation,
				}
			}
			None => {
				self.slots.push(Slot {
					generation: 0,
					record: Some(record),
				});
				Handle {
					index: self.slots.len() - 1,
					generation: 0,
				}
			}
		}
	}

	/// Takes the record out of its slot and marks the slot reusable.
	///
	/// # Panics
	///
	/// Panics if `handle` does not name a live record.
	pub fn free(&mut self, handle: Handle) -> Record<L, R> {
		let slot = match self.slots.get_mut(handle.index) {
			Some(slot) if slot.generation == handle.generation => slot,
			_ => stale_handle_panic(handle),
		};
		match slot.record.take() {
			Some(record) => {
				slot.generation = slot.generation.wrapping_add(1);
				self.vacant.push(handle.index);
				record
			}
			None => stale_handle_panic(handle),
		}
	}

	/// Drops every record. Slots are kept and retired like freed ones, so
	/// no handle issued before survives the clear.
	pub fn clear(&mut self) {
		self.vacant.clear();
		for (index, slot) in self.slots.iter_mut().enumerate() {
			if slot.record.take().is_some() {
				slot.generation = slot.generation.wrapping_add(1);
			}
			self.vacant.push(index);
		}
	}

	fn slot(&self, handle: Handle) -> Option<&Record<L, R>> {
		self.slots
			.get(handle.index)
			.filter(|slot| slot.generation == handle.generation)
			.and_then(|slot| slot.record.as_ref())
	}

	fn slot_mut(&mut self, handle: Handle) -> Option<&mut Record<L, R>> {
		self.slots
			.get_mut(handle.index)
			.filter(|slot| slot.generation == handle.generation)
			.and_then(|slot| slot.record.as_mut())
	}
}

impl<L, R> Default for Arena<L, R> {
	fn default() -> Self {
		Arena::new()
	}
}

impl<L, R> Index<Handle> for Arena<L, R> {
	type Output = Record<L, R>;

	fn index(&self, handle: Handle) -> &Self::Output {
		match self.slot(handle) {
			Some(record) => record,
			None => stale_handle_panic(handle),
		}
	}
}

impl<L, R> IndexMut<Handle> for Arena<L, R> {
	fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
		match self.slot_mut(handle) {
			Some(record) => record,
			None => stale_handle_panic(handle),
		}
	}
}

#[track_caller]
fn stale_handle_panic(handle: Handle) -> ! {
	panic!(
		"{handle:?} refers to an erased pair, the cursor is no longer valid"
	)
}

mod sealed {
	pub trait Sealed {}
	impl Sealed for super::Left {}
	impl Sealed for super::Right {}
}

/// One of the two sides of a [`BiMap`], either [`Left`] or [`Right`].
///
/// This trait is sealed, it selects which node header and which value of
/// a pair record the tree and cursor machinery operates on.
///
/// [`BiMap`]: crate::BiMap
pub trait Side:
	sealed::Sealed + Debug + Clone + Copy + PartialEq + Eq + Hash + 'static
{
	/// The other side of a pair.
	type Opposite: Side;

	/// The type of the values stored on this side of a `BiMap<L, R, _, _>`.
	type Value<L, R>;

	#[doc(hidden)]
	fn links<L, R>(record: &Record<L, R>) -> &Links;
	#[doc(hidden)]
	fn links_mut<L, R>(record: &mut Record<L, R>) -> &mut Links;
	#[doc(hidden)]
	fn value<L, R>(record: &Record<L, R>) -> &Self::Value<L, R>;
	#[doc(hidden)]
	fn select<T>(left: T, right: T) -> T;
}

/// The side of a pair holding the `L` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Left {}

/// The side of a pair holding the `R` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Right {}

impl Side for Left {
	type Opposite = Right;
	type Value<L, R> = L;

	fn links<L, R>(record: &Record<L, R>) -> &Links {
		&record.left_links
	}
	fn links_mut<L, R>(record: &mut Record<L, R>) -> &mut Links {
		&mut record.left_links
	}
	fn value<L, R>(record: &Record<L, R>) -> &L {
		&record.left
	}
	fn select<T>(left: T, _: T) -> T {
		left
	}
}

impl Side for Right {
	type Opposite = Left;
	type Value<L, R> = R;

	fn links<L, R>(record: &Record<L, R>) -> &Links {
		&record.right_links
	}
	fn links_mut<L, R>(record: &mut Record<L, R>) -> &mut Links {
		&mut record.right_links
	}
	fn value<L, R>(record: &Record<L, R>) -> &R {
		&record.right
	}
	fn select<T>(_: T, right: T) -> T {
		right
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn freed_slots_are_reused() {
		let mut arena = Arena::new();
		let a = arena.alloc(Record::new(1, 'a', 0, 0));
		let b = arena.alloc(Record::new(2, 'b', 0, 0));
		assert_ne!(a, b);

		let record = arena.free(a);
		assert_eq!((record.left, record.right), (1, 'a'));

		let c = arena.alloc(Record::new(3, 'c', 0, 0));
		assert_ne!(c, a);
		assert_eq!(c.index, a.index);
		assert_eq!(arena[c].left, 3);
		assert_eq!(arena[b].right, 'b');
	}

	#[test]
	#[should_panic(expected = "no longer valid")]
	fn reading_a_freed_slot_panics() {
		let mut arena = Arena::new();
		let a = arena.alloc(Record::new(1, 'a', 0, 0));
		arena.free(a);
		let _ = &arena[a];
	}

	#[test]
	#[should_panic(expected = "no longer valid")]
	fn reading_a_reused_slot_through_an_old_handle_panics() {
		let mut arena = Arena::new();
		let a = arena.alloc(Record::new(1, 'a', 0, 0));
		arena.free(a);
		arena.alloc(Record::new(2, 'b', 0, 0));
		let _ = &arena[a];
	}

	#[test]
	#[should_panic(expected = "no longer valid")]
	fn freeing_a_reused_slot_through_an_old_handle_panics() {
		let mut arena = Arena::new();
		let a = arena.alloc(Record::new(1, 'a', 0, 0));
		arena.free(a);
		let b = arena.alloc(Record::new(2, 'b', 0, 0));
		assert_eq!(arena[b].left, 2);
		arena.free(a);
	}

	#[test]
	fn clear_retires_every_handle() {
		let mut arena = Arena::new();
		let a = arena.alloc(Record::new(1, 'a', 0, 0));
		let b = arena.alloc(Record::new(2, 'b', 0, 0));
		arena.clear();

		let c = arena.alloc(Record::new(3, 'c', 0, 0));
		let d = arena.alloc(Record::new(4, 'd', 0, 0));
		for stale in [a, b] {
			assert!(arena.slot(stale).is_none());
		}
		assert_eq!((arena[c].left, arena[d].left), (3, 4));
	}

	#[test]
	fn sides_select_their_own_header() {
		let mut record = Record::new(7_u8, "seven", 11, 22);
		assert_eq!(Left::links(&record).priority, 11);
		assert_eq!(Right::links(&record).priority, 22);
		assert_eq!(*Left::value(&record), 7);
		assert_eq!(*Right::value(&record), "seven");

		Right::links_mut(&mut record).parent = Some(Handle {
			index: 3,
			generation: 0,
		});
		assert!(Left::links(&record).parent.is_none());
		Right::links_mut(&mut record).reset();
		assert!(Right::links(&record).parent.is_none());
		assert_eq!(Right::links(&record).priority, 22);

		assert_eq!(Left::select(1, 2), 1);
		assert_eq!(Right::select(1, 2), 2);
	}
}
