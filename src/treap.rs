//! The treap engine linking one side's headers of the pair records.
//!
//! A [`Treap`] never owns records, it only relinks the [`Links`] header
//! selected by its [`Side`] inside records owned by an [`Arena`]. Keys are
//! read straight out of the records, so every operation takes the arena
//! it works on.

use alloc::vec::Vec;
use core::marker::PhantomData;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::comparator::Comparator;
use crate::record::{Arena, Handle, Links, Side};

#[derive(Debug, Clone)]
pub(crate) struct Treap<S, C> {
	root: Option<Handle>,
	cmp: C,
	side: PhantomData<S>,
}

fn links<S: Side, L, R>(arena: &Arena<L, R>, node: Handle) -> &Links {
	S::links(&arena[node])
}
fn links_mut<S: Side, L, R>(
	arena: &mut Arena<L, R>,
	node: Handle,
) -> &mut Links {
	S::links_mut(&mut arena[node])
}
fn key<S: Side, L, R>(arena: &Arena<L, R>, node: Handle) -> &S::Value<L, R> {
	S::value(&arena[node])
}

fn set_parent<S: Side, L, R>(
	arena: &mut Arena<L, R>,
	node: Option<Handle>,
	parent: Option<Handle>,
) {
	if let Some(node) = node {
		links_mut::<S, L, R>(arena, node).parent = parent;
	}
}
fn attach_left<S: Side, L, R>(
	arena: &mut Arena<L, R>,
	parent: Handle,
	child: Option<Handle>,
) {
	links_mut::<S, L, R>(arena, parent).left = child;
	set_parent::<S, L, R>(arena, child, Some(parent));
}
fn attach_right<S: Side, L, R>(
	arena: &mut Arena<L, R>,
	parent: Handle,
	child: Option<Handle>,
) {
	links_mut::<S, L, R>(arena, parent).right = child;
	set_parent::<S, L, R>(arena, child, Some(parent));
}

/// The leftmost node under `root`.
pub(crate) fn first<S: Side, L, R>(
	arena: &Arena<L, R>,
	root: Option<Handle>,
) -> Option<Handle> {
	let mut current = root?;
	while let Some(left) = links::<S, L, R>(arena, current).left {
		current = left;
	}
	Some(current)
}

/// The rightmost node under `root`.
pub(crate) fn last<S: Side, L, R>(
	arena: &Arena<L, R>,
	root: Option<Handle>,
) -> Option<Handle> {
	let mut current = root?;
	while let Some(right) = links::<S, L, R>(arena, current).right {
		current = right;
	}
	Some(current)
}

/// In-order successor, `None` after the maximum.
pub(crate) fn next<S: Side, L, R>(
	arena: &Arena<L, R>,
	node: Handle,
) -> Option<Handle> {
	if let Some(right) = links::<S, L, R>(arena, node).right {
		return first::<S, L, R>(arena, Some(right));
	}
	let mut current = node;
	while let Some(parent) = links::<S, L, R>(arena, current).parent {
		if links::<S, L, R>(arena, parent).left == Some(current) {
			return Some(parent);
		}
		current = parent;
	}
	None
}

/// In-order predecessor, `None` before the minimum.
pub(crate) fn prev<S: Side, L, R>(
	arena: &Arena<L, R>,
	node: Handle,
) -> Option<Handle> {
	if let Some(left) = links::<S, L, R>(arena, node).left {
		return last::<S, L, R>(arena, Some(left));
	}
	let mut current = node;
	while let Some(parent) = links::<S, L, R>(arena, current).parent {
		if links::<S, L, R>(arena, parent).right == Some(current) {
			return Some(parent);
		}
		current = parent;
	}
	None
}

impl<S, C> Treap<S, C>
where
	S: Side,
{
	pub(crate) fn new(cmp: C) -> Self {
		Treap {
			root: None,
			cmp,
			side: PhantomData,
		}
	}

	pub(crate) fn root(&self) -> Option<Handle> {
		self.root
	}

	/// Forgets every node without touching the arena.
	pub(crate) fn clear(&mut self) {
		self.root = None;
	}

	/// Joins two trees where every key of `low` is less than every key
	/// of `high`, keeping the higher priority on top at each level.
	fn merge<L, R>(
		arena: &mut Arena<L, R>,
		low: Option<Handle>,
		high: Option<Handle>,
	) -> Option<Handle> {
		let (low, high) = match (low, high) {
			(None, tree) | (tree, None) => return tree,
			(Some(low), Some(high)) => (low, high),
		};

		if links::<S, L, R>(arena, low).priority
			> links::<S, L, R>(arena, high).priority
		{
			let low_right = links::<S, L, R>(arena, low).right;
			let merged = Self::merge(arena, low_right, Some(high));
			attach_right::<S, L, R>(arena, low, merged);
			Some(low)
		} else {
			let high_left = links::<S, L, R>(arena, high).left;
			let merged = Self::merge(arena, Some(low), high_left);
			attach_left::<S, L, R>(arena, high, merged);
			Some(high)
		}
	}

	/// Partitions `tree` into the nodes less than the key of `pivot` and
	/// the nodes not less than it. Both returned roots have no parent.
	fn split<L, R>(
		&self,
		arena: &mut Arena<L, R>,
		tree: Option<Handle>,
		pivot: Handle,
	) -> (Option<Handle>, Option<Handle>)
	where
		C: Comparator<S::Value<L, R>>,
	{
		let Some(top) = tree else {
			return (None, None);
		};

		if self
			.cmp
			.less(key::<S, L, R>(arena, top), key::<S, L, R>(arena, pivot))
		{
			let top_right = links::<S, L, R>(arena, top).right;
			let (low, high) = self.split(arena, top_right, pivot);
			attach_right::<S, L, R>(arena, top, low);
			links_mut::<S, L, R>(arena, top).parent = None;
			set_parent::<S, L, R>(arena, high, None);
			(Some(top), high)
		} else {
			let top_left = links::<S, L, R>(arena, top).left;
			let (low, high) = self.split(arena, top_left, pivot);
			attach_left::<S, L, R>(arena, top, high);
			links_mut::<S, L, R>(arena, top).parent = None;
			set_parent::<S, L, R>(arena, low, None);
			(low, Some(top))
		}
	}

	/// Links an unlinked node whose key is not yet in the tree.
	pub(crate) fn insert<L, R>(&mut self, arena: &mut Arena<L, R>, node: Handle)
	where
		C: Comparator<S::Value<L, R>>,
	{
		debug_assert!(
			self.exists(arena, key::<S, L, R>(arena, node)).is_none(),
			"inserted a key the tree already holds"
		);

		let root = self.insert_under(arena, self.root, node);
		links_mut::<S, L, R>(arena, root).parent = None;
		self.root = Some(root);
	}

	fn insert_under<L, R>(
		&self,
		arena: &mut Arena<L, R>,
		tree: Option<Handle>,
		node: Handle,
	) -> Handle
	where
		C: Comparator<S::Value<L, R>>,
	{
		let Some(top) = tree else {
			return node;
		};

		if links::<S, L, R>(arena, top).priority
			< links::<S, L, R>(arena, node).priority
		{
			let (low, high) = self.split(arena, Some(top), node);
			attach_left::<S, L, R>(arena, node, low);
			attach_right::<S, L, R>(arena, node, high);
			return node;
		}

		if self
			.cmp
			.less(key::<S, L, R>(arena, top), key::<S, L, R>(arena, node))
		{
			let top_right = links::<S, L, R>(arena, top).right;
			let child = self.insert_under(arena, top_right, node);
			attach_right::<S, L, R>(arena, top, Some(child));
		} else {
			let top_left = links::<S, L, R>(arena, top).left;
			let child = self.insert_under(arena, top_left, node);
			attach_left::<S, L, R>(arena, top, Some(child));
		}
		top
	}

	/// Unlinks `node`, found by descending along its key, and resets its
	/// header.
	///
	/// # Panics
	///
	/// Panics if no node with the key of `node` is linked into the tree.
	pub(crate) fn erase<L, R>(&mut self, arena: &mut Arena<L, R>, node: Handle)
	where
		C: Comparator<S::Value<L, R>>,
	{
		let parent = self.locate_parent(arena, node);

		let (left, right) = {
			let links = links::<S, L, R>(arena, node);
			(links.left, links.right)
		};
		let merged = Self::merge(arena, left, right);

		match parent {
			None => {
				set_parent::<S, L, R>(arena, merged, None);
				self.root = merged;
			}
			Some(parent)
				if links::<S, L, R>(arena, parent).left == Some(node) =>
			{
				attach_left::<S, L, R>(arena, parent, merged);
			}
			Some(parent) => {
				attach_right::<S, L, R>(arena, parent, merged);
			}
		}

		links_mut::<S, L, R>(arena, node).reset();
	}

	fn locate_parent<L, R>(
		&self,
		arena: &Arena<L, R>,
		node: Handle,
	) -> Option<Handle>
	where
		C: Comparator<S::Value<L, R>>,
	{
		let target = key::<S, L, R>(arena, node);
		let mut parent = None;
		let mut current = self.root;

		while let Some(candidate) = current {
			let candidate_key = key::<S, L, R>(arena, candidate);
			if self.cmp.less(target, candidate_key) {
				current = links::<S, L, R>(arena, candidate).left;
			} else if self.cmp.less(candidate_key, target) {
				current = links::<S, L, R>(arena, candidate).right;
			} else {
				debug_assert_eq!(
					candidate, node,
					"erased node is not linked here"
				);
				return parent;
			}
			parent = Some(candidate);
		}

		panic!("erased a key that is not present in the tree");
	}

	/// The node holding a key equivalent to `key`, if any.
	pub(crate) fn exists<L, R>(
		&self,
		arena: &Arena<L, R>,
		key: &S::Value<L, R>,
	) -> Option<Handle>
	where
		C: Comparator<S::Value<L, R>>,
	{
		let mut current = self.root;
		while let Some(candidate) = current {
			let candidate_key = self::key::<S, L, R>(arena, candidate);
			current = if self.cmp.less(key, candidate_key) {
				links::<S, L, R>(arena, candidate).left
			} else if self.cmp.less(candidate_key, key) {
				links::<S, L, R>(arena, candidate).right
			} else {
				return Some(candidate);
			};
		}
		None
	}

	/// The first node whose key is not less than `key`.
	pub(crate) fn lower_bound<L, R>(
		&self,
		arena: &Arena<L, R>,
		key: &S::Value<L, R>,
	) -> Option<Handle>
	where
		C: Comparator<S::Value<L, R>>,
	{
		let mut found = None;
		let mut current = self.root;
		while let Some(candidate) = current {
			let candidate_links = links::<S, L, R>(arena, candidate);
			if self.cmp.less(self::key::<S, L, R>(arena, candidate), key) {
				current = candidate_links.right;
			} else {
				found = Some(candidate);
				current = candidate_links.left;
			}
		}
		found
	}

	/// The first node whose key is greater than `key`.
	pub(crate) fn upper_bound<L, R>(
		&self,
		arena: &Arena<L, R>,
		key: &S::Value<L, R>,
	) -> Option<Handle>
	where
		C: Comparator<S::Value<L, R>>,
	{
		let mut found = None;
		let mut current = self.root;
		while let Some(candidate) = current {
			let candidate_links = links::<S, L, R>(arena, candidate);
			if self.cmp.less(key, self::key::<S, L, R>(arena, candidate)) {
				found = Some(candidate);
				current = candidate_links.left;
			} else {
				current = candidate_links.right;
			}
		}
		found
	}

	/// Checks the parent links, heap order and strict key order of the
	/// whole tree and returns its nodes in order.
	///
	/// # Panics
	///
	/// Panics on the first broken invariant.
	pub(crate) fn validate<L, R>(&self, arena: &Arena<L, R>) -> Vec<Handle>
	where
		C: Comparator<S::Value<L, R>>,
	{
		if let Some(root) = self.root {
			assert!(
				links::<S, L, R>(arena, root).parent.is_none(),
				"root has a parent"
			);
		}

		let mut stack: SmallVec<[Handle; 32]> = self.root.into_iter().collect();
		let mut reachable = 0;
		while let Some(node) = stack.pop() {
			reachable += 1;
			let node_links = links::<S, L, R>(arena, node);
			let children = [node_links.left, node_links.right];
			for child in children.into_iter().flatten() {
				let child_links = links::<S, L, R>(arena, child);
				assert_eq!(
					child_links.parent,
					Some(node),
					"broken parent link"
				);
				assert!(
					child_links.priority <= node_links.priority,
					"heap order violated"
				);
				stack.push(child);
			}
		}

		let in_order: Vec<Handle> = core::iter::successors(
			first::<S, L, R>(arena, self.root),
			|node| next::<S, L, R>(arena, *node),
		)
		.collect();

		assert_eq!(in_order.len(), reachable, "in-order walk lost nodes");
		assert!(
			in_order.iter().tuple_windows().all(|(a, b)| {
				self.cmp
					.less(key::<S, L, R>(arena, *a), key::<S, L, R>(arena, *b))
			}),
			"keys are not strictly increasing"
		);

		in_order
	}
}
