//! This crate exposes an ordered trinary search tree, a Binary Search
//! Tree (BST) variant in which every node owns three child slots instead
//! of two.
//!
//! ## Trinary Search Tree
//!
//! Like a BST, the tree supports operations to insert, find, and delete
//! stored keys, and is defined recursively using the notion of a `Node`.
//! The most important invariants are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its `less` subtree
//!    have a key less than its own key.
//! 2. For every `Node` in the tree, all the `Node`s in its `greater`
//!    subtree have a key greater than its own key.
//! 3. Every `Node` reachable from a `Node` purely through `equal` links
//!    carries the exact same key.
//!
//! The third slot is what makes the tree trinary: inserting a key that is
//! already present never overwrites anything, it grows that key's
//! duplicate chain by one node, and deleting removes one occurrence at a
//! time. The tree performs no rebalancing, so operations take `O(height)`
//! with no height guarantee.
//!
//! The crate also ships [`parse`], a standalone string-to-integer
//! conversion utility. It shares no code with the tree; the two simply
//! live in the same crate.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod parse;
pub mod tree;

#[cfg(test)]
pub(crate) mod test;
