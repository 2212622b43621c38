//! An ordered trinary search tree.
//!
//! In addition to the `less` and `greater` children of a BST node, every
//! node here owns an `equal` slot chaining exact duplicates of its key,
//! so the tree stores a multiset of keys: each insert adds one occurrence
//! and each delete removes one. Nodes also carry a non-owning
//! back-reference to their parent, which deletion uses to relink subtrees
//! in place rather than rebuilding them.
//!
//! Nodes live in a [`generational_arena::Arena`]; child slots and the
//! parent link are plain [`Index`] handles into it. The arena is the
//! single owner of every node, so the parent back-reference never extends
//! a node's lifetime and reference cycles cannot form.
//!
//! The tree is single-threaded and performs no rebalancing. Callers that
//! need concurrent mutation must serialize whole operations externally:
//! deletion rewires several links per call and is not safe to interleave.
//!
//! # Examples
//!
//! ```
//! use trinary::tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 4, 9, 5, 7, 2, 2] {
//!     tree.insert(key);
//! }
//!
//! // Level-order rendering, one line per level.
//! assert_eq!(tree.to_string(), "5\n4 5 9\n2 7\n2");
//!
//! assert!(tree.delete(9));
//! assert_eq!(tree.to_string(), "5\n4 5 7\n2\n2");
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};

/// The ordered scalar key type stored by the tree.
pub type Key = i64;

/// Which child slot a node occupies in its parent.
///
/// Deletion threads an `Option<Slot>` alongside its recursion so the
/// relinking helpers know which link on the parent to rewrite; `None`
/// means the node sits in the tree's root slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Less,
    Equal,
    Greater,
}

/// One stored key occurrence. Child slots own their subtree through the
/// arena; `parent` is a back-reference only.
#[derive(Debug, Clone)]
struct Node {
    key: Key,
    less: Option<Index>,
    equal: Option<Index>,
    greater: Option<Index>,
    parent: Option<Index>,
}

impl Node {
    fn new(key: Key, parent: Option<Index>) -> Self {
        Self {
            key,
            less: None,
            equal: None,
            greater: None,
            parent,
        }
    }

    fn has_children(&self) -> bool {
        self.less.is_some() || self.equal.is_some() || self.greater.is_some()
    }

    fn child(&self, slot: Slot) -> Option<Index> {
        match slot {
            Slot::Less => self.less,
            Slot::Equal => self.equal,
            Slot::Greater => self.greater,
        }
    }

    fn child_mut(&mut self, slot: Slot) -> &mut Option<Index> {
        match slot {
            Slot::Less => &mut self.less,
            Slot::Equal => &mut self.equal,
            Slot::Greater => &mut self.greater,
        }
    }
}

/// An ordered trinary search tree storing a multiset of [`Key`]s.
///
/// # Examples
///
/// ```
/// use trinary::tree::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert!(!tree.contains(1));
///
/// tree.insert(1);
/// tree.insert(1);
/// assert_eq!(tree.count(1), 2);
///
/// // Deleting removes one occurrence at a time.
/// assert!(tree.delete(1));
/// assert_eq!(tree.count(1), 1);
///
/// // Deleting an absent key is an ordinary `false`, not an error.
/// assert!(!tree.delete(42));
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Arena<Node>,
    root: Option<Index>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// The total number of stored key occurrences.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts one occurrence of the given key.
    ///
    /// Descends from the root comparing `key` against each node: equal
    /// keys follow the `equal` chain, smaller keys the `less` slot,
    /// larger keys the `greater` slot. The first missing slot on that
    /// path receives a fresh node. Insertion cannot fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.count(2), 2);
    /// ```
    pub fn insert(&mut self, key: Key) {
        match self.root {
            Some(root) => self.insert_below(root, key),
            None => self.root = Some(self.nodes.insert(Node::new(key, None))),
        }
    }

    fn insert_below(&mut self, current: Index, key: Key) {
        let slot = match key.cmp(&self.nodes[current].key) {
            Ordering::Less => Slot::Less,
            Ordering::Equal => Slot::Equal,
            Ordering::Greater => Slot::Greater,
        };
        match self.nodes[current].child(slot) {
            Some(next) => self.insert_below(next, key),
            None => {
                let node = self.nodes.insert(Node::new(key, Some(current)));
                *self.nodes[current].child_mut(slot) = Some(node);
            }
        }

        if cfg!(debug_assertions) {
            let node = &self.nodes[current];
            if let Some(less) = node.less {
                assert!(self.nodes[less].key < node.key);
            }
            if let Some(chain) = node.equal {
                assert_eq!(self.nodes[chain].key, node.key);
            }
            if let Some(greater) = node.greater {
                // Not strict: two-children deletion can leave an equal
                // key at the top of a greater subtree.
                assert!(self.nodes[greater].key >= node.key);
            }
        }
    }

    /// Deletes one occurrence of the given key, returning whether a node
    /// was found and removed.
    ///
    /// A missing key is an ordinary `false` result; the tree is left
    /// untouched. When the key is present the matching node is unlinked
    /// by whichever case applies: a leaf detaches from its parent, a node
    /// with an equal chain hands its side subtrees to the surviving
    /// duplicate before that duplicate is spliced into its position, a
    /// node with one side child has that child spliced up, and a node
    /// with both side children takes on its in-order successor's key and
    /// the successor is deleted from the `greater` subtree instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5);
    ///
    /// assert!(tree.delete(5));
    /// assert!(tree.is_empty());
    /// assert!(!tree.delete(5));
    /// ```
    pub fn delete(&mut self, key: Key) -> bool {
        match self.root {
            Some(root) => self.delete_below(root, key, None),
            None => false,
        }
    }

    fn delete_below(&mut self, current: Index, key: Key, slot: Option<Slot>) -> bool {
        match key.cmp(&self.nodes[current].key) {
            Ordering::Less => match self.nodes[current].less {
                Some(less) => self.delete_below(less, key, Some(Slot::Less)),
                None => false,
            },
            Ordering::Greater => match self.nodes[current].greater {
                Some(greater) => self.delete_below(greater, key, Some(Slot::Greater)),
                None => false,
            },
            Ordering::Equal => {
                self.remove_node(current, slot);
                true
            }
        }
    }

    /// Unlinks and frees `current`, which occupies `slot` in its parent.
    fn remove_node(&mut self, current: Index, slot: Option<Slot>) {
        let node = &self.nodes[current];
        let (less, equal, greater) = (node.less, node.equal, node.greater);

        if !node.has_children() {
            // Leaf: sever it from its parent (or clear the root).
            self.detach(current, slot);
            self.nodes.remove(current);
        } else if let Some(chain) = equal {
            // The surviving duplicate takes over this node's side
            // subtrees before moving into its position. A chain node
            // never owns side subtrees of its own: insertion of a
            // duplicate key re-descends through `equal` exclusively.
            debug_assert!(
                self.nodes[chain].less.is_none() && self.nodes[chain].greater.is_none(),
                "equal-chain node owns side children"
            );
            self.nodes[chain].less = less;
            self.nodes[chain].greater = greater;
            if let Some(less) = less {
                self.nodes[less].parent = Some(chain);
            }
            if let Some(greater) = greater {
                self.nodes[greater].parent = Some(chain);
            }
            self.splice(current, chain, slot);
            self.nodes.remove(current);
        } else if let (Some(_), Some(greater)) = (less, greater) {
            // Both side children: keep this node where it is, take on
            // the in-order successor's key, and delete the successor
            // from the `greater` subtree. That recursion finds the
            // minimum we just read, so it lands in a shallower case.
            let successor = self.min_of(greater);
            let successor_key = self.nodes[successor].key;
            self.nodes[current].key = successor_key;
            let removed = self.delete_below(greater, successor_key, Some(Slot::Greater));
            debug_assert!(removed, "in-order successor vanished mid-delete");
        } else {
            // Exactly one side child left; splice it up into this
            // node's position.
            let child = less.or(greater).expect("non-leaf node with empty slots");
            self.splice(current, child, slot);
            self.nodes.remove(current);
        }
    }

    /// The leftmost (minimum-key) node of the subtree rooted at `start`.
    fn min_of(&self, start: Index) -> Index {
        let mut current = start;
        while let Some(less) = self.nodes[current].less {
            current = less;
        }
        current
    }

    /// Clears the slot `node` occupies, severing it from its parent (or
    /// from the root handle).
    fn detach(&mut self, node: Index, slot: Option<Slot>) {
        match (self.nodes[node].parent, slot) {
            (Some(parent), Some(slot)) => *self.nodes[parent].child_mut(slot) = None,
            (None, None) => self.root = None,
            _ => unreachable!("slot tag disagrees with parent link"),
        }
    }

    /// Rewires `old`'s parent (or the root handle) to own `child` in
    /// `old`'s former slot, and repoints `child`'s parent accordingly.
    fn splice(&mut self, old: Index, child: Index, slot: Option<Slot>) {
        let parent = self.nodes[old].parent;
        self.nodes[child].parent = parent;
        match (parent, slot) {
            (Some(parent), Some(slot)) => *self.nodes[parent].child_mut(slot) = Some(child),
            (None, None) => self.root = Some(child),
            _ => unreachable!("slot tag disagrees with parent link"),
        }
    }

    /// Whether at least one occurrence of `key` is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(1));
    /// assert!(!tree.contains(42));
    /// ```
    pub fn contains(&self, key: Key) -> bool {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.less,
                Ordering::Equal => return true,
                Ordering::Greater => node.greater,
            };
        }
        false
    }

    /// The number of stored occurrences of `key`.
    pub fn count(&self, key: Key) -> usize {
        self.count_below(self.root, key)
    }

    fn count_below(&self, start: Option<Index>, key: Key) -> usize {
        let mut current = start;
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.less,
                Ordering::Greater => node.greater,
                Ordering::Equal => {
                    let mut occurrences = 1;
                    let mut chain = node.equal;
                    while let Some(link) = chain {
                        occurrences += 1;
                        chain = self.nodes[link].equal;
                    }
                    // Deleting a node with two side children copies its
                    // successor's key upward, which can leave further
                    // occurrences of that key in this node's `greater`
                    // subtree. Keep looking there.
                    return occurrences + self.count_below(node.greater, key);
                }
            };
        }
        0
    }

    /// A lazy level-order (breadth-first) traversal yielding
    /// `(level, key)` pairs, the root at level 0.
    ///
    /// Children are enqueued `less`, `equal`, `greater` for each visited
    /// node, so one level's keys come out in left-to-right order. The
    /// iterator is one-shot: call `levels` again to restart from the
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use trinary::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [2, 1, 3] {
    ///     tree.insert(key);
    /// }
    ///
    /// let pairs: Vec<_> = tree.levels().collect();
    /// assert_eq!(pairs, [(0, 2), (1, 1), (1, 3)]);
    /// ```
    pub fn levels(&self) -> Levels<'_> {
        let queue: VecDeque<Index> = self.root.into_iter().collect();
        let remaining = queue.len();
        Levels {
            tree: self,
            queue,
            level: 0,
            remaining,
        }
    }
}

/// Formats the tree as its level-order traversal: one line per level,
/// keys separated by single spaces. An empty tree formats as nothing.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous = None;
        for (level, key) in self.levels() {
            match previous {
                Some(p) if p == level => f.write_str(" ")?,
                Some(_) => f.write_str("\n")?,
                None => {}
            }
            write!(f, "{key}")?;
            previous = Some(level);
        }
        Ok(())
    }
}

/// Iterator over a [`Tree`]'s level-order traversal. See
/// [`Tree::levels`].
#[derive(Debug)]
pub struct Levels<'a> {
    tree: &'a Tree,
    queue: VecDeque<Index>,
    level: usize,
    /// How many nodes of the current level are still queued; the entries
    /// behind them belong to the next level.
    remaining: usize,
}

impl Iterator for Levels<'_> {
    type Item = (usize, Key);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            if self.queue.is_empty() {
                return None;
            }
            self.level += 1;
            self.remaining = self.queue.len();
        }
        let current = self.queue.pop_front()?;
        self.remaining -= 1;

        let node = &self.tree.nodes[current];
        self.queue.extend(node.less);
        self.queue.extend(node.equal);
        self.queue.extend(node.greater);
        Some((self.level, node.key))
    }
}

#[cfg(test)]
impl Tree {
    /// Walks the whole structure asserting every invariant: ordering,
    /// equal-chain shape, parent/child mutual consistency, and that the
    /// arena holds no unreachable nodes.
    fn assert_consistent(&self) {
        assert_eq!(
            self.root.is_none(),
            self.nodes.is_empty(),
            "root handle and arena population disagree"
        );
        let mut visited = 0;
        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None, "root has a parent");
            self.assert_subtree(root, None, None, &mut visited);
        }
        assert_eq!(visited, self.nodes.len(), "arena holds unreachable nodes");
    }

    /// Checks the subtree at `idx` against its ancestors' key bounds.
    ///
    /// The upper bound is strict; the lower bound is not, because
    /// two-children deletion copies a successor key upward and may leave
    /// equal keys in a `greater` subtree.
    fn assert_subtree(
        &self,
        idx: Index,
        lower: Option<Key>,
        upper: Option<Key>,
        visited: &mut usize,
    ) {
        *visited += 1;
        let node = &self.nodes[idx];
        if let Some(lower) = lower {
            assert!(node.key >= lower, "key below its subtree's lower bound");
        }
        if let Some(upper) = upper {
            assert!(node.key < upper, "key above its subtree's upper bound");
        }

        let mut chain_parent = idx;
        let mut chain = node.equal;
        while let Some(link) = chain {
            *visited += 1;
            let duplicate = &self.nodes[link];
            assert_eq!(duplicate.parent, Some(chain_parent), "chain parent broken");
            assert_eq!(duplicate.key, node.key, "chain key diverged");
            assert!(
                duplicate.less.is_none() && duplicate.greater.is_none(),
                "equal-chain node owns side children"
            );
            chain_parent = link;
            chain = duplicate.equal;
        }

        if let Some(less) = node.less {
            assert_eq!(self.nodes[less].parent, Some(idx), "less parent broken");
            self.assert_subtree(less, lower, Some(node.key), visited);
        }
        if let Some(greater) = node.greater {
            assert_eq!(
                self.nodes[greater].parent,
                Some(idx),
                "greater parent broken"
            );
            self.assert_subtree(greater, Some(node.key), upper, visited);
        }
    }

    /// In-order keys over `less`/`greater` links only, skipping equal
    /// chains.
    fn keys_in_order(&self) -> Vec<Key> {
        fn walk(tree: &Tree, current: Option<Index>, out: &mut Vec<Key>) {
            if let Some(idx) = current {
                let node = &tree.nodes[idx];
                walk(tree, node.less, out);
                out.push(node.key);
                walk(tree, node.greater, out);
            }
        }
        let mut out = Vec::new();
        walk(self, self.root, &mut out);
        out
    }
}
