//! A red-black tree. Nodes live in a single arena and refer to each other by index, so parent
//! links, rotations and the shared "nil" leaf need no raw pointers or reference counting.
//!
//! # Examples
//!
//! ```
//! use rbtree::redblack::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! assert!(tree.insert(1, 100));
//! assert_eq!(tree.find(&1), Some(&100));
//!
//! // Inserting an existing key is ignored and the original value is kept.
//! assert!(!tree.insert(1, 200));
//! assert_eq!(tree.find(&1), Some(&100));
//!
//! tree.insert(2, 200);
//! tree.insert(3, 300);
//! assert_eq!(tree.range(&2, &3), vec![(&2, &200), (&3, &300)]);
//!
//! assert!(tree.delete(&1));
//! assert_eq!(tree.find(&1), None);
//! assert_eq!(tree.len(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace};

mod iter;

pub use iter::{IntoIter, Iter};

/// The two node colors. `Red` nodes may not be adjacent to each other and `Black` nodes make up
/// the black-height, which is equal along every path down to a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Which child of a node we're talking about. Every fixup case has a mirror image, so the
/// rebalancing code is written once against a `Side` and its opposite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Index of a node in the arena. Real nodes start at 1 and live in `nodes[id - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

/// The sentinel. It stands in for every empty child and for the parent of the root. It is always
/// black, never has a key or value, and is never written to.
const NIL: NodeId = NodeId(0);

impl NodeId {
    fn slot(self) -> usize {
        debug_assert!(self != NIL, "the sentinel has no slot");
        self.0 - 1
    }
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

impl<K, V> Node<K, V> {
    fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// A self-balancing Binary Search Tree (specifically, a red-black tree). This can be used for
/// inserting, finding, and deleting keys and values as well as for ordered queries like
/// [`minimum`](Tree::minimum) and [`range`](Tree::range).
///
/// Keys are unique. Inserting an existing key does _not_ overwrite its value; the value inserted
/// first is kept.
#[derive(Clone)]
pub struct Tree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: NodeId,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// The smallest key in the tree and its value, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.minimum(), None);
    ///
    /// for key in [5, 3, 1, 4, 2] {
    ///     tree.insert(key, key * 100);
    /// }
    /// assert_eq!(tree.minimum(), Some((&1, &100)));
    /// ```
    pub fn minimum(&self) -> Option<(&K, &V)> {
        self.entry(self.extreme(self.root, Side::Left))
    }

    /// The largest key in the tree and its value, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 3, 1, 4, 2] {
    ///     tree.insert(key, key * 100);
    /// }
    /// assert_eq!(tree.maximum(), Some((&5, &500)));
    /// ```
    pub fn maximum(&self) -> Option<(&K, &V)> {
        self.entry(self.extreme(self.root, Side::Right))
    }

    /// The number of nodes on the longest path from the root down to a leaf. An empty tree has a
    /// height of 0 and a single node has a height of 1.
    ///
    /// This walks the whole tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Every key and value in the tree in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, "two");
    /// tree.insert(1, "one");
    ///
    /// assert_eq!(tree.entries(), vec![(&1, &"one"), (&2, &"two")]);
    /// ```
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// An iterator over the keys and values of the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.slot()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.slot()]
    }

    fn entry(&self, id: NodeId) -> Option<(&K, &V)> {
        if id == NIL {
            return None;
        }
        let node = self.node(id);
        Some((&node.key, &node.value))
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent
    }

    fn child(&self, id: NodeId, side: Side) -> NodeId {
        self.node(id).child(side)
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Points `child` back at `parent`. The sentinel keeps no parent so it is skipped.
    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if child != NIL {
            self.node_mut(child).parent = parent;
        }
    }

    fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        if id != NIL {
            self.node_mut(id).color = color;
        }
    }

    /// Which side of its parent `id` hangs off. Must not be called on the root.
    fn side_of(&self, id: NodeId) -> Side {
        if self.child(self.parent(id), Side::Left) == id {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Follows `side` children from `id` as far as they go. Returns `NIL` if `id` is `NIL`.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        if id == NIL {
            return NIL;
        }
        loop {
            let next = self.child(id, side);
            if next == NIL {
                return id;
            }
            id = next;
        }
    }

    /// The next node in key order towards `side` (i.e. the successor for `Side::Right`, the
    /// predecessor for `Side::Left`), or `NIL` if `id` is the last one.
    fn step(&self, id: NodeId, side: Side) -> NodeId {
        let child = self.child(id, side);
        if child != NIL {
            return self.extreme(child, side.opposite());
        }

        let mut current = id;
        let mut parent = self.parent(current);
        while parent != NIL && self.child(parent, side) == current {
            current = parent;
            parent = self.parent(current);
        }
        parent
    }

    fn subtree_height(&self, id: NodeId) -> usize {
        if id == NIL {
            return 0;
        }
        let node = self.node(id);
        self.subtree_height(node.left)
            .max(self.subtree_height(node.right))
            + 1
    }

    /// Rotate `x` down towards `side`. Its child on the other side moves up to take its place.
    /// Used by both fixups, which only ever rotate around a node that has such a child.
    ///
    /// # Diagram
    ///
    /// Rotating to the `Left` (the `Right` rotation is the mirror image):
    ///
    /// ```text
    ///   parent             parent
    ///     |                  |
    ///     x                  y
    ///    / \                / \
    ///   a   y   rotate ->  x   c
    ///      / \            / \
    ///     b   c          a   b
    /// ```
    fn rotate(&mut self, x: NodeId, side: Side) {
        let rising = side.opposite();
        let y = self.child(x, rising);
        debug_assert!(y != NIL, "rotating {:?} needs a {:?} child", x, rising);
        trace!("rotating {:?} to the {:?}", x, side);

        let inner = self.child(y, side);
        self.set_child(x, rising, inner);
        self.set_parent(inner, x);

        let parent = self.parent(x);
        self.node_mut(y).parent = parent;
        if parent == NIL {
            self.root = y;
        } else {
            let x_side = self.side_of(x);
            self.set_child(parent, x_side, y);
        }

        self.set_child(y, side, x);
        self.node_mut(x).parent = y;
    }

    /// Puts the subtree rooted at `v` where the subtree rooted at `u` was. `u`'s own links are
    /// left alone for the caller to deal with.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        if parent == NIL {
            self.root = v;
        } else {
            let u_side = self.side_of(u);
            self.set_child(parent, u_side, v);
        }
        self.set_parent(v, parent);
    }

    /// Restores the red-black invariants after `z` was linked in as a red leaf.
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            // A red parent is never the root so the grandparent is a real node.
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                trace!("insert fixup: red uncle, recoloring below {:?}", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            if z == self.child(parent, side.opposite()) {
                trace!("insert fixup: inner child {:?}, straightening", z);
                z = parent;
                self.rotate(z, side);
            }

            trace!("insert fixup: outer child {:?}, rotating grandparent", z);
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlinks `z` from the tree and rebalances. `z` stays in the arena, unreferenced, for the
    /// caller to release.
    fn unlink(&mut self, z: NodeId) {
        let (z_left, z_right) = (self.node(z).left, self.node(z).right);
        let mut removed_color = self.color(z);

        // `x` is the node moving into the vacated position. It may be the sentinel, which keeps
        // no parent link, so its parent is tracked alongside it.
        let (x, x_parent) = if z_left == NIL {
            let parent = self.parent(z);
            self.transplant(z, z_right);
            (z_right, parent)
        } else if z_right == NIL {
            let parent = self.parent(z);
            self.transplant(z, z_left);
            (z_left, parent)
        } else {
            let y = self.extreme(z_right, Side::Left);
            removed_color = self.color(y);
            let x = self.node(y).right;

            let x_parent = if self.parent(y) == z {
                y
            } else {
                let parent = self.parent(y);
                self.transplant(y, x);
                self.node_mut(y).right = z_right;
                self.set_parent(z_right, y);
                parent
            };

            self.transplant(z, y);
            self.node_mut(y).left = z_left;
            self.set_parent(z_left, y);
            let z_color = self.color(z);
            self.set_color(y, z_color);

            (x, x_parent)
        };

        if removed_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }
    }

    /// Restores the black-height after a black node was removed from above `x`, whose parent is
    /// `parent` (`NIL` if `x` is the root).
    fn delete_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            // `x` is short one black node, so its sibling's side has at least one real black
            // node and `w` is never the sentinel. That also makes the side check below sound
            // when `x` is the sentinel.
            let side = if self.child(parent, Side::Left) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut w = self.child(parent, far);

            if self.color(w) == Color::Red {
                trace!("delete fixup: red sibling {:?}", w);
                self.set_color(w, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                w = self.child(parent, far);
            }

            if self.color(self.child(w, side)) == Color::Black
                && self.color(self.child(w, far)) == Color::Black
            {
                trace!("delete fixup: black nephews, moving up from {:?}", parent);
                self.set_color(w, Color::Red);
                x = parent;
                parent = self.parent(x);
                continue;
            }

            if self.color(self.child(w, far)) == Color::Black {
                trace!("delete fixup: far nephew black, rotating sibling {:?}", w);
                let near = self.child(w, side);
                self.set_color(near, Color::Black);
                self.set_color(w, Color::Red);
                self.rotate(w, far);
                w = self.child(parent, far);
            }

            trace!("delete fixup: far nephew red, rotating {:?}", parent);
            let parent_color = self.color(parent);
            self.set_color(w, parent_color);
            self.set_color(parent, Color::Black);
            let far_nephew = self.child(w, far);
            self.set_color(far_nephew, Color::Black);
            self.rotate(parent, side);
            x = self.root;
            parent = NIL;
        }

        self.set_color(x, Color::Black);
    }

    /// Takes the unlinked node `z` out of the arena. The last node in the arena moves into `z`'s
    /// slot, so its neighbours are re-pointed at its new id.
    fn release(&mut self, z: NodeId) -> Node<K, V> {
        let last = NodeId(self.nodes.len());
        let removed = self.nodes.swap_remove(z.slot());
        if last == z {
            return removed;
        }

        let (parent, left, right) = {
            let moved = self.node(z);
            (moved.parent, moved.left, moved.right)
        };
        if parent == NIL {
            self.root = z;
        } else if self.child(parent, Side::Left) == last {
            self.set_child(parent, Side::Left, z);
        } else {
            self.set_child(parent, Side::Right, z);
        }
        self.set_parent(left, z);
        self.set_parent(right, z);

        removed
    }

    /// Cheap checks after every mutation. The full invariant check lives in the tests.
    fn check_root(&self) {
        if cfg!(debug_assertions) {
            assert_eq!(self.color(self.root), Color::Black);
            assert_eq!(self.root == NIL, self.nodes.is_empty());
            if self.root != NIL {
                assert_eq!(self.parent(self.root), NIL);
            }
        }
    }
}

impl<K: Ord, V> Tree<K, V> {
    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&V> {
        let id = self.find_node(key);
        self.entry(id).map(|(_, value)| value)
    }

    /// Like [`find`](Tree::find) but hands out a mutable reference to the value.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_node(key);
        if id == NIL {
            return None;
        }
        Some(&mut self.node_mut(id).value)
    }

    /// Whether the tree has a node for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key) != NIL
    }

    /// Inserts the given value into the tree stored at the given key. Returns `false`, leaving
    /// the tree untouched, if the key is already present. The value inserted first is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1, 100));
    /// assert!(!tree.insert(1, 200));
    ///
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.find(&1), Some(&100));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while current != NIL {
            parent = current;
            let node = self.node(current);
            side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    debug!("key already present at {:?}, not inserting", current);
                    return false;
                }
                Ordering::Greater => Side::Right,
            };
            current = node.child(side);
        }

        let z = NodeId(self.nodes.len() + 1);
        self.nodes.push(Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = z;
        } else {
            self.set_child(parent, side, z);
        }

        self.insert_fixup(z);
        debug!("inserted {:?}, tree now holds {} keys", z, self.len());
        self.check_root();
        true
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let z = self.find_node(key);
        if z == NIL {
            debug!("key not present, nothing to delete");
            return None;
        }

        self.unlink(z);
        let removed = self.release(z);
        debug!("deleted {:?}, tree now holds {} keys", z, self.len());
        self.check_root();
        Some(removed.value)
    }

    /// Deletes the node containing the given key. Returns whether there was such a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(!tree.delete(&1));
    ///
    /// tree.insert(1, 2);
    /// assert!(tree.delete(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Every key and value with `low <= key <= high`, in ascending key order. Bounds where
    /// `low > high` simply match nothing.
    ///
    /// Subtrees that can't hold a matching key are never visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 1..=5 {
    ///     tree.insert(key, key * 100);
    /// }
    ///
    /// assert_eq!(tree.range(&2, &4), vec![(&2, &200), (&3, &300), (&4, &400)]);
    /// assert!(tree.range(&4, &2).is_empty());
    /// ```
    pub fn range(&self, low: &K, high: &K) -> Vec<(&K, &V)> {
        let mut found = Vec::new();
        self.collect_range(self.root, low, high, &mut found);
        found
    }

    fn collect_range<'a>(
        &'a self,
        id: NodeId,
        low: &K,
        high: &K,
        found: &mut Vec<(&'a K, &'a V)>,
    ) {
        if id == NIL {
            return;
        }

        let node = self.node(id);
        let at_least_low = node.key.cmp(low) != Ordering::Less;
        let at_most_high = node.key.cmp(high) != Ordering::Greater;

        if at_least_low {
            self.collect_range(node.left, low, high, found);
        }
        if at_least_low && at_most_high {
            found.push((&node.key, &node.value));
        }
        if at_most_high {
            self.collect_range(node.right, low, high, found);
        }
    }

    fn find_node(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            let node = self.node(current);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return current,
                Ordering::Greater => node.right,
            };
        }
        NIL
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    /// Inserts every pair in turn. As with [`Tree::insert`], a repeated key keeps its first value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut tree = Self::new();
        tree.extend(pairs);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

/// Ways a tree can break the red-black rules. Only used to report failures in tests.
#[cfg(test)]
#[derive(Debug, PartialEq)]
pub(crate) enum Violation {
    /// The root is red.
    RedRoot,
    /// The root's parent isn't the sentinel.
    RootHasParent,
    /// A child doesn't point back at its parent.
    BrokenParentLink(usize),
    /// A key is out of order relative to one of its ancestors.
    OutOfOrder(usize),
    /// A red node has a red child.
    RedRed(usize),
    /// Two paths below this node pass through a different number of black nodes.
    BlackHeight(usize),
    /// The number of reachable nodes doesn't match the arena.
    Count { reachable: usize, stored: usize },
    /// The tree is taller than `2 * log2(n + 1)`.
    TooTall { height: usize, len: usize },
}

#[cfg(test)]
impl<K: Ord, V> Tree<K, V> {
    /// Checks every invariant of the tree, returning the first broken one.
    pub(crate) fn validate(&self) -> Result<(), Violation> {
        if self.color(self.root) != Color::Black {
            return Err(Violation::RedRoot);
        }
        if self.root != NIL && self.parent(self.root) != NIL {
            return Err(Violation::RootHasParent);
        }

        let mut reachable = 0;
        self.validate_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.nodes.len() {
            return Err(Violation::Count {
                reachable,
                stored: self.nodes.len(),
            });
        }

        let (height, len) = (self.height(), self.len());
        if height as f64 > 2.0 * ((len + 1) as f64).log2() {
            return Err(Violation::TooTall { height, len });
        }

        Ok(())
    }

    /// Returns the black-height of the subtree at `id`, counting the sentinel.
    fn validate_subtree(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        reachable: &mut usize,
    ) -> Result<usize, Violation> {
        if id == NIL {
            return Ok(1);
        }
        *reachable += 1;

        let node = self.node(id);
        if lower.map_or(false, |lower| node.key <= *lower)
            || upper.map_or(false, |upper| node.key >= *upper)
        {
            return Err(Violation::OutOfOrder(id.0));
        }
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if self.parent(child) != id {
                return Err(Violation::BrokenParentLink(child.0));
            }
            if node.color == Color::Red && self.color(child) == Color::Red {
                return Err(Violation::RedRed(id.0));
            }
        }

        let left = self.validate_subtree(node.left, lower, Some(&node.key), reachable)?;
        let right = self.validate_subtree(node.right, Some(&node.key), upper, reachable)?;
        if left != right {
            return Err(Violation::BlackHeight(id.0));
        }

        Ok(left + usize::from(node.color == Color::Black))
    }
}
