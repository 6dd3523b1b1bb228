//! Iterators over a [`Tree`] in key order.

use std::iter::FusedIterator;

use super::{Node, NodeId, Side, Tree, NIL};

/// A borrowing iterator over the keys and values of a [`Tree`] in ascending key order. Created
/// by [`Tree::iter`].
///
/// It walks from node to node through the parent links, so it doesn't allocate.
///
/// # Examples
///
/// ```
/// use rbtree::redblack::Tree;
///
/// let tree: Tree<_, _> = vec![(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
///
/// let forwards: Vec<_> = tree.iter().map(|(key, _)| *key).collect();
/// assert_eq!(forwards, vec![1, 2, 3]);
///
/// let backwards: Vec<_> = tree.iter().rev().map(|(_, value)| *value).collect();
/// assert_eq!(backwards, vec!['c', 'b', 'a']);
/// ```
pub struct Iter<'a, K, V> {
    tree: &'a Tree<K, V>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(tree: &'a Tree<K, V>) -> Self {
        Self {
            tree,
            front: tree.extreme(tree.root, Side::Left),
            back: tree.extreme(tree.root, Side::Right),
            remaining: tree.len(),
        }
    }

    fn entry(&self, id: NodeId) -> (&'a K, &'a V) {
        let node: &'a Node<K, V> = self.tree.node(id);
        (&node.key, &node.value)
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` rather than `front == NIL` keeps the two ends from crossing.
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.front;
        self.front = self.tree.step(current, Side::Right);
        Some(self.entry(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.back;
        self.back = self.tree.step(current, Side::Left);
        Some(self.entry(current))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An owning iterator over the keys and values of a [`Tree`] in ascending key order. Created by
/// `Tree::into_iter`.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    /// Moves every node out of the arena in key order.
    pub(super) fn new(tree: Tree<K, V>) -> Self {
        let mut order = Vec::with_capacity(tree.len());
        let mut id = tree.extreme(tree.root, Side::Left);
        while id != NIL {
            order.push(id.slot());
            id = tree.step(id, Side::Right);
        }

        let mut slots: Vec<Option<Node<K, V>>> = tree.nodes.into_iter().map(Some).collect();
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|slot| slots[slot].take())
            .map(|node| (node.key, node.value))
            .collect();

        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
