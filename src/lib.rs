//! An ordered map from unique keys to values, kept in a red-black tree.
//!
//! [`redblack::Tree`] answers the usual map questions (is this key present, what is its value)
//! and the ordered ones a hash map can't: the smallest and largest key, every entry between two
//! keys, and all entries in ascending key order. Lookups, inserts and deletes take `O(lg N)`.
//!
//! ## Ordering
//!
//! Each entry sits in a `Node` with up to two children. Two rules fix where it goes:
//!
//! 1. Every key in a `Node`'s left subtree is less than the `Node`'s key.
//! 2. Every key in a `Node`'s right subtree is greater than the `Node`'s key.
//!
//! So a lookup compares against one `Node` per level, and visiting left subtree, `Node`, right
//! subtree yields the keys sorted. A key appears at most once. Inserting a key that's already
//! present changes nothing and the first value stays.
//!
//! ## Balance
//!
//! Those two rules alone let sorted inserts build a single chain `N` deep. Coloring every `Node`
//! red or black and keeping two more rules bounds the depth by `2 * lg(N + 1)`:
//!
//! 3. A red `Node` never has a red child.
//! 4. Every path from a `Node` down to a leaf passes through the same number of black `Node`s.
//!
//! After an insert or a delete breaks one of these, a "fixup" walks back up the tree recoloring
//! `Node`s and rotating small groups of them until both hold again. See [`redblack`].
//!
//! The tree is not synchronized. Every mutation takes `&mut self`, so sharing one across threads
//! means wrapping it in a lock.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod redblack;
