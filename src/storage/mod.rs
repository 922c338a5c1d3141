//! Utilities for treating the backing storage for trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the trait for arenas which can hold the nodes of a tree
//! - [`NodeId`], the default key type handed out for nodes
//! - [`DefaultStorage`], a type definition for the arena used by trees unless a different one is specified
//!
//! Implementations are provided for [`SlotMap`] and [`DenseSlotMap`]. Both use generational keys: once a node is removed from the arena, every key which pointed to it is reported as missing instead of silently resolving to whatever node reuses the slot.
//!
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "

mod slotmap_impl;

use core::fmt::Debug;

slotmap::new_key_type! {
    /// The key of a node inside the default storage of a tree.
    ///
    /// Keys are cheap to copy and compare, and act as the node handles passed around by the tree's operations.
    pub struct NodeId;
}

/// Trait for arena-like containers which can be the backing storage for trees.
///
/// There's a number of invariants which have to be followed by the container, and trees rely on them for correctness:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - the key returned by `add` must keep resolving to the same element until that element is removed, regardless of other insertions and removals;
/// - once an element is removed, `contains_key`, `get` and `get_mut` must report its key as absent, even if the underlying slot is reused;
/// - if an element is added at a key, it must be retrieveable in the exact same state as it was inserted until it is removed or modified using a method which explicitly does so.
pub trait Storage: Sized {
    /// The type used for element naming.
    type Key: Copy + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Adds an element to the collection with an unspecified key, returning that key.
    fn add(&mut self, element: Self::Element) -> Self::Key;
    /// Removes and returns the element identified by `key` within the storage, or `None` if the key is not present.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Element>;
    /// Returns the number of elements in the storage, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Creates an empty storage with the specified capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns `true` if the specified key is present in the storage, `false` otherwise.
    fn contains_key(&self, key: &Self::Key) -> bool;
    /// Returns a reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get(&self, key: &Self::Key) -> Option<&Self::Element>;
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element>;

    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the amount of elements the storage can hold without requiring a memory allocation.
    ///
    /// The default implementation returns the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
    /// Reserves capacity for at least `additional` more elements to be inserted in the given storage. Does nothing if capacity is already sufficient.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        let _ = additional;
    }
}

/// The default storage type used by the tree types when a storage type is not provided.
///
/// This is a [`SlotMap`] keyed by [`NodeId`].
///
/// [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
/// [`NodeId`]: struct.NodeId.html " "
pub type DefaultStorage<T> = slotmap::SlotMap<NodeId, T>;
