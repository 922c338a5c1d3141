use core::{
    fmt::{self, Formatter, Debug},
    iter::FusedIterator,
    slice,
};
use crate::storage::{Storage, DefaultStorage, NodeId};
use super::{AggregateTree, Node};

/// A reference to a node in an aggregate tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to walk to the node's parent and children.
pub struct NodeRef<'a, T, F, K = NodeId, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    pub(super) tree: &'a AggregateTree<T, F, K, S>,
    pub(super) key: K,
}
impl<'a, T, F, K, S> NodeRef<'a, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if the key does not exist.
    pub fn new_raw(tree: &'a AggregateTree<T, F, K, S>, key: K) -> Option<Self> {
        if tree.storage.contains_key(&key) {
            Some(Self { tree, key })
        } else {
            None
        }
    }
    /// Returns the raw storage key for the node, which is the handle accepted by the tree's operations.
    pub fn raw_key(&self) -> K {
        self.key
    }
    /// Returns the record of the node itself.
    pub fn node(&self) -> &'a Node<T, K> {
        self.tree.node_checked(&self.key)
    }
    /// Returns the key stored in the node.
    pub fn key(&self) -> &'a T {
        &self.node().key
    }
    /// Returns the cached aggregate of the node's subtree.
    pub fn subtree_value(&self) -> &'a T {
        &self.node().subtree_value
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root or a detached node.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|key| Self {
            tree: self.tree,
            key,
        })
    }
    /// Returns `true` if the node is the root node of the tree, `false` otherwise.
    ///
    /// Detached nodes have no parent either, but are not the root.
    pub fn is_root(&self) -> bool {
        self.tree.root == Some(self.key)
    }
    /// Returns `true` if the node is a leaf, i.e. has no children.
    pub fn is_external(&self) -> bool {
        self.node().is_external()
    }
    /// Returns the raw keys of the children of the node, in order.
    pub fn get_children(&self) -> &'a [K] {
        &self.node().children
    }
    /// Returns an iterator over references to the direct children of the node, in order.
    pub fn children(&self) -> NodeChildrenIter<'a, T, F, K, S> {
        NodeChildrenIter {
            tree: self.tree,
            keys: self.get_children().iter(),
        }
    }
}
impl<T, F, K, S> Copy for NodeRef<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<T, F, K, S> Clone for NodeRef<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F, K, S> Debug for NodeRef<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// An iterator over references to the children of an aggregate tree node.
pub struct NodeChildrenIter<'a, T, F, K = NodeId, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    tree: &'a AggregateTree<T, F, K, S>,
    keys: slice::Iter<'a, K>,
}
impl<'a, T, F, K, S> Iterator for NodeChildrenIter<'a, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    type Item = NodeRef<'a, T, F, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next().map(|&key| NodeRef {
            tree: self.tree,
            key,
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}
impl<T, F, K, S> Debug for NodeChildrenIter<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeChildrenIter")
            .field(&self.keys.as_slice())
            .finish()
    }
}
impl<T, F, K, S> ExactSizeIterator for NodeChildrenIter<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<T, F, K, S> FusedIterator for NodeChildrenIter<'_, T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
