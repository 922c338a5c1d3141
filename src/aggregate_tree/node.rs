use core::fmt::Debug;
use smallvec::SmallVec;

/// Inline capacity of a node's child list before it spills onto the heap.
pub(super) const INLINE_CHILDREN: usize = 4;

pub(super) type ChildList<K> = SmallVec<[K; INLINE_CHILDREN]>;

/// A node of an aggregate tree.
///
/// Nodes are passive records: they are created and mutated only by the tree which owns them, and are publicly exposed so that the tree's storage type could be named and so that their fields could be read through [`AggregateTree::get`].
///
/// [`AggregateTree::get`]: struct.AggregateTree.html#method.get " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<T, K>
where
    K: Copy + Debug + Eq,
{
    pub(super) key: T,
    pub(super) parent: Option<K>,
    pub(super) children: ChildList<K>,
    pub(super) subtree_value: T,
}
impl<T, K> Node<T, K>
where
    T: Clone,
    K: Copy + Debug + Eq,
{
    /// Creates a detached leaf, the subtree value of which is its own key.
    #[inline]
    pub(crate) fn detached(key: T) -> Self {
        Self {
            subtree_value: key.clone(),
            key,
            parent: None,
            children: ChildList::new(),
        }
    }
}
impl<T, K> Node<T, K>
where
    K: Copy + Debug + Eq,
{
    /// Returns the key stored in the node.
    #[inline(always)]
    pub fn key(&self) -> &T {
        &self.key
    }
    /// Returns the cached aggregate of the subtree rooted at this node.
    ///
    /// For a leaf, this is always equal to its key.
    #[inline(always)]
    pub fn subtree_value(&self) -> &T {
        &self.subtree_value
    }
    /// Returns the key of the parent node, or `None` if this is the root or a detached node.
    #[inline(always)]
    pub fn parent(&self) -> Option<K> {
        self.parent
    }
    /// Returns `true` if the node has no children, `false` otherwise. A root without children is external too.
    #[inline(always)]
    pub fn is_external(&self) -> bool {
        self.children.is_empty()
    }
    /// Returns the keys of the children of the node, in insertion order.
    #[inline(always)]
    pub fn get_children(&self) -> &[K] {
        &self.children
    }
}
