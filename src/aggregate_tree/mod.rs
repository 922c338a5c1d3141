//! Aggregate trees, freeform trees which cache the aggregate of every subtree at its root.
//!
//! Each node holds a key, and the tree holds one binary function fixed at construction. The subtree value of a node is its own key combined with the subtree values of its children, from left to right. The structural edits ([`put`], [`flatten`] and [`swap`]) restore those cached values by walking from the edited spot up to the top of the tree, which costs time proportional to the depth rather than the size of the tree.
//!
//! The function is expected to be associative and commutative. The tree never checks that; it combines values in the order described above and trusts the caller.
//!
//! # Example
//! ```rust
//! use aggregate_tree::AggregateTree;
//!
//! // A tree which keeps track of the maximum key in every subtree. The turbofish there is needed
//! // to state that we are using the default storage method instead of asking the compiler to
//! // infer it, which would be impossible.
//! let mut tree = AggregateTree::<i64, _>::new(|a: &i64, b: &i64| *a.max(b));
//! let root = tree.create_root(5).unwrap();
//!
//! // Nodes are created detached and only join the tree once they are put under a parent.
//! let a = tree.new_node(10);
//! let b = tree.new_node(8);
//! tree.put(root, a).unwrap();
//! tree.put(root, b).unwrap();
//! assert_eq!(tree.get(root).unwrap().subtree_value(), &10);
//!
//! // Flattening collapses a subtree into its top node, using a separate function for the job.
//! let c = tree.new_node(3);
//! tree.put(b, c).unwrap();
//! tree.flatten(b, |x: &i64, y: &i64| x * y).unwrap();
//! assert_eq!(tree.get(b).unwrap().key(), &24);
//! assert_eq!(tree.get(root).unwrap().subtree_value(), &24);
//! ```
//!
//! [`put`]: struct.AggregateTree.html#method.put " "
//! [`flatten`]: struct.AggregateTree.html#method.flatten " "
//! [`swap`]: struct.AggregateTree.html#method.swap " "

use core::{
    fmt::{self, Formatter, Debug},
    iter,
    mem,
};
use smallvec::SmallVec;
use tracing::{debug, instrument, trace};
use crate::{
    storage::{Storage, DefaultStorage, NodeId},
    CreateRootError,
    NoSuchNodeError,
    PutError,
    SwapError,
};

mod node;
mod node_ref;

pub use node::Node;
pub use node_ref::{NodeRef, NodeChildrenIter};

const INLINE_STACK_SIZE: usize = 32;

type Stack<K> = SmallVec<[K; INLINE_STACK_SIZE]>;

/// A tree which maintains the aggregate of every subtree under structural edits.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone)]
pub struct AggregateTree<T, F, K = NodeId, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    storage: S,
    root: Option<K>,
    aggregate: F,
}
impl<T, F, K, S> AggregateTree<T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Creates an empty tree which aggregates subtrees with the specified function.
    ///
    /// The tree has no root until [`create_root`] is called.
    ///
    /// [`create_root`]: #method.create_root " "
    #[inline]
    pub fn new(aggregate: F) -> Self {
        Self {
            storage: S::new(),
            root: None,
            aggregate,
        }
    }
    /// Creates an empty tree with the specified capacity for the storage.
    ///
    /// # Example
    /// ```rust
    /// # use aggregate_tree::AggregateTree;
    /// let tree = AggregateTree::<u32, _>::with_capacity(16, |a: &u32, b: &u32| a + b);
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize, aggregate: F) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            root: None,
            aggregate,
        }
    }

    /// Creates the root node with the specified key and returns its handle.
    ///
    /// # Errors
    /// Fails if the tree already has a root. The existing root is left untouched.
    #[instrument(level = "debug", skip_all)]
    pub fn create_root(&mut self, key: T) -> Result<K, CreateRootError> {
        if self.root.is_some() {
            return Err(CreateRootError::RootAlreadyExists);
        }
        let root = self.storage.add(Node::detached(key));
        self.root = Some(root);
        debug!(?root, "created root node");
        Ok(root)
    }
    /// Creates a detached node with the specified key and returns its handle.
    ///
    /// The node is not reachable from the root until it is attached with [`put`].
    ///
    /// [`put`]: #method.put " "
    pub fn new_node(&mut self, key: T) -> K {
        let node = self.storage.add(Node::detached(key));
        trace!(?node, "created detached node");
        node
    }
    /// Attaches `child` as the last child of `parent`, then propagates the new aggregate from `parent` upward.
    ///
    /// `parent` does not need to be reachable from the root: detached subtrees can be assembled first and grafted onto the tree afterwards. The child's own subtree value is left as it is.
    ///
    /// # Errors
    /// Nothing is modified if any of those hold:
    /// - either handle does not point to a node of this tree;
    /// - `parent` and `child` are the same node;
    /// - `child` is the root node;
    /// - `child` is already attached to a parent;
    /// - `parent` is inside the subtree of `child`, which would create a cycle.
    ///
    /// # Example
    /// ```rust
    /// # use aggregate_tree::{AggregateTree, PutError};
    /// let mut tree = AggregateTree::<i32, _>::new(|a: &i32, b: &i32| a ^ b);
    /// let root = tree.create_root(1).unwrap();
    /// let a = tree.new_node(0);
    /// let b = tree.new_node(1);
    ///
    /// tree.put(root, a).unwrap();
    /// tree.put(root, b).unwrap();
    /// assert_eq!(tree.get(root).unwrap().subtree_value(), &0);
    /// assert_eq!(tree.get(root).unwrap().get_children(), &[a, b]);
    ///
    /// // A node can only have one parent.
    /// assert_eq!(tree.put(a, b), Err(PutError::AlreadyAttached));
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn put(&mut self, parent: K, child: K) -> Result<(), PutError> {
        if !self.storage.contains_key(&parent) {
            return Err(PutError::NoSuchParent);
        }
        let child_parent = self.storage.get(&child).ok_or(PutError::NoSuchChild)?.parent;
        if parent == child {
            return Err(PutError::SameNode);
        }
        if self.root == Some(child) {
            return Err(PutError::WasRootNode);
        }
        if child_parent.is_some() {
            return Err(PutError::AlreadyAttached);
        }
        if self.is_ancestor(child, parent) {
            return Err(PutError::ParentInSubtree);
        }

        self.node_checked_mut(&parent).children.push(child);
        self.node_checked_mut(&child).parent = Some(parent);
        debug!("attached node");
        self.update_subtree(parent);
        Ok(())
    }
    /// Collapses the subtree rooted at `node` into `node` itself, using `aggregate` instead of the tree's own function, and returns `node`.
    ///
    /// The new key is the node's own key followed by every descendant key, folded depth-first in pre-order: each child's whole subtree is folded before moving on to the next sibling. That order only matters if `aggregate` is not commutative, in which case the result is unspecified. The node becomes a leaf whose key and subtree value are both the folded result, all of its descendants are removed from the storage, and their handles become invalid. If the node has a parent, the change is propagated upward; a flattened root is simply left as a lone leaf.
    ///
    /// Flattening a leaf does nothing and never calls `aggregate`.
    ///
    /// # Errors
    /// Fails if the handle does not point to a node of this tree.
    #[instrument(level = "debug", skip(self, aggregate))]
    pub fn flatten<G>(&mut self, node: K, mut aggregate: G) -> Result<K, NoSuchNodeError>
    where
        G: FnMut(&T, &T) -> T,
    {
        let target = self.storage.get(&node).ok_or(NoSuchNodeError)?;
        if target.is_external() {
            return Ok(node);
        }

        let mut value = target.key.clone();
        let mut stack = target.children.iter().rev().copied().collect::<Stack<K>>();
        let mut discarded = Stack::new();
        while let Some(key) = stack.pop() {
            let descendant = self.node_checked(&key);
            value = aggregate(&value, &descendant.key);
            stack.extend(descendant.children.iter().rev().copied());
            discarded.push(key);
        }
        for key in &discarded {
            self.storage.remove(key);
        }

        let target = self.node_checked_mut(&node);
        target.children.clear();
        target.subtree_value = value.clone();
        target.key = value;
        let parent = target.parent;
        debug!(discarded = discarded.len(), "flattened subtree");
        if let Some(parent) = parent {
            self.update_subtree(parent);
        }
        Ok(node)
    }
    /// Exchanges the positions of two nodes along with their entire subtrees.
    ///
    /// Each node takes the other's slot in its parent's child list, so swapping two siblings exchanges their order and swapping the same pair twice restores the original tree. Neither subtree is modified internally; only the ancestors of both nodes get their aggregates recomputed. Swapping a node with itself does nothing.
    ///
    /// # Errors
    /// Nothing is modified if any of those hold:
    /// - either handle does not point to a node of this tree;
    /// - either node is the root node;
    /// - either node is a detached node without a parent;
    /// - one node is an ancestor of the other.
    ///
    /// # Example
    /// ```rust
    /// # use aggregate_tree::AggregateTree;
    /// let mut tree = AggregateTree::<i64, _>::new(|a: &i64, b: &i64| *a.max(b));
    /// let root = tree.create_root(5).unwrap();
    /// let c = tree.new_node(2);
    /// let d = tree.new_node(8);
    /// let b = tree.new_node(10);
    /// tree.put(root, c).unwrap();
    /// tree.put(root, d).unwrap();
    /// tree.put(c, b).unwrap();
    /// assert_eq!(tree.get(c).unwrap().subtree_value(), &10);
    ///
    /// tree.swap(b, d).unwrap();
    /// assert_eq!(tree.get(c).unwrap().get_children(), &[d]);
    /// assert_eq!(tree.get(c).unwrap().subtree_value(), &8);
    /// assert_eq!(tree.get(root).unwrap().subtree_value(), &10);
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn swap(&mut self, node_a: K, node_b: K) -> Result<(), SwapError> {
        let a_parent = self.storage.get(&node_a).ok_or(SwapError::NoSuchNode)?.parent;
        let b_parent = self.storage.get(&node_b).ok_or(SwapError::NoSuchNode)?.parent;
        if node_a == node_b {
            return Ok(());
        }
        let (a_parent, b_parent) = match (a_parent, b_parent) {
            (Some(a_parent), Some(b_parent)) => (a_parent, b_parent),
            _ if self.root == Some(node_a) || self.root == Some(node_b) => {
                return Err(SwapError::WasRootNode);
            }
            _ => return Err(SwapError::WasDetachedNode),
        };
        if self.is_ancestor(node_a, node_b) || self.is_ancestor(node_b, node_a) {
            return Err(SwapError::Nested);
        }

        // Aggregates have no inverse: reset both chains and fold them again after relinking.
        self.reset_chain(a_parent);
        self.reset_chain(b_parent);

        let a_index = self.child_index(a_parent, node_a);
        let b_index = self.child_index(b_parent, node_b);
        if a_parent == b_parent {
            self.node_checked_mut(&a_parent).children.swap(a_index, b_index);
        } else {
            self.node_checked_mut(&a_parent).children[a_index] = node_b;
            self.node_checked_mut(&b_parent).children[b_index] = node_a;
            self.node_checked_mut(&node_a).parent = Some(b_parent);
            self.node_checked_mut(&node_b).parent = Some(a_parent);
        }
        debug!("swapped subtrees");

        // Each walk passes through the node's new parent, and the second one also repairs the
        // common ancestors which the first one folded while the other chain was still reset.
        self.update_subtree(node_a);
        self.update_subtree(node_b);
        Ok(())
    }
    /// Replaces the key of a node, propagates the change upward, and returns the previous key.
    ///
    /// # Errors
    /// Fails if the handle does not point to a node of this tree.
    #[instrument(level = "debug", skip(self, key))]
    pub fn replace_key(&mut self, node: K, key: T) -> Result<T, NoSuchNodeError> {
        let target = self.storage.get_mut(&node).ok_or(NoSuchNodeError)?;
        let previous = mem::replace(&mut target.key, key);
        self.update_subtree(node);
        Ok(previous)
    }

    /// Recomputes the subtree value of `node` from its key and its children's current values, then does the same for every ancestor.
    fn update_subtree(&mut self, node: K) {
        let mut cursor = Some(node);
        while let Some(key) = cursor {
            let value = self.fold_children(&key);
            let current = self.node_checked_mut(&key);
            current.subtree_value = value;
            cursor = current.parent;
            trace!(node = ?key, "updated subtree value");
        }
    }
    fn fold_children(&self, key: &K) -> T {
        let node = self.node_checked(key);
        node.children.iter().fold(node.key.clone(), |value, child| {
            (self.aggregate)(&value, &self.node_checked(child).subtree_value)
        })
    }
    fn reset_chain(&mut self, top: K) {
        let mut cursor = Some(top);
        while let Some(key) = cursor {
            let current = self.node_checked_mut(&key);
            current.subtree_value = current.key.clone();
            cursor = current.parent;
        }
    }
}
impl<T, F, K, S> AggregateTree<T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
    /// Returns a reference to the root node of the tree, or `None` if it has not been created yet.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, T, F, K, S>> {
        self.root.map(|key| NodeRef { tree: self, key })
    }
    /// Returns the handle of the root node, or `None` if it has not been created yet.
    #[inline(always)]
    pub fn root_key(&self) -> Option<K> {
        self.root
    }
    /// Returns the node behind a handle, or `None` if the handle is invalid.
    #[inline]
    pub fn get(&self, node: K) -> Option<&Node<T, K>> {
        self.storage.get(&node)
    }
    /// Returns a reference to the node behind a handle which can be used to walk the tree, or `None` if the handle is invalid.
    #[inline]
    pub fn node(&self, node: K) -> Option<NodeRef<'_, T, F, K, S>> {
        NodeRef::new_raw(self, node)
    }
    /// Returns `true` if the handle points to a node of this tree, `false` otherwise.
    ///
    /// Handles of nodes discarded by [`flatten`] are invalid.
    ///
    /// [`flatten`]: #method.flatten " "
    #[inline]
    pub fn contains(&self, node: K) -> bool {
        self.storage.contains_key(&node)
    }
    /// Returns the number of nodes held by the tree, including detached ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns `true` if the tree holds no nodes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
    /// Returns the function used to aggregate subtrees.
    #[inline(always)]
    pub fn aggregate_fn(&self) -> &F {
        &self.aggregate
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `node`.
    fn is_ancestor(&self, ancestor: K, node: K) -> bool {
        iter::successors(self.node_checked(&node).parent, |key| {
            self.node_checked(key).parent
        })
        .any(|key| key == ancestor)
    }
    fn child_index(&self, parent: K, child: K) -> usize {
        self.node_checked(&parent)
            .children
            .iter()
            .position(|&key| key == child)
            .unwrap_or_else(|| panic!("node {:?} is missing from its parent's child list", child))
    }
    #[track_caller]
    pub(crate) fn node_checked(&self, key: &K) -> &Node<T, K> {
        self.storage
            .get(key)
            .unwrap_or_else(|| panic!("invalid node key: {:?}", key))
    }
    #[track_caller]
    fn node_checked_mut(&mut self, key: &K) -> &mut Node<T, K> {
        self.storage
            .get_mut(key)
            .unwrap_or_else(|| panic!("invalid node key: {:?}", key))
    }
}
impl<T, F, K, S> Debug for AggregateTree<T, F, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K> + Debug,
    K: Copy + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateTree")
            .field("storage", &self.storage)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// An aggregate tree which uses a `SlotMap` as backing storage.
///
/// The default `AggregateTree` type already uses this, so this is only provided for explicitness and consistency.
pub type SlotMapAggregateTree<T, F> =
    AggregateTree<T, F, NodeId, slotmap::SlotMap<NodeId, Node<T, NodeId>>>;
/// An aggregate tree which uses a `DenseSlotMap` as backing storage, trading slower lookups for faster iteration of the underlying storage and less memory wasted on removed nodes.
pub type DenseSlotMapAggregateTree<T, F> =
    AggregateTree<T, F, NodeId, slotmap::DenseSlotMap<NodeId, Node<T, NodeId>>>;
