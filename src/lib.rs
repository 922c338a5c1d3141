//! An arena-allocated freeform tree which keeps an aggregate of every subtree up to date under structural edits.
//!
//! # Overview
//! Every node of an [`AggregateTree`] holds a key, and the tree holds one binary function, such as addition, multiplication, maximum or exclusive or, which is fixed when the tree is created. Besides its key, every node caches the *subtree value*: the node's key combined with the subtree values of all of its children. Reading the aggregate of any subtree is therefore a single lookup.
//!
//! The tree supports three structural edits, all of which restore the cached values before returning:
//! - `put` attaches a detached node as the last child of a parent;
//! - `flatten` collapses a subtree into a single leaf, folding all of its keys with a separately provided function;
//! - `swap` exchanges the positions of two nodes along with their subtrees.
//!
//! Nodes live in an arena, as described by Ben Lovy in ["arena-allocated trees"][arena tree blog post], and are addressed by copyable handles. The default arena is a [`SlotMap`], the generational keys of which make handles to nodes discarded by `flatten` detectably stale instead of silently aliasing newer nodes.
//!
//! # Storage
//! The trait used for defining the "arena" type is [`Storage`]. [`SlotMap`] and [`DenseSlotMap`] implement it out of the box, and any other arena with stable, generation-checked keys can be plugged in by implementing it.
//!
//! # Logging
//! Structural edits emit [`tracing`] spans and events: `debug` for every edit and its outcome, `trace` for every node visited while propagating aggregates. Nothing is recorded unless the application installs a subscriber.
//!
//! # Feature flags
//! - `std` (**enabled by default**) - enables the full standard library, disabling `no_std` for the crate. The error types implement [`Error`] either way, through `core::error` when the standard library is disabled.
//!
//! # Public dependencies
//! - `slotmap` - `^1.0`
//!
//! [`AggregateTree`]: aggregate_tree/struct.AggregateTree.html " "
//! [`Storage`]: storage/trait.Storage.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`tracing`]: https://docs.rs/tracing/*/tracing/ " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    // sick of this stupid lint, disabling
    // clippy::module_name_repetitions,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage, NodeId};

pub mod aggregate_tree;
pub use aggregate_tree::AggregateTree;

/// A prelude for using the crate, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        DefaultStorage as DefaultTreeStorage,
        NodeId as TreeNodeId,
    };
    #[doc(no_inline)]
    pub use crate::aggregate_tree::{
        AggregateTree,
        Node as AggregateTreeNode,
        NodeRef as AggregateTreeNodeRef,
    };
}

use thiserror::Error;

/// The error type returned by [`AggregateTree::create_root`].
///
/// [`AggregateTree::create_root`]: aggregate_tree/struct.AggregateTree.html#method.create_root " "
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Error)]
pub enum CreateRootError {
    /// The tree already has a root node, and there can only be one.
    #[error("the tree already has a root node")]
    RootAlreadyExists,
}

/// The error type returned by [`AggregateTree::put`]. The tree is left unmodified whenever one is returned.
///
/// [`AggregateTree::put`]: aggregate_tree/struct.AggregateTree.html#method.put " "
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Error)]
pub enum PutError {
    /// The parent handle does not point to a node of the tree.
    #[error("the parent node does not exist in the tree")]
    NoSuchParent,
    /// The child handle does not point to a node of the tree.
    #[error("the child node does not exist in the tree")]
    NoSuchChild,
    /// The parent and the child were the same node.
    #[error("cannot make a node a child of itself")]
    SameNode,
    /// The child was the root node, which cannot have a parent.
    #[error("cannot attach the root node of a tree to a parent")]
    WasRootNode,
    /// The child was already attached to a parent. Nodes cannot be moved once attached, other than by `swap`.
    #[error("the child node is already attached to a parent")]
    AlreadyAttached,
    /// The parent was inside the subtree of the child, and attaching them would create a cycle.
    #[error("the parent node is a descendant of the child node")]
    ParentInSubtree,
}

/// The error type returned by [`AggregateTree::swap`]. The tree is left unmodified whenever one is returned.
///
/// [`AggregateTree::swap`]: aggregate_tree/struct.AggregateTree.html#method.swap " "
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Error)]
pub enum SwapError {
    /// One of the handles does not point to a node of the tree.
    #[error("one of the nodes does not exist in the tree")]
    NoSuchNode,
    /// One of the nodes was the root node, which has no slot in a parent to exchange.
    #[error("cannot swap the root node of a tree")]
    WasRootNode,
    /// One of the nodes was a detached node, which has no slot in a parent to exchange.
    #[error("cannot swap a node which is not attached to a parent")]
    WasDetachedNode,
    /// One of the nodes was an ancestor of the other, and exchanging them would create a cycle.
    #[error("cannot swap a node with one of its own ancestors or descendants")]
    Nested,
}

/// The error type returned by operations which take a single node handle, when the handle does not point to a node of the tree.
///
/// Handles become invalid when the nodes they point to are discarded by `flatten`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Error)]
#[error("the node does not exist in the tree")]
pub struct NoSuchNodeError;
