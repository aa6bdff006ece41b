//! Fluent navigation from a credentialed root down to nested resources.
//!
//! ```text
//! Tracker
//! └── ProjectsFacade ─── ProjectCreateFacade
//!     └── ProjectFacade
//!         ├── MembershipsFacade
//!         └── ProjectStoriesFacade ─── StoryCreationFacade
//!             ├── StoryFacade<ProjectStoriesFacade>
//!             └── StoriesFacade
//!                 └── StoryFacade<StoriesFacade>
//! ```
//!
//! Every node keeps its parent and the root, so the single [`Credential`]
//! of a chain is reachable from any node without being passed again. Nodes
//! are immutable: each navigation, read or write returns a new node and
//! leaves the one it was called on untouched. Each call builds its own
//! repository; nothing mutable is shared between calls.
//!
//! [`Credential`]: crate::Credential

mod memberships;
mod project;
mod projects;
mod root;
mod stories;
mod story;

use std::sync::Arc;

pub use memberships::MembershipsFacade;
pub use project::ProjectFacade;
pub use projects::{ProjectCreateFacade, ProjectsFacade};
pub use root::Tracker;
pub use stories::{ProjectStoriesFacade, StoriesFacade, StoryCreationFacade};
pub use story::{StoryFacade, StoryParent};

/// Any node of a facade chain, root included.
pub trait Node {
    /// The root of the chain this node belongs to.
    fn root(&self) -> &Tracker;
}

/// A node below the root.
pub trait Child: Node {
    type Parent: Node + Clone;

    fn parent(&self) -> &Self::Parent;

    /// Step back up to the parent node.
    fn done(&self) -> Self::Parent {
        self.parent().clone()
    }
}

/// A node's position in its chain.
#[derive(Debug)]
pub(crate) struct Link<P> {
    parent: Arc<P>,
    root: Tracker,
}

impl<P: Node + Clone> Link<P> {
    /// Link a new child under `parent`, inheriting its root.
    pub(crate) fn under(parent: &P) -> Self {
        Self {
            parent: Arc::new(parent.clone()),
            root: parent.root().clone(),
        }
    }
}

impl<P> Clone for Link<P> {
    fn clone(&self) -> Self {
        Self {
            parent: Arc::clone(&self.parent),
            root: self.root.clone(),
        }
    }
}

/// Implement [`Node`] and [`Child`] for a facade holding a `link` field.
macro_rules! chain_node {
    ($node:ty => $parent:ty) => {
        impl $crate::facade::Node for $node {
            fn root(&self) -> &$crate::facade::Tracker {
                &self.link.root
            }
        }

        impl $crate::facade::Child for $node {
            type Parent = $parent;

            fn parent(&self) -> &$parent {
                &self.link.parent
            }
        }
    };
}

pub(crate) use chain_node;
