//! Activate DOM - host document for activation bindings
//!
//! Arena-based element tree with just enough of the platform for
//! keyboard activation: tag names and attributes, selector lookup,
//! per-node event listeners and synchronous dispatch.

mod node;
mod tree;
mod document;
pub mod selector;
pub mod events;
pub mod listeners;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::DomTree;
pub use document::Document;
pub use selector::{SelectorList, SelectorParseError};
pub use events::{Event, EventType, EventDispatcher};
pub use listeners::{Listener, ListenerId, ListenerTable, listener};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
