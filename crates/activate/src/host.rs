//! Host document seam
//!
//! The registry only needs element identity, tag/type lookup, listener
//! attach/detach and selector resolution from the document it works on.

use activate_dom::{Document, EventType, Listener, NodeId, SelectorParseError};

/// Document and event system the activation registry attaches to
pub trait ActivationHost {
    /// Check that `node` is a live element handle
    fn is_element(&self, node: NodeId) -> bool;

    /// Lower-case tag name
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Attribute value
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Attach a listener. Returns false if it was already attached.
    fn add_listener(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> bool;

    /// Detach a listener. Returns false if it was not attached.
    fn remove_listener(&mut self, node: NodeId, event_type: EventType, listener: &Listener) -> bool;

    /// Resolve a selector against the whole document, in document order
    fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorParseError>;
}

impl ActivationHost for Document {
    fn is_element(&self, node: NodeId) -> bool {
        Document::is_element(self, node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        Document::tag_name(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get_attribute(node, name)
    }

    fn add_listener(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> bool {
        self.add_event_listener(node, event_type, listener)
    }

    fn remove_listener(&mut self, node: NodeId, event_type: EventType, listener: &Listener) -> bool {
        self.remove_event_listener(node, event_type, listener)
    }

    fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorParseError> {
        self.query_selector_all(selector)
    }
}
