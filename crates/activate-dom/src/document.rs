//! Document - High-level document API

use crate::{
    DomTree, Event, EventDispatcher, EventType, Listener, ListenerTable, NodeId,
    SelectorList, SelectorParseError,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Listeners attached to nodes of this document
    listeners: ListenerTable,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `html > head + body`
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            listeners: ListenerTable::new(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the listener table
    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    // === Tree construction ===

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append `child` to `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.tree.append_child(parent, child)
    }

    /// Detach `child` from `parent`. Listeners stay attached to the node.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.tree.get(child) {
            Some(node) if node.parent == parent => {
                self.tree.detach(child);
                true
            }
            _ => false,
        }
    }

    /// Create an element, give it attributes and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attribute(id, name, value);
        }
        self.append_child(parent, id);
        id
    }

    // === Element access ===

    /// Check that `node` names an element
    pub fn is_element(&self, node: NodeId) -> bool {
        self.tree.get(node).is_some_and(|n| n.is_element())
    }

    /// Lower-case tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tree.get(node)?.as_element().map(|e| e.tag.as_str())
    }

    /// Read an attribute
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.get(node)?.as_element()?.get_attr(name)
    }

    /// Set an attribute. Returns false if `node` is not an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match self.tree.get_mut(node).and_then(|n| n.as_element_mut()) {
            Some(elem) => {
                elem.set_attr(name, value);
                true
            }
            None => false,
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.tree.get_mut(node)?.as_element_mut()?.remove_attr(name)
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node| {
            self.tree
                .get(node)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    // === Selectors ===

    /// All elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorParseError> {
        let list = SelectorList::parse(selector)?;
        let found: Vec<NodeId> = self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| list.matches(&self.tree, node))
            .collect();
        tracing::trace!("Selector {:?} matched {} elements", selector, found.len());
        Ok(found)
    }

    /// First element matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorParseError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    // === Listeners ===

    /// addEventListener. Returns false for duplicates and for unknown nodes.
    pub fn add_event_listener(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> bool {
        if self.tree.get(node).is_none() {
            return false;
        }
        self.listeners.add(node, event_type, listener)
    }

    /// removeEventListener. Returns false if the listener was not attached.
    pub fn remove_event_listener(&mut self, node: NodeId, event_type: EventType, listener: &Listener) -> bool {
        self.listeners.remove(node, event_type, listener)
    }
}

impl EventDispatcher for Document {
    fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool {
        let tag = self.tag_name(target).unwrap_or_default();
        event.set_target(target, tag);

        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .collect();

        for node in path {
            // Snapshot first: listeners added during dispatch do not run for this node
            let listeners = self.listeners.get(node, event.event_type);
            if !listeners.is_empty() {
                event.set_current_target(node);
                for listener in listeners {
                    listener(event, node);
                }
            }
            if event.is_propagation_stopped() || !event.bubbles {
                break;
            }
        }

        event.set_current_target(NodeId::NONE);
        !event.is_default_prevented()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
