//! Event Listeners
//!
//! Per-node listener lists with DOM deduplication semantics: adding the
//! same listener twice for one event type is a no-op, and removing one
//! that is not present is a no-op.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::{Event, EventType, NodeId};

/// Event listener. Receives the event and the node it is attached to.
pub type Listener = Rc<dyn Fn(&mut Event, NodeId)>;

/// Wrap a closure as a [`Listener`]
pub fn listener(f: impl Fn(&mut Event, NodeId) + 'static) -> Listener {
    Rc::new(f)
}

/// Listener identity: the address of its allocation. Clones of one `Rc`
/// share an id; separately created closures never do while both are alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    pub fn of(listener: &Listener) -> Self {
        Self(Rc::as_ptr(listener) as *const () as usize)
    }
}

/// Listener storage for all nodes of a document
#[derive(Default)]
pub struct ListenerTable {
    /// node -> event type -> listeners in registration order
    listeners: HashMap<NodeId, HashMap<EventType, Vec<Listener>>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Returns false if it was already registered.
    pub fn add(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> bool {
        let list = self.listeners
            .entry(node)
            .or_default()
            .entry(event_type)
            .or_default();

        if list.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return false;
        }
        list.push(listener);
        true
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, node: NodeId, event_type: EventType, listener: &Listener) -> bool {
        let Some(by_type) = self.listeners.get_mut(&node) else {
            return false;
        };
        let Some(list) = by_type.get_mut(&event_type) else {
            return false;
        };
        let Some(pos) = list.iter().position(|l| Rc::ptr_eq(l, listener)) else {
            return false;
        };

        list.remove(pos);
        if list.is_empty() {
            by_type.remove(&event_type);
            if by_type.is_empty() {
                self.listeners.remove(&node);
            }
        }
        true
    }

    /// Clone the listener list so dispatch can run without borrowing the table
    pub fn get(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(&event_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Check whether a specific listener is registered
    pub fn contains(&self, node: NodeId, event_type: EventType, listener: &Listener) -> bool {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(&event_type))
            .is_some_and(|list| list.iter().any(|l| Rc::ptr_eq(l, listener)))
    }

    /// Number of listeners for a node and event type
    pub fn count(&self, node: NodeId, event_type: EventType) -> usize {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(&event_type))
            .map_or(0, Vec::len)
    }

    /// Number of listeners on a node across all event types
    pub fn count_for_node(&self, node: NodeId) -> usize {
        self.listeners
            .get(&node)
            .map_or(0, |by_type| by_type.values().map(Vec::len).sum())
    }

    /// Total listeners in the document
    pub fn total(&self) -> usize {
        self.listeners
            .values()
            .flat_map(|by_type| by_type.values())
            .map(Vec::len)
            .sum()
    }

    /// Identity snapshot of a node's listeners, for before/after comparison
    pub fn snapshot(&self, node: NodeId) -> BTreeSet<(EventType, ListenerId)> {
        self.listeners
            .get(&node)
            .into_iter()
            .flat_map(|by_type| {
                by_type.iter().flat_map(|(&ty, list)| {
                    list.iter().map(move |l| (ty, ListenerId::of(l)))
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("nodes", &self.listeners.len())
            .field("total", &self.total())
            .finish()
    }
}
