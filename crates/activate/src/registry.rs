//! Binding Registry
//!
//! Tracks, per element and per callback, which key wrappers were attached
//! so unbind removes exactly what bind added. Elements that are not
//! button-like also get one shared keydown listener that cancels the page
//! scroll on Space; it lives as long as the element has any binding.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use activate_dom::{listener, Event, EventType, Listener, ListenerId, NodeId};

use crate::classify::{classify, ElementKind};
use crate::host::ActivationHost;
use crate::keys::{is_enter_key, is_space, is_space_key};
use crate::{ActivateError, ActivationConfig, Operation, Result};

type WeakListener = Weak<dyn Fn(&mut Event, NodeId)>;

/// What bind attached for one (element, callback) pair
struct Binding {
    kind: ElementKind,
    /// Keeps the callback allocation alive so its `ListenerId` cannot be reused
    callback: WeakListener,
    /// keyup wrapper
    space: Option<Listener>,
    /// keydown wrapper
    enter: Option<Listener>,
}

impl Binding {
    fn is_for(&self, callback: &Listener) -> bool {
        Weak::ptr_eq(&self.callback, &Rc::downgrade(callback))
    }
}

#[derive(Default)]
struct ElementEntry {
    bindings: HashMap<ListenerId, Binding>,
    scroll_guard: Option<Listener>,
}

/// Per-element, per-callback record of attached activation listeners
#[derive(Default)]
pub struct Registry {
    elements: HashMap<NodeId, ElementEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `callback` fire on click, Space release and Enter press of
    /// `element`. Binding an already-bound pair does nothing.
    pub fn bind<H: ActivationHost + ?Sized>(
        &mut self,
        host: &mut H,
        element: NodeId,
        callback: &Listener,
        config: &ActivationConfig,
    ) -> Result<()> {
        if !host.is_element(element) {
            return Err(ActivateError::InvalidTarget { operation: Operation::Bind, node: element });
        }
        if self.is_bound(element, callback) {
            tracing::trace!("{:?} already bound to {:?}", ListenerId::of(callback), element);
            return Ok(());
        }

        host.add_listener(element, EventType::Click, callback.clone());

        let kind = classify(
            host.tag_name(element).unwrap_or_default(),
            host.attribute(element, "type"),
            config,
        );

        let binding = match kind {
            ElementKind::Button => Binding {
                kind,
                callback: Rc::downgrade(callback),
                space: None,
                enter: None,
            },
            ElementKind::Link => {
                let space = key_wrapper(callback, is_space_key);
                host.add_listener(element, EventType::KeyUp, space.clone());
                Binding {
                    kind,
                    callback: Rc::downgrade(callback),
                    space: Some(space),
                    enter: None,
                }
            }
            ElementKind::Generic => {
                let space = key_wrapper(callback, is_space_key);
                let enter = key_wrapper(callback, is_enter_key);
                host.add_listener(element, EventType::KeyUp, space.clone());
                host.add_listener(element, EventType::KeyDown, enter.clone());
                Binding {
                    kind,
                    callback: Rc::downgrade(callback),
                    space: Some(space),
                    enter: Some(enter),
                }
            }
        };

        let entry = self.elements.entry(element).or_default();
        if kind != ElementKind::Button && entry.scroll_guard.is_none() {
            let guard = scroll_guard(config);
            host.add_listener(element, EventType::KeyDown, guard.clone());
            entry.scroll_guard = Some(guard);
        }
        entry.bindings.insert(ListenerId::of(callback), binding);

        tracing::debug!("Bound {:?} to {:?} ({:?})", ListenerId::of(callback), element, kind);
        Ok(())
    }

    /// Remove what a matching `bind` attached. The click listener is
    /// always removed; unbinding an unknown pair does nothing else.
    pub fn unbind<H: ActivationHost + ?Sized>(
        &mut self,
        host: &mut H,
        element: NodeId,
        callback: &Listener,
    ) -> Result<()> {
        if !host.is_element(element) {
            return Err(ActivateError::InvalidTarget { operation: Operation::Unbind, node: element });
        }

        host.remove_listener(element, EventType::Click, callback);

        let id = ListenerId::of(callback);
        let Some(entry) = self.elements.get_mut(&element) else {
            return Ok(());
        };
        let Some(binding) = entry.bindings.remove(&id) else {
            return Ok(());
        };

        match binding.kind {
            ElementKind::Button => {}
            ElementKind::Link => {
                if let Some(space) = &binding.space {
                    host.remove_listener(element, EventType::KeyUp, space);
                }
            }
            ElementKind::Generic => {
                if let Some(space) = &binding.space {
                    host.remove_listener(element, EventType::KeyUp, space);
                }
                if let Some(enter) = &binding.enter {
                    host.remove_listener(element, EventType::KeyDown, enter);
                }
            }
        }

        if entry.bindings.is_empty() {
            if let Some(guard) = entry.scroll_guard.take() {
                host.remove_listener(element, EventType::KeyDown, &guard);
            }
            self.elements.remove(&element);
        }

        tracing::debug!("Unbound {:?} from {:?}", id, element);
        Ok(())
    }

    /// Check whether `callback` is bound to `element`
    pub fn is_bound(&self, element: NodeId, callback: &Listener) -> bool {
        self.elements
            .get(&element)
            .and_then(|entry| entry.bindings.get(&ListenerId::of(callback)))
            .is_some_and(|b| b.is_for(callback))
    }

    /// Classification recorded when the pair was bound
    pub fn binding_kind(&self, element: NodeId, callback: &Listener) -> Option<ElementKind> {
        self.elements
            .get(&element)
            .and_then(|entry| entry.bindings.get(&ListenerId::of(callback)))
            .filter(|b| b.is_for(callback))
            .map(|b| b.kind)
    }

    /// Number of callbacks bound to `element`
    pub fn bound_callbacks(&self, element: NodeId) -> usize {
        self.elements.get(&element).map_or(0, |entry| entry.bindings.len())
    }

    /// Whether the shared Space scroll guard is attached to `element`
    pub fn has_scroll_guard(&self, element: NodeId) -> bool {
        self.elements
            .get(&element)
            .is_some_and(|entry| entry.scroll_guard.is_some())
    }

    /// Number of elements with at least one binding
    pub fn bound_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("elements", &self.elements.len())
            .field(
                "bindings",
                &self.elements.values().map(|e| e.bindings.len()).sum::<usize>(),
            )
            .finish()
    }
}

/// Listener that forwards to `callback` only when the event's key passes
/// `accepts`. Holds the callback weakly; the caller owns it.
fn key_wrapper(callback: &Listener, accepts: fn(&str) -> bool) -> Listener {
    let callback: WeakListener = Rc::downgrade(callback);
    listener(move |event, element| {
        if !event.key.as_deref().is_some_and(accepts) {
            return;
        }
        if let Some(callback) = callback.upgrade() {
            tracing::trace!("{} {:?} activates {:?}", event.event_type, event.key, element);
            callback(event, element);
        }
    })
}

/// Shared keydown listener cancelling the default scroll on Space
fn scroll_guard(config: &ActivationConfig) -> Listener {
    let config = config.clone();
    listener(move |event, _| {
        if is_space(event) && !config.allows_native_space(event.target_tag()) {
            tracing::trace!("Suppressing Space scroll on {:?}", event.target());
            event.prevent_default();
        }
    })
}
