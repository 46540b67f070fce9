//! DOM Events
//!
//! Pointer and keyboard events delivered to element listeners.

use crate::NodeId;

/// Event types a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    KeyUp,
}

impl EventType {
    /// DOM event name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// `KeyboardEvent.key`; `None` for pointer events and for keyboards
    /// that report no key identifier
    pub key: Option<String>,
    /// Auto-repeat from a held key
    pub repeat: bool,
    pub bubbles: bool,
    pub cancelable: bool,
    target: NodeId,
    current_target: NodeId,
    target_tag: String,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    fn new(event_type: EventType, key: Option<String>) -> Self {
        Self {
            event_type,
            key,
            repeat: false,
            bubbles: true,
            cancelable: true,
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            target_tag: String::new(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create click event
    pub fn click() -> Self {
        Self::new(EventType::Click, None)
    }

    /// Create keydown event
    pub fn key_down(key: &str) -> Self {
        Self::new(EventType::KeyDown, Some(key.to_string()))
    }

    /// Create keyup event
    pub fn key_up(key: &str) -> Self {
        Self::new(EventType::KeyUp, Some(key.to_string()))
    }

    /// Keydown carrying no key identifier
    pub fn key_down_unidentified() -> Self {
        Self::new(EventType::KeyDown, None)
    }

    /// Keyup carrying no key identifier
    pub fn key_up_unidentified() -> Self {
        Self::new(EventType::KeyUp, None)
    }

    /// Mark as auto-repeat
    pub fn with_repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Make the event non-cancelable
    pub fn non_cancelable(mut self) -> Self {
        self.cancelable = false;
        self
    }

    /// Node the event was dispatched to
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Lower-case tag name of the target element
    pub fn target_tag(&self) -> &str {
        &self.target_tag
    }

    /// Called by dispatchers before the first listener runs
    pub fn set_target(&mut self, target: NodeId, tag: &str) {
        self.target = target;
        self.target_tag.clear();
        self.target_tag.push_str(tag);
    }

    /// Called by dispatchers as the event moves between nodes
    pub fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Deliver `event` to `target` and its ancestors. Returns false if a
    /// listener canceled the event.
    fn dispatch_event(&self, target: NodeId, event: &mut Event) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events() {
        let down = Event::key_down("Enter").with_repeat();
        assert_eq!(down.event_type, EventType::KeyDown);
        assert_eq!(down.key.as_deref(), Some("Enter"));
        assert!(down.repeat);

        let up = Event::key_up_unidentified();
        assert_eq!(up.event_type, EventType::KeyUp);
        assert!(up.key.is_none());
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut event = Event::click();
        event.prevent_default();
        assert!(event.is_default_prevented());

        let mut event = Event::click().non_cancelable();
        event.prevent_default();
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::Click.to_string(), "click");
        assert_eq!(EventType::KeyDown.as_str(), "keydown");
        assert_eq!(EventType::KeyUp.as_str(), "keyup");
    }
}
