//! Element classification

use crate::ActivationConfig;

/// How much of the activation behavior an element already has natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Enter keydown and Space keyup already click
    Button,
    /// Enter keydown already clicks, Space does not
    Link,
    /// No native keyboard activation
    Generic,
}

/// Classify an element from its tag name and `type` attribute
pub fn classify(tag: &str, type_attr: Option<&str>, config: &ActivationConfig) -> ElementKind {
    if config.is_button_tag(tag) {
        return ElementKind::Button;
    }
    if tag.eq_ignore_ascii_case("input") && type_attr.is_some_and(|t| config.is_button_input_type(t)) {
        return ElementKind::Button;
    }
    if config.is_link_tag(tag) {
        return ElementKind::Link;
    }
    ElementKind::Generic
}
