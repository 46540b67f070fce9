//! Target Dispatcher
//!
//! Normalizes a selector, a single element or a list of elements into
//! individual elements and applies one per-element operation to each.

use std::borrow::Cow;

use activate_dom::NodeId;

use crate::host::ActivationHost;
use crate::{ActivateError, Operation, Result};

/// What bind/unbind should act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<'a> {
    /// Resolved against the whole document at call time
    Selector(Cow<'a, str>),
    Element(NodeId),
    /// Applied in order; empty is a no-op
    Elements(Cow<'a, [NodeId]>),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Self::Selector(Cow::Borrowed(selector))
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(selector: &'a String) -> Self {
        Self::Selector(Cow::Borrowed(selector))
    }
}

impl From<String> for Target<'_> {
    fn from(selector: String) -> Self {
        Self::Selector(Cow::Owned(selector))
    }
}

impl From<NodeId> for Target<'_> {
    fn from(element: NodeId) -> Self {
        Self::Element(element)
    }
}

impl<'a> From<&'a [NodeId]> for Target<'a> {
    fn from(elements: &'a [NodeId]) -> Self {
        Self::Elements(Cow::Borrowed(elements))
    }
}

impl<'a> From<&'a Vec<NodeId>> for Target<'a> {
    fn from(elements: &'a Vec<NodeId>) -> Self {
        Self::Elements(Cow::Borrowed(elements))
    }
}

impl From<Vec<NodeId>> for Target<'_> {
    fn from(elements: Vec<NodeId>) -> Self {
        Self::Elements(Cow::Owned(elements))
    }
}

impl<const N: usize> From<[NodeId; N]> for Target<'_> {
    fn from(elements: [NodeId; N]) -> Self {
        Self::Elements(Cow::Owned(elements.to_vec()))
    }
}

/// Resolve `target` and run `apply` on each element, stopping at the
/// first error. A bad selector fails before `apply` runs at all.
pub fn for_each_element<H, F>(
    host: &mut H,
    target: Target<'_>,
    operation: Operation,
    mut apply: F,
) -> Result<()>
where
    H: ActivationHost + ?Sized,
    F: FnMut(&mut H, NodeId) -> Result<()>,
{
    let elements: Cow<'_, [NodeId]> = match target {
        Target::Selector(selector) => {
            let found = host.select_all(&selector).map_err(|source| ActivateError::Selector {
                operation,
                selector: selector.into_owned(),
                source,
            })?;
            Cow::Owned(found)
        }
        Target::Element(element) => Cow::Owned(vec![element]),
        Target::Elements(elements) => elements,
    };

    tracing::trace!("{} over {} element(s)", operation, elements.len());
    for &element in elements.iter() {
        apply(host, element)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use activate_dom::Document;

    fn collect(doc: &mut Document, target: Target<'_>) -> Result<Vec<NodeId>> {
        let mut seen = Vec::new();
        for_each_element(doc, target, Operation::Bind, |_, el| {
            seen.push(el);
            Ok(())
        })?;
        Ok(seen)
    }

    #[test]
    fn test_selector_target() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "span", &[("class", "x")]);
        let b = doc.append_element(body, "span", &[("class", "x")]);

        assert_eq!(collect(&mut doc, ".x".into()).unwrap(), vec![a, b]);
        assert!(collect(&mut doc, ".none".into()).unwrap().is_empty());
    }

    #[test]
    fn test_owned_selector_target() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_element(body, "li", &[]);
        let b = doc.append_element(body, "li", &[]);

        let selector = String::from("li + li");
        assert_eq!(collect(&mut doc, selector.into()).unwrap(), vec![b]);
        assert_eq!(Target::from(String::from("li")), Target::from("li"));

        let err = collect(&mut doc, String::from("li:").into()).unwrap_err();
        assert!(matches!(err, ActivateError::Selector { selector, .. } if selector == "li:"));
    }

    #[test]
    fn test_element_and_collection_targets() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "div", &[]);
        let b = doc.append_element(body, "div", &[]);

        assert_eq!(collect(&mut doc, a.into()).unwrap(), vec![a]);
        assert_eq!(collect(&mut doc, [b, a].into()).unwrap(), vec![b, a]);
        assert!(collect(&mut doc, Vec::<NodeId>::new().into()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_selector_names_operation() {
        let mut doc = Document::new();
        let mut calls = 0;
        let err = for_each_element(&mut doc, "..bad".into(), Operation::Unbind, |_, _| {
            calls += 1;
            Ok(())
        })
        .unwrap_err();

        assert_eq!(calls, 0);
        assert!(err.to_string().contains("unbind"));
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "div", &[]);
        let mut seen = Vec::new();

        let result = for_each_element(&mut doc, vec![a, NodeId::NONE, a].into(), Operation::Bind, |_, el| {
            seen.push(el);
            if el == NodeId::NONE {
                Err(ActivateError::InvalidTarget { operation: Operation::Bind, node: el })
            } else {
                Ok(())
            }
        });

        assert!(result.is_err());
        assert_eq!(seen, vec![a, NodeId::NONE]);
    }
}
