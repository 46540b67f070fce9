//! Activate
//!
//! Gives arbitrary elements button-style keyboard activation: one
//! callback fires on click, on Space release and on Enter press (with
//! key repeat), without doubling up on what buttons and links already do
//! natively.
//!
//! # Example
//! ```rust
//! use activate::{listener, Activator};
//! use activate_dom::{Document, Event, EventDispatcher};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let card = doc.append_element(body, "div", &[("class", "card")]);
//!
//! let mut activator = Activator::new();
//! let on_activate = listener(|_, _| println!("activated"));
//! activator.bind(&mut doc, ".card", &on_activate)?;
//!
//! doc.dispatch_event(card, &mut Event::key_down("Enter"));
//!
//! activator.unbind(&mut doc, card, &on_activate)?;
//! # Ok::<(), activate::ActivateError>(())
//! ```

mod config;
mod error;
pub mod classify;
pub mod dispatch;
pub mod host;
pub mod keys;
pub mod registry;

pub use activate_dom::{listener, Listener, NodeId};
pub use classify::{classify, ElementKind};
pub use config::ActivationConfig;
pub use dispatch::Target;
pub use error::{ActivateError, Operation, Result};
pub use host::ActivationHost;
pub use registry::Registry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owns a binding registry and the classification tables it uses
#[derive(Debug, Default)]
pub struct Activator {
    registry: Registry,
    config: ActivationConfig,
}

impl Activator {
    /// Create with default classification tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom classification tables
    pub fn with_config(config: ActivationConfig) -> Self {
        Self { registry: Registry::new(), config }
    }

    pub fn config(&self) -> &ActivationConfig {
        &self.config
    }

    /// Read-only view of the bindings
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Bind `callback` to every element named by `target`
    pub fn bind<'t, H: ActivationHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: impl Into<Target<'t>>,
        callback: &Listener,
    ) -> Result<()> {
        let config = &self.config;
        let registry = &mut self.registry;
        dispatch::for_each_element(host, target.into(), Operation::Bind, |host, element| {
            registry.bind(host, element, callback, config)
        })
    }

    /// Undo `bind` for every element named by `target`
    pub fn unbind<'t, H: ActivationHost + ?Sized>(
        &mut self,
        host: &mut H,
        target: impl Into<Target<'t>>,
        callback: &Listener,
    ) -> Result<()> {
        let registry = &mut self.registry;
        dispatch::for_each_element(host, target.into(), Operation::Unbind, |host, element| {
            registry.unbind(host, element, callback)
        })
    }

    /// Check whether `callback` is bound to `element`
    pub fn is_bound(&self, element: NodeId, callback: &Listener) -> bool {
        self.registry.is_bound(element, callback)
    }
}
