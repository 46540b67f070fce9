//! Example: make a few elements keyboard-activatable
//!
//! Run with `RUST_LOG=activate=trace` to see bindings and wrapper firing.

use activate::{listener, Activator};
use activate_dom::{Document, Event, EventDispatcher};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();
    let card = doc.append_element(body, "div", &[("class", "card")]);
    let link = doc.append_element(body, "a", &[("class", "card"), ("href", "#details")]);
    let button = doc.append_element(body, "button", &[("class", "card")]);

    let mut activator = Activator::new();
    let on_activate = listener(|event, element| {
        println!("activated {:?} via {} {:?}", element, event.event_type, event.key);
    });
    activator.bind(&mut doc, ".card", &on_activate)?;

    for node in [card, link, button] {
        doc.dispatch_event(node, &mut Event::click());
        doc.dispatch_event(node, &mut Event::key_up(" "));
        doc.dispatch_event(node, &mut Event::key_down("Enter"));
    }

    let mut space = Event::key_down(" ");
    let scroll = doc.dispatch_event(card, &mut space);
    println!("page scrolls on Space over the card: {scroll}");

    activator.unbind(&mut doc, ".card", &on_activate)?;
    println!("listeners left: {}", doc.listeners().total());
    Ok(())
}
