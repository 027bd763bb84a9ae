use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Window};

use super::ControllerSlot;
use crate::bindings::Bindings;
use crate::controller::LinkAction;
use crate::error::BindError;

/// An attached event listener, removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, BindError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| BindError::Listener {
                event,
                reason: format!("{:?}", e),
            })?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to detach `{}` listener: {:?}", self.event, e);
        }
    }
}

/// Attaches the handlers for every bound element.
pub(super) fn wire(
    slot: &ControllerSlot,
    window: &Window,
    document: &Document,
    view: &Bindings<Element>,
) -> Result<Vec<Listener>, BindError> {
    let mut listeners = Vec::new();

    listeners.push(Listener::new(&view.hamburger, "click", {
        let slot = slot.clone();
        move |event: Event| {
            // keeps the document-level outside-click check from seeing this click
            event.stop_propagation();
            slot.with(|controller| controller.on_hamburger_click());
        }
    })?);

    listeners.push(Listener::new(&view.overlay, "click", {
        let slot = slot.clone();
        move |_| {
            slot.with(|controller| controller.on_overlay_click());
        }
    })?);

    listeners.push(Listener::new(document, "click", {
        let slot = slot.clone();
        move |event: Event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            slot.with(|controller| controller.on_document_click(target.as_ref()));
        }
    })?);

    listeners.push(Listener::new(document, "keydown", {
        let slot = slot.clone();
        move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                slot.with(|controller| controller.on_key_down(&key));
            }
        }
    })?);

    for link in &view.nav_links {
        let slot = slot.clone();
        let anchor = link.clone();
        listeners.push(Listener::new(link, "click", move |event: Event| {
            let href = anchor.get_attribute("href").unwrap_or_default();
            if slot.with(|controller| controller.on_anchor_click(&href)) == Some(LinkAction::Intercepted) {
                event.prevent_default();
            }
        })?);
    }

    listeners.push(Listener::new(window, "scroll", {
        let slot = slot.clone();
        move |_| {
            slot.with(|controller| controller.on_scroll());
        }
    })?);

    listeners.push(Listener::new(window, "resize", {
        let slot = slot.clone();
        move |_| {
            slot.with(|controller| controller.on_resize());
        }
    })?);

    if let Some(contact) = &view.contact {
        let slot = slot.clone();
        listeners.push(Listener::new(&contact.form, "submit", move |event: Event| {
            event.prevent_default();
            slot.with(|controller| controller.on_submit());
        })?);
    }

    debug!("attached {} listeners", listeners.len());
    Ok(listeners)
}
