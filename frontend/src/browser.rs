//! The real document behind [`Page`], and the wiring that forwards browser
//! events into the controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, ScrollBehavior, ScrollToOptions, Window,
};

use crate::bindings::Bindings;
use crate::config::{InteractionConfig, CONFIG_SCRIPT_ID};
use crate::controller::Controller;
use crate::error::BindError;
use crate::page::{Intersection, Page};

mod listeners;
mod scheduler;

use listeners::Listener;
pub use scheduler::BrowserScheduler;

pub type WebController = Controller<BrowserPage, BrowserScheduler>;

/// Late-bound, non-owning route from callbacks to the controller.
///
/// Closures and timers hold this instead of the controller itself, so dropping
/// [`Interactions`] is enough to free everything.
#[derive(Clone, Default)]
pub struct ControllerSlot(Rc<RefCell<Weak<RefCell<WebController>>>>);

impl ControllerSlot {
    fn fill(&self, controller: &Rc<RefCell<WebController>>) {
        *self.0.borrow_mut() = Rc::downgrade(controller);
    }

    /// Runs `f` against the controller if it is still alive and not already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut WebController) -> R) -> Option<R> {
        let shared = self.0.borrow().upgrade()?;
        let result = match shared.try_borrow_mut() {
            Ok(mut controller) => Some(f(&mut *controller)),
            Err(_) => {
                warn!("controller busy, dropping re-entrant event");
                None
            }
        };
        result
    }
}

pub struct BrowserPage {
    window: Window,
    document: Document,
    observer: IntersectionObserver,
}

fn html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

fn input(node: &Element) -> Option<&HtmlInputElement> {
    let input = node.dyn_ref::<HtmlInputElement>();
    if input.is_none() {
        warn!("<{}> is not an input element", node.tag_name());
    }
    input
}

impl Page for BrowserPage {
    type Node = Element;

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_one(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            warn!("invalid selector {:?}", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn append_div(&self, class: &str) -> Option<Element> {
        let body = self.document.body()?;
        let div = self.document.create_element("div").ok()?;
        div.set_class_name(class);
        body.append_child(&div).ok()?;
        Some(div)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            warn!("failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            warn!("failed to remove class {}: {:?}", class, e);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = html(node) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            warn!("failed to set {}: {:?}", property, e);
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn offset_top(&self, node: &Element) -> f64 {
        html(node).map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, node: &Element) -> f64 {
        html(node).map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn bounding_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn value(&self, node: &Element) -> String {
        input(node).map(HtmlInputElement::value).unwrap_or_default()
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = input(node) {
            input.set_value(value);
        }
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(input) = input(node) {
            input.set_disabled(disabled);
        }
    }

    fn reset_form(&self, form: &Element) {
        match form.dyn_ref::<HtmlFormElement>() {
            Some(form) => form.reset(),
            None => warn!("<{}> is not a form", form.tag_name()),
        }
    }

    fn observe(&self, node: &Element) {
        self.observer.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.observer.unobserve(node);
    }

    fn notify(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!("alert failed: {:?}", e);
        }
    }
}

/// Keeps the page interactions alive. Dropping it detaches every listener,
/// disconnects the observer and cancels pending tasks.
pub struct Interactions {
    controller: Rc<RefCell<WebController>>,
    listeners: Vec<Listener>,
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Interactions {
    /// Leaks the handle so the interactions live as long as the page.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for Interactions {
    fn drop(&mut self) {
        self.listeners.clear();
        self.observer.disconnect();
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.shutdown();
        }
    }
}

fn config_override(document: &Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
}

/// Binds the document, starts the controller and attaches every listener.
pub fn attach() -> Result<Interactions, BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;
    let config = InteractionConfig::from_override(config_override(&document).as_deref());
    let slot = ControllerSlot::default();

    let on_intersect = {
        let slot = slot.clone();
        Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Intersection {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect::<Vec<_>>();
            slot.with(|controller| controller.on_intersection(&entries));
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };
    let observer = IntersectionObserver::new(on_intersect.as_ref().unchecked_ref())
        .map_err(|e| BindError::Observer(format!("{:?}", e)))?;

    let page = BrowserPage {
        window: window.clone(),
        document: document.clone(),
        observer: observer.clone(),
    };
    let view = Bindings::bind(&page, &config)?;
    let scheduler = BrowserScheduler::new(slot.clone());
    let controller = Rc::new(RefCell::new(Controller::new(
        page,
        scheduler,
        config,
        view.clone(),
    )));
    slot.fill(&controller);

    let listeners = listeners::wire(&slot, &window, &document, &view)?;
    controller.borrow_mut().start();

    Ok(Interactions {
        controller,
        listeners,
        observer,
        _on_intersect: on_intersect,
    })
}

fn start() {
    match attach() {
        Ok(interactions) => interactions.forget(),
        Err(err) => error!("page interactions disabled: {}", err),
    }
}

/// Starts the interactions once the document structure is ready.
pub fn run() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        error!("page interactions disabled: {}", BindError::NoDocument);
        return;
    };

    if document.ready_state() != "loading" {
        start();
        return;
    }

    let on_ready = Closure::once_into_js(start);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
    {
        error!("failed to wait for DOMContentLoaded: {:?}", e);
    }
}
