//! In-memory page and virtual clock for exercising the controller natively.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::bindings::Bindings;
use crate::config::InteractionConfig;
use crate::controller::Controller;
use crate::page::Page;
use crate::scheduler::{Scheduler, Task, TaskHandle};

pub const ANIMATED: &str = ".icons .flex-items > div, .section-header, .team .flex-items > div";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default, PartialEq)]
struct FakeElement {
    tag: String,
    id: Option<String>,
    parent: Option<NodeId>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    selectors: Vec<String>,
    offset_top: f64,
    offset_height: f64,
    bounding_top: f64,
    value: String,
    default_value: String,
    disabled: bool,
}

#[derive(Debug, Default)]
struct PageState {
    width: f64,
    height: f64,
    scroll_y: f64,
    elements: Vec<FakeElement>,
    observed: BTreeSet<NodeId>,
    notices: Vec<String>,
    scroll_requests: Vec<f64>,
}

/// Visible state of every element, for before/after comparisons.
pub type Snapshot = Vec<(BTreeSet<String>, BTreeMap<String, String>, String, bool)>;

/// Shared handle: clones see the same document.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    state: Rc<RefCell<PageState>>,
}

impl FakePage {
    pub fn new(width: f64, height: f64) -> Self {
        let page = Self::default();
        {
            let mut state = page.state.borrow_mut();
            state.width = width;
            state.height = height;
        }
        page.element("body", None);
        page
    }

    /// The EdgeLedger landing page: navbar with menu, three sections, two images,
    /// three animated blocks and the callback form.
    pub fn landing(width: f64) -> Self {
        let page = Self::landing_without_form(width);
        let body = NodeId(0);

        let form = page.element("form", Some(body));
        page.matching(form, ".callback-form");
        for id in ["name", "email", "phone"] {
            page.element_with_id("input", Some(form), id);
        }
        let submit = page.element_with_id("input", Some(form), "submit");
        page.with_element(submit, |el| {
            el.value = "Send Request".to_string();
            el.default_value = "Send Request".to_string();
        });
        page
    }

    pub fn landing_without_form(width: f64) -> Self {
        let page = Self::new(width, 800.0);
        let body = NodeId(0);

        let navbar = page.element_with_id("nav", Some(body), "js-navbar");
        page.set_offset(navbar, 0.0, 80.0);
        page.element_with_id("button", Some(navbar), "hamburger");
        let menu = page.element_with_id("ul", Some(navbar), "nav-menu");
        for (id, top) in [("home", 0.0), ("services", 900.0), ("contact", 1800.0)] {
            let link = page.element("a", Some(menu));
            page.matching(link, "#nav-menu a");
            let section = page.element_with_id("section", Some(body), id);
            page.set_offset(section, top, 700.0);
        }
        for top in [200.0, 1_500.0] {
            let image = page.element("img", Some(body));
            page.set_bounding_top(image, top);
        }
        for top in [400.0, 900.0, 1_400.0] {
            let block = page.element("div", Some(body));
            page.matching(block, ANIMATED);
            page.set_bounding_top(block, top);
        }
        page
    }

    pub fn element(&self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.elements.push(FakeElement {
            tag: tag.to_string(),
            parent,
            ..Default::default()
        });
        NodeId(state.elements.len() - 1)
    }

    pub fn element_with_id(&self, tag: &str, parent: Option<NodeId>, id: &str) -> NodeId {
        let node = self.element(tag, parent);
        self.with_element(node, |el| el.id = Some(id.to_string()));
        node
    }

    pub fn matching(&self, node: NodeId, selector: &str) {
        self.with_element(node, |el| el.selectors.push(selector.to_string()));
    }

    pub fn set_offset(&self, node: NodeId, top: f64, height: f64) {
        self.with_element(node, |el| {
            el.offset_top = top;
            el.offset_height = height;
        });
    }

    pub fn set_bounding_top(&self, node: NodeId, top: f64) {
        self.with_element(node, |el| el.bounding_top = top);
    }

    pub fn detach_id(&self, id: &str) {
        let node = self.node_by_id(id);
        self.with_element(node, |el| el.id = None);
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.state.borrow_mut().width = width;
    }

    pub fn set_scroll_y(&self, offset: f64) {
        self.state.borrow_mut().scroll_y = offset;
    }

    pub fn node_by_id(&self, id: &str) -> NodeId {
        self.element_by_id(id)
            .unwrap_or_else(|| panic!("no element with id {id}"))
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.state.borrow().elements[node.0].parent
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.state.borrow().elements[node.0].styles.get(property).cloned()
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.state.borrow().elements[node.0].disabled
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.state.borrow().observed.contains(&node)
    }

    pub fn notices(&self) -> Vec<String> {
        self.state.borrow().notices.clone()
    }

    pub fn scroll_requests(&self) -> Vec<f64> {
        self.state.borrow().scroll_requests.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state
            .borrow()
            .elements
            .iter()
            .map(|el| (el.classes.clone(), el.styles.clone(), el.value.clone(), el.disabled))
            .collect()
    }

    fn with_element(&self, node: NodeId, f: impl FnOnce(&mut FakeElement)) {
        f(&mut self.state.borrow_mut().elements[node.0]);
    }

    fn matches(el: &FakeElement, selector: &str) -> bool {
        el.tag == selector
            || el.selectors.iter().any(|s| s == selector)
            || selector
                .strip_prefix('#')
                .is_some_and(|id| el.id.as_deref() == Some(id))
            || selector
                .strip_prefix('.')
                .is_some_and(|class| el.classes.contains(class))
    }
}

impl Page for FakePage {
    type Node = NodeId;

    fn viewport_width(&self) -> f64 {
        self.state.borrow().width
    }

    fn viewport_height(&self) -> f64 {
        self.state.borrow().height
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.state.borrow_mut().scroll_requests.push(top);
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.state
            .borrow()
            .elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_one(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.state
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| Self::matches(el, selector))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn body(&self) -> Option<NodeId> {
        self.query_one("body")
    }

    fn append_div(&self, class: &str) -> Option<NodeId> {
        let body = self.body()?;
        let node = self.element("div", Some(body));
        self.add_class(&node, class);
        Some(node)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_element(*node, |el| {
            el.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_element(*node, |el| {
            el.classes.remove(class);
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.state.borrow().elements[node.0].classes.contains(class)
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_element(*node, |el| {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        });
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let state = self.state.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = state.elements[id.0].parent;
        }
        false
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.state.borrow().elements[node.0].offset_top
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.state.borrow().elements[node.0].offset_height
    }

    fn bounding_top(&self, node: &NodeId) -> f64 {
        self.state.borrow().elements[node.0].bounding_top
    }

    fn value(&self, input: &NodeId) -> String {
        self.state.borrow().elements[input.0].value.clone()
    }

    fn set_value(&self, input: &NodeId, value: &str) {
        self.with_element(*input, |el| el.value = value.to_string());
    }

    fn set_disabled(&self, input: &NodeId, disabled: bool) {
        self.with_element(*input, |el| el.disabled = disabled);
    }

    fn reset_form(&self, form: &NodeId) {
        let fields: Vec<NodeId> = (0..self.state.borrow().elements.len())
            .map(NodeId)
            .filter(|node| node != form && self.contains(form, node))
            .collect();
        for field in fields {
            self.with_element(field, |el| el.value = el.default_value.clone());
        }
    }

    fn observe(&self, node: &NodeId) {
        self.state.borrow_mut().observed.insert(*node);
    }

    fn unobserve(&self, node: &NodeId) {
        self.state.borrow_mut().observed.remove(node);
    }

    fn notify(&self, message: &str) {
        self.state.borrow_mut().notices.push(message.to_string());
    }
}

#[derive(Debug)]
struct Pending {
    due: u64,
    handle: TaskHandle,
    task: Task,
}

#[derive(Debug, Default)]
struct Clock {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Scheduler driven by explicit calls to [`VirtualScheduler::pop_due`].
#[derive(Debug, Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl VirtualScheduler {
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Removes the earliest task due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&self, until: u64) -> Option<(TaskHandle, Task)> {
        let mut clock = self.clock.borrow_mut();
        let index = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= until)
            .min_by_key(|(_, pending)| (pending.due, pending.handle))
            .map(|(index, _)| index)?;
        let pending = clock.pending.remove(index);
        clock.now = pending.due;
        Some((pending.handle, pending.task))
    }

    fn set_now(&self, now: u64) {
        self.clock.borrow_mut().now = now;
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let handle = TaskHandle(clock.next_id);
        let due = clock.now + u64::from(delay_ms);
        clock.pending.push(Pending { due, handle, task });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.clock
            .borrow_mut()
            .pending
            .retain(|pending| pending.handle != handle);
    }
}

/// A started controller over a [`FakePage`], with virtual time.
pub struct Harness {
    pub page: FakePage,
    pub scheduler: VirtualScheduler,
    pub controller: Controller<FakePage, VirtualScheduler>,
    ran: Vec<Task>,
}

impl Harness {
    pub fn landing(width: f64) -> Self {
        Self::start(FakePage::landing(width))
    }

    pub fn landing_without_form(width: f64) -> Self {
        Self::start(FakePage::landing_without_form(width))
    }

    pub fn start(page: FakePage) -> Self {
        let config = InteractionConfig::default();
        let view = Bindings::bind(&page, &config).expect("landing page binds");
        let scheduler = VirtualScheduler::default();
        let mut controller = Controller::new(page.clone(), scheduler.clone(), config, view);
        controller.start();
        Self {
            page,
            scheduler,
            controller,
            ran: Vec::new(),
        }
    }

    /// Moves virtual time forward, running every task that falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some((handle, task)) = self.scheduler.pop_due(until) {
            self.ran.push(task.clone());
            self.controller.run_task(handle, task);
        }
        self.scheduler.set_now(until);
    }

    pub fn fill_form(&self, name: &str, email: &str, phone: &str) {
        for (id, value) in [("name", name), ("email", email), ("phone", phone)] {
            let node = self.page.node_by_id(id);
            self.page.set_value(&node, value);
        }
    }

    pub fn tasks_run(&self) -> &[Task] {
        &self.ran
    }

    pub fn ran(&self, predicate: impl Fn(&Task) -> bool) -> usize {
        self.ran.iter().filter(|task| predicate(*task)).count()
    }
}
