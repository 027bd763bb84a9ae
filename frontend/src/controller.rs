use log::{debug, info};

use crate::bindings::Bindings;
use crate::config::InteractionConfig;
use crate::page::Page;
use crate::scheduler::{Scheduler, Task, TaskHandle};

mod contact;
mod menu;
mod navigation;
mod reveal;

pub use contact::{SubmitOutcome, Submission, PENDING_LABEL, VALIDATION_NOTICE};
pub use navigation::LinkAction;

/// A node whose hidden-to-visible transition happens at most once.
#[derive(Debug, Clone)]
struct Tracked<N> {
    node: N,
    revealed: bool,
}

impl<N> Tracked<N> {
    fn pending(node: N) -> Self {
        Self { node, revealed: false }
    }
}

/// Owns every piece of state behind the page interactions.
///
/// Browser events and due tasks are forwarded to the `on_*` handlers and to
/// [`Controller::run_task`]; nothing else mutates the page.
pub struct Controller<P: Page, S: Scheduler> {
    page: P,
    scheduler: S,
    config: InteractionConfig,
    view: Bindings<P::Node>,
    images: Vec<Tracked<P::Node>>,
    sections: Vec<Tracked<P::Node>>,
    resize_task: Option<TaskHandle>,
    initial_check: Option<TaskHandle>,
    submissions: Vec<TaskHandle>,
}

impl<P: Page, S: Scheduler> Controller<P, S> {
    pub fn new(page: P, scheduler: S, config: InteractionConfig, view: Bindings<P::Node>) -> Self {
        Self {
            page,
            scheduler,
            config,
            view,
            images: Vec::new(),
            sections: Vec::new(),
            resize_task: None,
            initial_check: None,
            submissions: Vec::new(),
        }
    }

    /// Applies the initial layout and schedules the first animation pass.
    pub fn start(&mut self) {
        self.initialize_menu();
        self.lazy_load_images();
        self.prepare_sections();

        let delay = self.config.animation_initial_delay_ms;
        self.initial_check = Some(self.scheduler.schedule(delay, Task::AnimateOnScroll));

        info!("EdgeLedger loaded successfully");
        info!(
            "hamburger menu active at or below {}px",
            self.config.mobile_breakpoint
        );
    }

    /// Cancels every pending task. Handlers keep working afterwards.
    pub fn shutdown(&mut self) {
        let pending = self
            .resize_task
            .take()
            .into_iter()
            .chain(self.initial_check.take())
            .chain(self.submissions.drain(..))
            .collect::<Vec<_>>();
        for handle in &pending {
            self.scheduler.cancel(*handle);
        }
        debug!("cancelled {} pending tasks", pending.len());
    }

    pub fn run_task(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::Reinitialize => {
                if self.resize_task == Some(handle) {
                    self.resize_task = None;
                }
                self.reinitialize();
            }
            Task::AnimateOnScroll => {
                if self.initial_check == Some(handle) {
                    self.initial_check = None;
                }
                self.animate_on_scroll();
            }
            Task::CompleteSubmission(submission) => {
                self.submissions.retain(|pending| *pending != handle);
                self.complete_submission(submission);
            }
        }
    }

    /// Restarts the quiet period; only the last resize in a burst reinitializes.
    pub fn on_resize(&mut self) {
        if let Some(handle) = self.resize_task.take() {
            self.scheduler.cancel(handle);
        }
        let delay = self.config.resize_debounce_ms;
        self.resize_task = Some(self.scheduler.schedule(delay, Task::Reinitialize));
    }

    fn reinitialize(&mut self) {
        debug!("reinitializing at width {}", self.page.viewport_width());
        self.initialize_menu();
        self.lazy_load_images();
    }

    pub fn view(&self) -> &Bindings<P::Node> {
        &self.view
    }

    pub fn is_mobile(&self) -> bool {
        self.page.viewport_width() <= self.config.mobile_breakpoint
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize_task.is_some()
    }
}
