use crate::controller::Submission;

/// Deferred work owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Debounced resize: relayout the menu and re-attach lazy loading.
    Reinitialize,
    AnimateOnScroll,
    CompleteSubmission(Submission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// Runs tasks after a delay. When a task is due the host hands it back to
/// `Controller::run_task` together with its handle.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle;
    /// Cancelling an unknown or already fired handle does nothing.
    fn cancel(&mut self, handle: TaskHandle);
}
