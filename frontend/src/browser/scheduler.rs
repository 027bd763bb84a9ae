use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use super::ControllerSlot;
use crate::scheduler::{Scheduler, Task, TaskHandle};

/// Runs tasks on browser timers. A cancelled task still wakes up but is dropped
/// without reaching the controller.
pub struct BrowserScheduler {
    slot: ControllerSlot,
    next_id: u64,
    pending: Rc<RefCell<HashSet<TaskHandle>>>,
}

impl BrowserScheduler {
    pub fn new(slot: ControllerSlot) -> Self {
        Self {
            slot,
            next_id: 0,
            pending: Rc::new(RefCell::new(HashSet::new())),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.borrow_mut().insert(handle);

        let pending = Rc::clone(&self.pending);
        let slot = self.slot.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let live = pending.borrow_mut().remove(&handle);
            if live {
                slot.with(|controller| controller.run_task(handle, task));
            }
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.borrow_mut().remove(&handle);
    }
}
