use log::debug;

use super::Controller;
use crate::page::Page;
use crate::scheduler::{Scheduler, Task, TaskHandle};

pub const VALIDATION_NOTICE: &str = "Please fill in all fields";
pub const PENDING_LABEL: &str = "Sending...";

/// A callback request captured at submit time, completed after the simulated latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Submit label to restore once the request completes.
    pub original_label: String,
}

impl Submission {
    pub fn confirmation(&self) -> String {
        format!(
            "Thank you {}! We will contact you at {} or {} within 24 hours.",
            self.name, self.email, self.phone
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page has no contact form.
    NoForm,
    /// A required field was empty; the visitor was told so.
    Rejected,
    Pending(TaskHandle),
}

impl<P: Page, S: Scheduler> Controller<P, S> {
    /// Handles a submit of the contact form. The caller always prevents the default.
    ///
    /// Resubmitting while a request is pending is not guarded: each valid submit
    /// schedules its own completion.
    pub fn on_submit(&mut self) -> SubmitOutcome {
        let Some(contact) = self.view.contact.as_ref() else {
            return SubmitOutcome::NoForm;
        };

        let name = self.page.value(&contact.name);
        let email = self.page.value(&contact.email);
        let phone = self.page.value(&contact.phone);
        if name.is_empty() || email.is_empty() || phone.is_empty() {
            self.page.notify(VALIDATION_NOTICE);
            return SubmitOutcome::Rejected;
        }

        let original_label = self.page.value(&contact.submit);
        self.page.set_value(&contact.submit, PENDING_LABEL);
        self.page.set_disabled(&contact.submit, true);

        let submission = Submission {
            name,
            email,
            phone,
            original_label,
        };
        let delay = self.config.submit_delay_ms;
        let handle = self
            .scheduler
            .schedule(delay, Task::CompleteSubmission(submission));
        self.submissions.push(handle);
        debug!("contact submission pending ({}ms)", delay);
        SubmitOutcome::Pending(handle)
    }

    pub(super) fn complete_submission(&mut self, submission: Submission) {
        let Some(contact) = self.view.contact.as_ref() else {
            return;
        };
        self.page.notify(&submission.confirmation());
        self.page.reset_form(&contact.form);
        self.page.set_value(&contact.submit, &submission.original_label);
        self.page.set_disabled(&contact.submit, false);
    }
}
