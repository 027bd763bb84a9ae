//! Interaction layer for the EdgeLedger landing page: responsive menu, smooth
//! in-page scrolling, the callback form, lazy image reveal and fade-in sections.

pub mod bindings;
pub mod browser;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use bindings::{Bindings, ContactForm};
pub use config::InteractionConfig;
pub use controller::{Controller, LinkAction, SubmitOutcome, Submission};
pub use error::{BindError, ConfigError};
pub use page::{Intersection, Page};
pub use scheduler::{Scheduler, Task, TaskHandle};
