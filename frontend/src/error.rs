use thiserror::Error;

/// Reasons the page interactions could not be wired up at startup.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("document is not available")]
    NoDocument,

    #[error("document has no <body>")]
    NoBody,

    #[error("missing required elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),

    #[error("contact form is missing fields: {}", .0.join(", "))]
    IncompleteForm(Vec<String>),

    #[error("could not create the menu overlay")]
    Overlay,

    #[error("failed to attach `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },

    #[error("failed to create intersection observer: {0}")]
    Observer(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid interaction config: {0}")]
    Json(#[from] serde_json::Error),
}
