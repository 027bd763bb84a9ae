use log::Level;
use serde::Deserialize;

use crate::error::ConfigError;

/// Id of the optional `<script type="application/json">` element carrying overrides.
pub const CONFIG_SCRIPT_ID: &str = "interaction-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Everything the page interactions need to know about the markup and timing.
///
/// Defaults match the EdgeLedger landing page. A page can override any subset
/// by embedding JSON in `<script id="interaction-config">`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Viewport widths at or below this value are treated as mobile.
    pub mobile_breakpoint: f64,
    /// Scroll offset past which the navbar gets its `scrolled` style.
    pub navbar_scroll_threshold: f64,
    pub resize_debounce_ms: u32,
    pub submit_delay_ms: u32,
    pub animation_initial_delay_ms: u32,
    /// Sections fade in once their top passes `viewport_height / reveal_ratio`.
    pub reveal_ratio: f64,
    /// Anchor id that always scrolls to the very top.
    pub home_anchor: String,
    pub ids: ElementIds,
    pub selectors: Selectors,
    pub classes: ClassNames,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 780.0,
            navbar_scroll_threshold: 100.0,
            resize_debounce_ms: 250,
            submit_delay_ms: 1500,
            animation_initial_delay_ms: 300,
            reveal_ratio: 1.2,
            home_anchor: "home".to_string(),
            ids: ElementIds::default(),
            selectors: Selectors::default(),
            classes: ClassNames::default(),
        }
    }
}

impl InteractionConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Applies an optional override document, falling back to defaults when it is unusable.
    pub fn from_override(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Self::from_json(raw).unwrap_or_else(|e| {
                log::warn!("{}; using default interaction config", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub hamburger: String,
    pub nav_menu: String,
    pub navbar: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub submit: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            hamburger: "hamburger".to_string(),
            nav_menu: "nav-menu".to_string(),
            navbar: "js-navbar".to_string(),
            name: "name".to_string(),
            email: "email".to_string(),
            phone: "phone".to_string(),
            submit: "submit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub contact_form: String,
    pub nav_links: String,
    pub images: String,
    pub animated: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            contact_form: ".callback-form".to_string(),
            nav_links: "#nav-menu a".to_string(),
            images: "img".to_string(),
            animated: ".icons .flex-items > div, .section-header, .team .flex-items > div"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Marks the hamburger, nav menu and overlay while the menu is open.
    pub open: String,
    pub mobile: String,
    pub scrolled: String,
    pub overlay: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            open: "active".to_string(),
            mobile: "mobile-active".to_string(),
            scrolled: "scrolled".to_string(),
            overlay: "overlay".to_string(),
        }
    }
}
