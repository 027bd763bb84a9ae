use log::debug;

use super::Controller;
use crate::page::Page;
use crate::scheduler::Scheduler;

/// What the browser should do with a clicked link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Not an in-page link; let the browser navigate.
    Follow,
    /// Default navigation must be suppressed.
    Intercepted,
}

impl<P: Page, S: Scheduler> Controller<P, S> {
    /// Document offset to scroll to for the anchor `id`, compensating for the fixed navbar.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        let target = self.page.element_by_id(id)?;
        if id == self.config.home_anchor {
            return Some(0.0);
        }
        Some(self.page.offset_top(&target) - self.page.offset_height(&self.view.navbar))
    }

    pub fn on_anchor_click(&mut self, href: &str) -> LinkAction {
        let Some(id) = href.strip_prefix('#') else {
            return LinkAction::Follow;
        };

        if let Some(top) = self.scroll_target(id) {
            if self.is_mobile() && self.is_menu_open() {
                self.close_menu();
            }
            debug!("scrolling to #{} at {}", id, top);
            self.page.smooth_scroll_to(top);
        }
        LinkAction::Intercepted
    }

    pub fn update_navbar(&mut self) {
        let class = &self.config.classes.scrolled;
        if self.page.scroll_y() > self.config.navbar_scroll_threshold {
            self.page.add_class(&self.view.navbar, class);
        } else {
            self.page.remove_class(&self.view.navbar, class);
        }
    }

    pub fn on_scroll(&mut self) {
        self.update_navbar();
        self.animate_on_scroll();
    }
}
