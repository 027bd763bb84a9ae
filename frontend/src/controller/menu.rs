use log::debug;

use super::Controller;
use crate::page::Page;
use crate::scheduler::Scheduler;

impl<P: Page, S: Scheduler> Controller<P, S> {
    pub fn is_menu_open(&self) -> bool {
        self.page.has_class(&self.view.nav_menu, &self.config.classes.open)
    }

    /// Lays the menu out for the current width, always leaving it closed.
    pub fn initialize_menu(&mut self) {
        let mobile = self.is_mobile();
        if mobile {
            self.page.add_class(&self.view.nav_menu, &self.config.classes.mobile);
        } else {
            self.page.remove_class(&self.view.nav_menu, &self.config.classes.mobile);
        }
        self.set_menu_open(false);
        debug!("menu initialized (mobile: {})", mobile);
    }

    /// Flips the menu on mobile widths; does nothing on desktop.
    pub fn toggle_menu(&mut self) {
        if !self.is_mobile() {
            return;
        }
        let open = !self.is_menu_open();
        self.set_menu_open(open);
        debug!("menu toggled (open: {})", open);
    }

    pub fn close_menu(&mut self) {
        self.set_menu_open(false);
    }

    pub fn on_hamburger_click(&mut self) {
        self.toggle_menu();
    }

    pub fn on_overlay_click(&mut self) {
        self.close_menu();
    }

    /// Clicks that land outside the menu and the hamburger close an open mobile menu.
    /// A missing target counts as outside.
    pub fn on_document_click(&mut self, target: Option<&P::Node>) {
        if !self.is_mobile() || !self.is_menu_open() {
            return;
        }
        let inside = target.is_some_and(|target| {
            self.page.contains(&self.view.nav_menu, target)
                || self.page.contains(&self.view.hamburger, target)
        });
        if !inside {
            self.close_menu();
        }
    }

    pub fn on_key_down(&mut self, key: &str) {
        if key == "Escape" && self.is_menu_open() {
            self.close_menu();
        }
    }

    // Hamburger, nav menu and overlay always carry the same open marker.
    fn set_menu_open(&self, open: bool) {
        let class = &self.config.classes.open;
        for node in [&self.view.hamburger, &self.view.nav_menu, &self.view.overlay] {
            if open {
                self.page.add_class(node, class);
            } else {
                self.page.remove_class(node, class);
            }
        }
        let overflow = if open { "hidden" } else { "" };
        self.page.set_style(&self.view.body, "overflow", overflow);
    }
}
