use log::debug;

use super::{Controller, Tracked};
use crate::page::{Intersection, Page};
use crate::scheduler::Scheduler;

const IMAGE_OFFSET: &str = "translateY(20px)";
const IMAGE_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
const SECTION_OFFSET: &str = "translateY(30px)";
const SECTION_TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";

impl<P: Page, S: Scheduler> Controller<P, S> {
    /// Hides newly found images and (re)observes every image not yet revealed.
    pub fn lazy_load_images(&mut self) {
        let images = self.page.query_all(&self.config.selectors.images);
        let mut added = 0;
        for node in images {
            let revealed = self
                .images
                .iter()
                .find(|tracked| tracked.node == node)
                .map(|tracked| tracked.revealed);
            match revealed {
                Some(true) => continue,
                Some(false) => {}
                None => {
                    self.hide(&node, IMAGE_OFFSET, IMAGE_TRANSITION);
                    self.images.push(Tracked::pending(node.clone()));
                    added += 1;
                }
            }
            self.page.observe(&node);
        }
        if added > 0 {
            debug!("lazy loading {} new images", added);
        }
    }

    pub fn on_intersection(&mut self, entries: &[Intersection<P::Node>]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(tracked) = self
                .images
                .iter_mut()
                .find(|tracked| tracked.node == entry.target && !tracked.revealed)
            else {
                continue;
            };
            tracked.revealed = true;
            self.page.set_style(&entry.target, "opacity", "1");
            self.page.set_style(&entry.target, "transform", "translateY(0)");
            self.page.unobserve(&entry.target);
        }
    }

    pub fn is_image_revealed(&self, node: &P::Node) -> bool {
        self.images
            .iter()
            .any(|tracked| tracked.node == *node && tracked.revealed)
    }

    pub(super) fn prepare_sections(&mut self) {
        self.sections = self
            .page
            .query_all(&self.config.selectors.animated)
            .into_iter()
            .map(Tracked::pending)
            .collect();
        for section in &self.sections {
            self.hide(&section.node, SECTION_OFFSET, SECTION_TRANSITION);
        }
    }

    /// Fades in every hidden section whose top has entered the trigger zone.
    pub fn animate_on_scroll(&mut self) {
        let trigger = self.page.viewport_height() / self.config.reveal_ratio;
        for section in self.sections.iter_mut().filter(|section| !section.revealed) {
            if self.page.bounding_top(&section.node) < trigger {
                section.revealed = true;
                self.page.set_style(&section.node, "opacity", "1");
                self.page.set_style(&section.node, "transform", "translateY(0)");
            }
        }
    }

    pub fn is_section_visible(&self, node: &P::Node) -> bool {
        self.sections
            .iter()
            .any(|section| section.node == *node && section.revealed)
    }

    fn hide(&self, node: &P::Node, offset: &str, transition: &str) {
        self.page.set_style(node, "opacity", "0");
        self.page.set_style(node, "transform", offset);
        self.page.set_style(node, "transition", transition);
    }
}
