use log::error;

use crate::config::InteractionConfig;
use crate::error::BindError;
use crate::page::Page;

/// Elements resolved once at startup.
#[derive(Debug, Clone)]
pub struct Bindings<N> {
    pub hamburger: N,
    pub nav_menu: N,
    pub navbar: N,
    /// Created by [`Bindings::bind`], not part of the markup.
    pub overlay: N,
    pub body: N,
    pub nav_links: Vec<N>,
    pub contact: Option<ContactForm<N>>,
}

#[derive(Debug, Clone)]
pub struct ContactForm<N> {
    pub form: N,
    pub name: N,
    pub email: N,
    pub phone: N,
    pub submit: N,
}

impl<N: Clone + PartialEq> Bindings<N> {
    /// Resolves every required element, reporting all missing ones at once.
    ///
    /// An incomplete contact form is logged and only disables form handling.
    /// The overlay is created after the required elements are known to exist,
    /// so a failed bind leaves the document untouched.
    pub fn bind<P>(page: &P, config: &InteractionConfig) -> Result<Self, BindError>
    where
        P: Page<Node = N>,
    {
        let ids = &config.ids;
        let mut missing = Vec::new();
        let mut require = |id: &str| {
            let node = page.element_by_id(id);
            if node.is_none() {
                missing.push(format!("#{}", id));
            }
            node
        };

        let hamburger = require(ids.hamburger.as_str());
        let nav_menu = require(ids.nav_menu.as_str());
        let navbar = require(ids.navbar.as_str());

        let (Some(hamburger), Some(nav_menu), Some(navbar)) = (hamburger, nav_menu, navbar) else {
            return Err(BindError::MissingElements(missing));
        };

        let body = page.body().ok_or(BindError::NoBody)?;
        let contact = Self::bind_contact(page, config);
        let overlay = page.append_div(&config.classes.overlay).ok_or(BindError::Overlay)?;
        let nav_links = page.query_all(&config.selectors.nav_links);

        Ok(Self {
            hamburger,
            nav_menu,
            navbar,
            overlay,
            body,
            nav_links,
            contact,
        })
    }

    fn bind_contact<P>(page: &P, config: &InteractionConfig) -> Option<ContactForm<N>>
    where
        P: Page<Node = N>,
    {
        let form = page.query_one(&config.selectors.contact_form)?;

        let ids = &config.ids;
        let mut missing = Vec::new();
        let mut field = |id: &str| {
            let node = page.element_by_id(id);
            if node.is_none() {
                missing.push(format!("#{}", id));
            }
            node
        };

        match (
            field(ids.name.as_str()),
            field(ids.email.as_str()),
            field(ids.phone.as_str()),
            field(ids.submit.as_str()),
        ) {
            (Some(name), Some(email), Some(phone), Some(submit)) => Some(ContactForm {
                form,
                name,
                email,
                phone,
                submit,
            }),
            _ => {
                error!("contact form disabled: {}", BindError::IncompleteForm(missing));
                None
            }
        }
    }
}
