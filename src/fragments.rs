//! Shared fragment rendering and injection.
//!
//! Every page template ships empty chrome elements; this module renders
//! the shared markup with Maud and writes it into them, then registers
//! handles for the interactive nodes so event routing can see them.
//! Interpolated config values are auto-escaped by Maud, so a malicious
//! `site.toml` cannot smuggle markup into the page.
//!
//! | Fragment | Fills | Registered handles |
//! |----------|-------|--------------------|
//! | nav | `#nav` | `nav-logo`, `nav-item-*`, `nav-link-*` |
//! | header | `#header` | `titleBar`, `header-toggle` |
//! | footer | `#footer` | `footer-linkedin`, `footer-github`, `footer-x` |
//! | contact | `#contact-content` | `contact-email`, `contact-phone`, `contact-cta` |
//! | panel | none (appended to body) | `navPanel`, `panel-nav`, `panel-link-*` |
//!
//! A page without one of these elements is not an error: the fragment
//! logs a diagnostic and is skipped, and the page keeps working without
//! it.
//!
//! ## Link tables
//!
//! Nav link hrefs are relative and differ per page template; they are
//! spelled out per [`PageKind`] in [`nav_links`] against the base prefix
//! from [`crate::paths::base_path`]. On the homepage the About and Contact
//! links are in-page scrolly anchors; everywhere else they are document
//! links back to the homepage sections.

use log::debug;
use maud::{Markup, html};

use crate::config::SiteConfig;
use crate::page::{BODY, Element, Page, PageKind};

/// Id of the slide-in panel element.
pub const PANEL_ID: &str = "navPanel";

// Chrome elements every template ships empty, filled on inject.
pub const NAV_ID: &str = "nav";
pub const HEADER_ID: &str = "header";
pub const FOOTER_ID: &str = "footer";
pub const CONTACT_ID: &str = "contact-content";

// ============================================================================
// Link tables
// ============================================================================

/// One entry in the shared nav.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    /// Stable slug used to derive element ids (`nav-link-about`, ...).
    pub slug: &'static str,
    pub label: &'static str,
    pub href: String,
    /// In-page smooth-scroll link rather than a document link.
    pub scrolly: bool,
    /// Marks the template the reader is already on.
    pub current: bool,
}

impl NavLink {
    fn new(slug: &'static str, label: &'static str, href: String) -> Self {
        Self {
            slug,
            label,
            href,
            scrolly: false,
            current: false,
        }
    }

    fn scrolly(mut self) -> Self {
        self.scrolly = true;
        self
    }

    fn current(mut self) -> Self {
        self.current = true;
        self
    }

    fn anchor_class(&self) -> &'static str {
        if self.scrolly { "link scrolly" } else { "link" }
    }

    fn panel_class(&self) -> &'static str {
        if self.current { "link depth-0 current" } else { "link depth-0" }
    }
}

/// Nav entries for a page template, hrefs resolved against `base`.
///
/// For blog pages `base` lands on `/blog/`, so homepage links climb one
/// extra level; the blog index additionally links itself the long way
/// round (`{base}../blog/index.html`) while posts can use `{base}index.html`.
pub fn nav_links(kind: PageKind, base: &str) -> Vec<NavLink> {
    match kind {
        PageKind::Home => vec![
            NavLink::new("about", "About", "#about".into()).scrolly(),
            NavLink::new("services", "Services", "services/".into()),
            NavLink::new("blog", "Blog", "blog/index.html".into()),
            NavLink::new("contact", "Contact", "#contact".into()).scrolly(),
        ],
        PageKind::Services => vec![
            NavLink::new("about", "About", format!("{base}index.html#about")),
            NavLink::new("services", "Services", format!("{base}services/")).current(),
            NavLink::new("blog", "Blog", format!("{base}blog/index.html")),
            NavLink::new("contact", "Contact", format!("{base}index.html#contact")),
        ],
        PageKind::BlogIndex => vec![
            NavLink::new("about", "About", format!("{base}../index.html#about")),
            NavLink::new("services", "Services", format!("{base}../services/")),
            NavLink::new("blog", "Blog", format!("{base}../blog/index.html")).current(),
            NavLink::new("contact", "Contact", format!("{base}../index.html#contact")),
        ],
        PageKind::BlogPost => vec![
            NavLink::new("about", "About", format!("{base}../index.html#about")),
            NavLink::new("services", "Services", format!("{base}../services/")),
            NavLink::new("blog", "Blog", format!("{base}index.html")).current(),
            NavLink::new("contact", "Contact", format!("{base}../index.html#contact")),
        ],
    }
}

/// Prefix from the page to the site root. The base prefix lands on the
/// page's top-level section directory; blog templates sit one level below
/// the root, so anything root-relative climbs one further.
pub fn root_prefix(kind: PageKind, base: &str) -> String {
    match kind {
        PageKind::Home => String::new(),
        PageKind::Services => base.to_string(),
        PageKind::BlogIndex | PageKind::BlogPost => format!("{base}../"),
    }
}

/// Href of the logo link back to the homepage.
pub fn logo_href(kind: PageKind, base: &str) -> String {
    format!("{}index.html", root_prefix(kind, base))
}

// ============================================================================
// Renderers
// ============================================================================

/// Renders the shared nav bar's content. `logo_img` is the root-resolved
/// path of the site logo.
pub fn render_nav(cfg: &SiteConfig, links: &[NavLink], logo: &str, logo_img: &str) -> Markup {
    html! {
        a id="nav-logo" class="nav-logo" href=(logo) {
            img src=(logo_img) alt=(cfg.branding.logo_alt);
            (cfg.branding.site_name)
        }
        ul class="links" {
            @for link in links {
                li id={ "nav-item-" (link.slug) } class=[link.current.then_some("current")] {
                    a id={ "nav-link-" (link.slug) } class=(link.anchor_class()) href=(link.href) {
                        (link.label)
                    }
                }
            }
        }
    }
}

/// Renders the mobile title bar, including the panel toggle.
pub fn render_header(cfg: &SiteConfig) -> Markup {
    html! {
        div id="titleBar" {
            a id="header-toggle" class="toggle" href={ "#" (PANEL_ID) } { "Menu" }
            span class="title" { (cfg.branding.site_name) }
        }
    }
}

/// Renders the footer's content: social icon row plus copyright.
pub fn render_footer(cfg: &SiteConfig) -> Markup {
    html! {
        ul class="icons" {
            @if !cfg.social.linkedin.is_empty() {
                li {
                    a id="footer-linkedin" class="icon brands fa-linkedin" href=(cfg.social.linkedin) target="_blank" rel="noopener" {
                        span class="label" { "LinkedIn" }
                    }
                }
            }
            @if !cfg.social.github.is_empty() {
                li {
                    a id="footer-github" class="icon brands fa-github" href=(cfg.social.github) target="_blank" rel="noopener" {
                        span class="label" { "GitHub" }
                    }
                }
            }
            @if !cfg.social.x.is_empty() {
                li {
                    a id="footer-x" class="icon brands fa-x-twitter" href=(cfg.social.x) target="_blank" rel="noopener" {
                        span class="label" { "X" }
                    }
                }
            }
        }
        ul class="copyright" {
            li { "© " (cfg.branding.site_name) ". All rights reserved." }
        }
    }
}

/// Renders the contact block: email, phone, and the CTA button.
pub fn render_contact(cfg: &SiteConfig) -> Markup {
    let contact = &cfg.contact;
    html! {
        ul class="contact-info" {
            li {
                span class="label" { "Email" }
                a id="contact-email" href=(contact.mailto_href()) { (contact.email) }
            }
            li {
                span class="label" { "Phone" }
                a id="contact-phone" href=(contact.tel_href()) { (contact.phone) }
            }
        }
        a id="contact-cta" class="button big" href=(contact.mailto_href()) { "Let's Talk" }
    }
}

/// Renders the slide-in panel's inner nav, mirroring the page's nav links.
/// The panel has no `<li>`s, so current markers sit on the link itself.
pub fn render_panel(links: &[NavLink]) -> Markup {
    html! {
        nav {
            @for link in links {
                a id={ "panel-link-" (link.slug) } class=(link.panel_class()) href=(link.href) {
                    (link.label)
                }
            }
        }
    }
}

// ============================================================================
// Injection
// ============================================================================

/// Fill the nav element. Returns false when it is absent from the page.
pub fn inject_nav(page: &mut Page, cfg: &SiteConfig, base: &str) -> bool {
    if !page.contains(NAV_ID) {
        debug!("#nav missing on {}; fragment skipped", page.pathname);
        return false;
    }
    let links = nav_links(page.kind, base);
    let logo = logo_href(page.kind, base);
    let logo_img = format!("{}images/logo.png", root_prefix(page.kind, base));
    page.set_html(NAV_ID, render_nav(cfg, &links, &logo, &logo_img).into_string());

    page.insert(
        Element::new("nav-logo", "a")
            .child_of(NAV_ID)
            .with_class("nav-logo")
            .with_attr("href", &logo),
    );
    for link in &links {
        let item_id = format!("nav-item-{}", link.slug);
        let mut item = Element::new(&item_id, "li").child_of(NAV_ID);
        if link.current {
            item = item.with_class("current");
        }
        page.insert(item);

        let mut anchor = Element::new(&format!("nav-link-{}", link.slug), "a")
            .child_of(&item_id)
            .with_class("link")
            .with_attr("href", &link.href);
        if link.scrolly {
            anchor = anchor.with_class("scrolly");
        }
        page.insert(anchor);
    }
    true
}

/// Fill the header element. Returns false when it is absent from the page.
pub fn inject_header(page: &mut Page, cfg: &SiteConfig) -> bool {
    if !page.contains(HEADER_ID) {
        debug!("#header missing on {}; fragment skipped", page.pathname);
        return false;
    }
    page.set_html(HEADER_ID, render_header(cfg).into_string());

    page.insert(Element::new("titleBar", "div").child_of(HEADER_ID));
    page.insert(
        Element::new("header-toggle", "a")
            .child_of("titleBar")
            .with_class("toggle")
            .with_attr("href", &format!("#{PANEL_ID}")),
    );
    true
}

/// Fill the footer element. Returns false when it is absent from the page.
pub fn inject_footer(page: &mut Page, cfg: &SiteConfig) -> bool {
    if !page.contains(FOOTER_ID) {
        debug!("#footer missing on {}; fragment skipped", page.pathname);
        return false;
    }
    page.set_html(FOOTER_ID, render_footer(cfg).into_string());

    for (id, url) in [
        ("footer-linkedin", &cfg.social.linkedin),
        ("footer-github", &cfg.social.github),
        ("footer-x", &cfg.social.x),
    ] {
        if !url.is_empty() {
            page.insert(
                Element::new(id, "a")
                    .child_of(FOOTER_ID)
                    .with_class("icon")
                    .with_attr("href", url)
                    .with_attr("target", "_blank"),
            );
        }
    }
    true
}

/// Fill the contact block. Returns false when it is absent from the page.
pub fn inject_contact(page: &mut Page, cfg: &SiteConfig) -> bool {
    if !page.contains(CONTACT_ID) {
        debug!(
            "#contact-content missing on {}; fragment skipped",
            page.pathname
        );
        return false;
    }
    page.set_html(CONTACT_ID, render_contact(cfg).into_string());

    page.insert(
        Element::new("contact-email", "a")
            .child_of(CONTACT_ID)
            .with_attr("href", &cfg.contact.mailto_href()),
    );
    page.insert(
        Element::new("contact-phone", "a")
            .child_of(CONTACT_ID)
            .with_attr("href", &cfg.contact.tel_href()),
    );
    page.insert(
        Element::new("contact-cta", "a")
            .child_of(CONTACT_ID)
            .with_class("button")
            .with_attr("href", &cfg.contact.mailto_href()),
    );
    true
}

/// Append the slide-in panel to the body and register its links.
///
/// The panel fills no shipped element; it always exists so the toggle
/// anchor has something to open even on pages that dropped other
/// fragments.
pub fn inject_panel(page: &mut Page, base: &str) {
    let links = nav_links(page.kind, base);
    page.insert(Element::new(PANEL_ID, "div").child_of(BODY));
    page.set_html(PANEL_ID, render_panel(&links).into_string());

    page.insert(Element::new("panel-nav", "nav").child_of(PANEL_ID));
    for link in &links {
        let mut anchor = Element::new(&format!("panel-link-{}", link.slug), "a")
            .child_of("panel-nav")
            .with_class("link")
            .with_class("depth-0")
            .with_attr("href", &link.href);
        if link.current {
            anchor = anchor.with_class("current");
        }
        page.insert(anchor);
    }
}
