//! Shared page fixtures for the sitewire test suite.
//!
//! One builder per page template, shaped like the shipped documents: the
//! empty chrome elements the fragment layer fills, plus whatever static
//! content that template carries (measured sections on the homepage, the
//! article element on a post). Tests mutate the returned [`Page`] freely.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = home_page();
//! fragments::inject_nav(&mut page, &SiteConfig::default(), "");
//! assert!(page.contains("nav-link-about"));
//! ```

use crate::fragments::{CONTACT_ID, FOOTER_ID, HEADER_ID, NAV_ID};
use crate::page::{BODY, Element, Page, PageKind};

/// Host used by all fixtures; plain custom domain, no project-prefix trim.
pub const TEST_HOST: &str = "www.example.com";

fn with_chrome(mut page: Page) -> Page {
    for (id, tag) in [
        (NAV_ID, "nav"),
        (HEADER_ID, "header"),
        (FOOTER_ID, "footer"),
        (CONTACT_ID, "div"),
    ] {
        page.insert(Element::new(id, tag).child_of(BODY));
    }
    page
}

// =========================================================================
// Page builders
// =========================================================================

/// Homepage at `/index.html`: about at 600..1500, contact at 1500..2100,
/// viewport 800.
pub fn home_page() -> Page {
    let mut page = with_chrome(Page::new(PageKind::Home, "/index.html", TEST_HOST));
    page.insert(
        Element::new("about", "section")
            .child_of(BODY)
            .with_bounds(600.0, 900.0),
    );
    page.insert(
        Element::new("contact", "section")
            .child_of(BODY)
            .with_bounds(1500.0, 600.0),
    );
    page
}

/// Services page at `/services/`; no scroll-spy sections.
pub fn services_page() -> Page {
    with_chrome(Page::new(PageKind::Services, "/services/", TEST_HOST))
}

/// Blog index at `/blog/index.html`.
pub fn blog_index_page() -> Page {
    with_chrome(Page::new(PageKind::BlogIndex, "/blog/index.html", TEST_HOST))
}

/// Blog post at `/blog/2024/01/secure-deploys.html` with an article carrying
/// the minimum structured-data attributes plus a description.
pub fn blog_post_page() -> Page {
    let mut page = with_chrome(Page::new(
        PageKind::BlogPost,
        "/blog/2024/01/secure-deploys.html",
        TEST_HOST,
    ));
    page.insert(
        Element::new("post", "article")
            .child_of(BODY)
            .with_attr("data-headline", "Hardening Deploy Pipelines")
            .with_attr("data-date-published", "2024-01-15")
            .with_attr("data-description", "Supply chain controls for small teams."),
    );
    page
}
