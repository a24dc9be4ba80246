//! Smooth scrolling and section tracking.
//!
//! Two jobs share this controller because they share the section list:
//!
//! - **Scrolly clicks**: an anchor with class `scrolly` and a `#fragment`
//!   href scrolls the window to that section instead of jumping, offset by
//!   the fixed title bar so the section lands below it.
//! - **Scroll-spy**: on every scroll, the section containing the probe
//!   line (30% down the viewport) becomes current. The matching nav item
//!   gets the `current` class on its `<li>`; the matching panel link gets
//!   it on the anchor itself, since the panel has no list structure.
//!
//! At most one section is current. When the probe is in dead space (the
//! hero above the first section, gaps between sections) nothing is
//! current and all markers are clear. A scroll event that does not change
//! the current section writes nothing.

use crate::page::Page;
use crate::page::events::{Effect, EventCtl};

/// Probe position within the viewport: 30% down from the top edge.
const PROBE_RATIO: f64 = 0.3;

/// How the scroll target offset is found.
#[derive(Debug, Clone, PartialEq)]
pub enum Offset {
    None,
    /// Fixed px offset.
    Fixed(f64),
    /// Height of an element, measured at scroll time. Zero when the
    /// element is absent or unmeasured. Tracks the responsive title bar.
    Element(String),
}

impl Offset {
    fn resolve(&self, page: &Page) -> f64 {
        match self {
            Offset::None => 0.0,
            Offset::Fixed(px) => *px,
            Offset::Element(id) => page
                .element(id)
                .and_then(|el| el.bounds)
                .map(|b| b.height)
                .unwrap_or(0.0),
        }
    }
}

/// Section tracker for one page.
#[derive(Debug)]
pub struct ScrollController {
    /// Section ids in document order. First hit wins on overlap.
    sections: Vec<String>,
    current: Option<String>,
    /// Root of the desktop nav, for `<li>` markers.
    nav_root: String,
    /// Root of the slide-in panel, for anchor markers.
    panel_root: String,
    offset: Offset,
}

impl ScrollController {
    /// Capture the page's measured sections. Pages without sections get an
    /// idle controller.
    pub fn new(page: &Page, nav_root: &str, panel_root: &str, offset: Offset) -> Self {
        Self {
            sections: page.section_ids(),
            current: None,
            nav_root: nav_root.to_string(),
            panel_root: panel_root.to_string(),
            offset,
        }
    }

    /// Id of the section currently containing the probe.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Document y the probe sits at.
    pub fn probe(page: &Page) -> f64 {
        page.scroll_y + PROBE_RATIO * page.viewport_height
    }

    // ========================================================================
    // Scrolly clicks
    // ========================================================================

    /// Handle a click on a scrolly anchor. Consumes the click and asks the
    /// host for a smooth scroll when the target section exists; a dangling
    /// fragment still consumes the click but scrolls nowhere.
    pub fn on_scrolly_click(
        &self,
        page: &Page,
        target: &str,
        ctl: &mut EventCtl,
        effects: &mut Vec<Effect>,
    ) {
        let Some(el) = page.element(target) else {
            return;
        };
        if el.tag != "a" || !el.has_class("scrolly") {
            return;
        }
        let Some(href) = el.attr("href") else {
            return;
        };
        // Only bare-fragment hrefs scroll; `#` alone stays a plain link.
        let Some(fragment) = href.strip_prefix('#') else {
            return;
        };
        if fragment.is_empty() {
            return;
        }

        ctl.prevent_default();
        if let Some(bounds) = page.element(fragment).and_then(|el| el.bounds) {
            let y = (bounds.top - self.offset.resolve(page)).max(0.0);
            effects.push(Effect::SmoothScrollTo { y });
        }
    }

    // ========================================================================
    // Scroll-spy
    // ========================================================================

    /// Recompute the current section from the page's scroll position and
    /// move the markers if it changed.
    pub fn on_scroll(&mut self, page: &mut Page) {
        let probe = Self::probe(page);
        let next = self
            .sections
            .iter()
            .find(|id| {
                page.element(id)
                    .and_then(|el| el.bounds)
                    .is_some_and(|b| b.contains(probe))
            })
            .cloned();

        if next == self.current {
            return;
        }
        if let Some(old) = self.current.take() {
            self.mark(page, &old, false);
        }
        if let Some(new) = &next {
            self.mark(page, new, true);
        }
        self.current = next;
    }

    /// Apply or clear the `current` markers for one section.
    fn mark(&self, page: &mut Page, section: &str, on: bool) {
        if let Some(anchor) = page.fragment_anchor_under(&self.nav_root, section) {
            let holder = page
                .ancestor_with_tag(&anchor.id, "li")
                .map(|li| li.id.clone())
                .unwrap_or_else(|| anchor.id.clone());
            if on {
                page.add_class(&holder, "current");
            } else {
                page.remove_class(&holder, "current");
            }
        }
        if let Some(anchor) = page.fragment_anchor_under(&self.panel_root, section) {
            let id = anchor.id.clone();
            if on {
                page.add_class(&id, "current");
            } else {
                page.remove_class(&id, "current");
            }
        }
    }
}
