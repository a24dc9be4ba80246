//! Element handles in the page model.
//!
//! An [`Element`] is the model's view of one document node: identity, tag,
//! parent link, classes, attributes, inner HTML, and the two pieces of
//! layout data the behavior layer actually consumes (vertical bounds for
//! scroll-spy, a scroll box for the panel's overflow gestures). Everything
//! else about real DOM nodes is out of scope on purpose.

use std::collections::{BTreeMap, BTreeSet};

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Distance from the document top to the element's top edge, in px.
    pub top: f64,
    /// Rendered height in px.
    pub height: f64,
}

impl Bounds {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when `y` falls inside `[top, bottom)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Scroll box of an element with overflowing content.
///
/// `top` is the current scroll offset, `height` the full content height,
/// `viewport` the visible height. `top` past `height - viewport` (or below
/// zero) models momentum overscroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBox {
    pub top: f64,
    pub height: f64,
    pub viewport: f64,
}

impl ScrollBox {
    /// Largest settled scroll offset.
    pub fn max_top(&self) -> f64 {
        (self.height - self.viewport).max(0.0)
    }
}

/// One node in the page model.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    /// Lowercase tag name (`"a"`, `"section"`, ...).
    pub tag: String,
    /// Id of the containing element, `None` for top-level nodes.
    pub parent: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    /// Inner HTML, as written by fragment injection.
    pub html: String,
    /// Layout bounds, when the host has measured this element.
    pub bounds: Option<Bounds>,
    /// Scroll box, for elements with overflowing content.
    pub scroll: Option<ScrollBox>,
}

impl Element {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            parent: None,
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            html: String::new(),
            bounds: None,
            scroll: None,
        }
    }

    pub fn child_of(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_bounds(mut self, top: f64, height: f64) -> Self {
        self.bounds = Some(Bounds { top, height });
        self
    }

    pub fn with_scroll(mut self, top: f64, height: f64, viewport: f64) -> Self {
        self.scroll = Some(ScrollBox {
            top,
            height,
            viewport,
        });
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Fragment part of the `href` attribute, if it has one.
    /// `"../index.html#about"` and `"#about"` both yield `"about"`.
    pub fn href_fragment(&self) -> Option<&str> {
        self.attr("href")
            .and_then(|href| href.rsplit_once('#'))
            .map(|(_, frag)| frag)
            .filter(|frag| !frag.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds {
            top: 100.0,
            height: 50.0,
        };
        assert!(b.contains(100.0));
        assert!(b.contains(149.9));
        assert!(!b.contains(150.0));
        assert!(!b.contains(99.9));
    }

    #[test]
    fn scroll_box_max_top() {
        let s = ScrollBox {
            top: 0.0,
            height: 900.0,
            viewport: 600.0,
        };
        assert_eq!(s.max_top(), 300.0);

        let short = ScrollBox {
            top: 0.0,
            height: 200.0,
            viewport: 600.0,
        };
        assert_eq!(short.max_top(), 0.0);
    }

    #[test]
    fn builder_chain() {
        let el = Element::new("nav-link-about", "a")
            .child_of("nav-item-about")
            .with_class("link")
            .with_attr("href", "#about");
        assert_eq!(el.parent.as_deref(), Some("nav-item-about"));
        assert!(el.has_class("link"));
        assert_eq!(el.attr("href"), Some("#about"));
    }

    #[test]
    fn href_fragment_variants() {
        let bare = Element::new("a1", "a").with_attr("href", "#contact");
        assert_eq!(bare.href_fragment(), Some("contact"));

        let pathed = Element::new("a2", "a").with_attr("href", "../index.html#about");
        assert_eq!(pathed.href_fragment(), Some("about"));

        let empty = Element::new("a3", "a").with_attr("href", "#");
        assert_eq!(empty.href_fragment(), None);

        let plain = Element::new("a4", "a").with_attr("href", "services/");
        assert_eq!(plain.href_fragment(), None);

        let no_href = Element::new("a5", "a");
        assert_eq!(no_href.href_fragment(), None);
    }
}
