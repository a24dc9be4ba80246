//! Deterministic page model.
//!
//! The behavior layer never touches a live document. It runs against this
//! model instead: an element store in document order, a scroll position, a
//! viewport, plus the event/timer/effect plumbing in the submodules. The
//! host owns the real document and mirrors it both ways; tests construct
//! pages directly and drive events by hand.
//!
//! | Submodule | Role |
//! |-----------|------|
//! | [`element`] | Element handles: classes, attributes, bounds, scroll boxes |
//! | [`events`] | Event types, the subscription registry, host-visible effects |
//! | [`timers`] | Deterministic timer queue and the fixed-window throttle |
//!
//! Class changes route through [`Page::add_class`] / [`Page::remove_class`]
//! so the model can count writes. Repeating an operation that already holds
//! must not grow the count; the scroll-spy and panel tests pin that.

pub mod element;
pub mod events;
pub mod timers;

use std::collections::BTreeMap;

pub use element::{Bounds, Element, ScrollBox};

/// Id of the synthetic body element every page starts with.
pub const BODY: &str = "body";

/// Class the document loads with; cleared shortly after the load event so
/// CSS can gate entrance animations on it.
pub const PRELOAD_CLASS: &str = "is-preload";

/// Which of the site's page templates this document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Services,
    BlogIndex,
    BlogPost,
}

impl PageKind {
    /// Body class the template ships with. CSS keys page-specific styling
    /// off these, so the body carries one from the start.
    pub fn body_class(self) -> &'static str {
        match self {
            PageKind::Home => "homepage",
            PageKind::Services => "services-page",
            PageKind::BlogIndex => "blog-index-page",
            PageKind::BlogPost => "blog-post-page",
        }
    }
}

/// The model of one loaded document.
#[derive(Debug, Clone)]
pub struct Page {
    pub kind: PageKind,
    /// URL path of the document, e.g. `/blog/2024/01/post.html`.
    pub pathname: String,
    /// Host the document was served from.
    pub hostname: String,
    /// Window scroll offset in px.
    pub scroll_y: f64,
    /// Window viewport height in px.
    pub viewport_height: f64,
    elements: BTreeMap<String, Element>,
    /// Element ids in document order. Queries that say "first" mean first
    /// in this order, matching how selectors walk a real document.
    order: Vec<String>,
    class_writes: u64,
}

impl Page {
    /// New page with a body element carrying the template's class and
    /// [`PRELOAD_CLASS`].
    pub fn new(kind: PageKind, pathname: &str, hostname: &str) -> Self {
        let mut page = Self {
            kind,
            pathname: pathname.to_string(),
            hostname: hostname.to_string(),
            scroll_y: 0.0,
            viewport_height: 800.0,
            elements: BTreeMap::new(),
            order: Vec::new(),
            class_writes: 0,
        };
        page.insert(
            Element::new(BODY, "body")
                .with_class(kind.body_class())
                .with_class(PRELOAD_CLASS),
        );
        page
    }

    /// Insert an element. A new id appends to document order; an existing
    /// id is replaced in place.
    pub fn insert(&mut self, element: Element) {
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    // ========================================================================
    // Class writes
    // ========================================================================

    /// Count of class mutations applied so far. Every [`Page::add_class`] /
    /// [`Page::remove_class`] call on an existing element counts, changed
    /// or not: each one is a document write in the host.
    pub fn class_writes(&self) -> u64 {
        self.class_writes
    }

    /// Add a class. Returns true when the element exists and the class was
    /// not already present.
    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                self.class_writes += 1;
                el.classes.insert(class.to_string())
            }
            None => false,
        }
    }

    /// Remove a class. Returns true when the element exists and had it.
    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                self.class_writes += 1;
                el.classes.remove(class)
            }
            None => false,
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    // ========================================================================
    // Attributes and content
    // ========================================================================

    pub fn attr(&self, id: &str, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    /// Replace an element's inner HTML. Returns false when the element does
    /// not exist (injection callers log and skip on that).
    pub fn set_html(&mut self, id: &str, html: String) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                el.html = html;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Structure queries
    // ========================================================================

    /// True when `id` is `ancestor` or sits anywhere below it.
    pub fn is_within(&self, id: &str, ancestor: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self
                .element(current)
                .and_then(|el| el.parent.as_deref());
        }
        false
    }

    /// Nearest ancestor (excluding `id` itself) with the given tag.
    pub fn ancestor_with_tag(&self, id: &str, tag: &str) -> Option<&Element> {
        let mut cursor = self.element(id).and_then(|el| el.parent.as_deref());
        while let Some(current) = cursor {
            let el = self.element(current)?;
            if el.tag == tag {
                return Some(el);
            }
            cursor = el.parent.as_deref();
        }
        None
    }

    /// First element with the given tag, in document order.
    pub fn first_by_tag(&self, tag: &str) -> Option<&Element> {
        self.order
            .iter()
            .filter_map(|id| self.element(id))
            .find(|el| el.tag == tag)
    }

    /// Ids of `section` elements with measured bounds, in document order.
    pub fn section_ids(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.element(id))
            .filter(|el| el.tag == "section" && el.bounds.is_some())
            .map(|el| el.id.clone())
            .collect()
    }

    /// First anchor below `root` whose href fragment equals `fragment`, in
    /// document order.
    pub fn fragment_anchor_under(&self, root: &str, fragment: &str) -> Option<&Element> {
        self.order
            .iter()
            .filter_map(|id| self.element(id))
            .find(|el| {
                el.tag == "a"
                    && el.href_fragment() == Some(fragment)
                    && self.is_within(&el.id, root)
            })
    }
}
