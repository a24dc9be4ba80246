//! Events, subscriptions, and host-visible effects.
//!
//! The host forwards document events into [`crate::engine::Engine::dispatch`]
//! as [`Event`] values. Which handlers see an event, and in what order, is
//! decided by the [`Subscriptions`] registry: handlers run in registration
//! order, a handler that stops propagation starves everything after it, and
//! passive subscriptions cannot prevent the default action. That makes the
//! routing rules inspectable instead of being side effects of who attached
//! a closure where.
//!
//! Handlers answer through [`EventCtl`] (what the host should do with the
//! native event) and by queueing [`Effect`]s (what the host should do to
//! the world: scroll, navigate, reset forms).

/// A document event, as forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// DOM is parsed; fragments may be injected.
    Ready,
    /// All resources finished loading.
    Load,
    /// Window scrolled; the new position is already on the page model.
    Scroll,
    Click {
        target: String,
    },
    KeyDown {
        key: Key,
    },
    TouchStart {
        target: String,
        x: f64,
        y: f64,
    },
    TouchMove {
        target: String,
        x: f64,
        y: f64,
    },
    TouchEnd {
        target: String,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Ready => EventKind::Ready,
            Event::Load => EventKind::Load,
            Event::Scroll => EventKind::Scroll,
            Event::Click { .. } => EventKind::Click,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::TouchStart { .. } => EventKind::TouchStart,
            Event::TouchMove { .. } => EventKind::TouchMove,
            Event::TouchEnd { .. } => EventKind::TouchEnd,
        }
    }

    /// Target element id, for event types that have one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Click { target }
            | Event::TouchStart { target, .. }
            | Event::TouchMove { target, .. }
            | Event::TouchEnd { target } => Some(target),
            _ => None,
        }
    }
}

/// Event type, used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Ready,
    Load,
    Scroll,
    Click,
    KeyDown,
    TouchStart,
    TouchMove,
    TouchEnd,
}

/// Keys the behavior layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Any key the layer has no behavior for.
    Other,
}

/// Outcome flags a dispatch reports back to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCtl {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventCtl {
    /// The host must suppress the native default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// No later subscription sees this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// An action the host must perform on the real world.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Animate the window scroll position to `y`.
    SmoothScrollTo { y: f64 },
    /// Navigate to `href`, in a new tab when `new_tab` is set.
    Navigate { href: String, new_tab: bool },
    /// Reset every form inside the given element.
    ResetForms { within: String },
}

/// Named handler a subscription routes to. Dispatch matches on this in
/// [`crate::engine::Engine`]; keeping it a plain enum keeps handler state
/// on the engine rather than captured in closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    PanelToggle,
    PanelLink,
    PanelBackdrop,
    PanelTouchStart,
    PanelTouchMove,
    PanelTouchEnd,
    PanelKey,
    PanelOutside,
    ScrollyClick,
    TransitionClick,
    ScrollSpy,
    InjectOnReady,
    PreloadOnLoad,
}

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// One registered listener.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub kind: EventKind,
    pub handler: Handler,
    /// Passive listeners cannot prevent the default action.
    pub passive: bool,
    /// When set, targeted events only match if their target sits inside
    /// this element. Events without a target ignore the filter.
    pub within: Option<String>,
}

/// Listener registry. Registration order is dispatch order.
#[derive(Debug, Default)]
pub struct Subscriptions {
    subs: Vec<Subscription>,
    next_id: u64,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        self.push(kind, handler, false, None)
    }

    pub fn subscribe_passive(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        self.push(kind, handler, true, None)
    }

    pub fn subscribe_within(
        &mut self,
        kind: EventKind,
        within: &str,
        handler: Handler,
    ) -> SubscriptionId {
        self.push(kind, handler, false, Some(within.to_string()))
    }

    fn push(
        &mut self,
        kind: EventKind,
        handler: Handler,
        passive: bool,
        within: Option<String>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subs.push(Subscription {
            id,
            kind,
            handler,
            passive,
            within,
        });
        id
    }

    /// Remove a subscription. Returns false when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subs.len();
        self.subs.retain(|s| s.id != id);
        self.subs.len() != before
    }

    /// Subscriptions for one event kind, in registration order.
    pub fn matching(&self, kind: EventKind) -> Vec<Subscription> {
        self.subs.iter().filter(|s| s.kind == kind).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
