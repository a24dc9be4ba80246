//! Slide-in navigation panel.
//!
//! The panel's visibility is an explicit [`PanelState`]; the CSS hook
//! (`navPanel-visible` on the body) is a projection written on every
//! transition, never read back. Hiding is idempotent: a hide on an already
//! hidden panel does nothing and schedules nothing.
//!
//! Three things happen on a real hide:
//!
//! 1. the visible class comes off the target immediately (the slide-out
//!    transition starts),
//! 2. a cleanup timer fires after `delay_ms` to reset the panel's scroll
//!    position and forms once it is off screen,
//! 3. if the hide came from an in-panel link, navigation to that link is
//!    deferred to `delay_ms + 10` so the slide-out is visible.
//!
//! Toggling (the title-bar hamburger) flips visibility without the
//! cleanup pass; only dismissals reset panel state.
//!
//! Swipe dismissal and the overscroll rubber-band live here too, fed by
//! touch events routed from the engine. All distances are px.

use crate::page::events::{Effect, EventCtl};
use crate::page::timers::{TimerAction, Timers};
use crate::page::{BODY, Page};

/// Which edge the panel slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Panel tuning. [`PanelOptions::default`] matches the shipped site.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Slide transition length; cleanup waits this long after a hide.
    pub delay_ms: u64,
    /// Dismiss when an in-panel link is activated.
    pub hide_on_click: bool,
    /// Dismiss on Escape. Off by default.
    pub hide_on_escape: bool,
    /// Dismiss on a swipe toward the panel's edge.
    pub hide_on_swipe: bool,
    /// Reset the panel's scroll position during cleanup.
    pub reset_scroll: bool,
    /// Reset forms inside the panel during cleanup.
    pub reset_forms: bool,
    /// Edge the panel slides in from. `None` turns swipe dismissal off.
    pub side: Option<Side>,
    /// Element that receives `visible_class`.
    pub target: String,
    pub visible_class: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            hide_on_click: true,
            hide_on_escape: false,
            hide_on_swipe: true,
            reset_scroll: true,
            reset_forms: true,
            side: Some(Side::Left),
            target: BODY.to_string(),
            visible_class: "navPanel-visible".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Visible,
}

/// A swipe must travel this far along the dismissal axis to count.
const SWIPE_DELTA: f64 = 50.0;
/// And stay within this much drift on the other axis.
const SWIPE_BOUNDARY: f64 = 20.0;

#[derive(Debug)]
pub struct NavPanel {
    /// Element id of the panel itself.
    pub id: String,
    opts: PanelOptions,
    state: PanelState,
    touch_origin: Option<(f64, f64)>,
}

impl NavPanel {
    pub fn new(id: &str, opts: PanelOptions) -> Self {
        Self {
            id: id.to_string(),
            opts,
            state: PanelState::Hidden,
            touch_origin: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == PanelState::Visible
    }

    pub fn options(&self) -> &PanelOptions {
        &self.opts
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn show(&mut self, page: &mut Page) {
        if self.state == PanelState::Visible {
            return;
        }
        self.state = PanelState::Visible;
        page.add_class(&self.opts.target, &self.opts.visible_class);
    }

    /// Dismiss the panel. Returns false (and does nothing) when already
    /// hidden; otherwise drops the visible class and schedules cleanup.
    pub fn hide(&mut self, page: &mut Page, timers: &mut Timers) -> bool {
        if self.state == PanelState::Hidden {
            return false;
        }
        self.state = PanelState::Hidden;
        page.remove_class(&self.opts.target, &self.opts.visible_class);
        timers.schedule(self.opts.delay_ms, TimerAction::PanelCleanup);
        true
    }

    /// Dismiss in response to an event: when the panel was visible the
    /// event is consumed (default prevented, propagation stopped).
    pub fn hide_for_event(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        ctl: &mut EventCtl,
    ) -> bool {
        if self.state == PanelState::Hidden {
            return false;
        }
        ctl.prevent_default();
        ctl.stop_propagation();
        self.hide(page, timers)
    }

    /// Flip visibility without the cleanup pass. Matches the toggle
    /// control: a quick open/close leaves scroll and forms as they were.
    pub fn toggle(&mut self, page: &mut Page) {
        match self.state {
            PanelState::Hidden => self.show(page),
            PanelState::Visible => {
                self.state = PanelState::Hidden;
                page.remove_class(&self.opts.target, &self.opts.visible_class);
            }
        }
    }

    /// Run the deferred cleanup: reset the panel's scroll box and ask the
    /// host to reset forms, per options.
    pub fn cleanup(&self, page: &mut Page) -> Option<Effect> {
        if self.opts.reset_scroll {
            if let Some(scroll) = page
                .element_mut(&self.id)
                .and_then(|el| el.scroll.as_mut())
            {
                scroll.top = 0.0;
            }
        }
        if self.opts.reset_forms {
            return Some(Effect::ResetForms {
                within: self.id.clone(),
            });
        }
        None
    }

    // ========================================================================
    // Touch gestures
    // ========================================================================

    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.touch_origin = Some((x, y));
    }

    pub fn on_touch_end(&mut self) {
        self.touch_origin = None;
    }

    /// Track a touch move inside the panel. Two concerns:
    ///
    /// - swipe dismissal: a drag toward the panel's edge hides it and
    ///   consumes the event;
    /// - rubber-band containment: at the scroll extremes, further pull in
    ///   the overscroll direction is consumed so the page behind does not
    ///   scroll.
    pub fn on_touch_move(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        x: f64,
        y: f64,
        ctl: &mut EventCtl,
    ) {
        let Some((origin_x, origin_y)) = self.touch_origin else {
            return;
        };
        let diff_x = origin_x - x;
        let diff_y = origin_y - y;

        if self.opts.hide_on_swipe {
            // Deltas are start minus now, so a leftward drag has diff_x > 0
            // and an upward drag has diff_y > 0.
            let dismissed = match self.opts.side {
                Some(Side::Left) => diff_y.abs() < SWIPE_BOUNDARY && diff_x > SWIPE_DELTA,
                Some(Side::Right) => diff_y.abs() < SWIPE_BOUNDARY && diff_x < -SWIPE_DELTA,
                Some(Side::Top) => diff_x.abs() < SWIPE_BOUNDARY && diff_y > SWIPE_DELTA,
                Some(Side::Bottom) => diff_x.abs() < SWIPE_BOUNDARY && diff_y < -SWIPE_DELTA,
                None => false,
            };
            if dismissed {
                self.touch_origin = None;
                self.hide(page, timers);
                ctl.prevent_default();
                ctl.stop_propagation();
                return;
            }
        }

        if let Some(scroll) = page.element(&self.id).and_then(|el| el.scroll.as_ref()) {
            let max = scroll.max_top();
            let at_top = scroll.top < 0.0 && diff_y < 0.0;
            let at_bottom = scroll.top > max - 2.0 && scroll.top < max + 2.0 && diff_y > 0.0;
            if at_top || at_bottom {
                ctl.prevent_default();
                ctl.stop_propagation();
            }
        }
    }
}
