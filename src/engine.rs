//! Behavior engine: boot, event routing, timers, effects.
//!
//! One [`Engine`] owns everything a page's behavior layer needs: the page
//! model, the resolved base prefix, the panel and scroll controllers, the
//! subscription registry, the timer queue, and the outgoing effect queue.
//! The host constructs it, forwards events into [`Engine::dispatch`],
//! advances time with [`Engine::advance`], and applies whatever
//! [`Engine::drain_effects`] hands back.
//!
//! ## Boot order
//!
//! Construction resolves the base prefix, injects the nav fragment,
//! appends the slide-in panel, and registers all subscriptions; the page
//! has working navigation chrome before the first event arrives. The
//! remaining fragments (header, footer, contact, and on blog posts the
//! structured data) are injected when the host dispatches [`Event::Ready`].
//! [`Event::Load`] starts the 100ms countdown that drops the body's
//! preload class.
//!
//! ## Routing rules
//!
//! Subscriptions run in registration order. A handler that stops
//! propagation starves the rest; that is how the toggle click never
//! reaches the outside-click dismissal. Subscriptions scoped `within` an
//! element only see events targeting its subtree. Passive subscriptions
//! (the scroll-spy) cannot prevent the default action.

use log::debug;

use crate::config::SiteConfig;
use crate::fragments;
use crate::jsonld;
use crate::page::events::{
    Effect, Event, EventCtl, EventKind, Handler, Key, Subscriptions,
};
use crate::page::timers::{TimerAction, Timers};
use crate::page::{BODY, Page, PageKind, PRELOAD_CLASS};
use crate::panel::{NavPanel, PanelOptions};
use crate::paths;
use crate::scroll::{Offset, ScrollController};

/// Class added to the body when a same-site document link is followed, so
/// CSS can play an exit transition during the unload.
pub const NAVIGATING_CLASS: &str = "navigating-away";

/// Id of the overlay the page shell ships behind the open panel. Clicking
/// it dismisses the panel without reaching the content underneath.
pub const BACKDROP_ID: &str = "navBackdrop";

/// Delay between the load event and dropping [`PRELOAD_CLASS`].
const PRELOAD_CLEAR_MS: u64 = 100;

/// Extra time past the panel transition before a deferred navigation.
const NAV_GRACE_MS: u64 = 10;

pub struct Engine {
    pub page: Page,
    cfg: SiteConfig,
    base: String,
    panel: NavPanel,
    scroll: ScrollController,
    subs: Subscriptions,
    timers: Timers,
    effects: Vec<Effect>,
}

impl Engine {
    /// Boot with the stock panel tuning.
    pub fn new(page: Page, cfg: SiteConfig) -> Self {
        Self::with_panel_options(page, cfg, PanelOptions::default())
    }

    /// Boot with custom panel tuning. Handlers for disabled panel
    /// behaviors are not registered at all.
    pub fn with_panel_options(mut page: Page, cfg: SiteConfig, opts: PanelOptions) -> Self {
        let base = paths::base_path(&page.pathname, &page.hostname);
        debug!("booting on {} with base {:?}", page.pathname, base);

        fragments::inject_nav(&mut page, &cfg, &base);
        fragments::inject_panel(&mut page, &base);

        let panel = NavPanel::new(fragments::PANEL_ID, opts);
        let scroll = ScrollController::new(
            &page,
            fragments::NAV_ID,
            fragments::PANEL_ID,
            Offset::Element("titleBar".into()),
        );

        let mut subs = Subscriptions::new();
        subs.subscribe(EventKind::Click, Handler::PanelToggle);
        if panel.options().hide_on_click {
            subs.subscribe_within(EventKind::Click, fragments::PANEL_ID, Handler::PanelLink);
        }
        subs.subscribe(EventKind::Click, Handler::PanelBackdrop);
        subs.subscribe_within(
            EventKind::TouchStart,
            fragments::PANEL_ID,
            Handler::PanelTouchStart,
        );
        subs.subscribe_within(
            EventKind::TouchMove,
            fragments::PANEL_ID,
            Handler::PanelTouchMove,
        );
        subs.subscribe_within(
            EventKind::TouchEnd,
            fragments::PANEL_ID,
            Handler::PanelTouchEnd,
        );
        if panel.options().hide_on_escape {
            subs.subscribe(EventKind::KeyDown, Handler::PanelKey);
        }
        subs.subscribe(EventKind::Click, Handler::ScrollyClick);
        subs.subscribe(EventKind::Click, Handler::TransitionClick);
        // Outside-click dismissal goes last so element-level click
        // behavior has already run when the panel swallows the event.
        subs.subscribe(EventKind::Click, Handler::PanelOutside);
        subs.subscribe(EventKind::TouchEnd, Handler::PanelOutside);
        if page.kind == PageKind::Home {
            subs.subscribe_passive(EventKind::Scroll, Handler::ScrollSpy);
        }
        subs.subscribe(EventKind::Ready, Handler::InjectOnReady);
        subs.subscribe(EventKind::Load, Handler::PreloadOnLoad);

        Self {
            page,
            cfg,
            base,
            panel,
            scroll,
            subs,
            timers: Timers::new(),
            effects: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn panel(&self) -> &NavPanel {
        &self.panel
    }

    /// Section the scroll-spy currently marks.
    pub fn current_section(&self) -> Option<&str> {
        self.scroll.current()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // ========================================================================
    // Event dispatch
    // ========================================================================

    /// Route one event through the subscriptions, in registration order.
    pub fn dispatch(&mut self, event: Event) -> EventCtl {
        let mut ctl = EventCtl::default();
        for sub in self.subs.matching(event.kind()) {
            if ctl.propagation_stopped() {
                break;
            }
            if let (Some(root), Some(target)) = (&sub.within, event.target()) {
                if !self.page.is_within(target, root) {
                    continue;
                }
            }
            if sub.passive {
                // Passive handlers may stop propagation but their
                // prevent-default is discarded.
                let mut scratch = ctl;
                self.run(sub.handler, &event, &mut scratch);
                if scratch.propagation_stopped() {
                    ctl.stop_propagation();
                }
            } else {
                self.run(sub.handler, &event, &mut ctl);
            }
        }
        ctl
    }

    fn run(&mut self, handler: Handler, event: &Event, ctl: &mut EventCtl) {
        match handler {
            Handler::PanelToggle => self.on_panel_toggle(event, ctl),
            Handler::PanelLink => self.on_panel_link(event, ctl),
            Handler::PanelBackdrop => self.on_panel_backdrop(event, ctl),
            Handler::PanelTouchStart => {
                if let Event::TouchStart { x, y, .. } = event {
                    self.panel.on_touch_start(*x, *y);
                }
            }
            Handler::PanelTouchMove => {
                if let Event::TouchMove { x, y, .. } = event {
                    self.panel
                        .on_touch_move(&mut self.page, &mut self.timers, *x, *y, ctl);
                }
            }
            Handler::PanelTouchEnd => self.panel.on_touch_end(),
            Handler::PanelKey => {
                if let Event::KeyDown { key: Key::Escape } = event {
                    self.panel
                        .hide_for_event(&mut self.page, &mut self.timers, ctl);
                }
            }
            Handler::PanelOutside => self.on_panel_outside(event, ctl),
            Handler::ScrollyClick => {
                if let Event::Click { target } = event {
                    self.scroll
                        .on_scrolly_click(&self.page, target, ctl, &mut self.effects);
                }
            }
            Handler::TransitionClick => self.on_transition_click(event),
            Handler::ScrollSpy => self.scroll.on_scroll(&mut self.page),
            Handler::InjectOnReady => self.on_ready(),
            Handler::PreloadOnLoad => {
                self.timers
                    .schedule(PRELOAD_CLEAR_MS, TimerAction::ClearPreload);
            }
        }
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    fn on_panel_toggle(&mut self, event: &Event, ctl: &mut EventCtl) {
        let Event::Click { target } = event else {
            return;
        };
        let toggle_href = format!("#{}", self.panel.id);
        let Some(el) = self.page.element(target) else {
            return;
        };
        if el.tag != "a" || el.attr("href") != Some(toggle_href.as_str()) {
            return;
        }
        ctl.prevent_default();
        // Without this the outside-click handler would immediately undo
        // the open.
        ctl.stop_propagation();
        self.panel.toggle(&mut self.page);
    }

    fn on_panel_link(&mut self, event: &Event, ctl: &mut EventCtl) {
        let Event::Click { target } = event else {
            return;
        };
        let toggle_href = format!("#{}", self.panel.id);
        let Some(el) = self.page.element(target) else {
            return;
        };
        if el.tag != "a" {
            return;
        }
        let Some(href) = el.attr("href") else {
            return;
        };
        if href.is_empty() || href == "#" || href == toggle_href {
            return;
        }
        let href = href.to_string();
        let new_tab = el.attr("target") == Some("_blank");

        ctl.prevent_default();
        ctl.stop_propagation();
        self.panel.hide(&mut self.page, &mut self.timers);
        // Navigate just after the slide-out finishes.
        self.timers.schedule(
            self.panel.options().delay_ms + NAV_GRACE_MS,
            TimerAction::Navigate { href, new_tab },
        );
    }

    fn on_panel_backdrop(&mut self, event: &Event, ctl: &mut EventCtl) {
        let Some(target) = event.target() else {
            return;
        };
        if target != BACKDROP_ID {
            return;
        }
        self.panel
            .hide_for_event(&mut self.page, &mut self.timers, ctl);
    }

    fn on_panel_outside(&mut self, event: &Event, ctl: &mut EventCtl) {
        let Some(target) = event.target() else {
            return;
        };
        if self.page.is_within(target, &self.panel.id) {
            return;
        }
        self.panel
            .hide_for_event(&mut self.page, &mut self.timers, ctl);
    }

    fn on_transition_click(&mut self, event: &Event) {
        let Event::Click { target } = event else {
            return;
        };
        let Some(el) = self.page.element(target) else {
            return;
        };
        if el.tag != "a" {
            return;
        }
        let Some(href) = el.attr("href") else {
            return;
        };
        if !paths::is_internal_href(href) || el.attr("target") == Some("_blank") {
            return;
        }
        self.page.add_class(BODY, NAVIGATING_CLASS);
    }

    fn on_ready(&mut self) {
        fragments::inject_header(&mut self.page, &self.cfg);
        fragments::inject_footer(&mut self.page, &self.cfg);
        fragments::inject_contact(&mut self.page, &self.cfg);
        if self.page.kind == PageKind::BlogPost {
            let root = fragments::root_prefix(self.page.kind, &self.base);
            jsonld::emit(&mut self.page, &self.cfg, &root);
        }
    }

    // ========================================================================
    // Timers and effects
    // ========================================================================

    /// Advance the virtual clock, applying every action that comes due.
    pub fn advance(&mut self, ms: u64) {
        for action in self.timers.advance(ms) {
            match action {
                TimerAction::PanelCleanup => {
                    if let Some(effect) = self.panel.cleanup(&mut self.page) {
                        self.effects.push(effect);
                    }
                }
                TimerAction::ClearPreload => {
                    self.page.remove_class(BODY, PRELOAD_CLASS);
                }
                TimerAction::Navigate { href, new_tab } => {
                    self.effects.push(Effect::Navigate { href, new_tab });
                }
            }
        }
    }

    /// Take the queued effects, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{blog_post_page, home_page, services_page};

    fn engine() -> Engine {
        Engine::new(home_page(), SiteConfig::default())
    }

    /// Engine with the ready-time fragments (title bar included) injected.
    fn ready_engine() -> Engine {
        let mut engine = engine();
        engine.dispatch(Event::Ready);
        engine
    }

    fn click(engine: &mut Engine, target: &str) -> EventCtl {
        engine.dispatch(Event::Click {
            target: target.into(),
        })
    }

    // =========================================================================
    // Boot
    // =========================================================================

    #[test]
    fn boot_injects_nav_and_panel() {
        let engine = engine();
        assert!(engine.page.contains("nav-link-about"));
        assert!(engine.page.contains("panel-link-about"));
        // Footer content waits for Ready.
        assert!(!engine.page.contains("footer-linkedin"));
        assert_eq!(engine.base(), "");
    }

    #[test]
    fn boot_resolves_base_from_location() {
        let engine = Engine::new(blog_post_page(), SiteConfig::default());
        assert_eq!(engine.base(), "../../");
        assert_eq!(
            engine.page.attr("nav-link-blog", "href"),
            Some("../../index.html")
        );
    }

    #[test]
    fn ready_injects_remaining_fragments() {
        let mut engine = engine();
        engine.dispatch(Event::Ready);
        assert!(engine.page.contains("header-toggle"));
        assert!(engine.page.contains("footer-linkedin"));
        assert!(engine.page.contains("contact-email"));
        // No article on the homepage.
        assert!(!engine.page.contains(jsonld::SCRIPT_ID));
    }

    #[test]
    fn ready_emits_structured_data_on_posts() {
        let mut engine = Engine::new(blog_post_page(), SiteConfig::default());
        engine.dispatch(Event::Ready);
        let script = engine.page.element(jsonld::SCRIPT_ID).unwrap();
        assert!(script.html.contains("BlogPosting"));
        assert!(script.html.contains("../../../images/logo.png"));
    }

    #[test]
    fn load_clears_preload_after_delay() {
        let mut engine = engine();
        engine.dispatch(Event::Load);
        assert!(engine.page.has_class(BODY, PRELOAD_CLASS));
        engine.advance(99);
        assert!(engine.page.has_class(BODY, PRELOAD_CLASS));
        engine.advance(1);
        assert!(!engine.page.has_class(BODY, PRELOAD_CLASS));
    }

    // =========================================================================
    // Panel routing
    // =========================================================================

    #[test]
    fn toggle_click_opens_and_closes() {
        let mut engine = ready_engine();

        let ctl = click(&mut engine, "header-toggle");
        assert!(ctl.default_prevented());
        assert!(engine.panel().is_visible());
        assert!(engine.page.has_class(BODY, "navPanel-visible"));

        // The stop on the toggle keeps the outside-click dismissal from
        // seeing this click; the second click closes via the toggle.
        let ctl = click(&mut engine, "header-toggle");
        assert!(ctl.propagation_stopped());
        assert!(!engine.panel().is_visible());
    }

    #[test]
    fn outside_click_dismisses_when_visible() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");

        let ctl = click(&mut engine, "nav-logo");
        assert!(!engine.panel().is_visible());
        assert!(ctl.default_prevented());
    }

    #[test]
    fn outside_click_inert_when_hidden() {
        let mut engine = ready_engine();
        let ctl = click(&mut engine, "nav-logo");
        assert!(!ctl.default_prevented());
        assert!(!engine.panel().is_visible());
    }

    #[test]
    fn backdrop_click_dismisses_and_is_consumed() {
        let mut engine = ready_engine();
        engine
            .page
            .insert(crate::page::Element::new(BACKDROP_ID, "div").child_of(BODY));
        click(&mut engine, "header-toggle");
        assert!(engine.panel().is_visible());

        let ctl = click(&mut engine, BACKDROP_ID);
        assert!(!engine.panel().is_visible());
        assert!(ctl.default_prevented());
        assert!(ctl.propagation_stopped());
    }

    #[test]
    fn backdrop_click_inert_when_hidden() {
        let mut engine = ready_engine();
        engine
            .page
            .insert(crate::page::Element::new(BACKDROP_ID, "div").child_of(BODY));
        let ctl = click(&mut engine, BACKDROP_ID);
        assert!(!ctl.default_prevented());
    }

    #[test]
    fn panel_link_defers_navigation() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");
        assert!(engine.panel().is_visible());

        let ctl = click(&mut engine, "panel-link-services");
        assert!(ctl.default_prevented());
        assert!(!engine.panel().is_visible());
        assert!(engine.drain_effects().is_empty());

        // Cleanup at 500ms, navigation at 510ms.
        engine.advance(500);
        assert_eq!(
            engine.drain_effects(),
            vec![Effect::ResetForms {
                within: "navPanel".into()
            }]
        );
        engine.advance(10);
        assert_eq!(
            engine.drain_effects(),
            vec![Effect::Navigate {
                href: "services/".into(),
                new_tab: false,
            }]
        );
    }

    #[test]
    fn panel_link_new_tab_opens_new_tab() {
        let mut engine = ready_engine();
        engine
            .page
            .element_mut("panel-link-blog")
            .unwrap()
            .attrs
            .insert("target".into(), "_blank".into());
        click(&mut engine, "header-toggle");
        click(&mut engine, "panel-link-blog");
        engine.advance(510);

        let effects = engine.drain_effects();
        assert!(effects.contains(&Effect::Navigate {
            href: "blog/index.html".into(),
            new_tab: true,
        }));
    }

    #[test]
    fn bare_hash_panel_link_is_left_alone() {
        let mut engine = ready_engine();
        engine.page.insert(
            crate::page::Element::new("panel-link-noop", "a")
                .child_of("panel-nav")
                .with_attr("href", "#"),
        );
        click(&mut engine, "header-toggle");
        let ctl = click(&mut engine, "panel-link-noop");
        assert!(!ctl.default_prevented());
        assert!(engine.panel().is_visible());
    }

    #[test]
    fn escape_ignored_by_default() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");
        engine.dispatch(Event::KeyDown { key: Key::Escape });
        assert!(engine.panel().is_visible());
    }

    #[test]
    fn escape_dismisses_when_enabled() {
        let opts = PanelOptions {
            hide_on_escape: true,
            ..Default::default()
        };
        let mut engine = Engine::with_panel_options(home_page(), SiteConfig::default(), opts);
        engine.dispatch(Event::Ready);
        click(&mut engine, "header-toggle");

        let ctl = engine.dispatch(Event::KeyDown { key: Key::Escape });
        assert!(!engine.panel().is_visible());
        assert!(ctl.default_prevented());

        // Other keys pass through.
        click(&mut engine, "header-toggle");
        engine.dispatch(Event::KeyDown { key: Key::Other });
        assert!(engine.panel().is_visible());
    }

    #[test]
    fn touch_end_inside_panel_does_not_dismiss() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");
        engine.dispatch(Event::TouchEnd {
            target: "panel-link-about".into(),
        });
        assert!(engine.panel().is_visible());

        engine.dispatch(Event::TouchEnd {
            target: "nav-logo".into(),
        });
        assert!(!engine.panel().is_visible());
    }

    #[test]
    fn swipe_routed_through_dispatch_dismisses() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");

        engine.dispatch(Event::TouchStart {
            target: "panel-link-about".into(),
            x: 200.0,
            y: 300.0,
        });
        let ctl = engine.dispatch(Event::TouchMove {
            target: "panel-link-about".into(),
            x: 130.0,
            y: 305.0,
        });
        assert!(!engine.panel().is_visible());
        assert!(ctl.default_prevented());
    }

    #[test]
    fn touches_outside_panel_do_not_feed_gestures() {
        let mut engine = ready_engine();
        click(&mut engine, "header-toggle");
        engine.dispatch(Event::TouchStart {
            target: "nav-logo".into(),
            x: 200.0,
            y: 300.0,
        });
        let ctl = engine.dispatch(Event::TouchMove {
            target: "nav-logo".into(),
            x: 130.0,
            y: 305.0,
        });
        // No origin was recorded, so no dismissal either.
        assert!(engine.panel().is_visible());
        assert!(!ctl.default_prevented());
    }

    // =========================================================================
    // Scroll routing
    // =========================================================================

    #[test]
    fn scrolly_click_emits_smooth_scroll() {
        let mut engine = engine();
        let ctl = click(&mut engine, "nav-link-about");
        assert!(ctl.default_prevented());
        assert_eq!(
            engine.drain_effects(),
            vec![Effect::SmoothScrollTo { y: 600.0 }]
        );
    }

    #[test]
    fn scroll_updates_spy_and_stays_passive() {
        let mut engine = engine();
        engine.page.scroll_y = 400.0;
        let ctl = engine.dispatch(Event::Scroll);
        assert_eq!(engine.current_section(), Some("about"));
        assert!(page_current_marker(&engine));
        assert!(!ctl.default_prevented());
    }

    #[test]
    fn scroll_spy_only_runs_on_the_homepage() {
        let mut page = services_page();
        page.insert(
            crate::page::Element::new("about", "section")
                .child_of(BODY)
                .with_bounds(600.0, 900.0),
        );
        let mut engine = Engine::new(page, SiteConfig::default());
        engine.page.scroll_y = 700.0;
        engine.dispatch(Event::Scroll);
        assert_eq!(engine.current_section(), None);
    }

    fn page_current_marker(engine: &Engine) -> bool {
        engine.page.has_class("nav-item-about", "current")
    }

    // =========================================================================
    // Exit transition
    // =========================================================================

    #[test]
    fn internal_link_marks_navigating_away() {
        let mut engine = engine();
        let ctl = click(&mut engine, "nav-link-services");
        assert!(engine.page.has_class(BODY, NAVIGATING_CLASS));
        // Navigation itself proceeds.
        assert!(!ctl.default_prevented());
    }

    #[test]
    fn anchor_and_external_links_skip_exit_transition() {
        let mut engine = engine();
        engine.dispatch(Event::Ready);

        click(&mut engine, "nav-link-about");
        assert!(!engine.page.has_class(BODY, NAVIGATING_CLASS));

        click(&mut engine, "footer-github");
        assert!(!engine.page.has_class(BODY, NAVIGATING_CLASS));

        click(&mut engine, "contact-email");
        assert!(!engine.page.has_class(BODY, NAVIGATING_CLASS));
    }

    #[test]
    fn new_tab_links_skip_exit_transition() {
        let mut engine = engine();
        engine
            .page
            .element_mut("nav-link-services")
            .unwrap()
            .attrs
            .insert("target".into(), "_blank".into());
        click(&mut engine, "nav-link-services");
        assert!(!engine.page.has_class(BODY, NAVIGATING_CLASS));
    }

    #[test]
    fn services_page_boots_without_sections() {
        let mut engine = Engine::new(services_page(), SiteConfig::default());
        engine.dispatch(Event::Ready);
        engine.page.scroll_y = 700.0;
        engine.dispatch(Event::Scroll);
        assert_eq!(engine.current_section(), None);
        assert!(engine.page.has_class("nav-item-services", "current"));
    }
}
