//! # Sitewire
//!
//! The behavior layer of a small static marketing site, factored out of the
//! browser. Everything the site's pages do after load lives here: shared
//! chrome injection, the slide-in mobile nav panel, smooth scrolling with a
//! scroll-spy, exit transitions, and structured data for blog posts.
//!
//! # Architecture: Model, Engine, Host
//!
//! Nothing in this crate touches a live document. The engine runs against a
//! deterministic page model and talks to the outside world through two
//! narrow channels:
//!
//! ```text
//! host events   →  Engine::dispatch   →  model mutations (classes, html)
//! host clock    →  Engine::advance    →  due timer actions
//!                  Engine::drain_effects  →  effects the host performs
//! ```
//!
//! The host (a thin DOM binding, or a test) owns the real document. It
//! mirrors measured geometry into the model, feeds events in, and carries
//! the drained effects (smooth scrolls, navigations, form resets) back out.
//! This split exists for two reasons:
//!
//! - **Testability**: every behavior, including gesture recognition and
//!   timer-deferred navigation, runs in a plain unit test with no browser.
//! - **Determinism**: same events in the same order produce the same
//!   mutations, so redundant-write invariants can be pinned exactly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`paths`] | Base-path resolution from the document location, href classification |
//! | [`config`] | `site.toml` loading and validation: contact, social, branding |
//! | [`page`] | The page model: elements, events, subscriptions, timers, effects |
//! | [`fragments`] | Maud-rendered shared chrome filled into the shell's empty elements |
//! | [`panel`] | Slide-in nav panel: visibility, deferred cleanup, swipe dismissal |
//! | [`scroll`] | Smooth-scroll click handling and the section scroll-spy |
//! | [`jsonld`] | BlogPosting JSON-LD built from article data attributes |
//! | [`engine`] | Wires everything to the subscription registry and routes events |
//!
//! # Design Decisions
//!
//! ## A Page Model Instead of a Headless Browser
//!
//! Driving a real browser makes every test slow and every failure flaky.
//! The model keeps just what the behaviors observe: element ids, tags,
//! parents, classes, attributes, measured bounds, and scroll boxes. Anything
//! the site's scripts never read has no representation, which keeps the
//! model honest about what the behaviors actually depend on.
//!
//! ## Maud Over String Templates
//!
//! Fragment HTML is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro. Malformed markup is a build error, interpolated
//! config values are auto-escaped, and there is no template directory to
//! ship or get out of sync.
//!
//! ## Flat Subscriptions, No Closures
//!
//! Handlers are enum variants routed by the engine, not boxed closures.
//! Registration order is dispatch order, `stop_propagation` starves later
//! subscriptions, and passive subscriptions get a scratch control they
//! cannot use to cancel the event. That is the same contract the site
//! previously leaned on implicitly; here it is explicit and tested.
//!
//! ## A Virtual Clock
//!
//! The panel hides now but cleans up 500ms later, navigation follows 10ms
//! after that, and the preload class drops 100ms after load. All of it goes
//! through a timer queue the host advances, so tests step time in exact
//! increments and assert what fires between them.

pub mod config;
pub mod engine;
pub mod fragments;
pub mod jsonld;
pub mod page;
pub mod panel;
pub mod paths;
pub mod scroll;

#[cfg(test)]
pub(crate) mod test_helpers;
