//! Deterministic timers and throttling.
//!
//! Deferred work (panel cleanup, deferred navigation, the preload clear)
//! goes through [`Timers`]: a queue over a virtual clock the host advances
//! explicitly. Tests advance time by exact amounts and observe exactly
//! which actions come due, in schedule order. Nothing in the crate reads
//! wall-clock time.

/// Deferred action, matched on by the engine when it comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Reset the panel's scroll position and forms after it finished
    /// sliding out.
    PanelCleanup,
    /// Drop the body's preload class.
    ClearPreload,
    /// Perform a navigation that was deferred to let the panel close.
    Navigate { href: String, new_tab: bool },
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    seq: u64,
    action: TimerAction,
}

/// Timer queue over a virtual clock.
#[derive(Debug, Default)]
pub struct Timers {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in ms.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms,
            seq,
            action,
        });
    }

    /// Advance the clock by `ms` and return the actions that came due,
    /// ordered by due time, ties broken by schedule order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerAction> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter().map(|p| p.action).collect()
    }

    /// Number of timers not yet due.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Fixed-window rate limiter.
///
/// The first call in a window fires, later calls in the same window are
/// dropped entirely (no trailing call). That makes it wrong for anything
/// that must converge on the latest state, like the scroll-spy, and fine
/// for anything that just caps work.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: u64,
    last_fired: Option<u64>,
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_fired: None,
        }
    }

    /// True when a call at `now_ms` may fire.
    pub fn allow(&mut self, now_ms: u64) -> bool {
        match self.last_fired {
            Some(last) if now_ms < last + self.window_ms => false,
            _ => {
                self.last_fired = Some(now_ms);
                true
            }
        }
    }
}
