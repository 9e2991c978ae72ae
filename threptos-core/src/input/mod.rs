//! Debounced button input and screen sleep policy
//!
//! Button edges arrive from an asynchronous interrupt context; the main
//! loop consumes them once per cycle. The only state shared between the
//! two contexts is the [`PressLatch`]: three pressed flags and their
//! debounce timestamps behind a critical section, so a press can never be
//! lost between the consumer's read and clear, nor attributed to a cycle
//! that already read the flags.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::Timing;
use crate::time::{elapsed, Millis};
use crate::traits::DisplaySink;

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 3;

/// The three buttons and their roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advance the menu cursor.
    Next,
    /// Confirm the selected entry.
    Confirm,
    /// Clear the selection / cancel.
    Back,
}

impl Button {
    pub const fn index(self) -> usize {
        match self {
            Button::Next => 0,
            Button::Confirm => 1,
            Button::Back => 2,
        }
    }
}

/// Which buttons registered a press this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressSet {
    pub next: bool,
    pub confirm: bool,
    pub back: bool,
}

impl PressSet {
    pub const fn any(self) -> bool {
        self.next || self.confirm || self.back
    }
}

/// The per-cycle input view handed to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub pressed: PressSet,
    pub screen_on: bool,
    /// The screen turned on this cycle; the press that woke it was
    /// swallowed.
    pub just_woke: bool,
}

#[derive(Default)]
struct LatchInner {
    pressed: [bool; BUTTON_COUNT],
    last_accept: [Millis; BUTTON_COUNT],
}

/// Press flags shared between the edge handlers and the main loop.
///
/// Designed to live in a `static`; both sides go through one short
/// critical section per access. The edge path does nothing but a pin
/// re-check (done by the caller), a timestamp comparison, and flag sets.
pub struct PressLatch {
    inner: Mutex<RefCell<LatchInner>>,
    debounce_ms: u32,
}

impl PressLatch {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(LatchInner {
                pressed: [false; BUTTON_COUNT],
                last_accept: [0; BUTTON_COUNT],
            })),
            debounce_ms,
        }
    }

    /// Record a high-to-low edge. `still_low` is the caller's re-read of
    /// the pin, filtering release bounce. Returns whether the press was
    /// accepted; an edge inside the debounce window is dropped.
    pub fn record_edge(&self, button: Button, now: Millis, still_low: bool) -> bool {
        if !still_low {
            return false;
        }
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let i = button.index();
            if elapsed(now, inner.last_accept[i]) > self.debounce_ms {
                inner.pressed[i] = true;
                inner.last_accept[i] = now;
                true
            } else {
                false
            }
        })
    }

    /// Atomically read and clear the pending press flags.
    pub fn take(&self) -> PressSet {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let set = PressSet {
                next: inner.pressed[0],
                confirm: inner.pressed[1],
                back: inner.pressed[2],
            };
            inner.pressed = [false; BUTTON_COUNT];
            set
        })
    }
}

/// Turns latched presses into per-cycle snapshots and runs the screen
/// sleep policy: any press refreshes the activity clock, a press while
/// dark wakes the panel (and is swallowed), and a fixed stretch of
/// inactivity powers the panel off.
///
/// A stuck-low pin simply never re-arms its debounce window; that is an
/// accepted limitation of the hardware, not a fault handled here.
pub struct InputSource<'a> {
    latch: &'a PressLatch,
    screen_timeout_ms: u32,
    screen_on: bool,
    last_activity: Millis,
}

impl<'a> InputSource<'a> {
    pub fn new(latch: &'a PressLatch, timing: &Timing, now: Millis) -> Self {
        Self {
            latch,
            screen_timeout_ms: timing.screen_timeout_ms,
            screen_on: true,
            last_activity: now,
        }
    }

    pub fn screen_on(&self) -> bool {
        self.screen_on
    }

    /// Build this cycle's snapshot. Called exactly once per orchestrator
    /// cycle from the main context.
    pub fn consume<S: DisplaySink>(
        &mut self,
        now: Millis,
        sink: &mut S,
    ) -> Result<InputSnapshot, S::Error> {
        let mut pressed = self.latch.take();
        let mut just_woke = false;

        if pressed.any() {
            self.last_activity = now;
            if !self.screen_on {
                sink.power_on()?;
                self.screen_on = true;
                just_woke = true;
                // A wake gesture must not also perform a menu action
                pressed = PressSet::default();
            }
        }

        if self.screen_on && elapsed(now, self.last_activity) >= self.screen_timeout_ms {
            sink.power_off()?;
            self.screen_on = false;
        }

        Ok(InputSnapshot {
            pressed,
            screen_on: self.screen_on,
            just_woke,
        })
    }
}
