//! Button edge task
//!
//! Waits on the falling edge of any of the three buttons and feeds the
//! press latch. The edge path does nothing else: a pin re-read to filter
//! release bounce, one latch call, back to waiting. Debounce and
//! wake/sleep policy live in threptos-core.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use threptos_core::input::{Button, PressLatch};

/// Button task - converts GPIO edges into latched presses
#[embassy_executor::task]
pub async fn buttons_task(
    mut next: Input<'static>,
    mut confirm: Input<'static>,
    mut back: Input<'static>,
    latch: &'static PressLatch,
) {
    info!("Button task started");

    loop {
        // Bind the edge before touching the pins again: the select holds
        // all three exclusively until it resolves.
        let edge = select3(
            next.wait_for_falling_edge(),
            confirm.wait_for_falling_edge(),
            back.wait_for_falling_edge(),
        )
        .await;

        let button = match edge {
            Either3::First(()) => record(&next, Button::Next, latch),
            Either3::Second(()) => record(&confirm, Button::Confirm, latch),
            Either3::Third(()) => record(&back, Button::Back, latch),
        };

        if let Some(button) = button {
            trace!("Press accepted: {:?}", button);
        }
    }
}

/// Re-check the pin and latch the press. Returns the button if the press
/// was accepted past the debounce gate.
fn record(pin: &Input<'static>, button: Button, latch: &PressLatch) -> Option<Button> {
    let now = Instant::now().as_millis() as u32;
    latch.record_edge(button, now, pin.is_low()).then_some(button)
}
