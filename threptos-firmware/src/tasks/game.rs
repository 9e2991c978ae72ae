//! Game task
//!
//! The single main execution context: one loop iteration per frame
//! period. Consumes the input snapshot (which may toggle panel power),
//! then hands the cycle to the core orchestrator.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Instant, Ticker};

use threptos_core::game::Game;
use threptos_core::input::InputSource;
use threptos_drivers::display::Ssd1351;

use crate::entropy::HwEntropy;
use crate::CONFIG;

/// The concrete panel type on this board.
pub type Panel =
    Ssd1351<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

/// Game task - frame-cadence orchestrator loop
#[embassy_executor::task]
pub async fn game_task(
    mut panel: Panel,
    mut input: InputSource<'static>,
    mut game: Game<'static>,
    mut entropy: HwEntropy,
) {
    info!("Game task started");

    let mut ticker = Ticker::every(Duration::from_millis(CONFIG.timing.frame_delay_ms as u64));

    loop {
        ticker.next().await;
        let now = Instant::now().as_millis() as u32;

        let snapshot = match input.consume(now, &mut panel) {
            Ok(snapshot) => snapshot,
            Err(_) => {
                warn!("Panel power command failed");
                continue;
            }
        };
        if snapshot.just_woke {
            debug!("Screen woke");
        }

        match game.cycle(&snapshot, now, &mut panel, &mut entropy) {
            Ok(Some(change)) => info!("Phase change: {:?}", change),
            Ok(None) => {}
            Err(_) => warn!("Patch push failed"),
        }
    }
}
