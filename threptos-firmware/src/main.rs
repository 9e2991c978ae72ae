//! Threptos - Virtual Pet Device Firmware
//!
//! Main firmware binary for RP2040-based handhelds with an SSD1351 OLED
//! and three push buttons. Hardware bring-up happens here; everything
//! with behavior lives in threptos-core.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Instant};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use threptos_core::config::{DeviceConfig, FRAME_BYTES, SCRATCH_BYTES};
use threptos_core::game::Game;
use threptos_core::gfx::{Assets, Compositor};
use threptos_core::input::{InputSource, PressLatch};
use threptos_drivers::display::Ssd1351;

mod assets;
mod entropy;
mod tasks;

/// The one immutable device configuration, shared by reference.
static CONFIG: DeviceConfig = DeviceConfig::DEFAULT;

/// Press flags shared between the button edge task and the game task.
static PRESS_LATCH: PressLatch = PressLatch::new(DeviceConfig::DEFAULT.timing.debounce_ms);

// Static cells for the pixel buffers (must live forever for task references)
static BASE_FRAME: StaticCell<[u8; FRAME_BYTES]> = StaticCell::new();
static SCRATCH: StaticCell<[u8; SCRATCH_BYTES]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Threptos firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // SPI0 at 16 MHz for the panel (SCK=GP2, MOSI=GP3, MISO unused)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 16_000_000;
    let spi_bus = Spi::new_blocking(p.SPI0, p.PIN_2, p.PIN_3, p.PIN_4, spi_config);

    let cs = Output::new(p.PIN_5, Level::High);
    let dc = Output::new(p.PIN_6, Level::Low);
    let rst = Output::new(p.PIN_7, Level::High);

    let mut panel = Ssd1351::new(spi_bus, dc, cs, rst, CONFIG.width, CONFIG.height);
    panel.init(&mut Delay).unwrap();
    info!("Panel initialized");

    // Buttons are active-low with internal pull-ups
    let next = Input::new(p.PIN_10, Pull::Up);
    let confirm = Input::new(p.PIN_11, Pull::Up);
    let back = Input::new(p.PIN_12, Pull::Up);

    // Validate flash assets and composite the base frame. Failing here
    // means a mis-converted asset; there is nothing to run without art.
    let base = BASE_FRAME.init([0; FRAME_BYTES]);
    let scratch = SCRATCH.init([0; SCRATCH_BYTES]);
    let loaded = match Assets::load(&CONFIG, &assets::FLASH, base) {
        Ok(loaded) => loaded,
        Err(e) => defmt::panic!("asset load failed: {:?}", e),
    };
    info!("Assets loaded");

    let gfx = Compositor::new(&CONFIG, loaded, scratch);
    let now = Instant::now().as_millis() as u32;
    let mut game = Game::new(&CONFIG, gfx, now);
    game.render_initial(&mut panel).unwrap();
    let input = InputSource::new(&PRESS_LATCH, &CONFIG.timing, now);
    info!("Initial frame rendered");

    // Spawn tasks
    spawner
        .spawn(tasks::buttons_task(next, confirm, back, &PRESS_LATCH))
        .unwrap();
    spawner
        .spawn(tasks::game_task(panel, input, game, entropy::HwEntropy::new()))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
