//! SSD1351 OLED Display Driver
//!
//! Driver for 128x128 SSD1351-based RGB565 OLED panels via 4-wire SPI
//! (SCK/MOSI plus CS, D/C, RST). Implements the core's [`DisplaySink`]:
//! windowed block writes and panel sleep control. Pixel RAM is retained
//! while the panel sleeps, which the compositor relies on across
//! screen-off stretches.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use threptos_core::gfx::Rect;
use threptos_core::traits::DisplaySink;

/// SSD1351 commands
#[allow(dead_code)]
mod cmd {
    pub const SET_COLUMN: u8 = 0x15;
    pub const SET_ROW: u8 = 0x75;
    pub const WRITE_RAM: u8 = 0x5C;
    pub const SET_REMAP: u8 = 0xA0;
    pub const START_LINE: u8 = 0xA1;
    pub const DISPLAY_OFFSET: u8 = 0xA2;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const FUNCTION_SELECT: u8 = 0xAB;
    pub const DISPLAY_OFF: u8 = 0xAE; // sleep in
    pub const DISPLAY_ON: u8 = 0xAF; // sleep out
    pub const PRECHARGE: u8 = 0xB1;
    pub const CLOCK_DIV: u8 = 0xB3;
    pub const SET_VSL: u8 = 0xB4;
    pub const PRECHARGE2: u8 = 0xB6;
    pub const VCOMH: u8 = 0xBE;
    pub const CONTRAST_ABC: u8 = 0xC1;
    pub const CONTRAST_MASTER: u8 = 0xC7;
    pub const MUX_RATIO: u8 = 0xCA;
    pub const COMMAND_LOCK: u8 = 0xFD;
}

/// Error type that wraps SPI and GPIO errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

/// SSD1351 panel driver.
pub struct Ssd1351<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    width: u16,
    height: u16,
}

impl<SPI, DC, CS, RST, PinE> Ssd1351<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, width: u16, height: u16) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            width,
            height,
        }
    }

    /// Hardware-reset the panel and run the initialization sequence.
    /// The panel comes up powered on with undefined RAM contents; push a
    /// full frame before relying on it.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DriverError<SPI::Error, PinE>> {
        self.rst.set_high().map_err(DriverError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_low().map_err(DriverError::Pin)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(DriverError::Pin)?;
        delay.delay_ms(10);

        // Unlock extended commands, then configure the panel
        self.command(cmd::COMMAND_LOCK, &[0x12])?;
        self.command(cmd::COMMAND_LOCK, &[0xB1])?;
        self.command(cmd::DISPLAY_OFF, &[])?;
        self.command(cmd::CLOCK_DIV, &[0xF1])?;
        self.command(cmd::MUX_RATIO, &[0x7F])?;
        // 64K color depth, nibble remap, COM split
        self.command(cmd::SET_REMAP, &[0x74])?;
        self.command(cmd::DISPLAY_OFFSET, &[0x00])?;
        self.command(cmd::START_LINE, &[0x00])?;
        // Internal VDD regulator
        self.command(cmd::FUNCTION_SELECT, &[0x01])?;
        self.command(cmd::PRECHARGE, &[0x32])?;
        self.command(cmd::VCOMH, &[0x05])?;
        self.command(cmd::NORMAL_DISPLAY, &[])?;
        self.command(cmd::CONTRAST_ABC, &[0xC8, 0x80, 0xC8])?;
        self.command(cmd::CONTRAST_MASTER, &[0x0F])?;
        self.command(cmd::SET_VSL, &[0xA0, 0xB5, 0x55])?;
        self.command(cmd::PRECHARGE2, &[0x01])?;
        self.command(cmd::DISPLAY_ON, &[])?;

        Ok(())
    }

    /// Send one command with its parameter bytes: D/C low for the opcode,
    /// high for the data, CS asserted around the whole transaction.
    fn command(&mut self, op: u8, data: &[u8]) -> Result<(), DriverError<SPI::Error, PinE>> {
        self.cs.set_low().map_err(DriverError::Pin)?;
        self.dc.set_low().map_err(DriverError::Pin)?;
        let result = self.write_payload(op, data);
        // Release CS even on a failed transfer
        let cs_result = self.cs.set_high().map_err(DriverError::Pin);
        result?;
        cs_result
    }

    fn write_payload(&mut self, op: u8, data: &[u8]) -> Result<(), DriverError<SPI::Error, PinE>> {
        self.spi.write(&[op]).map_err(DriverError::Spi)?;
        if !data.is_empty() {
            self.dc.set_high().map_err(DriverError::Pin)?;
            self.spi.write(data).map_err(DriverError::Spi)?;
        }
        self.spi.flush().map_err(DriverError::Spi)
    }
}

impl<SPI, DC, CS, RST, PinE> DisplaySink for Ssd1351<SPI, DC, CS, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin<Error = PinE>,
    CS: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
{
    type Error = DriverError<SPI::Error, PinE>;

    fn push_block(&mut self, rect: Rect, pixels: &[u8]) -> Result<(), Self::Error> {
        debug_assert!(rect.x1 < self.width && rect.y1 < self.height);
        debug_assert_eq!(pixels.len(), rect.byte_len());
        self.command(cmd::SET_COLUMN, &[rect.x0 as u8, rect.x1 as u8])?;
        self.command(cmd::SET_ROW, &[rect.y0 as u8, rect.y1 as u8])?;
        self.command(cmd::WRITE_RAM, pixels)
    }

    fn power_on(&mut self) -> Result<(), Self::Error> {
        self.command(cmd::DISPLAY_ON, &[])
    }

    fn power_off(&mut self) -> Result<(), Self::Error> {
        self.command(cmd::DISPLAY_OFF, &[])
    }
}
