//! MAX7219 LED matrix driver (SPI)
//!
//! The MAX7219 drives an 8x8 LED matrix through eight digit registers, one
//! per row. Every command is a 16-bit frame, register address first:
//!
//! ```text
//!   CS low -> [register] [data] -> CS high (latches on the rising edge)
//! ```
//!
//! Rows are staged in RAM by `set_row` and only written out on `commit`.
//! The driver handles a single device; daisy-chained modules are not
//! supported.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use pixreel_hal::{DisplaySink, MATRIX_ROWS};

/// MAX7219 register addresses
pub mod reg {
    /// First row; rows 0-7 map to 0x01-0x08
    pub const DIGIT0: u8 = 0x01;
    /// BCD decode enable per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// LED intensity (0x0-0xF)
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// 0 = shutdown, 1 = normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// 1 = all LEDs on
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Highest intensity setting
pub const MAX_INTENSITY: u8 = 0x0F;

/// MAX7219 communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Max7219Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Chip select could not be driven
    Pin(P),
}

/// MAX7219 driver
pub struct Max7219<SPI, CS> {
    spi: SPI,
    cs: CS,
    rows: [u8; MATRIX_ROWS],
}

impl<SPI, CS> Max7219<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a driver; call [`init`](Self::init) before use
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            rows: [0; MATRIX_ROWS],
        }
    }

    /// Configure the chip for raw matrix output and blank it
    ///
    /// `brightness` is clamped to [`MAX_INTENSITY`].
    pub fn init(&mut self, brightness: u8) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        self.cs.set_high().map_err(Max7219Error::Pin)?;

        self.write_register(reg::DISPLAY_TEST, 0)?;
        self.write_register(reg::SCAN_LIMIT, (MATRIX_ROWS - 1) as u8)?;
        // Row bytes are bitmaps, not BCD digits
        self.write_register(reg::DECODE_MODE, 0)?;
        self.set_intensity(brightness)?;
        self.clear()?;
        self.write_register(reg::SHUTDOWN, 1)
    }

    /// Set the LED intensity
    pub fn set_intensity(&mut self, brightness: u8) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        self.write_register(reg::INTENSITY, brightness.min(MAX_INTENSITY))
    }

    /// Turn every LED off immediately
    pub fn clear(&mut self) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        self.rows = [0; MATRIX_ROWS];
        self.flush_rows()
    }

    fn flush_rows(&mut self) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        let rows = self.rows;
        for (index, bits) in rows.into_iter().enumerate() {
            self.write_register(reg::DIGIT0 + index as u8, bits)?;
        }
        Ok(())
    }

    /// Send one 16-bit command framed by chip select
    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Max7219Error<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(Max7219Error::Pin)?;
        let sent = self
            .spi
            .write(&[register, data])
            .and_then(|()| self.spi.flush());
        // Raise CS even after a failed transfer so the next command starts clean
        self.cs.set_high().map_err(Max7219Error::Pin)?;
        sent.map_err(Max7219Error::Spi)
    }
}

impl<SPI, CS> DisplaySink for Max7219<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Error = Max7219Error<SPI::Error, CS::Error>;

    fn set_row(&mut self, index: usize, bits: u8) {
        if let Some(row) = self.rows.get_mut(index) {
            *row = bits;
        }
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.flush_rows()
    }
}
