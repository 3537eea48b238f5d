//! Board wiring
//!
//! Pin assignments for a Raspberry Pi Pico with a MAX7219 matrix module and
//! one push button:
//!
//! | Signal        | GPIO | Notes                          |
//! |---------------|------|--------------------------------|
//! | MAX7219 CLK   | 18   | SPI0 SCK, 10 MHz, mode 0       |
//! | MAX7219 DIN   | 19   | SPI0 TX                        |
//! | MAX7219 CS    | 17   | driven manually                |
//! | Button        | 10   | to GND, internal pull-up       |
//! | Busy LED      | 25   | onboard LED                    |

use defmt::*;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Phase, Polarity, Spi};
use embassy_rp::Peripherals;
use pixreel_core::config::PlayerConfig;
use pixreel_drivers::display::Max7219;
use pixreel_hal_rp2040::Rp2040Watchdog;

/// SPI clock for the MAX7219 (the chip tops out at 10 MHz)
const DISPLAY_SPI_HZ: u32 = 10_000_000;

/// Matrix driver as wired on this board
pub type Display = Max7219<Spi<'static, SPI0, Blocking>, Output<'static>>;

/// Everything playback needs from the board
pub struct Board {
    pub display: Display,
    pub button: Input<'static>,
    pub busy_led: Output<'static>,
    pub watchdog: Rp2040Watchdog,
}

impl Board {
    /// Claim the peripherals and bring up the display
    ///
    /// A display that fails to initialize is logged and kept: the first
    /// frame written during playback will report the failure again.
    pub fn new(p: Peripherals, config: &PlayerConfig) -> Self {
        let mut spi_config = spi::Config::default();
        spi_config.frequency = DISPLAY_SPI_HZ;
        spi_config.phase = Phase::CaptureOnFirstTransition;
        spi_config.polarity = Polarity::IdleLow;

        let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
        let cs = Output::new(p.PIN_17, Level::High);

        let mut display = Max7219::new(spi, cs);
        match display.init(config.display.brightness) {
            Ok(()) => info!("MAX7219 ready (brightness {})", config.display.brightness),
            Err(_) => error!("MAX7219 init failed"),
        }

        let pull = if config.input.active_low {
            Pull::Up
        } else {
            Pull::Down
        };

        Self {
            display,
            button: Input::new(p.PIN_10, pull),
            busy_led: Output::new(p.PIN_25, Level::Low),
            watchdog: Rp2040Watchdog::new(p.WATCHDOG),
        }
    }
}
