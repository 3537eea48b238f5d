//! RP2040-specific HAL for the LED matrix player
//!
//! This crate provides RP2040 implementations of the shared `pixreel-hal`
//! capability traits:
//!
//! - Hardware watchdog (implements `pixreel_hal::Watchdog`)
//! - Monotonic clock on the embassy time driver (implements `pixreel_hal::Clock`)
//!
//! The display is driven through the board-agnostic MAX7219 driver in
//! `pixreel-drivers`, so there is nothing display-specific here.

#![no_std]

pub mod clock;
pub mod watchdog;

pub use clock::EmbassyClock;
pub use watchdog::{ResetCause, Rp2040Watchdog};
