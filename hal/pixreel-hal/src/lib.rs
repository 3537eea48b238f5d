//! pixreel Hardware Abstraction Layer
//!
//! This crate defines the device-facing capabilities the playback engine
//! needs. Chip-specific HALs and drivers implement them; the engine in
//! `pixreel-core` only ever sees these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixreel-core (playback engine)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixreel-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pixreel-hal-  │       │   pixreel-    │
//! │    rp2040     │       │   drivers     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`display::DisplaySink`] - 8-row monochrome matrix that latches a row buffer
//! - [`watchdog::Watchdog`] - hardware timer that must be fed periodically
//! - [`clock::Clock`] - monotonic millisecond time source
//!
//! Digital input (the button), the busy LED and blocking delays use the
//! `embedded-hal` 1.0 traits directly.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use display::{DisplaySink, MATRIX_ROWS};
pub use watchdog::Watchdog;
