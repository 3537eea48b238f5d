//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the capability traits
//! defined in pixreel-hal:
//!
//! - Display drivers (MAX7219 8x8 LED matrix)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
