#![cfg_attr(not(test), no_std)]

//! Board-independent logic for the smart buzzer: tone generation, the
//! persisted frequency record, the calibration sweep and the signal relay.
//!
//! Hardware is reached only through the traits in [`tone`], [`pacing`] and
//! [`store`] plus the `embedded-hal` pin and delay traits, so everything here
//! runs on the host under `cargo test`.

pub mod buzzer;
pub mod calibration;
pub mod config;
pub mod firmware;
pub mod frequency;
pub mod pacing;
pub mod record_log;
pub mod relay;
pub mod signal;
pub mod store;
pub mod tone;

#[cfg(test)]
mod mock;

pub use fugit::HertzU32;
