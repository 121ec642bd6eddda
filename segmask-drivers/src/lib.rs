//! Hardware driver implementations
//!
//! This crate provides [`segmask_core::SegmentSink`] implementations that
//! move finished frames onto real hardware:
//!
//! - Bit-banged shift register for M5450 style LED and AY0438 style LCD
//!   driver chips

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod shift_register;

pub use shift_register::{NoPin, ShiftError, ShiftRegister};
