//! Board-agnostic encoder for seven segment displays
//!
//! This crate turns text and numbers into segment patterns for displays
//! driven by serial-in/parallel-out LED and LCD driver chips:
//!
//! - Mask compiler describing the display layout
//! - Glyph table and cell packing
//! - Placement cursor and number formatting
//! - Display renderer holding the segment buffer
//! - Driver chip descriptors and configuration types
//! - Output trait implemented by the drivers crate

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod display;
pub mod format;
pub mod glyph;
pub mod mask;
pub mod pack;
pub mod traits;

pub use config::{find_chip, Alignment, ChipDescriptor, DisplayConfig, RenderConfig, Wiring};
pub use display::{Display, InitError};
pub use format::Number;
pub use mask::{compile, DisplayRange, MaskError};
pub use traits::{Frame, NoOutput, SegmentSink};
