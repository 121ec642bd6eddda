//! Hardware abstraction traits
//!
//! The encoder never drives pins itself. A finished frame is handed to a
//! [`SegmentSink`], implemented by the drivers crate for real hardware.

pub mod output;

pub use output::{Frame, NoOutput, SegmentSink};
