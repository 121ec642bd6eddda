//! Configuration types
//!
//! Render settings, the persisted display configuration and the table of
//! supported driver chips.

pub mod chip;
pub mod types;

pub use chip::*;
pub use types::*;
