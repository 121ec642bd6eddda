//! Display masks
//!
//! A mask describes the physical layout of a display, one symbol per cell:
//!
//! | Symbol | Cell | Bits |
//! |--------|------|------|
//! | `8` | seven segment digit | 7 |
//! | `1` | half digit that can only show a one | 1 |
//! | `-` | minus sign | 1 |
//! | `.` | decimal point | 1 |
//! | `:` | colon | 1 |
//! | `\|` | point, colon or both | 2 |
//!
//! For example a clock with a colon is `"88:88"` and a signed meter with
//! three and a half digits is `"-188.8"`.

pub mod cell;
pub mod compile;

pub use cell::CellKind;
pub use compile::{compile, CompiledMask, DisplayRange, MaskError};

/// Maximum number of cells in a mask
pub const MAX_CELLS: usize = 32;
