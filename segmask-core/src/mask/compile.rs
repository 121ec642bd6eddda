//! Mask compiler
//!
//! Validates a mask string, classifies its cells, precomputes each cell's
//! bit offset and derives the numeric range the layout can show.

use core::fmt;

use heapless::{String, Vec};

use super::cell::CellKind;
use super::MAX_CELLS;
use crate::buffer::SEGMENT_CAPACITY;
use crate::config::Wiring;

/// Reasons a mask is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MaskError {
    /// Mask has no cells
    Empty,
    /// Mask has more than [`MAX_CELLS`] cells
    TooLong,
    /// Character outside the mask alphabet
    InvalidSymbol { position: usize, symbol: u8 },
    /// Sign not in the first position
    MisplacedSign,
    /// Second single digit, or single digit after a full digit
    MisplacedSingleDigit,
    /// Punctuation directly following punctuation
    RepeatedPunctuation { position: usize },
    /// Cells need more bits than the segment buffer holds
    TooManySegments,
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Empty => write!(f, "mask is empty"),
            MaskError::TooLong => write!(f, "mask has more than {} cells", MAX_CELLS),
            MaskError::InvalidSymbol { position, symbol } => {
                write!(f, "invalid mask symbol 0x{:02x} at {}", symbol, position)
            }
            MaskError::MisplacedSign => write!(f, "sign must be the first cell"),
            MaskError::MisplacedSingleDigit => {
                write!(f, "single digit must be unique and precede all digits")
            }
            MaskError::RepeatedPunctuation { position } => {
                write!(f, "repeated punctuation at {}", position)
            }
            MaskError::TooManySegments => {
                write!(f, "mask needs more than {} segments", SEGMENT_CAPACITY)
            }
        }
    }
}

/// Range of numbers a mask can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRange {
    /// Largest value
    pub overflow: u32,
    /// Smallest value (0 when the mask has no sign cell)
    pub underflow: i32,
}

impl DisplayRange {
    /// Whether an unsigned value fits
    pub const fn contains_unsigned(&self, value: u32) -> bool {
        value <= self.overflow
    }

    /// Whether a signed value fits
    pub const fn contains_signed(&self, value: i32) -> bool {
        if value < 0 {
            value >= self.underflow
        } else {
            value as u32 <= self.overflow
        }
    }
}

/// A validated mask with precomputed cell offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMask {
    source: String<MAX_CELLS>,
    cells: Vec<CellKind, MAX_CELLS>,
    /// Offset of each cell counted from the first cell
    offsets: [u8; MAX_CELLS],
    total_width: u8,
}

impl CompiledMask {
    /// The mask string this was compiled from
    pub fn as_str(&self) -> &str {
        self.source.as_str()
    }

    /// Cells in mask order
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a compiled mask
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `index`
    pub fn cell(&self, index: usize) -> Option<CellKind> {
        self.cells.get(index).copied()
    }

    /// Total number of buffer bits used by all cells
    pub fn total_width(&self) -> u8 {
        self.total_width
    }

    /// Buffer offset of cell `index`
    ///
    /// Ascending wiring counts the widths of the cells before `index`,
    /// descending wiring the widths of the cells after it.
    pub fn offset(&self, index: usize, wiring: Wiring) -> Option<usize> {
        let kind = self.cell(index)?;
        let ascending = self.offsets[index];
        Some(match wiring {
            Wiring::Ascending => ascending as usize,
            Wiring::Descending => (self.total_width - ascending - kind.width()) as usize,
        })
    }

    /// Width of the number field: digit, single digit and sign cells
    pub fn numeric_width(&self) -> usize {
        self.cells.iter().filter(|c| c.is_numeric()).count()
    }

    /// Width of the number field for a value of `magnitude`
    ///
    /// A single digit cell only shows a one, so it is left out of the field
    /// while the digit cells alone hold the magnitude.
    pub fn number_width(&self, magnitude: u32) -> usize {
        let width = self.numeric_width();
        if !self.cells.contains(&CellKind::SingleDigit) {
            return width;
        }
        let digits = self.cells.iter().filter(|&&c| c == CellKind::Digit).count();
        let fits = 10u32
            .checked_pow(digits as u32)
            .map_or(true, |limit| magnitude < limit);
        if fits {
            width - 1
        } else {
            width
        }
    }

    /// Whether the mask has a sign cell
    pub fn has_sign(&self) -> bool {
        self.cells.first() == Some(&CellKind::Sign)
    }
}

/// Compile a mask string
///
/// Checks run in scan order and the first failure is returned.
pub fn compile(mask: &str) -> Result<(CompiledMask, DisplayRange), MaskError> {
    let bytes = mask.as_bytes();
    if bytes.is_empty() {
        return Err(MaskError::Empty);
    }
    if bytes.len() > MAX_CELLS {
        return Err(MaskError::TooLong);
    }

    let mut cells: Vec<CellKind, MAX_CELLS> = Vec::new();
    let mut offsets = [0u8; MAX_CELLS];
    let mut width: usize = 0;

    let mut found_sign = false;
    let mut found_single = false;
    let mut found_digit = false;
    let mut overflow: u32 = 0;

    for (position, &symbol) in bytes.iter().enumerate() {
        let kind =
            CellKind::from_symbol(symbol).ok_or(MaskError::InvalidSymbol { position, symbol })?;

        match kind {
            CellKind::Sign => {
                if position != 0 || found_sign {
                    return Err(MaskError::MisplacedSign);
                }
                found_sign = true;
            }
            CellKind::SingleDigit => {
                if found_single || found_digit {
                    return Err(MaskError::MisplacedSingleDigit);
                }
                found_single = true;
                overflow = 1;
            }
            CellKind::Digit => {
                found_digit = true;
                overflow = overflow.saturating_mul(10).saturating_add(9);
            }
            CellKind::Point | CellKind::Colon | CellKind::DualPunct => {
                if cells.last().is_some_and(|prev| prev.is_punctuation()) {
                    return Err(MaskError::RepeatedPunctuation { position });
                }
            }
        }

        offsets[position] = width as u8;
        width += kind.width() as usize;
        if width > SEGMENT_CAPACITY {
            return Err(MaskError::TooManySegments);
        }
        cells.push(kind).map_err(|_| MaskError::TooLong)?;
    }

    let underflow = if found_sign {
        -(overflow.min(i32::MAX as u32) as i32)
    } else {
        0
    };

    let mut source = String::new();
    source.push_str(mask).map_err(|_| MaskError::TooLong)?;

    Ok((
        CompiledMask {
            source,
            cells,
            offsets,
            total_width: width as u8,
        },
        DisplayRange {
            overflow,
            underflow,
        },
    ))
}
