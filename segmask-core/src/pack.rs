//! Segment packer
//!
//! Converts a character into the bits a cell occupies and writes them at
//! the cell's offset.

use crate::buffer::SegmentBuffer;
use crate::config::Wiring;
use crate::glyph::glyph;
use crate::mask::{CellKind, CompiledMask};

/// Dual cell pattern for a decimal point
pub const DUAL_POINT: u8 = 0b01;
/// Dual cell pattern for a colon
pub const DUAL_COLON: u8 = 0b10;
/// Dual cell pattern for both (pipe)
pub const DUAL_PIPE: u8 = 0b11;

/// Bits for `ch` in a cell of kind `kind`, `kind.width()` bits wide
pub fn pack(kind: CellKind, ch: u8) -> u8 {
    match kind {
        CellKind::Digit => glyph(ch),
        CellKind::DualPunct => match ch {
            b'.' => DUAL_POINT,
            b':' => DUAL_COLON,
            b'|' => DUAL_PIPE,
            _ => 0,
        },
        CellKind::SingleDigit | CellKind::Sign | CellKind::Point | CellKind::Colon => {
            u8::from(ch != b' ')
        }
    }
}

/// Pack `ch` into cell `index` of `mask`
///
/// Returns false if `index` is not a cell of the mask.
pub fn write_cell(
    buffer: &mut SegmentBuffer,
    mask: &CompiledMask,
    index: usize,
    wiring: Wiring,
    ch: u8,
) -> bool {
    let (Some(kind), Some(offset)) = (mask.cell(index), mask.offset(index, wiring)) else {
        return false;
    };
    buffer.write_bits(offset, pack(kind, ch), kind.width());
    true
}

/// Read back the bits of cell `index`
pub fn read_cell(
    buffer: &SegmentBuffer,
    mask: &CompiledMask,
    index: usize,
    wiring: Wiring,
) -> Option<u8> {
    let kind = mask.cell(index)?;
    let offset = mask.offset(index, wiring)?;
    Some(buffer.read_bits(offset, kind.width()))
}
