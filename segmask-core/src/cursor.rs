//! Character placement
//!
//! A [`Cursor`] walks the mask cells while a string is printed, deciding
//! which cell each character lands in. Characters that fit nowhere in the
//! remaining cells are dropped rather than reported.

use crate::mask::cell::is_punctuation_char;
use crate::mask::{CellKind, CompiledMask};

/// Scan direction through the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the last cell
    Forward,
    /// Towards the first cell
    Backward,
}

impl Direction {
    const fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Outcome of placing one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// Written to the cell at this index
    Placed(usize),
    /// A space blanked one or two cells
    Blanked,
    /// No cell could host the character
    Dropped,
}

/// Position of the next placement within a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    index: isize,
    direction: Direction,
}

impl Cursor {
    /// Cursor on the leading cell for `direction`
    pub fn start(mask: &CompiledMask, direction: Direction) -> Self {
        let index = match direction {
            Direction::Forward => 0,
            Direction::Backward => mask.len() as isize - 1,
        };
        Self { index, direction }
    }

    /// Current mask index (may be outside the mask once exhausted)
    pub fn index(&self) -> isize {
        self.index
    }

    /// Scan direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the cursor still points at a cell
    pub fn in_bounds(&self, mask: &CompiledMask) -> bool {
        self.current(mask).is_some()
    }

    fn current(&self, mask: &CompiledMask) -> Option<(usize, CellKind)> {
        let index = usize::try_from(self.index).ok()?;
        mask.cell(index).map(|kind| (index, kind))
    }

    fn advance(&mut self) {
        self.index += self.direction.step();
    }

    /// Place `ch`, calling `put(cell_index, ch)` for every cell written
    ///
    /// - `:` and `|` only go in the current cell; if it cannot host them
    ///   they are dropped and the cursor stays put.
    /// - A space on a punctuation cell blanks it and moves on, then blanks
    ///   the following cell as well.
    /// - Anything else scans in the cursor direction for the first cell
    ///   that can host it.
    pub fn place<F>(&mut self, mask: &CompiledMask, ch: u8, mut put: F) -> Placement
    where
        F: FnMut(usize, u8),
    {
        if is_punctuation_char(ch) && ch != b'.' {
            return match self.current(mask) {
                Some((index, kind)) if kind.can_host(ch) => {
                    put(index, ch);
                    self.advance();
                    Placement::Placed(index)
                }
                _ => Placement::Dropped,
            };
        }

        if ch == b' ' {
            let mut blanked = false;
            if let Some((index, kind)) = self.current(mask) {
                if kind.is_punctuation() {
                    put(index, b' ');
                    self.advance();
                    blanked = true;
                }
            }
            if let Some((index, _)) = self.current(mask) {
                put(index, b' ');
                self.advance();
                blanked = true;
            }
            return if blanked {
                Placement::Blanked
            } else {
                Placement::Dropped
            };
        }

        while let Some((index, kind)) = self.current(mask) {
            self.advance();
            if kind.can_host(ch) {
                put(index, ch);
                return Placement::Placed(index);
            }
        }
        Placement::Dropped
    }
}
