//! Segment buffer
//!
//! Flat array of segment states. Mask cells address it by bit offset; the
//! output driver shifts out the leading part that belongs to the chip.

/// Number of segments the buffer holds (two cascaded 32 output chips)
pub const SEGMENT_CAPACITY: usize = 64;

/// Segment states, one `bool` per driver output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentBuffer {
    segments: [bool; SEGMENT_CAPACITY],
}

impl Default for SegmentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentBuffer {
    /// Create a buffer with every segment off
    pub const fn new() -> Self {
        Self {
            segments: [false; SEGMENT_CAPACITY],
        }
    }

    /// Turn every segment off
    pub fn clear(&mut self) {
        self.segments = [false; SEGMENT_CAPACITY];
    }

    /// Turn every segment on
    pub fn fill(&mut self) {
        self.segments = [true; SEGMENT_CAPACITY];
    }

    /// State of one segment, `None` past the end
    pub fn get(&self, index: usize) -> Option<bool> {
        self.segments.get(index).copied()
    }

    /// Set one segment, ignoring indices past the end
    pub fn set(&mut self, index: usize, on: bool) {
        if let Some(segment) = self.segments.get_mut(index) {
            *segment = on;
        }
    }

    /// Write the low `width` bits of `bits` starting at `offset`, LSB first
    pub fn write_bits(&mut self, offset: usize, bits: u8, width: u8) {
        for i in 0..width {
            self.set(offset + i as usize, bits & (1 << i) != 0);
        }
    }

    /// Read `width` bits starting at `offset`, LSB first
    pub fn read_bits(&self, offset: usize, width: u8) -> u8 {
        (0..width).fold(0, |acc, i| {
            if self.get(offset + i as usize).unwrap_or(false) {
                acc | (1 << i)
            } else {
                acc
            }
        })
    }

    /// All segments
    pub fn as_slice(&self) -> &[bool] {
        &self.segments
    }

    /// Number of segments switched on
    pub fn count_on(&self) -> usize {
        self.segments.iter().filter(|&&s| s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_lsb_first() {
        let mut buf = SegmentBuffer::new();
        buf.write_bits(3, 0b101, 3);
        assert_eq!(buf.get(3), Some(true));
        assert_eq!(buf.get(4), Some(false));
        assert_eq!(buf.get(5), Some(true));
        assert_eq!(buf.count_on(), 2);
        assert_eq!(buf.read_bits(3, 3), 0b101);
    }

    #[test]
    fn test_write_overwrites() {
        let mut buf = SegmentBuffer::new();
        buf.write_bits(0, 0x7F, 7);
        buf.write_bits(0, 0, 7);
        assert_eq!(buf.count_on(), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buf = SegmentBuffer::new();
        buf.fill();
        assert_eq!(buf.count_on(), SEGMENT_CAPACITY);
        buf.clear();
        let once = buf;
        buf.clear();
        assert_eq!(buf, once);
        assert_eq!(buf.count_on(), 0);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut buf = SegmentBuffer::new();
        buf.set(SEGMENT_CAPACITY, true);
        assert_eq!(buf.get(SEGMENT_CAPACITY), None);
        buf.write_bits(SEGMENT_CAPACITY - 2, 0xFF, 7);
        assert_eq!(buf.count_on(), 2);
    }
}
