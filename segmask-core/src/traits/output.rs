//! Output collaborator trait

use core::convert::Infallible;

use crate::config::{BitOrder, ChipDescriptor};

/// Segment states ready to be shifted into a chip
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// One entry per chip output (two chips' worth when cascaded)
    pub segments: &'a [bool],
    /// Chip receiving the frame
    pub chip: &'static ChipDescriptor,
}

impl Frame<'_> {
    /// Segment states in the order the chip expects them on the wire
    pub fn shift_order(&self) -> impl Iterator<Item = bool> + '_ {
        let len = self.segments.len();
        let order = self.chip.bit_order;
        (0..len).map(move |i| match order {
            BitOrder::Ascending => self.segments[i],
            BitOrder::Descending => self.segments[len - 1 - i],
        })
    }
}

/// Receiver of finished frames
pub trait SegmentSink {
    /// Error raised while writing to the hardware
    type Error;

    /// Push a frame out to the display
    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

impl<S: SegmentSink + ?Sized> SegmentSink for &mut S {
    type Error = S::Error;

    fn show(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        (**self).show(frame)
    }
}

/// Sink that discards frames, for using the encoder on its own
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOutput;

impl SegmentSink for NoOutput {
    type Error = Infallible;

    fn show(&mut self, _frame: &Frame<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
