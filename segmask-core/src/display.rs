//! Display renderer
//!
//! [`Display`] owns the compiled mask, the segment buffer and the render
//! settings for one physical display. Every print call clears the buffer,
//! places the characters with a fresh [`Cursor`] and flushes the result to
//! the [`SegmentSink`].

use core::fmt;

use heapless::String;

use crate::buffer::SegmentBuffer;
use crate::config::{find_chip, Alignment, ChipDescriptor, DisplayConfig, RenderConfig, Wiring};
use crate::cursor::{Cursor, Direction};
use crate::format::{format_number, Number};
use crate::glyph::{code_point, decode_digit};
use crate::mask::{compile, CellKind, CompiledMask, DisplayRange, MaskError, MAX_CELLS};
use crate::pack::{read_cell, write_cell, DUAL_COLON, DUAL_PIPE, DUAL_POINT};
use crate::traits::{Frame, SegmentSink};

/// Errors bringing up a display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// No chip with the configured name
    UnknownChip,
    /// Mask rejected by the compiler
    Mask(MaskError),
}

impl From<MaskError> for InitError {
    fn from(e: MaskError) -> Self {
        InitError::Mask(e)
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::UnknownChip => write!(f, "unknown driver chip"),
            InitError::Mask(e) => write!(f, "invalid mask: {}", e),
        }
    }
}

/// A segment display described by a mask
pub struct Display<S> {
    chip: &'static ChipDescriptor,
    mask: CompiledMask,
    range: DisplayRange,
    buffer: SegmentBuffer,
    render: RenderConfig,
    cascaded: bool,
    sink: S,
}

impl<S: SegmentSink> Display<S> {
    /// Create a display for `chip` laid out as `mask`
    ///
    /// The buffer starts blank but nothing is sent until the first print
    /// or [`Display::clear`].
    pub fn new(chip: &'static ChipDescriptor, mask: &str, sink: S) -> Result<Self, InitError> {
        let (mask, range) = compile_logged(mask)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Display on {=str}: mask {=str}, range {}..={}",
            chip.name,
            mask.as_str(),
            range.underflow,
            range.overflow
        );

        Ok(Self {
            chip,
            mask,
            range,
            buffer: SegmentBuffer::new(),
            render: RenderConfig::default(),
            cascaded: false,
            sink,
        })
    }

    /// Create a display from a stored configuration
    pub fn from_config(config: &DisplayConfig, sink: S) -> Result<Self, InitError> {
        let Some(chip) = find_chip(config.chip.as_str()) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unknown driver chip {=str}", config.chip.as_str());
            return Err(InitError::UnknownChip);
        };

        let mut display = Self::new(chip, config.mask.as_str(), sink)?;
        display.render = config.render;
        display.set_cascaded(config.cascaded);
        Ok(display)
    }

    /// Replace the mask, keeping the current one if the new one is invalid
    pub fn reinit(&mut self, mask: &str) -> Result<(), MaskError> {
        let (mask, range) = compile_logged(mask)?;
        self.mask = mask;
        self.range = range;
        self.buffer.clear();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Printing
    // ------------------------------------------------------------------

    /// Print text using the configured alignment
    pub fn print(&mut self, text: &str) -> Result<(), S::Error> {
        match self.render.alignment {
            Alignment::Left => self.print_aligned_left(text),
            Alignment::Right => self.print_aligned_right(text),
        }
    }

    /// Print text starting at the first cell
    pub fn print_aligned_left(&mut self, text: &str) -> Result<(), S::Error> {
        self.buffer.clear();
        let mut cursor = Cursor::start(&self.mask, Direction::Forward);
        for ch in text.chars() {
            if !cursor.in_bounds(&self.mask) {
                break;
            }
            self.place(&mut cursor, code_point(ch));
        }
        self.flush()
    }

    /// Print text ending at the last cell
    pub fn print_aligned_right(&mut self, text: &str) -> Result<(), S::Error> {
        self.buffer.clear();
        let mut cursor = Cursor::start(&self.mask, Direction::Backward);
        for ch in text.chars().rev() {
            self.place(&mut cursor, code_point(ch));
        }
        self.flush()
    }

    /// Print a number, or the error pattern if the mask cannot show it
    pub fn print_number(&mut self, value: impl Into<Number>) -> Result<(), S::Error> {
        let value = value.into();
        let (_, magnitude) = value.split();
        match format_number(
            value,
            &self.range,
            self.mask.number_width(magnitude),
            self.render.strips_zeros(),
        ) {
            Ok(text) => self.print(text.as_str()),
            Err(_violation) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Number out of range: {}", _violation);
                self.show_error()
            }
        }
    }

    /// Blank the display
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.buffer.clear();
        self.flush()
    }

    /// Light every segment
    pub fn all_on(&mut self) -> Result<(), S::Error> {
        self.buffer.fill();
        self.flush()
    }

    /// Show a minus in every digit and sign cell
    pub fn show_error(&mut self) -> Result<(), S::Error> {
        self.buffer.clear();
        for (index, kind) in self.mask.cells().iter().enumerate() {
            if matches!(kind, CellKind::Digit | CellKind::Sign) {
                write_cell(
                    &mut self.buffer,
                    &self.mask,
                    index,
                    self.render.wiring,
                    b'-',
                );
            }
        }
        self.flush()
    }

    /// Send the current buffer to the sink
    pub fn flush(&mut self) -> Result<(), S::Error> {
        let frame = Frame {
            segments: &self.buffer.as_slice()[..self.frame_len()],
            chip: self.chip,
        };
        self.sink.show(&frame)
    }

    fn place(&mut self, cursor: &mut Cursor, ch: u8) {
        let buffer = &mut self.buffer;
        let mask = &self.mask;
        let wiring = self.render.wiring;
        cursor.place(mask, ch, |index, c| {
            write_cell(buffer, mask, index, wiring, c);
        });
    }
}

impl<S> Display<S> {
    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Set text alignment
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.render.alignment = alignment;
    }

    /// Set cell to output wiring
    pub fn set_wiring(&mut self, wiring: Wiring) {
        self.render.wiring = wiring;
    }

    /// Keep leading zeros on right aligned numbers
    pub fn set_zero_padding(&mut self, padding: bool) {
        self.render.zero_padding = padding;
    }

    /// Chain a second chip; ignored unless the chip is cascadable
    ///
    /// Returns whether the display is now cascaded.
    pub fn set_cascaded(&mut self, cascaded: bool) -> bool {
        if self.chip.cascadable {
            self.cascaded = cascaded;
        }
        self.cascaded
    }

    /// Current render settings
    pub fn render_config(&self) -> RenderConfig {
        self.render
    }

    /// Whether two chips are chained
    pub fn is_cascaded(&self) -> bool {
        self.cascaded
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Driver chip
    pub fn chip(&self) -> &'static ChipDescriptor {
        self.chip
    }

    /// Compiled mask
    pub fn mask(&self) -> &CompiledMask {
        &self.mask
    }

    /// Range of numbers the mask can show
    pub fn range(&self) -> DisplayRange {
        self.range
    }

    /// Segment buffer
    pub fn buffer(&self) -> &SegmentBuffer {
        &self.buffer
    }

    /// The part of the buffer the chip receives
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            segments: &self.buffer.as_slice()[..self.frame_len()],
            chip: self.chip,
        }
    }

    /// Number of segments sent per frame
    pub fn frame_len(&self) -> usize {
        self.chip.frame_len(self.cascaded)
    }

    /// Output sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Output sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the sink back
    pub fn release(self) -> S {
        self.sink
    }

    /// State of one segment
    pub fn segment(&self, index: usize) -> Option<bool> {
        self.buffer.get(index)
    }

    /// Set one segment without flushing
    pub fn set_segment(&mut self, index: usize, on: bool) {
        self.buffer.set(index, on);
    }

    /// Read the buffer back as text, one character per cell
    ///
    /// Digit cells decode to digits, `-` or space; any other pattern reads
    /// as `?`.
    pub fn read_cells(&self) -> String<MAX_CELLS> {
        let mut text = String::new();
        for (index, kind) in self.mask.cells().iter().enumerate() {
            let bits = read_cell(&self.buffer, &self.mask, index, self.render.wiring).unwrap_or(0);
            let ch = match kind {
                CellKind::Digit => decode_digit(bits).unwrap_or('?'),
                CellKind::DualPunct => match bits {
                    DUAL_POINT => '.',
                    DUAL_COLON => ':',
                    DUAL_PIPE => '|',
                    _ => ' ',
                },
                _ if bits != 0 => kind.symbol() as char,
                _ => ' ',
            };
            // One character per cell, at most MAX_CELLS
            let _ = text.push(ch);
        }
        text
    }
}

fn compile_logged(mask: &str) -> Result<(CompiledMask, DisplayRange), MaskError> {
    let result = compile(mask);
    #[cfg(feature = "defmt")]
    if let Err(e) = &result {
        defmt::warn!("Mask {=str} rejected: {}", mask, e);
    }
    result
}
