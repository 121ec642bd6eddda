//! Driver chip table
//!
//! Each entry describes how a shift-register style display driver expects
//! its segment data to be clocked in.

/// Order in which segment bits are shifted out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Segment 0 first
    #[default]
    Ascending,
    /// Last segment first
    Descending,
}

/// Static description of a display driver chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipDescriptor {
    /// Part name
    pub name: &'static str,
    /// Number of segment outputs
    pub segments: u8,
    /// Latch data with a pulse on the load line
    pub pulse_load: bool,
    /// Order segment bits are shifted out
    pub bit_order: BitOrder,
    /// Shift a leading `1` marker bit before the data
    pub initial_bit: bool,
    /// Two chips can be chained, doubling the segment count
    pub cascadable: bool,
    /// Hold the load line low while shifting (data enable)
    pub data_enable: bool,
}

impl ChipDescriptor {
    /// Whether the chip needs a load line at all
    pub const fn needs_load_line(&self) -> bool {
        self.pulse_load || self.data_enable
    }

    /// Number of bits in a frame
    pub const fn frame_len(&self, cascaded: bool) -> usize {
        if cascaded && self.cascadable {
            self.segments as usize * 2
        } else {
            self.segments as usize
        }
    }
}

/// Supported driver chips
pub static CHIPS: [ChipDescriptor; 6] = [
    ChipDescriptor {
        name: "M5450",
        segments: 34,
        pulse_load: false,
        bit_order: BitOrder::Ascending,
        initial_bit: true,
        cascadable: false,
        data_enable: false,
    },
    ChipDescriptor {
        name: "M5451",
        segments: 35,
        pulse_load: false,
        bit_order: BitOrder::Ascending,
        initial_bit: true,
        cascadable: false,
        data_enable: false,
    },
    ChipDescriptor {
        name: "MM5452",
        segments: 32,
        pulse_load: false,
        bit_order: BitOrder::Ascending,
        initial_bit: true,
        cascadable: false,
        data_enable: true,
    },
    ChipDescriptor {
        name: "MM5453",
        segments: 33,
        pulse_load: false,
        bit_order: BitOrder::Ascending,
        initial_bit: true,
        cascadable: false,
        data_enable: false,
    },
    ChipDescriptor {
        name: "AY0438",
        segments: 32,
        pulse_load: true,
        bit_order: BitOrder::Descending,
        initial_bit: false,
        cascadable: true,
        data_enable: false,
    },
    ChipDescriptor {
        name: "BT-M512RD-DR1",
        segments: 35,
        pulse_load: false,
        bit_order: BitOrder::Ascending,
        initial_bit: true,
        cascadable: false,
        data_enable: true,
    },
];

/// Look up a chip by part name
pub fn find_chip(name: &str) -> Option<&'static ChipDescriptor> {
    CHIPS.iter().find(|c| c.name == name)
}
