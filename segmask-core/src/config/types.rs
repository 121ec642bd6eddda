//! Render and display configuration
//!
//! [`DisplayConfig`] can be stored in flash as postcard-serialized binary
//! data when the `serde` feature is enabled.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mask::MAX_CELLS;

/// Maximum chip name length
pub const MAX_CHIP_NAME_LEN: usize = 16;

/// Upper bound on a serialized [`DisplayConfig`]
pub const MAX_CONFIG_SIZE: usize = 64;

/// Which edge of the display text is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// Start at the first cell, print forwards
    #[default]
    Left,
    /// Start at the last cell, print backwards
    Right,
}

/// How mask cells map onto driver outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wiring {
    /// First mask cell is wired to the lowest outputs
    #[default]
    Ascending,
    /// Last mask cell is wired to the lowest outputs
    Descending,
}

/// Settings read by every print operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderConfig {
    /// Text alignment
    pub alignment: Alignment,
    /// Cell to output wiring
    pub wiring: Wiring,
    /// Keep leading zeros when printing numbers right aligned
    pub zero_padding: bool,
}

impl RenderConfig {
    /// Whether numbers lose their leading zeros
    pub const fn strips_zeros(&self) -> bool {
        match self.alignment {
            Alignment::Left => true,
            Alignment::Right => !self.zero_padding,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Chip name longer than [`MAX_CHIP_NAME_LEN`]
    ChipNameTooLong,
    /// Mask longer than [`MAX_CELLS`]
    MaskTooLong,
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
}

/// Everything needed to bring up a display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Driver chip part name (see [`super::CHIPS`])
    pub chip: String<MAX_CHIP_NAME_LEN>,
    /// Display mask
    pub mask: String<MAX_CELLS>,
    /// Render settings
    pub render: RenderConfig,
    /// Two chips chained
    pub cascaded: bool,
}

impl DisplayConfig {
    /// Create a configuration with default render settings
    pub fn new(chip: &str, mask: &str) -> Result<Self, ConfigError> {
        let mut chip_name = String::new();
        chip_name
            .push_str(chip)
            .map_err(|_| ConfigError::ChipNameTooLong)?;

        let mut mask_str = String::new();
        mask_str
            .push_str(mask)
            .map_err(|_| ConfigError::MaskTooLong)?;

        Ok(Self {
            chip: chip_name,
            mask: mask_str,
            render: RenderConfig::default(),
            cascaded: false,
        })
    }

    /// Builder-style render settings
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Builder-style cascade flag
    pub fn with_cascaded(mut self, cascaded: bool) -> Self {
        self.cascaded = cascaded;
        self
    }

    /// Serialize into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}
