// cellatlas-core/src/channel.rs

use crate::error::{CellAtlasError, Result};
use std::fmt;

/// Number of image bands per sample.
pub const N_CHANNELS: usize = 4;
/// Height of every band image, in pixels.
pub const IMAGE_ROWS: usize = 512;
/// Width of every band image, in pixels.
pub const IMAGE_COLS: usize = 512;

/// One of the four stained bands captured for every sample.
///
/// The discriminant is the position of the band on the channel axis of an
/// image tensor: `0 = red .. 3 = yellow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Microtubules band.
    Red = 0,
    /// Antibody (protein of interest) band.
    Green = 1,
    /// Nucleus band.
    Blue = 2,
    /// Endoplasmic reticulum band.
    Yellow = 3,
}

impl Channel {
    /// All channels in channel-axis order.
    pub const ALL: [Channel; N_CHANNELS] =
        [Channel::Red, Channel::Green, Channel::Blue, Channel::Yellow];

    pub fn from_index(index: usize) -> Result<Self> {
        Channel::ALL
            .get(index)
            .copied()
            .ok_or(CellAtlasError::IndexOutOfBounds {
                index,
                len: N_CHANNELS,
            })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// File-name suffix of the band image. Not a real color, just the
    /// identifier used to locate `{id}_{color}.png`.
    pub fn color(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Yellow => "yellow",
        }
    }

    /// Cell structure captured by this band.
    pub fn stain(self) -> &'static str {
        match self {
            Channel::Red => "Microtubules",
            Channel::Green => "Antibody",
            Channel::Blue => "Nucleus",
            Channel::Yellow => "Endoplasmic Reticulum",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}
