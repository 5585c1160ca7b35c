/*
 *  display/traits.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for segment display transports
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use serde::{Deserialize, Serialize};

use crate::display::error::DisplayError;
use crate::display::framebuffer::SegmentFrame;
use crate::glyphs::Icon;

/// Display controller family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayModel {
    /// TM1637, up to 6 digits, two-wire clock/data
    #[default]
    Tm1637,

    /// TM1638, up to 8 digits
    Tm1638,

    /// MAX7219 driving 8 seven-segment digits
    Max7219,

    /// MAX7219 driving an 8x8 dot matrix
    Matrix,
}

impl DisplayModel {
    /// Identity string reported by the model query
    pub fn name(self) -> &'static str {
        match self {
            DisplayModel::Tm1637 => "TM1637",
            DisplayModel::Tm1638 => "TM1638",
            DisplayModel::Max7219 => "MAX7219",
            DisplayModel::Matrix => "MAX7219 matrix",
        }
    }

    /// Maximum digit count the controller can drive
    pub fn max_digits(self) -> usize {
        match self {
            DisplayModel::Tm1637 => 6,
            DisplayModel::Tm1638 | DisplayModel::Max7219 | DisplayModel::Matrix => 8,
        }
    }

    /// Highest hardware intensity step
    pub fn max_intensity(self) -> u8 {
        match self {
            DisplayModel::Tm1637 | DisplayModel::Tm1638 => 7,
            DisplayModel::Max7219 | DisplayModel::Matrix => 15,
        }
    }

    pub fn supports_bitmap(self) -> bool {
        self == DisplayModel::Matrix
    }

    /// Rescale a 0-15 brightness onto this model's intensity range
    pub fn intensity(self, brightness: u8) -> u8 {
        let brightness = brightness.min(super::MAX_BRIGHTNESS) as u16;
        let max = self.max_intensity() as u16;
        ((brightness * max + super::MAX_BRIGHTNESS as u16 / 2) / super::MAX_BRIGHTNESS as u16) as u8
    }
}

/// Display capabilities and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCapabilities {
    /// Number of physical digit slots
    pub width: usize,

    /// Controller family
    pub model: DisplayModel,

    /// Whether the display supports brightness control
    pub supports_brightness: bool,

    /// Whether 8x8 bitmaps can be drawn
    pub supports_bitmap: bool,
}

impl DisplayCapabilities {
    pub fn new(model: DisplayModel, width: usize) -> Self {
        Self {
            width,
            model,
            supports_brightness: true,
            supports_bitmap: model.supports_bitmap(),
        }
    }
}

/// Minimal transport abstraction - every segment display driver implements this
///
/// The transport owns the wire protocol only. All formatting, scrolling and
/// clock logic happens before a frame reaches it.
pub trait SegmentDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    fn width(&self) -> usize {
        self.capabilities().width
    }

    /// Bring up the controller
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blank every digit on the hardware
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Push a full frame, one segment byte per physical digit
    fn write_display(&mut self, frame: &SegmentFrame) -> Result<(), DisplayError>;

    /// Set hardware intensity, already scaled to the model's range
    fn set_intensity(&mut self, value: u8) -> Result<(), DisplayError>;

    /// Switch the display output on or off
    fn set_power(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Draw an 8x8 bitmap (matrix modules only)
    fn draw_bitmap(&mut self, _bitmap: &Icon) -> Result<(), DisplayError> {
        Err(DisplayError::UnsupportedOperation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_scaling() {
        assert_eq!(DisplayModel::Tm1637.intensity(15), 7);
        assert_eq!(DisplayModel::Tm1637.intensity(0), 0);
        assert_eq!(DisplayModel::Tm1637.intensity(8), 4);
        assert_eq!(DisplayModel::Max7219.intensity(9), 9);
        assert_eq!(DisplayModel::Max7219.intensity(200), 15);
    }

    #[test]
    fn test_capabilities() {
        let caps = DisplayCapabilities::new(DisplayModel::Matrix, 8);
        assert!(caps.supports_bitmap);
        assert!(!DisplayCapabilities::new(DisplayModel::Tm1637, 4).supports_bitmap);
    }
}
