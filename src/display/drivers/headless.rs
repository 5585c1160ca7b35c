/*
 *  display/drivers/headless.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Headless driver - accepts frames without drawing them
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

use log::{debug, trace};

use crate::display::error::DisplayError;
use crate::display::framebuffer::SegmentFrame;
use crate::display::traits::{DisplayCapabilities, DisplayModel, SegmentDriver};
use crate::glyphs::Icon;

/// Driver for runs where only the JSON responses matter.
///
/// Keeps the latest frame and bitmap plus counters, so memory use does not
/// grow however long an overlay runs.
#[derive(Debug)]
pub struct HeadlessDriver {
    capabilities: DisplayCapabilities,
    frame: SegmentFrame,
    bitmap: Option<Icon>,
    frames_written: u64,
    intensity: u8,
    powered: bool,
}

impl HeadlessDriver {
    pub fn new(model: DisplayModel, width: usize) -> Self {
        Self {
            capabilities: DisplayCapabilities::new(model, width),
            frame: SegmentFrame::new(width),
            bitmap: None,
            frames_written: 0,
            intensity: model.max_intensity(),
            powered: true,
        }
    }

    pub fn last_frame(&self) -> &SegmentFrame {
        &self.frame
    }

    pub fn last_bitmap(&self) -> Option<&Icon> {
        self.bitmap.as_ref()
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }
}

impl SegmentDriver for HeadlessDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        debug!("headless {} with {} digits", self.capabilities.model.name(), self.capabilities.width);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        Ok(())
    }

    fn write_display(&mut self, frame: &SegmentFrame) -> Result<(), DisplayError> {
        if frame.width() != self.capabilities.width {
            return Err(DisplayError::BufferSizeMismatch {
                expected: self.capabilities.width,
                actual: frame.width(),
            });
        }
        self.frame.clone_from(frame);
        self.frames_written += 1;
        trace!("headless frame {} {:02x?}", self.frames_written, frame.as_slice());
        Ok(())
    }

    fn set_intensity(&mut self, value: u8) -> Result<(), DisplayError> {
        self.intensity = value.min(self.capabilities.model.max_intensity());
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.powered = on;
        Ok(())
    }

    fn draw_bitmap(&mut self, bitmap: &Icon) -> Result<(), DisplayError> {
        if !self.capabilities.supports_bitmap {
            return Err(DisplayError::UnsupportedOperation);
        }
        self.bitmap = Some(*bitmap);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segment::encode;
    use crate::glyphs::GLYPH_HEART;

    #[test]
    fn test_keeps_only_latest_frame() {
        let mut driver = HeadlessDriver::new(DisplayModel::Tm1637, 4);
        let mut frame = SegmentFrame::new(4);
        for n in 0..200_000u32 {
            frame.set(0, encode(char::from(b'0' + (n % 10) as u8), false));
            driver.write_display(&frame).unwrap();
        }
        assert_eq!(driver.frames_written(), 200_000);
        assert_eq!(driver.last_frame().as_slice(), &[encode('9', false), 0, 0, 0]);
        assert_eq!(driver.last_frame().width(), 4);
    }

    #[test]
    fn test_clear_and_mismatch() {
        let mut driver = HeadlessDriver::new(DisplayModel::Tm1637, 4);
        let mut frame = SegmentFrame::new(4);
        frame.set(1, 0x3F);
        driver.write_display(&frame).unwrap();
        driver.clear().unwrap();
        assert!(driver.last_frame().is_blank());
        assert!(driver.write_display(&SegmentFrame::new(6)).is_err());
        assert_eq!(driver.frames_written(), 1);
    }

    #[test]
    fn test_bitmap_and_intensity() {
        let mut driver = HeadlessDriver::new(DisplayModel::Matrix, 8);
        driver.draw_bitmap(&GLYPH_HEART).unwrap();
        assert_eq!(driver.last_bitmap(), Some(&GLYPH_HEART));
        driver.set_intensity(99).unwrap();
        assert_eq!(driver.intensity(), DisplayModel::Matrix.max_intensity());

        let mut segments = HeadlessDriver::new(DisplayModel::Tm1637, 4);
        assert!(segments.draw_bitmap(&GLYPH_HEART).is_err());
        segments.set_power(false).unwrap();
        assert!(!segments.is_powered());
    }
}
