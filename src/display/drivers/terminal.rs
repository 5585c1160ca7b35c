/*
 *  display/drivers/terminal.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Terminal driver - draws frames as ASCII seven-segment art
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

use std::io::Write;

use log::debug;

use crate::display::error::DisplayError;
use crate::display::framebuffer::SegmentFrame;
use crate::display::segment::{SEG_A, SEG_B, SEG_C, SEG_D, SEG_DP, SEG_E, SEG_F, SEG_G};
use crate::display::traits::{DisplayCapabilities, DisplayModel, SegmentDriver};
use crate::glyphs::Icon;

const FRAME_LINES: usize = 3;
const BITMAP_LINES: usize = 8;

/// Draws each frame as three text rows, four columns per digit:
///
/// ```text
///  _
/// |_|
/// |_|.
/// ```
///
/// Redraws overwrite the previous drawing using ANSI cursor movement when
/// `in_place` is set.
pub struct TerminalDriver<W: Write + Send> {
    out: W,
    capabilities: DisplayCapabilities,
    in_place: bool,
    drawn_lines: usize,
    powered: bool,
    intensity: u8,
}

impl<W: Write + Send> TerminalDriver<W> {
    pub fn new(out: W, model: DisplayModel, width: usize, in_place: bool) -> Self {
        Self {
            out,
            capabilities: DisplayCapabilities::new(model, width),
            in_place,
            drawn_lines: 0,
            powered: true,
            intensity: model.max_intensity(),
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, rows: &[String]) -> Result<(), DisplayError> {
        if self.in_place && self.drawn_lines > 0 {
            // up to the first line of the last drawing, erase to end of screen
            write!(self.out, "\x1b[{}F\x1b[J", self.drawn_lines)?;
        }
        for row in rows {
            writeln!(self.out, "{}", row.trim_end())?;
        }
        self.out.flush()?;
        self.drawn_lines = rows.len();
        Ok(())
    }
}

/// Three art rows for a row of segment bytes
pub fn render_rows(digits: &[u8]) -> [String; FRAME_LINES] {
    let mut rows: [String; FRAME_LINES] = Default::default();
    let on = |bits: u8, seg: u8, c: char| if bits & seg != 0 { c } else { ' ' };
    for &bits in digits {
        rows[0].extend([' ', on(bits, SEG_A, '_'), ' ', ' ']);
        rows[1].extend([on(bits, SEG_F, '|'), on(bits, SEG_G, '_'), on(bits, SEG_B, '|'), ' ']);
        rows[2].extend([on(bits, SEG_E, '|'), on(bits, SEG_D, '_'), on(bits, SEG_C, '|'), on(bits, SEG_DP, '.')]);
    }
    rows
}

/// Eight rows of `#` and `.`, most significant bit on the left
pub fn render_bitmap(bitmap: &Icon) -> [String; BITMAP_LINES] {
    let mut rows: [String; BITMAP_LINES] = Default::default();
    for (row, &bits) in rows.iter_mut().zip(bitmap.iter()) {
        row.extend((0..8).rev().map(|bit| if bits & (1 << bit) != 0 { '#' } else { '.' }));
    }
    rows
}

impl<W: Write + Send> SegmentDriver for TerminalDriver<W> {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        debug!("terminal {} with {} digits", self.capabilities.model.name(), self.capabilities.width);
        self.drawn_lines = 0;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = vec![0u8; self.capabilities.width];
        self.draw(&render_rows(&blank))
    }

    fn write_display(&mut self, frame: &SegmentFrame) -> Result<(), DisplayError> {
        if frame.width() != self.capabilities.width {
            return Err(DisplayError::BufferSizeMismatch {
                expected: self.capabilities.width,
                actual: frame.width(),
            });
        }
        if !self.powered {
            return Ok(());
        }
        self.draw(&render_rows(frame.as_slice()))
    }

    fn set_intensity(&mut self, value: u8) -> Result<(), DisplayError> {
        self.intensity = value.min(self.capabilities.model.max_intensity());
        debug!("terminal intensity {}", self.intensity);
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
        self.draw(&render_bitmap(bitmap))
    }
}
