/*
 *  display/formatter.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Turns numbers, text, raw bytes and levels into segment bytes
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

use arrayvec::ArrayString;
use core::fmt::Write;
use log::debug;

use crate::display::digit_order::DigitOrder;
use crate::display::error::CommandError;
use crate::display::framebuffer::SegmentFrame;
use crate::display::segment::{self, Glyph, BAR_FULL, BAR_HALF, SEG_DP};
use crate::glyphs::{self, Icon, ICONS};

pub const LEVEL_MIN: i64 = 0;
pub const LEVEL_MAX: i64 = 100;

/// Renders content into a [`SegmentFrame`] for a display of fixed width.
///
/// Positions outside the display fall back to 0. A missing or zero length
/// means "as long as the rendered text", and anything negative or wider than
/// the display is clamped to the display width. Length is a character budget:
/// a `.` folded into the previous digit still spends one unit of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    width: usize,
    order: DigitOrder,
}

impl Formatter {
    pub fn new(width: usize, order: DigitOrder) -> Self {
        Self { width, order }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn order(&self) -> DigitOrder {
        self.order
    }

    pub fn clamp_position(&self, position: Option<i64>) -> usize {
        match position {
            Some(p) if p >= 0 && (p as u64) < self.width as u64 => p as usize,
            Some(p) => {
                debug!("position {} outside display, using 0", p);
                0
            }
            None => 0,
        }
    }

    pub fn resolve_length(&self, length: Option<i64>, natural: usize) -> usize {
        let requested = match length {
            None | Some(0) => natural as i64,
            Some(l) => l,
        };
        if requested < 0 || requested as u64 > self.width as u64 {
            self.width
        } else {
            requested as usize
        }
    }

    /// Blank the whole frame
    pub fn clear(&self, frame: &mut SegmentFrame) {
        frame.clear();
    }

    /// Render an integer, left-padding with `'0'` or spaces when `length`
    /// is longer than the number. Returns the number of digits written.
    pub fn render_integer(
        &self,
        frame: &mut SegmentFrame,
        value: i64,
        position: Option<i64>,
        leading_zeros: bool,
        length: Option<i64>,
    ) -> usize {
        let mut text: ArrayString<24> = ArrayString::new();
        // i64 never exceeds 20 characters
        let _ = write!(&mut text, "{}", value);
        let pad = if leading_zeros { '0' } else { ' ' };
        self.render_padded(frame, &text, pad, position, length)
    }

    /// Render a fixed-point float. Precision defaults to the display width
    /// and is clamped into `[0, width]`.
    pub fn render_float(
        &self,
        frame: &mut SegmentFrame,
        value: f64,
        position: Option<i64>,
        precision: Option<i64>,
        length: Option<i64>,
    ) -> usize {
        let precision = match precision {
            None => self.width,
            Some(p) if p < 0 => 0,
            Some(p) => (p as u64).min(self.width as u64) as usize,
        };
        let text = format!("{:.*}", precision, value);
        self.render_padded(frame, &text, ' ', position, length)
    }

    /// Render free text with `^` shown as a degree sign and dots folded
    pub fn render_text(
        &self,
        frame: &mut SegmentFrame,
        text: &str,
        position: Option<i64>,
        length: Option<i64>,
    ) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let start = self.clamp_position(position);
        let budget = self.resolve_length(length, chars.len());
        self.write_glyphs(frame, &segment::fold_dots(&chars), start, budget)
    }

    /// Copy raw segment bytes verbatim; bytes past `length` are ignored
    pub fn render_raw(
        &self,
        frame: &mut SegmentFrame,
        position: Option<i64>,
        length: Option<i64>,
        bytes: &[u8],
    ) -> usize {
        let start = self.clamp_position(position);
        let len = self.resolve_length(length, bytes.len());
        let mut written = 0;
        for (offset, &bits) in bytes.iter().take(len).enumerate() {
            let slot = start + offset;
            if slot >= self.width {
                break;
            }
            frame.set(self.order.physical_slot(slot, self.width), bits);
            written += 1;
        }
        written
    }

    /// Horizontal bar: two bar steps per digit, filled left to right.
    ///
    /// Returns the number of lit bar steps.
    pub fn render_level(&self, frame: &mut SegmentFrame, percent: i64) -> Result<usize, CommandError> {
        validate_level(percent)?;
        let total = 2 * self.width as i64;
        let lit = ((total * percent + 50) / 100) as usize;
        frame.clear();
        for bar in 1..=lit {
            let digit = (bar - 1) / 2;
            let bits = if bar % 2 == 0 { BAR_FULL } else { BAR_HALF };
            frame.set(self.order.physical_slot(digit, self.width), bits);
        }
        debug!("level {}% -> {}/{} bars", percent, lit, total);
        Ok(lit)
    }

    /// Fill the frame from the leading glyphs of `text`, blanking whatever
    /// the text does not reach. Used for marquee windows.
    pub fn render_window(&self, frame: &mut SegmentFrame, text: &[char]) -> usize {
        frame.clear();
        self.write_glyphs(frame, &segment::fold_dots(text), 0, usize::MAX)
    }

    /// Switch the decimal point of a logical digit, keeping its segments
    pub fn set_dot(&self, frame: &mut SegmentFrame, logical: usize, on: bool) -> bool {
        if logical >= self.width {
            return false;
        }
        let slot = self.order.physical_slot(logical, self.width);
        match frame.get(slot) {
            Some(bits) => frame.set(slot, if on { bits | SEG_DP } else { bits & !SEG_DP }),
            None => false,
        }
    }

    fn render_padded(
        &self,
        frame: &mut SegmentFrame,
        text: &str,
        pad: char,
        position: Option<i64>,
        length: Option<i64>,
    ) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let start = self.clamp_position(position);
        let budget = self.resolve_length(length, chars.len());

        let pad_glyph = Glyph::new(segment::encode(pad, false), 1);
        let mut glyphs = vec![pad_glyph; budget.saturating_sub(chars.len())];
        glyphs.extend(segment::fold_dots(&chars));

        self.write_glyphs(frame, &glyphs, start, budget)
    }

    fn write_glyphs(&self, frame: &mut SegmentFrame, glyphs: &[Glyph], start: usize, budget: usize) -> usize {
        let mut slot = start;
        let mut remaining = budget;
        for glyph in glyphs {
            if remaining == 0 || slot >= self.width {
                break;
            }
            // the folded dot did not fit in the budget
            let bits = if glyph.span > remaining { glyph.bits & !SEG_DP } else { glyph.bits };
            frame.set(self.order.physical_slot(slot, self.width), bits);
            remaining -= glyph.span.min(remaining);
            slot += 1;
        }
        slot - start
    }
}

pub fn validate_level(percent: i64) -> Result<(), CommandError> {
    if (LEVEL_MIN..=LEVEL_MAX).contains(&percent) {
        Ok(())
    } else {
        Err(CommandError::LevelOutOfRange { value: percent, min: LEVEL_MIN, max: LEVEL_MAX })
    }
}

/// Icons go straight to the bitmap region and never touch the segment frame
pub fn lookup_icon(index: i64) -> Result<&'static Icon, CommandError> {
    usize::try_from(index)
        .ok()
        .and_then(glyphs::icon)
        .ok_or(CommandError::IconOutOfRange { index, count: ICONS.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segment::{encode, BLANK, DEGREE};

    fn bytes(s: &str) -> Vec<u8> {
        s.chars().map(|c| encode(c, false)).collect()
    }

    #[test]
    fn test_integer_leading_zeros() {
        let fmt = Formatter::new(6, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(6);
        assert_eq!(fmt.render_integer(&mut frame, 1234, None, true, Some(6)), 6);
        assert_eq!(frame.as_slice(), bytes("001234").as_slice());
    }

    #[test]
    fn test_integer_space_padding() {
        let fmt = Formatter::new(6, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(6);
        fmt.render_integer(&mut frame, 1234, None, false, Some(6));
        assert_eq!(frame.as_slice(), bytes("  1234").as_slice());
    }

    #[test]
    fn test_integer_natural_length_leaves_rest() {
        let fmt = Formatter::new(6, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(6);
        frame.set(5, 0xFF);
        fmt.render_integer(&mut frame, 42, Some(1), false, None);
        assert_eq!(frame.as_slice(), &[BLANK, encode('4', false), encode('2', false), BLANK, BLANK, 0xFF]);
    }

    #[test]
    fn test_integer_truncates_at_boundary() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        assert_eq!(fmt.render_integer(&mut frame, 123456, Some(2), false, None), 2);
        assert_eq!(frame.as_slice(), &[BLANK, BLANK, encode('1', false), encode('2', false)]);
    }

    #[test]
    fn test_position_out_of_range_falls_back_to_zero() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        for position in [-1, 4, 99] {
            let mut frame = SegmentFrame::new(4);
            fmt.render_integer(&mut frame, 7, Some(position), false, None);
            assert_eq!(frame.get(0), Some(encode('7', false)), "position {}", position);
        }
    }

    #[test]
    fn test_length_clamping() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        assert_eq!(fmt.resolve_length(None, 3), 3);
        assert_eq!(fmt.resolve_length(Some(0), 3), 3);
        assert_eq!(fmt.resolve_length(Some(-2), 3), 4);
        assert_eq!(fmt.resolve_length(Some(9), 3), 4);
        assert_eq!(fmt.resolve_length(None, 12), 4);
        assert_eq!(fmt.resolve_length(Some(2), 3), 2);
    }

    #[test]
    fn test_float_folds_decimal_point() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        assert_eq!(fmt.render_float(&mut frame, 12.34, None, Some(2), None), 3);
        assert_eq!(
            frame.as_slice(),
            &[encode('1', false), encode('2', true), encode('3', false), BLANK]
        );
    }

    #[test]
    fn test_float_wide_display() {
        let fmt = Formatter::new(6, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(6);
        assert_eq!(fmt.render_float(&mut frame, 3.5, None, Some(1), Some(5)), 4);
        assert_eq!(
            frame.as_slice(),
            &[BLANK, BLANK, encode('3', true), encode('5', false), BLANK, BLANK]
        );
    }

    #[test]
    fn test_float_precision_clamped() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        fmt.render_float(&mut frame, 7.25, None, Some(-3), None);
        assert_eq!(frame.get(0), Some(encode('7', false)));
        assert_eq!(frame.get(1), Some(BLANK));
    }

    #[test]
    fn test_text_temperature_uses_four_slots() {
        let fmt = Formatter::new(6, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(6);
        assert_eq!(fmt.render_text(&mut frame, "22.5^", None, None), 4);
        assert_eq!(
            frame.as_slice(),
            &[encode('2', false), encode('2', true), encode('5', false), DEGREE, BLANK, BLANK]
        );
    }

    #[test]
    fn test_text_is_idempotent() {
        let fmt = Formatter::new(4, DigitOrder::Reversed);
        let mut first = SegmentFrame::new(4);
        fmt.render_text(&mut first, "Hi.", Some(1), None);
        let mut second = first.clone();
        fmt.render_text(&mut second, "Hi.", Some(1), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_reversed_order() {
        let fmt = Formatter::new(6, DigitOrder::Reversed);
        let mut frame = SegmentFrame::new(6);
        fmt.render_text(&mut frame, "123456", None, None);
        assert_eq!(frame.as_slice(), bytes("321654").as_slice());
    }

    #[test]
    fn test_window_blanks_tail() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        frame.set(3, 0xFF);
        let text: Vec<char> = "a.b".chars().collect();
        assert_eq!(fmt.render_window(&mut frame, &text), 2);
        assert_eq!(frame.as_slice(), &[encode('a', true), encode('b', false), BLANK, BLANK]);
    }

    #[test]
    fn test_set_dot() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        fmt.render_text(&mut frame, "1234", None, None);
        assert!(fmt.set_dot(&mut frame, 1, true));
        assert_eq!(frame.get(1), Some(encode('2', true)));
        assert!(fmt.set_dot(&mut frame, 1, false));
        assert_eq!(frame.get(1), Some(encode('2', false)));
        assert!(!fmt.set_dot(&mut frame, 4, true));
    }

    #[test]
    fn test_raw_bytes() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        assert_eq!(fmt.render_raw(&mut frame, Some(2), Some(3), &[0x01, 0x02, 0x04]), 2);
        assert_eq!(frame.as_slice(), &[0, 0, 0x01, 0x02]);

        let mut frame = SegmentFrame::new(4);
        assert_eq!(fmt.render_raw(&mut frame, Some(0), Some(1), &[0x40, 0x40]), 1);
        assert_eq!(frame.as_slice(), &[0x40, 0, 0, 0]);
    }

    #[test]
    fn test_level_half() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        assert_eq!(fmt.render_level(&mut frame, 50).unwrap(), 4);
        assert_eq!(frame.as_slice(), &[BAR_FULL, BAR_FULL, BLANK, BLANK]);
    }

    #[test]
    fn test_level_odd_count() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        // 8 * 0.35 = 2.8 -> 3 bars
        assert_eq!(fmt.render_level(&mut frame, 35).unwrap(), 3);
        assert_eq!(frame.as_slice(), &[BAR_FULL, BAR_HALF, BLANK, BLANK]);
    }

    #[test]
    fn test_level_rejects_out_of_range() {
        let fmt = Formatter::new(4, DigitOrder::Standard);
        let mut frame = SegmentFrame::new(4);
        frame.set(0, 0x3F);
        for percent in [150, -1] {
            let err = fmt.render_level(&mut frame, percent).unwrap_err();
            assert!(matches!(err, CommandError::LevelOutOfRange { .. }));
        }
        assert_eq!(frame.as_slice(), &[0x3F, 0, 0, 0]);
    }

    #[test]
    fn test_icon_bounds() {
        assert_eq!(lookup_icon(1).unwrap(), &glyphs::GLYPH_HEART);
        assert!(matches!(
            lookup_icon(ICONS.len() as i64),
            Err(CommandError::IconOutOfRange { .. })
        ));
        assert!(lookup_icon(-1).is_err());
    }
}
