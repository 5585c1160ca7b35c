/*
 *  display/framebuffer.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-digit segment frame handed to the transport driver
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

use crate::display::segment::BLANK;

/// One full refresh of the display: a segment byte per physical digit.
///
/// The frame mirrors what the hardware currently shows, so a command that
/// only touches some digits leaves the others as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFrame {
    digits: Vec<u8>,
}

impl SegmentFrame {
    /// Create a blank frame `width` digits wide
    pub fn new(width: usize) -> Self {
        Self { digits: vec![BLANK; width] }
    }

    pub fn width(&self) -> usize {
        self.digits.len()
    }

    /// Blank every digit
    pub fn clear(&mut self) {
        self.digits.fill(BLANK);
    }

    /// Set a physical digit. Writes past the last digit are dropped.
    pub fn set(&mut self, slot: usize, bits: u8) -> bool {
        match self.digits.get_mut(slot) {
            Some(digit) => {
                *digit = bits;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, slot: usize) -> Option<u8> {
        self.digits.get(slot).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }

    pub fn is_blank(&self) -> bool {
        self.digits.iter().all(|&d| d == BLANK)
    }
}
