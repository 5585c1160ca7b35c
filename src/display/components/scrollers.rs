/*
 *  display/components/scrollers.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Marquee text scrolling across the digit row
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

use log::debug;

use crate::display::error::CommandError;
use crate::display::formatter::Formatter;
use crate::display::framebuffer::SegmentFrame;

/// Longest text accepted by the marquee
pub const SCROLL_MAX_LEN: usize = 50;

/// Slowest scroll speed, in ticks per step
pub const MAX_SCROLL_DELAY: u8 = 15;

pub const DEFAULT_SCROLL_DELAY: u8 = 4;

/// Clamp a requested delay into `0..=MAX_SCROLL_DELAY`
pub fn clamp_delay(delay: i64) -> u8 {
    delay.clamp(0, MAX_SCROLL_DELAY as i64) as u8
}

/// Scrolling text state machine.
///
/// The text is left-padded with one blank per digit so it enters from the
/// right edge. Every `delay` ticks the visible window moves one character;
/// once the cursor runs past the buffer a loop is counted and the marquee
/// either restarts or, when `max_loops` is reached, goes idle leaving the
/// last frame on the display.
#[derive(Debug, Clone)]
pub struct ScrollingText {
    width: usize,
    buffer: Vec<char>,
    cursor: usize,
    delay: u8,
    counter: u8,
    loops: u32,
    max_loops: u32,
    active: bool,
}

impl ScrollingText {
    pub fn new(width: usize, delay: u8) -> Self {
        Self {
            width,
            buffer: Vec::new(),
            cursor: 0,
            delay: delay.min(MAX_SCROLL_DELAY),
            counter: 0,
            loops: 0,
            max_loops: 0,
            active: false,
        }
    }

    /// Check text against the marquee limit without touching any state
    pub fn validate(text: &str) -> Result<(), CommandError> {
        let len = text.chars().count();
        if len > SCROLL_MAX_LEN {
            return Err(CommandError::ScrollTextTooLong { len, max: SCROLL_MAX_LEN });
        }
        Ok(())
    }

    /// Start or replace the marquee. `max_loops == 0` scrolls forever.
    pub fn start(&mut self, text: &str, max_loops: u32) -> Result<(), CommandError> {
        Self::validate(text)?;
        self.buffer.clear();
        self.buffer.extend(std::iter::repeat_n(' ', self.width));
        self.buffer.extend(text.chars());
        self.cursor = 0;
        self.counter = 0;
        self.loops = 0;
        self.max_loops = max_loops;
        self.active = true;
        debug!("scroll started: '{}' ({} loops)", text, max_loops);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.active {
            debug!("scroll stopped after {} loops", self.loops);
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the tick divider, clamped to `0..=MAX_SCROLL_DELAY`
    pub fn set_delay(&mut self, delay: i64) -> u8 {
        self.delay = clamp_delay(delay);
        self.delay
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }

    /// Advance on a fast tick. Returns true when the frame was redrawn.
    pub fn tick(&mut self, frame: &mut SegmentFrame, formatter: &Formatter) -> bool {
        if !self.active {
            return false;
        }

        if self.delay != 0 {
            self.counter = (self.counter + 1) % self.delay;
            if self.counter != 0 {
                return false;
            }
        }

        if self.cursor > self.buffer.len() {
            self.loops += 1;
            if self.max_loops != 0 && self.loops >= self.max_loops {
                self.stop();
                return false;
            }
            self.cursor = 0;
        }

        formatter.render_window(frame, &self.buffer[self.cursor..]);
        self.cursor += 1;
        true
    }
}
