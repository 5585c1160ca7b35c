/*
 *  display/components/clock.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock overlay
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
use chrono::{Local, NaiveTime, Timelike};
use core::fmt::Write;

use crate::display::formatter::Formatter;
use crate::display::framebuffer::SegmentFrame;

/// Read-only wall clock snapshot
pub trait TimeSource: Send {
    fn now(&self) -> NaiveTime;
}

/// Host local time
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTime;

impl TimeSource for LocalTime {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Frozen time, for tests and demos
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub NaiveTime);

impl TimeSource for FixedTime {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Clock display state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    pub enabled: bool,
    pub use_24_hour: bool,
}

/// Clock display component
#[derive(Debug, Default)]
pub struct ClockDisplay {
    state: ClockState,
}

impl ClockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, use_24_hour: bool) {
        self.state = ClockState { enabled: true, use_24_hour };
    }

    pub fn disable(&mut self) {
        self.state.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Render `HHMM` at digit 0, blinking the dot on digit 1 each half second
    pub fn render(&self, frame: &mut SegmentFrame, formatter: &Formatter, time: NaiveTime) {
        let text = self.digits(time);
        formatter.render_text(frame, &text, Some(0), None);

        let millis = (time.nanosecond() / 1_000_000) % 1000;
        formatter.set_dot(frame, 1, millis > 500);
    }

    /// Hour and minute digits; 12 hour mode pads the hour with a space
    pub fn digits(&self, time: NaiveTime) -> ArrayString<4> {
        let mut text = ArrayString::<4>::new();
        let minute = time.minute();
        // both branches produce exactly four characters
        let _ = if self.state.use_24_hour {
            write!(&mut text, "{:02}{:02}", time.hour(), minute)
        } else {
            let hour = match time.hour() % 12 {
                0 => 12,
                h => h,
            };
            write!(&mut text, "{:>2}{:02}", hour, minute)
        };
        text
    }
}
