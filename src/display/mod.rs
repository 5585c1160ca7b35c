/*
 *  display/mod.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - formatter, overlays and transport drivers
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod framebuffer;
pub mod factory;

// Encoding and layout of digits
pub mod segment;
pub mod digit_order;
pub mod formatter;

// Commands and the dispatch façade
pub mod command;
pub mod manager;

// Tick driven overlays
pub mod components;

// Transport drivers
pub mod drivers;

// Re-exports for convenience
pub use traits::{SegmentDriver, DisplayCapabilities, DisplayModel};
pub use error::{CommandError, DisplayError, DisplayFactoryError};
pub use framebuffer::SegmentFrame;
pub use factory::{DisplayDriverFactory, BoxedDriver};
pub use digit_order::DigitOrder;
pub use formatter::Formatter;
pub use command::{ClockMode, DisplayCommand, DisplayFunction, DisplayResponse};
pub use manager::DisplayManager;
pub use drivers::{HeadlessDriver, MockDriver, TerminalDriver};

/// Host brightness scale, 0 (dimmest) to 15
pub const MAX_BRIGHTNESS: u8 = 15;

/// Display mode enum - what is currently driving the digits
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayMode {
    Static,          // last explicit command stays on the display
    Scrolling,       // marquee running
    Clock,           // clock overlay
}
