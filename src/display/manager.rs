/*
 *  display/manager.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display manager - routes host requests to the formatter and overlays
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

use crate::config::DisplaySettings;
use crate::display::{
    BoxedDriver,
    CommandError,
    DisplayDriverFactory,
    DisplayError,
    DisplayMode,
    DisplayModel,
    Formatter,
    SegmentFrame,
    MAX_BRIGHTNESS,
};
use crate::display::command::{ClockMode, DisplayCommand, DisplayFunction, DisplayResponse};
use crate::display::components::{ClockDisplay, ScrollingText, TimeSource};
use crate::display::formatter;

use log::{debug, error, info};

/// Owns the display state and applies host requests to it.
///
/// Every explicit command other than a scroll delay change cancels the
/// running marquee or clock. Commands are validated before anything is
/// cancelled or drawn, so a rejected command leaves the display untouched.
pub struct DisplayManager {
    driver: BoxedDriver,
    model: DisplayModel,
    frame: SegmentFrame,
    formatter: Formatter,
    scroller: ScrollingText,
    clock: ClockDisplay,
    time: Box<dyn TimeSource>,
    brightness: u8,
    powered: bool,
    rotating: bool,
}

impl DisplayManager {
    /// Create the configured driver and wrap it
    pub fn new(settings: &DisplaySettings, time: Box<dyn TimeSource>) -> Result<Self, DisplayError> {
        info!("Initializing DisplayManager for {} x{}", settings.model.name(), settings.width);
        let driver = DisplayDriverFactory::create_from_settings(settings)?;
        Ok(Self::new_with_driver(driver, settings, time))
    }

    /// Wrap an existing driver, useful for tests with a shared mock
    pub fn new_with_driver(
        driver: BoxedDriver,
        settings: &DisplaySettings,
        time: Box<dyn TimeSource>,
    ) -> Self {
        let width = settings.width;
        Self {
            driver,
            model: settings.model,
            frame: SegmentFrame::new(width),
            formatter: Formatter::new(width, settings.digit_order),
            scroller: ScrollingText::new(width, settings.scroll_delay),
            clock: ClockDisplay::new(),
            time,
            brightness: settings.brightness.min(MAX_BRIGHTNESS),
            powered: true,
            rotating: false,
        }
    }

    /// Route one host request
    pub fn dispatch(&mut self, function: DisplayFunction) -> Result<DisplayResponse, CommandError> {
        match function {
            DisplayFunction::Init => {
                self.init()?;
                Ok(DisplayResponse::Done)
            }
            DisplayFunction::Tick => {
                self.tick()?;
                Ok(DisplayResponse::Done)
            }
            DisplayFunction::Command(command) => self.execute(command),
            DisplayFunction::Brightness(level) => {
                self.set_brightness(level)?;
                Ok(DisplayResponse::Done)
            }
            DisplayFunction::Power(on) => {
                self.set_power(on)?;
                Ok(DisplayResponse::Done)
            }
            DisplayFunction::RotatingMode(on) => {
                self.set_rotating_mode(on);
                Ok(DisplayResponse::Done)
            }
            DisplayFunction::Model => Ok(DisplayResponse::Model(self.model_name())),
        }
    }

    /// Bring up the controller with a blank frame at the current brightness
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.driver.init()?;
        self.driver.set_intensity(self.model.intensity(self.brightness))?;
        self.frame.clear();
        self.driver.clear()?;
        self.driver.set_power(self.powered)?;
        info!("{} ready, {} digits", self.model.name(), self.frame.width());
        Ok(())
    }

    /// Apply an explicit display command
    pub fn execute(&mut self, command: DisplayCommand) -> Result<DisplayResponse, CommandError> {
        self.validate(&command)?;

        if command.cancels_overlays() {
            self.cancel_overlays();
        }

        if let DisplayCommand::ScrollDelay { delay } = command {
            let delay = match delay {
                Some(d) => {
                    let applied = self.scroller.set_delay(d);
                    debug!("scroll delay {} -> {}", d, applied);
                    applied
                }
                None => self.scroller.delay(),
            };
            return Ok(DisplayResponse::ScrollDelay(delay));
        }

        if !self.powered {
            debug!("display off, {:?} not rendered", command);
            return Ok(DisplayResponse::Done);
        }

        self.render(command)?;
        Ok(DisplayResponse::Done)
    }

    /// Advance the marquee or refresh the clock. Returns true when a frame was sent.
    pub fn tick(&mut self) -> Result<bool, DisplayError> {
        if !self.powered || self.rotating {
            return Ok(false);
        }

        let changed = if self.scroller.is_active() {
            let redrawn = self.scroller.tick(&mut self.frame, &self.formatter);
            if !self.scroller.is_active() {
                info!("scroll finished after {} loops", self.scroller.loops());
            }
            redrawn
        } else if self.clock.is_enabled() {
            let before = self.frame.clone();
            self.clock.render(&mut self.frame, &self.formatter, self.time.now());
            self.frame != before
        } else {
            false
        };

        if changed {
            self.push_frame()?;
        }
        Ok(changed)
    }

    /// Host brightness 0-15, clamped, rescaled for the controller
    pub fn set_brightness(&mut self, level: i64) -> Result<(), DisplayError> {
        let brightness = level.clamp(0, MAX_BRIGHTNESS as i64) as u8;
        self.brightness = brightness;
        let intensity = self.model.intensity(brightness);
        debug!("brightness {} -> intensity {}", brightness, intensity);
        self.driver.set_intensity(intensity)
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Power off blanks the display, stops overlays and suppresses rendering
    pub fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        if on == self.powered {
            return Ok(());
        }
        self.powered = on;
        if on {
            info!("display power on");
            self.driver.set_power(true)?;
            self.push_frame()
        } else {
            info!("display power off");
            self.cancel_overlays();
            self.frame.clear();
            self.driver.clear()?;
            self.driver.set_power(false)
        }
    }

    pub fn is_powered_on(&self) -> bool {
        self.powered
    }

    /// External paged mode owns the display; overlays stop drawing
    pub fn set_rotating_mode(&mut self, on: bool) {
        if on != self.rotating {
            info!("rotating mode {}", if on { "on" } else { "off" });
        }
        self.rotating = on;
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    pub fn frame(&self) -> &SegmentFrame {
        &self.frame
    }

    pub fn scroll_delay(&self) -> u8 {
        self.scroller.delay()
    }

    pub fn mode(&self) -> DisplayMode {
        if self.scroller.is_active() {
            DisplayMode::Scrolling
        } else if self.clock.is_enabled() {
            DisplayMode::Clock
        } else {
            DisplayMode::Static
        }
    }

    /// Structural limits only; cosmetic operands get clamped while rendering
    fn validate(&self, command: &DisplayCommand) -> Result<(), CommandError> {
        match command {
            DisplayCommand::Level { percent } => formatter::validate_level(*percent),
            DisplayCommand::ScrollText { text, .. } => ScrollingText::validate(text),
            DisplayCommand::Icon { index } => {
                if !self.model.supports_bitmap() {
                    return Err(CommandError::BitmapUnsupported(self.model.name()));
                }
                formatter::lookup_icon(*index).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn cancel_overlays(&mut self) {
        if self.scroller.is_active() {
            info!("scroll cancelled");
            self.scroller.stop();
        }
        if self.clock.is_enabled() {
            info!("clock disabled");
            self.clock.disable();
        }
    }

    fn render(&mut self, command: DisplayCommand) -> Result<(), CommandError> {
        let fmt = self.formatter;
        let frame = &mut self.frame;

        match command {
            DisplayCommand::Clear => frame.clear(),
            DisplayCommand::Number { value, position, leading_zeros, length, clear } => {
                if clear {
                    frame.clear();
                }
                let n = fmt.render_integer(frame, value, position, leading_zeros, length);
                debug!("number {} -> {} digits", value, n);
            }
            DisplayCommand::Float { value, position, precision, length, clear } => {
                if clear {
                    frame.clear();
                }
                let n = fmt.render_float(frame, value, position, precision, length);
                debug!("float {} -> {} digits", value, n);
            }
            DisplayCommand::Text { text, position, length, clear } => {
                if clear {
                    frame.clear();
                }
                let n = fmt.render_text(frame, &text, position, length);
                debug!("text '{}' -> {} digits", text, n);
            }
            DisplayCommand::Raw { position, length, bytes } => {
                let n = fmt.render_raw(frame, position, length, &bytes);
                debug!("raw {:02x?} -> {} digits", bytes, n);
            }
            DisplayCommand::Level { percent } => {
                fmt.render_level(frame, percent)?;
            }
            DisplayCommand::Icon { index } => {
                let icon = formatter::lookup_icon(index)?;
                self.driver.draw_bitmap(icon).inspect_err(|e| error!("bitmap write failed: {}", e))?;
                return Ok(());
            }
            DisplayCommand::ScrollText { text, max_loops } => {
                self.scroller.start(&text, max_loops)?;
                info!("scrolling '{}'", text);
                return Ok(());
            }
            DisplayCommand::Clock { mode } => {
                if mode == ClockMode::Off {
                    return Ok(());
                }
                frame.clear();
                self.clock.enable(mode == ClockMode::TwentyFourHour);
                info!("clock enabled ({:?})", mode);
            }
            // answered before rendering
            DisplayCommand::ScrollDelay { .. } => return Ok(()),
        }

        self.push_frame()?;
        Ok(())
    }

    fn push_frame(&mut self) -> Result<(), DisplayError> {
        self.driver
            .write_display(&self.frame)
            .inspect_err(|e| error!("frame write failed: {}", e))
    }
}
