/*
 *  display/factory.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Builds transport drivers from configuration
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

use crate::config::{DisplaySettings, DriverKind};
use crate::display::drivers::{HeadlessDriver, TerminalDriver};
use crate::display::error::DisplayFactoryError;
use crate::display::traits::SegmentDriver;
use log::info;

/// Type alias for boxed display driver trait objects
pub type BoxedDriver = Box<dyn SegmentDriver>;

/// Factory for creating display drivers from configuration
pub struct DisplayDriverFactory;

impl DisplayDriverFactory {
    /// Create a display driver from resolved settings
    ///
    /// The terminal driver draws to stderr so stdout stays a clean stream of
    /// JSON responses.
    pub fn create_from_settings(
        settings: &DisplaySettings
    ) -> Result<BoxedDriver, DisplayFactoryError> {
        Self::validate_settings(settings)?;

        match settings.driver {
            DriverKind::Terminal => {
                info!("Creating terminal driver: {} x{}", settings.model.name(), settings.width);
                Ok(Box::new(TerminalDriver::new(
                    std::io::stderr(),
                    settings.model,
                    settings.width,
                    true,
                )))
            }
            DriverKind::Headless => {
                info!("Creating headless driver: {} x{}", settings.model.name(), settings.width);
                Ok(Box::new(HeadlessDriver::new(settings.model, settings.width)))
            }
        }
    }

    /// Validate settings without creating a driver
    pub fn validate_settings(settings: &DisplaySettings) -> Result<(), DisplayFactoryError> {
        if settings.width == 0 {
            return Err(DisplayFactoryError::ConfigError(
                "display width must be at least one digit".to_string()
            ));
        }

        let max = settings.model.max_digits();
        if settings.width > max {
            return Err(DisplayFactoryError::UnsupportedWidth {
                model: settings.model.name(),
                width: settings.width,
                max,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::traits::DisplayModel;

    #[test]
    fn test_validate_width_zero() {
        let settings = DisplaySettings { width: 0, ..Default::default() };
        assert!(DisplayDriverFactory::validate_settings(&settings).is_err());
    }

    #[test]
    fn test_validate_width_too_wide() {
        let settings = DisplaySettings { width: 8, model: DisplayModel::Tm1637, ..Default::default() };
        assert!(matches!(
            DisplayDriverFactory::validate_settings(&settings),
            Err(DisplayFactoryError::UnsupportedWidth { max: 6, .. })
        ));
    }

    #[test]
    fn test_create_headless() {
        let settings = DisplaySettings {
            width: 8,
            model: DisplayModel::Matrix,
            driver: DriverKind::Headless,
            ..Default::default()
        };
        let driver = DisplayDriverFactory::create_from_settings(&settings).unwrap();
        assert_eq!(driver.width(), 8);
        assert!(driver.capabilities().supports_bitmap);
    }
}
