/*
 *  display/error.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for display subsystem
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

use std::fmt;
use std::error::Error;

use serde_json::json;
use thiserror::Error as ThisError;

/// Unified error type for all transport operations
#[derive(Debug)]
pub enum DisplayError {
    /// Hardware initialization failed
    InitializationFailed(String),

    /// Clock/data line or terminal write failed
    Transport(String),

    /// Invalid configuration
    InvalidConfiguration(String),

    /// Unsupported operation for this display
    UnsupportedOperation,

    /// Frame width does not match the display
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Generic error with message
    Other(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Display initialization failed: {}", msg),
            DisplayError::Transport(msg) =>
                write!(f, "Display transport error: {}", msg),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::UnsupportedOperation =>
                write!(f, "Operation not supported by this display"),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Frame size mismatch: expected {} digits, got {}", expected, actual),
            DisplayError::Other(msg) =>
                write!(f, "{}", msg),
        }
    }
}

impl Error for DisplayError {}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Transport(err.to_string())
    }
}

/// Factory error types
#[derive(Debug)]
pub enum DisplayFactoryError {
    /// Configured width does not fit the model
    UnsupportedWidth { model: &'static str, width: usize, max: usize },

    /// Display driver initialization failed
    DriverInitFailed(DisplayError),

    /// Configuration validation error
    ConfigError(String),
}

impl fmt::Display for DisplayFactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFactoryError::UnsupportedWidth { model, width, max } =>
                write!(f, "{} supports at most {} digits, {} configured", model, max, width),
            DisplayFactoryError::DriverInitFailed(err) =>
                write!(f, "Driver initialization failed: {}", err),
            DisplayFactoryError::ConfigError(msg) =>
                write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for DisplayFactoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayFactoryError::DriverInitFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DisplayError> for DisplayFactoryError {
    fn from(err: DisplayError) -> Self {
        DisplayFactoryError::DriverInitFailed(err)
    }
}

impl From<DisplayFactoryError> for DisplayError {
    fn from(err: DisplayFactoryError) -> Self {
        match err {
            DisplayFactoryError::DriverInitFailed(e) => e,
            DisplayFactoryError::UnsupportedWidth { model, width, max } =>
                DisplayError::InvalidConfiguration(format!(
                    "{} supports at most {} digits, {} configured", model, max, width
                )),
            DisplayFactoryError::ConfigError(msg) =>
                DisplayError::InvalidConfiguration(msg),
        }
    }
}

/// Rejected display command.
///
/// Only structural limits end up here; cosmetic operands such as position,
/// length, precision and scroll delay are clamped instead.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("Level should be a number in the range [{min}, {max}], got {value}")]
    LevelOutOfRange { value: i64, min: i64, max: i64 },

    #[error("Text too long. Length should be less than {max}, got {len}")]
    ScrollTextTooLong { len: usize, max: usize },

    #[error("Command text too long. Please limit it to {max} characters")]
    CommandTooLong { len: usize, max: usize },

    #[error("Icon index {index} out of range, {count} icons available")]
    IconOutOfRange { index: i64, count: usize },

    #[error("{0} has no bitmap support")]
    BitmapUnsupported(&'static str),

    #[error("Missing operand: {0}")]
    MissingOperand(&'static str),

    #[error("Invalid {name} operand: '{value}'")]
    InvalidOperand { name: &'static str, value: String },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl CommandError {
    /// Structured failure payload reported back to the host
    pub fn to_payload(&self) -> serde_json::Value {
        json!({ "Error": self.to_string() })
    }

    /// True for operand/range rejections, false for transport failures
    pub fn is_validation(&self) -> bool {
        !matches!(self, CommandError::Display(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_payload() {
        let err = CommandError::LevelOutOfRange { value: 150, min: 0, max: 100 };
        let payload = err.to_payload();
        assert_eq!(
            payload["Error"],
            "Level should be a number in the range [0, 100], got 150"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_transport_error_wraps() {
        let err: CommandError = DisplayError::Transport("broken pipe".to_string()).into();
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Display transport error: broken pipe");
    }

    #[test]
    fn test_factory_error_roundtrip() {
        let err = DisplayFactoryError::UnsupportedWidth { model: "TM1637", width: 8, max: 6 };
        let display: DisplayError = err.into();
        assert!(matches!(display, DisplayError::InvalidConfiguration(_)));
    }
}
