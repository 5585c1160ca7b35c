/*
 *  display/drivers/mock.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver for testing
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

use crate::display::error::DisplayError;
use crate::display::framebuffer::SegmentFrame;
use crate::display::traits::{DisplayCapabilities, DisplayModel, SegmentDriver};
use crate::glyphs::Icon;

use std::sync::{Arc, Mutex, MutexGuard};

/// Mock display driver
///
/// This driver simulates a segment display without requiring hardware. It's useful for:
/// - Unit tests
/// - Integration tests
///
/// Clones share the same recorded state, so a test can hand one clone to
/// the display manager and inspect the other.
#[derive(Debug, Clone)]
pub struct MockDriver {
    /// Display capabilities
    capabilities: DisplayCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Every frame written, oldest first
    pub frames: Vec<Vec<u8>>,

    /// Every bitmap drawn, oldest first
    pub bitmaps: Vec<Icon>,

    /// Last intensity value set
    pub last_intensity: Option<u8>,

    /// Last power state set
    pub powered: Option<bool>,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Simulate failures (for error testing)
    pub simulate_write_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriver {
    /// Create a mock driver for `model` with `width` digits
    pub fn new(model: DisplayModel, width: usize) -> Self {
        Self {
            capabilities: DisplayCapabilities::new(model, width),
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    /// Reset state counters (useful between tests)
    pub fn reset_state(&self) {
        *self.lock() = MockDriverState::default();
    }

    /// Most recent frame written, if any
    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.lock().frames.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frames.len()
    }

    // a panicked test thread must not hide the recorded state
    fn lock(&self) -> MutexGuard<'_, MockDriverState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SegmentDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lock().clear_count += 1;
        Ok(())
    }

    fn write_display(&mut self, frame: &SegmentFrame) -> Result<(), DisplayError> {
        if frame.width() != self.capabilities.width {
            return Err(DisplayError::BufferSizeMismatch {
                expected: self.capabilities.width,
                actual: frame.width(),
            });
        }

        let mut state = self.lock();
        if state.simulate_write_failure {
            return Err(DisplayError::Transport("Simulated write failure".to_string()));
        }
        state.frames.push(frame.as_slice().to_vec());
        Ok(())
    }

    fn set_intensity(&mut self, value: u8) -> Result<(), DisplayError> {
        self.lock().last_intensity = Some(value);
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.lock().powered = Some(on);
        Ok(())
    }

    fn draw_bitmap(&mut self, bitmap: &Icon) -> Result<(), DisplayError> {
        if !self.capabilities.supports_bitmap {
            return Err(DisplayError::UnsupportedOperation);
        }
        let mut state = self.lock();
        if state.simulate_write_failure {
            return Err(DisplayError::Transport("Simulated write failure".to_string()));
        }
        state.bitmaps.push(*bitmap);
        Ok(())
    }
}
