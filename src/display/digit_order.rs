/*
 *  display/digit_order.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Logical to physical digit mapping for differently wired modules
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

use serde::{Deserialize, Serialize};

/// Six-digit modules wired as two groups of three, each group reversed
const REVERSED_SIX: [usize; 6] = [2, 1, 0, 5, 4, 3];

/// Digit wiring variant of the attached module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigitOrder {
    /// Logical digit N is physical digit N
    #[default]
    Standard,
    /// Groups of three digits wired right-to-left
    Reversed,
}

impl DigitOrder {
    /// Physical slot for a logical digit index on a display `width` digits wide.
    ///
    /// Only groups of three that fit entirely inside both the display and the
    /// first six digits are reversed; everything else maps to itself.
    pub fn physical_slot(self, logical: usize, width: usize) -> usize {
        match self {
            DigitOrder::Standard => logical,
            DigitOrder::Reversed => {
                let group_end = (logical / 3 + 1) * 3;
                if logical < REVERSED_SIX.len() && group_end <= width {
                    REVERSED_SIX[logical]
                } else {
                    logical
                }
            }
        }
    }
}
