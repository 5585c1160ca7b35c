/*
 *  glyphs.rs
 *
 *  SegMonS - worth the squeeze
 *	(c) 2020-25 Stuart Hunter
 *
 *	8x8 icons for matrix modules, one byte per row, MSB on the left
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

pub type Icon = [u8; 8];

pub const GLYPH_NONE: Icon = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,];
pub const GLYPH_HEART: Icon = [0x00, 0x66, 0xff, 0xff, 0xff, 0x7e, 0x3c, 0x18,];
pub const GLYPH_SMILE: Icon = [0x3c, 0x42, 0xa5, 0x81, 0xa5, 0x99, 0x42, 0x3c,];
pub const GLYPH_ARROW_UP: Icon = [0x18, 0x3c, 0x7e, 0xff, 0x18, 0x18, 0x18, 0x18,];
pub const GLYPH_ARROW_DOWN: Icon = [0x18, 0x18, 0x18, 0x18, 0xff, 0x7e, 0x3c, 0x18,];
pub const GLYPH_CHECK: Icon = [0x00, 0x01, 0x03, 0x06, 0x8c, 0xd8, 0x70, 0x20,];
pub const GLYPH_CROSS: Icon = [0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81,];
pub const GLYPH_BELL: Icon = [0x18, 0x3c, 0x3c, 0x3c, 0x7e, 0xff, 0x00, 0x18,];
pub const GLYPH_THERMOMETER: Icon = [0x18, 0x24, 0x24, 0x24, 0x3c, 0x7e, 0x7e, 0x3c,];

/// Icons addressable by the `Dots` command, in index order
pub static ICONS: [Icon; 9] = [
    GLYPH_NONE,
    GLYPH_HEART,
    GLYPH_SMILE,
    GLYPH_ARROW_UP,
    GLYPH_ARROW_DOWN,
    GLYPH_CHECK,
    GLYPH_CROSS,
    GLYPH_BELL,
    GLYPH_THERMOMETER,
];

/// Bounds-checked icon lookup
pub fn icon(index: usize) -> Option<&'static Icon> {
    ICONS.get(index)
}
