/*
 *  display/segment.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Seven-segment glyph encoder
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

//           A
//          ===
//      F ||   || B
//          =G=
//      E ||   || C
//          ===   . DP
//           D

pub const SEG_A: u8 = 0b0000_0001;
pub const SEG_B: u8 = 0b0000_0010;
pub const SEG_C: u8 = 0b0000_0100;
pub const SEG_D: u8 = 0b0000_1000;
pub const SEG_E: u8 = 0b0001_0000;
pub const SEG_F: u8 = 0b0010_0000;
pub const SEG_G: u8 = 0b0100_0000;
pub const SEG_DP: u8 = 0b1000_0000;

/// All segments off
pub const BLANK: u8 = 0;

/// Small circle in the upper half of the digit
pub const DEGREE: u8 = SEG_A | SEG_B | SEG_F | SEG_G;

/// Left vertical pair, used for a half-lit level digit
pub const BAR_HALF: u8 = SEG_E | SEG_F;

/// Both vertical pairs, used for a fully lit level digit
pub const BAR_FULL: u8 = SEG_B | SEG_C | SEG_E | SEG_F;

/// Character typed by operators in place of a degree sign
pub const DEGREE_ALIAS: char = '^';

static NUMERALS: [u8; 10] = [
    //.GFEDCBA
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
];

/// Segment pattern for a single character, without the decimal point.
///
/// Letters without a readable seven-segment form and anything outside
/// the table come back blank.
pub fn glyph(c: char) -> u8 {
    if let Some(d) = c.to_digit(10) {
        return NUMERALS[d as usize];
    }
    match c {
        'A' | 'a' => 0x77,
        'B' | 'b' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'D' | 'd' => 0x5E,
        'E' | 'e' => 0x79,
        'F' | 'f' => 0x71,
        'G' | 'g' => 0x3D,
        'H' => 0x76,
        'h' => 0x74,
        'I' => 0x30,
        'i' => 0x10,
        'J' | 'j' => 0x1E,
        'L' | 'l' => 0x38,
        'N' | 'n' => 0x54,
        'O' => 0x3F,
        'o' => 0x5C,
        'P' | 'p' => 0x73,
        'Q' | 'q' => 0x67,
        'R' | 'r' => 0x50,
        'S' | 's' => 0x6D,
        'T' | 't' => 0x78,
        'U' => 0x3E,
        'u' => 0x1C,
        'Y' | 'y' => 0x6E,
        'Z' | 'z' => 0x5B,
        '-' => SEG_G,
        '_' => SEG_D,
        '=' => SEG_G | SEG_D,
        '"' => SEG_B | SEG_F,
        '\'' => SEG_B,
        '[' => 0x39,
        ']' => 0x0F,
        '?' => 0x53,
        '.' => SEG_DP,
        DEGREE_ALIAS | '°' => DEGREE,
        _ => BLANK,
    }
}

/// Encode a character, optionally with its decimal point lit.
pub fn encode(c: char, with_dot: bool) -> u8 {
    let bits = glyph(c);
    if with_dot { bits | SEG_DP } else { bits }
}

/// One rendered digit: the segment byte and how many source characters it consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub bits: u8,
    pub span: usize,
}

impl Glyph {
    pub const fn new(bits: u8, span: usize) -> Self {
        Self { bits, span }
    }
}

/// Split text into digit glyphs, folding a `.` into the decimal point of the
/// character before it.
///
/// A `.` with nothing to fold into (leading, or following another dot) gets a
/// digit of its own showing only the decimal point.
pub fn fold_dots(text: &[char]) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut idx = 0;
    while idx < text.len() {
        let c = text[idx];
        if c == '.' {
            glyphs.push(Glyph::new(SEG_DP, 1));
            idx += 1;
            continue;
        }
        let dotted = text.get(idx + 1) == Some(&'.');
        glyphs.push(Glyph::new(encode(c, dotted), if dotted { 2 } else { 1 }));
        idx += if dotted { 2 } else { 1 };
    }
    glyphs
}
