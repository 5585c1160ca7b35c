/*
 *  display/command.rs
 *
 *  SegMonS - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display commands, host requests and their responses
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

use serde_json::json;

use crate::display::error::CommandError;

/// Longest operand text a single command may carry
pub const CMD_MAX_LEN: usize = 55;

/// Clock overlay selection (0 off, 1 twelve hour, 2 and up twenty-four hour)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    Off,
    TwelveHour,
    TwentyFourHour,
}

impl ClockMode {
    pub fn from_operand(mode: i64) -> Self {
        match mode {
            m if m <= 0 => ClockMode::Off,
            1 => ClockMode::TwelveHour,
            _ => ClockMode::TwentyFourHour,
        }
    }
}

/// One explicit display command with its operands.
///
/// Optional operands stay `None` here; defaults and clamping are applied by
/// the formatter, which knows the display width.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    Clear,
    Number {
        value: i64,
        position: Option<i64>,
        leading_zeros: bool,
        length: Option<i64>,
        clear: bool,
    },
    Float {
        value: f64,
        position: Option<i64>,
        precision: Option<i64>,
        length: Option<i64>,
        clear: bool,
    },
    Text {
        text: String,
        position: Option<i64>,
        length: Option<i64>,
        clear: bool,
    },
    Raw {
        position: Option<i64>,
        length: Option<i64>,
        bytes: Vec<u8>,
    },
    Level {
        percent: i64,
    },
    Icon {
        index: i64,
    },
    ScrollText {
        text: String,
        max_loops: u32,
    },
    ScrollDelay {
        delay: Option<i64>,
    },
    Clock {
        mode: ClockMode,
    },
}

impl DisplayCommand {
    /// Parse a command name and its comma separated operand list.
    ///
    /// Names are case-insensitive and may carry a `Display` prefix, so
    /// `DisplayNumberNC`, `numbernc` and `NumberNC` are the same command.
    pub fn parse(name: &str, payload: &str) -> Result<Self, CommandError> {
        let len = payload.chars().count();
        if len > CMD_MAX_LEN {
            return Err(CommandError::CommandTooLong { len, max: CMD_MAX_LEN });
        }

        let lower = name.trim().to_ascii_lowercase();
        let key = lower.strip_prefix("display").unwrap_or(&lower);

        match key {
            "clear" => Ok(DisplayCommand::Clear),
            "number" | "numbernc" => {
                let mut ops = Operands::new(payload, 4);
                Ok(DisplayCommand::Number {
                    value: ops.required_int("value")?,
                    position: ops.int("position")?,
                    leading_zeros: ops.int("leading zeros")?.is_some_and(|v| v != 0),
                    length: ops.int("length")?,
                    clear: key == "number",
                })
            }
            "float" | "floatnc" => {
                let mut ops = Operands::new(payload, 4);
                Ok(DisplayCommand::Float {
                    value: ops.required_float("value")?,
                    position: ops.int("position")?,
                    precision: ops.int("precision")?,
                    length: ops.int("length")?,
                    clear: key == "float",
                })
            }
            "text" | "textnc" => {
                let mut ops = Operands::new(payload, 3);
                let text = ops.next_text().to_string();
                Ok(DisplayCommand::Text {
                    text,
                    position: ops.int("position")?,
                    length: ops.int("length")?,
                    clear: key == "text",
                })
            }
            "raw" => {
                let mut ops = Operands::new(payload, usize::MAX);
                let position = Some(ops.required_int("position")?);
                let length = Some(ops.required_int("length")?);
                let mut bytes = Vec::new();
                while let Some(raw) = ops.next_raw() {
                    bytes.push(parse_byte(raw)?);
                }
                if bytes.is_empty() {
                    return Err(CommandError::MissingOperand("segment byte"));
                }
                Ok(DisplayCommand::Raw { position, length, bytes })
            }
            "level" => {
                let mut ops = Operands::new(payload, 1);
                Ok(DisplayCommand::Level { percent: ops.required_int("level")? })
            }
            "dots" | "icon" => {
                let mut ops = Operands::new(payload, 1);
                Ok(DisplayCommand::Icon { index: ops.required_int("icon index")? })
            }
            "scrolltext" => parse_scroll_text(payload),
            "scrolldelay" => {
                let mut ops = Operands::new(payload, 1);
                Ok(DisplayCommand::ScrollDelay { delay: ops.int("delay")? })
            }
            "clock" => {
                let mut ops = Operands::new(payload, 1);
                Ok(DisplayCommand::Clock { mode: ClockMode::from_operand(ops.required_int("clock mode")?) })
            }
            _ => Err(CommandError::UnknownCommand(name.trim().to_string())),
        }
    }

    /// Scroll delay changes are the only commands that leave overlays running
    pub fn cancels_overlays(&self) -> bool {
        !matches!(self, DisplayCommand::ScrollDelay { .. })
    }
}

/// `text[,maxLoops]`; a trailing integer is the loop count, anything else is text
fn parse_scroll_text(payload: &str) -> Result<DisplayCommand, CommandError> {
    if let Some((text, tail)) = payload.rsplit_once(',') {
        if let Ok(loops) = tail.trim().parse::<i64>() {
            let max_loops = u32::try_from(loops).map_err(|_| CommandError::InvalidOperand {
                name: "loop count",
                value: tail.trim().to_string(),
            })?;
            return Ok(DisplayCommand::ScrollText { text: text.to_string(), max_loops });
        }
    }
    Ok(DisplayCommand::ScrollText { text: payload.to_string(), max_loops: 0 })
}

fn parse_byte(raw: &str) -> Result<u8, CommandError> {
    let invalid = || CommandError::InvalidOperand { name: "segment byte", value: raw.to_string() };
    let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).map_err(|_| invalid())?,
        None => raw.parse::<i64>().map_err(|_| invalid())?,
    };
    u8::try_from(value).map_err(|_| invalid())
}

/// Positional comma separated operands; an empty operand counts as omitted
struct Operands<'a> {
    parts: std::str::SplitN<'a, char>,
}

impl<'a> Operands<'a> {
    fn new(payload: &'a str, arity: usize) -> Self {
        Self { parts: payload.splitn(arity, ',') }
    }

    /// Free text keeps its surrounding spaces
    fn next_text(&mut self) -> &'a str {
        self.parts.next().unwrap_or_default()
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        self.parts.next().map(str::trim).filter(|s| !s.is_empty())
    }

    fn int(&mut self, name: &'static str) -> Result<Option<i64>, CommandError> {
        self.next_raw()
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| CommandError::InvalidOperand { name, value: raw.to_string() })
            })
            .transpose()
    }

    fn required_int(&mut self, name: &'static str) -> Result<i64, CommandError> {
        self.int(name)?.ok_or(CommandError::MissingOperand(name))
    }

    fn required_float(&mut self, name: &'static str) -> Result<f64, CommandError> {
        let raw = self.next_raw().ok_or(CommandError::MissingOperand(name))?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CommandError::InvalidOperand { name, value: raw.to_string() })
    }
}

/// Request from the host framework
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayFunction {
    Init,
    Tick,
    Command(DisplayCommand),
    Brightness(i64),
    Power(bool),
    RotatingMode(bool),
    Model,
}

impl DisplayFunction {
    /// Parse one host line: `<name> [operands]`.
    ///
    /// `init`, `tick`, `model`, `power on|off`, `brightness N` and
    /// `rotate on|off` are host requests; anything else is a display command.
    /// Only the single separator after the name is consumed, so text operands
    /// keep their leading and trailing spaces.
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::MissingOperand("command")),
            "init" => Ok(DisplayFunction::Init),
            "tick" => Ok(DisplayFunction::Tick),
            "model" => Ok(DisplayFunction::Model),
            "power" => Ok(DisplayFunction::Power(parse_switch("power", rest)?)),
            "rotate" => Ok(DisplayFunction::RotatingMode(parse_switch("rotate", rest)?)),
            "brightness" => {
                let raw = rest.trim();
                if raw.is_empty() {
                    return Err(CommandError::MissingOperand("brightness"));
                }
                raw.parse::<i64>()
                    .map(DisplayFunction::Brightness)
                    .map_err(|_| CommandError::InvalidOperand { name: "brightness", value: raw.to_string() })
            }
            _ => DisplayCommand::parse(name, rest).map(DisplayFunction::Command),
        }
    }
}

fn parse_switch(name: &'static str, raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" => Ok(true),
        "off" | "0" | "false" => Ok(false),
        "" => Err(CommandError::MissingOperand(name)),
        other => Err(CommandError::InvalidOperand { name, value: other.to_string() }),
    }
}

/// Successful outcome of a host request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayResponse {
    Done,
    ScrollDelay(u8),
    Model(&'static str),
}

impl DisplayResponse {
    pub fn to_payload(&self) -> serde_json::Value {
        match self {
            DisplayResponse::Done => json!({ "Command": "Done" }),
            DisplayResponse::ScrollDelay(delay) => json!({ "ScrollDelay": delay }),
            DisplayResponse::Model(name) => json!({ "Model": name }),
        }
    }
}
