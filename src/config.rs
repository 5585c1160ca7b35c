use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::components::scrollers::{DEFAULT_SCROLL_DELAY, MAX_SCROLL_DELAY};
use crate::display::digit_order::DigitOrder;
use crate::display::traits::DisplayModel;
use crate::display::MAX_BRIGHTNESS;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    /// display geometry & behavior
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<usize>,
    pub model: Option<DisplayModel>,
    pub digit_order: Option<DigitOrder>,
    pub brightness: Option<u8>,     // 0-15
    pub scroll_delay: Option<u8>,   // 0-15, ticks per scroll step
    pub driver: Option<DriverKind>,
    pub tick_ms: Option<u64>,
}

/// Where rendered frames go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// ASCII art on stderr, stdout carries the JSON responses
    #[default]
    Terminal,
    /// Only the latest frame is kept, nothing is drawn
    Headless,
}

/// Fully resolved display settings, every default filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub width: usize,
    pub model: DisplayModel,
    pub digit_order: DigitOrder,
    pub brightness: u8,
    pub scroll_delay: u8,
    pub driver: DriverKind,
    pub tick_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 4,
            model: DisplayModel::Tm1637,
            digit_order: DigitOrder::Standard,
            brightness: MAX_BRIGHTNESS,
            scroll_delay: DEFAULT_SCROLL_DELAY,
            driver: DriverKind::Terminal,
            tick_ms: 50,
        }
    }
}

impl DisplayConfig {
    pub fn resolve(&self) -> DisplaySettings {
        let d = DisplaySettings::default();
        DisplaySettings {
            width: self.width.unwrap_or(d.width),
            model: self.model.unwrap_or(d.model),
            digit_order: self.digit_order.unwrap_or(d.digit_order),
            brightness: self.brightness.unwrap_or(d.brightness),
            scroll_delay: self.scroll_delay.unwrap_or(d.scroll_delay),
            driver: self.driver.unwrap_or(d.driver),
            tick_ms: self.tick_ms.unwrap_or(d.tick_ms),
        }
    }
}

impl Config {
    /// Display settings with defaults applied
    pub fn display_settings(&self) -> DisplaySettings {
        self.display.as_ref().map(DisplayConfig::resolve).unwrap_or_default()
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "SegMonS", about = "SegMonS seven-segment display driver", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub display_width: Option<usize>,
    #[arg(long, value_enum)]
    pub display_model: Option<DisplayModel>,
    #[arg(long, value_enum)]
    pub digit_order: Option<DigitOrder>,
    #[arg(long)]
    pub brightness: Option<u8>,
    #[arg(long)]
    pub scroll_delay: Option<u8>,
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer defaults, YAML and CLI overrides, then validate
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/segmons/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/segmons/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/segmons.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["segmons.yaml", "config.yaml", "config/segmons.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()        { dst.width = src.width; }
    if src.model.is_some()        { dst.model = src.model; }
    if src.digit_order.is_some()  { dst.digit_order = src.digit_order; }
    if src.brightness.is_some()   { dst.brightness = src.brightness; }
    if src.scroll_delay.is_some() { dst.scroll_delay = src.scroll_delay; }
    if src.driver.is_some()       { dst.driver = src.driver; }
    if src.tick_ms.is_some()      { dst.tick_ms = src.tick_ms; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                     { cfg.log_level = Some("debug".to_string()); }

    let overrides = DisplayConfig {
        width: cli.display_width,
        model: cli.display_model,
        digit_order: cli.digit_order,
        brightness: cli.brightness,
        scroll_delay: cli.scroll_delay,
        driver: cli.driver,
        tick_ms: cli.tick_ms,
    };
    let display = cfg.display.get_or_insert_with(DisplayConfig::default);
    merge_display(display, overrides);
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let s = cfg.display_settings();
    if s.width == 0 {
        return Err(ConfigError::Validation("display width must be > 0".into()));
    }
    if s.width > s.model.max_digits() {
        return Err(ConfigError::Validation(format!(
            "{} drives at most {} digits, width {} configured",
            s.model.name(), s.model.max_digits(), s.width
        )));
    }
    if s.brightness > MAX_BRIGHTNESS {
        return Err(ConfigError::Validation(format!("display brightness must be 0..={}", MAX_BRIGHTNESS)));
    }
    if s.scroll_delay > MAX_SCROLL_DELAY {
        return Err(ConfigError::Validation(format!("scroll_delay must be 0..={}", MAX_SCROLL_DELAY)));
    }
    if s.tick_ms == 0 {
        return Err(ConfigError::Validation("tick_ms must be > 0".into()));
    }
    Ok(())
}
