//! Minimal parser for `player.toml`
//!
//! Handles only the subset of TOML the player configuration uses. It does
//! NOT support all of TOML.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, boolean)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Missing keys keep their defaults. Unknown sections and keys are errors so
//! a typo never silently falls back to a default.

use heapless::String as HString;

use super::types::{ConfigError, PlayerConfig};

/// Longest key name kept in [`ParseError::UnknownKey`]
pub const MAX_KEY_LEN: usize = 24;

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range for its field
    InvalidValue,
    /// Key not recognized in its section (name truncated to [`MAX_KEY_LEN`])
    UnknownKey(HString<MAX_KEY_LEN>),
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Playback,
    Input,
    Display,
    Watchdog,
}

/// Parse `player.toml` text into a validated [`PlayerConfig`]
pub fn parse_config(input: &str) -> Result<PlayerConfig, ParseError> {
    let mut config = PlayerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "playback" => Ok(Section::Playback),
        "input" => Ok(Section::Input),
        "display" => Ok(Section::Display),
        "watchdog" => Ok(Section::Watchdog),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PlayerConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Playback, "frame_rate") => config.playback.frame_rate = parse_int(value)?,

        (Section::Input, "active_low") => config.input.active_low = parse_bool(value)?,
        (Section::Input, "debounce_ms") => config.input.debounce_ms = parse_int(value)?,
        (Section::Input, "poll_interval_ms") => config.input.poll_interval_ms = parse_int(value)?,
        (Section::Input, "long_press_ms") => config.input.long_press_ms = parse_int(value)?,

        (Section::Display, "brightness") => config.display.brightness = parse_int(value)?,
        (Section::Display, "idle_refresh_ms") => config.display.idle_refresh_ms = parse_int(value)?,

        (Section::Watchdog, "timeout_ms") => config.watchdog.timeout_ms = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey(truncated_key(key))),
    }
    Ok(())
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: HString<20> = HString::new();
    for ch in value.chars().filter(|&c| c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn truncated_key(key: &str) -> HString<MAX_KEY_LEN> {
    let mut name = HString::new();
    for ch in key.chars() {
        if name.push(ch).is_err() {
            break;
        }
    }
    name
}
