use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs::read_to_string;

use crate::render::palette::{Palette, Rgb, MAX_COLORS};

const DEFAULT_BORDER_WIDTH: u32 = 4;
const DEFAULT_CELL_SIZE: u32 = 32;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializedConfig {
  pub palette: Vec<String>,
  pub background: String,
  pub border_color: String,
  pub border_width: u32,
  pub cell_size: u32,
}

impl Default for SerializedConfig {
  fn default() -> SerializedConfig {
    SerializedConfig {
      palette: Palette::default().colors().iter().map(|c| c.to_string()).collect(),
      background: Rgb::WHITE.to_string(),
      border_color: Rgb::BLACK.to_string(),
      border_width: DEFAULT_BORDER_WIDTH,
      cell_size: DEFAULT_CELL_SIZE,
    }
  }
}

/// How solutions are painted.
#[derive(Debug, Clone)]
pub struct RenderConfig {
  pub palette: Palette,
  pub background: Rgb,
  pub border_color: Rgb,
  pub border_width: u32,
  pub cell_size: u32,
}

impl Default for RenderConfig {
  fn default() -> RenderConfig {
    RenderConfig {
      palette: Palette::default(),
      background: Rgb::WHITE,
      border_color: Rgb::BLACK,
      border_width: DEFAULT_BORDER_WIDTH,
      cell_size: DEFAULT_CELL_SIZE,
    }
  }
}

#[derive(Debug, Eq, PartialEq)]
pub enum ConfigError {
  EmptyPalette,
  PaletteTooLarge(usize),
  InvalidColor(String),
  ZeroCellSize,
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EmptyPalette => write!(f, "palette must hold at least one color"),
      ConfigError::PaletteTooLarge(n) => {
        write!(f, "palette holds {} colors, at most {} are allowed", n, MAX_COLORS)
      }
      ConfigError::InvalidColor(c) => write!(f, "{:?} is not a hex RGB color", c),
      ConfigError::ZeroCellSize => write!(f, "cell_size must be positive"),
    }
  }
}

impl Error for ConfigError {}

impl SerializedConfig {
  pub fn load(&self) -> Result<RenderConfig, ConfigError> {
    if self.cell_size == 0 {
      return Err(ConfigError::ZeroCellSize);
    }

    let colors = self.palette.iter()
      .map(|c| parse_color(c))
      .collect::<Result<Vec<Rgb>, ConfigError>>()?;

    Ok(RenderConfig {
      palette: Palette::new(colors)?,
      background: parse_color(&self.background)?,
      border_color: parse_color(&self.border_color)?,
      border_width: self.border_width,
      cell_size: self.cell_size,
    })
  }
}

fn parse_color(value: &str) -> Result<Rgb, ConfigError> {
  let hex = value.trim().trim_start_matches('#');
  if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err(ConfigError::InvalidColor(value.to_string()));
  }
  u32::from_str_radix(hex, 16)
    .map(Rgb::from_hex)
    .map_err(|_| ConfigError::InvalidColor(value.to_string()))
}

/// Loads the render style from a YAML file, or the defaults when no file is given.
pub fn load_config(path: Option<&str>) -> Result<RenderConfig> {
  let serialized = match path {
    Some(path) => {
      let config_str = read_to_string(path)
        .with_context(|| format!("failed to read config {}", path))?;
      serde_yaml::from_str::<SerializedConfig>(&config_str)
        .with_context(|| format!("invalid config {}", path))?
    }
    None => SerializedConfig::default(),
  };
  debug!("Config: {:?}", serialized);

  let config = serialized.load().context("invalid render style")?;
  Ok(config)
}
