use std::fmt;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
  pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
  pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

  /// Reads a packed `0xRRGGBB` value.
  pub fn from_hex(v: u32) -> Rgb {
    Rgb(
      (v >> 16 & 0xff) as u8,
      (v >>  8 & 0xff) as u8,
      (v       & 0xff) as u8,
    )
  }

  pub fn bytes(&self) -> [u8; 3] {
    [self.0, self.1, self.2]
  }
}

impl fmt::Display for Rgb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
  }
}

// background and border take two of the 256 PNG palette slots
pub const MAX_COLORS: usize = 254;

// blue, green, red, cyan, magenta, yellow
const DEFAULT_COLORS: [u32; 6] = [0x0000ff, 0x008000, 0xff0000, 0x00bfbf, 0xbf00bf, 0xbfbf00];

/// Ordered fill colors. A square's color depends only on its size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Palette {
  colors: Vec<Rgb>,
}

impl Palette {
  /// Accepts between one and `MAX_COLORS` colors.
  pub fn new(colors: Vec<Rgb>) -> Result<Palette, ConfigError> {
    if colors.is_empty() {
      return Err(ConfigError::EmptyPalette);
    }
    if colors.len() > MAX_COLORS {
      return Err(ConfigError::PaletteTooLarge(colors.len()));
    }
    Ok(Palette { colors })
  }

  pub fn len(&self) -> usize {
    self.colors.len()
  }

  pub fn colors(&self) -> &[Rgb] {
    &self.colors
  }

  /// Position in the palette used for squares of side `size`.
  pub fn slot(&self, size: u32) -> usize {
    size as usize % self.colors.len()
  }

  pub fn color_for(&self, size: u32) -> Rgb {
    self.colors[self.slot(size)]
  }
}

impl Default for Palette {
  fn default() -> Palette {
    Palette { colors: DEFAULT_COLORS.iter().map(|&v| Rgb::from_hex(v)).collect() }
  }
}
