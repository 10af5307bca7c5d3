mod encode;
pub mod palette;

use log::debug;
use std::error::Error;
use std::fmt;
use std::io::Write;

use crate::config::RenderConfig;
use crate::models::{Placement, Solution};

use encode::write_image;

const BACKGROUND: u8 = 0;
const BORDER: u8 = 1;
const FILL_BASE: u8 = 2;

/// Blank world units left around the extent on every side.
const MARGIN: u32 = 1;
pub const MAX_CANVAS_SIDE: u64 = 16384;

const INITIAL_IMAGE_SIZE: usize = 8192;

#[derive(Debug)]
pub enum RenderError {
  CanvasTooLarge(u64),
  Encoding(png::EncodingError),
}

impl fmt::Display for RenderError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RenderError::CanvasTooLarge(side) => {
        write!(f, "canvas of {} pixels exceeds the {} pixel limit", side, MAX_CANVAS_SIDE)
      }
      RenderError::Encoding(err) => write!(f, "png encoding failed: {}", err),
    }
  }
}

impl Error for RenderError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      RenderError::Encoding(err) => Some(err),
      _ => None,
    }
  }
}

impl From<png::EncodingError> for RenderError {
  fn from(err: png::EncodingError) -> RenderError {
    RenderError::Encoding(err)
  }
}

/// Square, palette-indexed raster covering `[-1, extent + 1]` on both axes.
#[derive(Debug)]
pub struct Canvas {
  extent: u32,
  cell_size: u32,
  side: u32,
  pixels: Vec<u8>,
}

impl Canvas {
  pub fn new(extent: u32, cell_size: u32) -> Result<Canvas, RenderError> {
    let side = (extent as u64 + 2 * MARGIN as u64) * cell_size as u64;
    if side > MAX_CANVAS_SIDE {
      return Err(RenderError::CanvasTooLarge(side));
    }
    let side = side as u32;
    Ok(Canvas {
      extent,
      cell_size,
      side,
      pixels: vec![BACKGROUND; side as usize * side as usize],
    })
  }

  pub fn side(&self) -> u32 {
    self.side
  }

  pub fn pixels(&self) -> &[u8] {
    &self.pixels
  }

  #[cfg(test)]
  pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
    if x >= self.side || y >= self.side {
      return None;
    }
    Some(self.pixels[x as usize + y as usize * self.side as usize])
  }

  // half-open, clamped to the canvas
  fn fill(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, idx: u8) {
    let side = self.side as i64;
    let (x0, x1) = (x0.clamp(0, side), x1.clamp(0, side));
    let (y0, y1) = (y0.clamp(0, side), y1.clamp(0, side));
    for y in y0..y1 {
      let row = (y * side) as usize;
      self.pixels[row + x0 as usize..row + x1 as usize].fill(idx);
    }
  }

  /// Paints one square, rows counting up from the bottom edge.
  pub fn draw_square(&mut self, placement: &Placement, fill_idx: u8, border_width: u32) {
    let cell = self.cell_size as i64;
    let top_unit = self.extent as i64 + MARGIN as i64;
    let (size, row, column) = (placement.size as i64, placement.row as i64, placement.column as i64);

    let left = (column + MARGIN as i64) * cell;
    let right = (column + size + MARGIN as i64) * cell;
    let top = (top_unit - row - size) * cell;
    let bottom = (top_unit - row) * cell;
    self.fill(left, top, right, bottom, fill_idx);

    if border_width == 0 {
      return;
    }
    // band centred on each edge
    let inner = border_width as i64 / 2;
    let outer = border_width as i64 - inner;
    self.fill(left - inner, top - inner, right + outer, top + outer, BORDER);
    self.fill(left - inner, bottom - inner, right + outer, bottom + outer, BORDER);
    self.fill(left - inner, top - inner, left + outer, bottom + outer, BORDER);
    self.fill(right - inner, top - inner, right + outer, bottom + outer, BORDER);
  }
}

/// Fill index of a square's color in the PNG palette.
pub fn fill_index(config: &RenderConfig, size: u32) -> u8 {
  FILL_BASE + config.palette.slot(size) as u8
}

/// Draws a solution in log order onto a fresh canvas sized for `extent`.
pub fn render_solution(extent: u32, solution: &Solution, config: &RenderConfig) -> Result<Canvas, RenderError> {
  let mut canvas = Canvas::new(extent, config.cell_size)?;
  for placement in solution.iter() {
    debug!("{} {} {}", placement.size, placement.row, placement.column);
    canvas.draw_square(placement, fill_index(config, placement.size), config.border_width);
  }
  Ok(canvas)
}

/// Renders a solution straight to PNG bytes.
pub fn render_png(extent: u32, solution: &Solution, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
  let canvas = render_solution(extent, solution, config)?;
  let mut imgdata: Vec<u8> = Vec::with_capacity(INITIAL_IMAGE_SIZE);
  write_image(&canvas, config, &mut imgdata)?;
  Ok(imgdata)
}

/// Renders a solution as PNG into any writer.
pub fn render_to<W: Write>(extent: u32, solution: &Solution, config: &RenderConfig, w: W) -> Result<(), RenderError> {
  let canvas = render_solution(extent, solution, config)?;
  write_image(&canvas, config, w)
}
