use std::io::Write;

use crate::config::RenderConfig;
use crate::render::{Canvas, RenderError};

/// PNG palette laid out as background, border, then one entry per palette slot.
pub fn palette_bytes(config: &RenderConfig) -> Vec<u8> {
  // slot n holds the color of squares with `size % len == n`
  let fills = (0..config.palette.len()).map(|slot| config.palette.color_for(slot as u32));
  [config.background, config.border_color].into_iter()
    .chain(fills)
    .flat_map(|c| c.bytes())
    .collect()
}


pub fn write_image<W: Write>(canvas: &Canvas, config: &RenderConfig, w: W) -> Result<(), RenderError> {
  let mut encoder = png::Encoder::new(w, canvas.side(), canvas.side());
  encoder.set_color(png::ColorType::Indexed);
  encoder.set_depth(png::BitDepth::Eight);
  encoder.set_palette(palette_bytes(config));
  let mut writer = encoder.write_header()?;
  writer.write_image_data(canvas.pixels())?;
  writer.finish()?;
  Ok(())
}
