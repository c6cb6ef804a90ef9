//! PNG snapshots of the grid

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use sandfall_core::{Grid, GridView, WorldRng};

/// Color behind empty cells (#1a1a2e)
pub const BACKGROUND: [u8; 4] = [0x1a, 0x1a, 0x2e, 0xff];

/// Draw every cell as a `pixel_size` square in its own color
pub fn render(view: GridView<'_>, pixel_size: u32) -> RgbaImage {
    let scale = pixel_size.max(1);
    let mut image = RgbaImage::from_pixel(
        view.width() as u32 * scale,
        view.height() as u32 * scale,
        Rgba(BACKGROUND),
    );

    for (x, y, cell) in view.iter() {
        let (left, top) = (x as u32 * scale, y as u32 * scale);
        for dy in 0..scale {
            for dx in 0..scale {
                image.put_pixel(left + dx, top + dy, Rgba(cell.color));
            }
        }
    }

    image
}

/// Render `grid` at its pixel scale and write it to `path`
pub fn save<R: WorldRng>(grid: &Grid<R>, path: &Path) -> Result<()> {
    let image = render(grid.view(), grid.pixel_size());
    image
        .save(path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;

    log::info!(
        "Snapshot saved to {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}
