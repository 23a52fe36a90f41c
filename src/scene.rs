//! Demonstration scene: a raster image plus gradient-filled squares drawn
//! under a grid of rotations and scales

use image::{Rgba, RgbaImage};

use crate::error::ExportError;
use crate::geometry::{Color, Point, Rect};
use crate::graphics::SvgGraphics;
use crate::paint::{ColorStop, LinearGradient, RadialGradient};

/// Size of one square in the scene
pub const TILE_SIZE: f64 = 100.0;

const SCALES: [f64; 3] = [0.8, 1.0, 1.2];
const ROTATIONS_DEG: [f64; 3] = [-45.0, 0.0, 45.0];

/// The stop ramp used by both gradients: red, green at a quarter, blue
pub fn demo_stops() -> [ColorStop; 3] {
    [
        ColorStop::new(0.0, Color::RED),
        ColorStop::new(0.25, Color::GREEN),
        ColorStop::new(1.0, Color::BLUE),
    ]
}

/// Deterministic noise image with opaque pixels
pub fn noise_image(width: u32, height: u32, seed: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let mut h = seed ^ x.wrapping_mul(0x9e37_79b9) ^ y.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 16;
        h = h.wrapping_mul(0x7feb_352d);
        h ^= h >> 15;
        let [r, g, b, _] = h.to_le_bytes();
        Rgba([r, g, b, 255])
    })
}

/// Draw one column of the scene: the image, a linear-gradient square and a
/// radial-gradient square, each rotated and scaled about the tile center.
pub fn draw_column(
    graphics: &mut SvgGraphics,
    image: &RgbaImage,
    x: f64,
    scale: f64,
    rotation_deg: f64,
) -> Result<(), ExportError> {
    let tile = Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE);
    let center = tile.center();
    let rows = [TILE_SIZE, 3.0 * TILE_SIZE, 5.0 * TILE_SIZE];

    let place = |graphics: &mut SvgGraphics, y: f64| {
        graphics.save();
        graphics.translate(x, y);
        graphics.rotate_about(rotation_deg.to_radians(), center.x, center.y);
        graphics.scale(scale, scale);
    };

    place(graphics, rows[0]);
    graphics.draw_image(image, tile.x, tile.y)?;
    graphics.restore();

    place(graphics, rows[1]);
    graphics.set_paint(LinearGradient::new(
        Point::new(tile.x, tile.y),
        Point::new(tile.right(), tile.bottom()),
        demo_stops(),
    ));
    graphics.fill(&tile.into())?;
    graphics.restore();

    place(graphics, rows[2]);
    graphics.set_paint(RadialGradient::new(center, tile.width / 2.0, demo_stops()));
    graphics.fill(&tile.into())?;
    graphics.restore();

    Ok(())
}

/// Draw the full three-column scene
pub fn draw_demo(graphics: &mut SvgGraphics, image: &RgbaImage) -> Result<(), ExportError> {
    for (i, (scale, rotation)) in SCALES.iter().zip(ROTATIONS_DEG).enumerate() {
        let x = TILE_SIZE + i as f64 * 2.0 * TILE_SIZE;
        draw_column(graphics, image, x, *scale, rotation)?;
    }
    Ok(())
}
