use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

use super::surface::{Rgb, Surface, in_circle, in_rounded_rect};

/// Pixel-exact surface backed by an RGBA image, one pixel per logical unit.
///
/// A pixel is covered by a shape when its center lies inside the shape, so
/// output depends only on the drawing calls.
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Rgb(r, g, b)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn fill_where(
        &mut self,
        (x0, y0, x1, y1): (f64, f64, f64, f64),
        color: Rgb,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        let (width, height) = self.image.dimensions();
        let clamp_x = |v: f64| (v.max(0.0) as u32).min(width);
        let clamp_y = |v: f64| (v.max(0.0) as u32).min(height);
        let pixel = image::Rgba::from(color);

        for py in clamp_y(y0.floor())..clamp_y(y1.ceil()) {
            for px in clamp_x(x0.floor())..clamp_x(x1.ceil()) {
                if inside(px as f64 + 0.5, py as f64 + 0.5) {
                    self.image.put_pixel(px, py, pixel);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> f64 {
        self.image.width() as f64
    }

    fn clear(&mut self, color: Rgb) {
        let pixel = image::Rgba::from(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        let bounds = (cx - radius, cy - radius, cx + radius, cy + radius);
        self.fill_where(bounds, color, |px, py| in_circle(px, py, cx, cy, radius));
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb) {
        self.fill_where((x, y, x + w, y + h), color, |px, py| {
            in_rounded_rect(px, py, x, y, w, h, radius)
        });
    }
}
