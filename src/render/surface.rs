/// Opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        ratatui::style::Color::Rgb(r, g, b)
    }
}

impl From<Rgb> for image::Rgba<u8> {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        image::Rgba([r, g, b, 0xff])
    }
}

/// A square 2D drawing target addressed in logical raster units, origin at
/// the top-left corner and y growing downward.
pub trait Surface {
    /// Side length in logical units
    fn size(&self) -> f64;

    /// Fill the whole surface
    fn clear(&mut self, color: Rgb);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb);

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Rgb);
}

/// Whether the point (px, py) lies inside the circle
pub fn in_circle(px: f64, py: f64, cx: f64, cy: f64, radius: f64) -> bool {
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// Whether the point (px, py) lies inside the rectangle with rounded corners
pub fn in_rounded_rect(px: f64, py: f64, x: f64, y: f64, w: f64, h: f64, radius: f64) -> bool {
    if px < x || py < y || px > x + w || py > y + h {
        return false;
    }
    let radius = radius.clamp(0.0, w.min(h) / 2.0);
    // Distance to the inner rectangle the corners are rounded around
    let nearest_x = px.clamp(x + radius, x + w - radius);
    let nearest_y = py.clamp(y + radius, y + h - radius);
    in_circle(px, py, nearest_x, nearest_y, radius)
}
