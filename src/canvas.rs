//! Drawing surface abstraction and the software rasterizer behind it.
//!
//! The engine only ever talks to the [`Canvas`] trait: clear, filled
//! circles, stroked lines. [`PixelCanvas`] implements it over a plain
//! `u32` framebuffer that the windowed animator hands to `pixels` and the
//! headless demo hands to `image`.

use glam::Vec2;

// ============================================================================
// Color
// ============================================================================

/// An 8-bit RGBA color.
///
/// Packed into the framebuffer with red in the low byte, so a cast to bytes
/// yields the R, G, B, A order the presenter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha set from a 0.0..=1.0 fraction.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0) as u8,
            ..self
        }
    }

    #[inline]
    pub fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    #[inline]
    pub fn from_u32(packed: u32) -> Self {
        Self {
            r: packed as u8,
            g: (packed >> 8) as u8,
            b: (packed >> 16) as u8,
            a: (packed >> 24) as u8,
        }
    }
}

// ============================================================================
// Canvas trait
// ============================================================================

/// Immediate-mode drawing surface the field renders into.
///
/// Coordinates are absolute surface pixels with the origin at the top-left.
/// Primitives clip themselves; out-of-bounds geometry is safe.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Fill a circle of `radius` pixels centered at `center`, blending by
    /// the color's alpha.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a line from `from` to `to`. Widths at or below one pixel
    /// render as a thinner-looking (fainter) single-pixel line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

// ============================================================================
// PixelCanvas
// ============================================================================

/// CPU framebuffer implementing [`Canvas`].
///
/// Stores one `u32` per pixel (see [`Rgba::to_u32`]) and blends primitives
/// source-over, which matches how a 2D canvas context composites strokes
/// onto an opaque background.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "canvas dimensions must be nonzero");
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    /// Reallocate for new dimensions. Contents become undefined until the
    /// next clear.
    pub fn resize(&mut self, width: u32, height: u32) {
        assert!(width > 0 && height > 0, "canvas dimensions must be nonzero");
        self.width = width;
        self.height = height;
        self.pixels.resize((width * height) as usize, 0);
    }

    /// Raw packed pixels, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.pixels
    }

    /// Framebuffer as RGBA bytes, ready for a presenter or an image encoder.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        Rgba::from_u32(self.pixels[(y * self.width + x) as usize])
    }

    /// Blend one pixel source-over. `alpha` multiplies the color's own
    /// alpha channel.
    fn plot(&mut self, x: i32, y: i32, color: Rgba, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = (color.a as f32 / 255.0) * alpha;
        if a <= 0.0 {
            return;
        }
        let index = (y as u32 * self.width + x as u32) as usize;
        let dst = Rgba::from_u32(self.pixels[index]);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        let out = Rgba::new(
            mix(color.r, dst.r),
            mix(color.g, dst.g),
            mix(color.b, dst.b),
            dst.a.max((a * 255.0) as u8),
        );
        self.pixels[index] = out.to_u32();
    }
}

impl Canvas for PixelCanvas {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color.to_u32());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let min_x = (center.x - radius - 1.0).floor() as i32;
        let max_x = (center.x + radius + 1.0).ceil() as i32;
        let min_y = (center.y - radius - 1.0).floor() as i32;
        let max_y = (center.y + radius + 1.0).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let dist = Vec2::new(px - center.x, py - center.y).length();
                // Soft one-pixel edge; keeps sub-pixel dots visible.
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.plot(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if width <= 0.0 {
            return;
        }
        // Sub-pixel widths thin the stroke by fading it.
        let alpha = width.min(1.0);
        let brush = (width.round() as i32).max(1);
        let half = brush / 2;

        // Bresenham over the pixel grid.
        let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if brush == 1 {
                self.plot(x0, y0, color, alpha);
            } else {
                for by in -half..=half {
                    for bx in -half..=half {
                        self.plot(x0 + bx, y0 + by, color, alpha);
                    }
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba = Rgba::new(32, 33, 36, 255);
    const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    #[test]
    fn pack_unpack_round_trips() {
        let color = Rgba::new(12, 34, 56, 78);
        assert_eq!(Rgba::from_u32(color.to_u32()), color);
    }

    #[test]
    fn packed_bytes_are_rgba_order() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.clear(Rgba::new(10, 20, 30, 40));
        assert_eq!(canvas.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut canvas = PixelCanvas::new(4, 3);
        canvas.clear(WHITE);
        assert!(canvas.data().iter().all(|&p| p == WHITE.to_u32()));
    }

    #[test]
    fn circle_paints_its_center() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.clear(WHITE);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, INK);
        assert_eq!(canvas.pixel(10, 10), INK);
    }

    #[test]
    fn tiny_circle_still_marks_a_pixel() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.clear(WHITE);
        canvas.fill_circle(Vec2::new(5.5, 5.5), 0.4, INK);
        let touched = canvas.data().iter().any(|&p| p != WHITE.to_u32());
        assert!(touched);
    }

    #[test]
    fn offscreen_circle_does_not_panic() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.clear(WHITE);
        canvas.fill_circle(Vec2::new(-50.0, 200.0), 5.0, INK);
        canvas.fill_circle(Vec2::new(9.5, 0.5), 4.0, INK); // clipped at edge
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = PixelCanvas::new(16, 16);
        canvas.clear(WHITE);
        canvas.stroke_line(Vec2::new(2.0, 2.0), Vec2::new(12.0, 9.0), 1.0, INK);
        assert_eq!(canvas.pixel(2, 2), INK);
        assert_eq!(canvas.pixel(12, 9), INK);
    }

    #[test]
    fn zero_length_line_marks_one_pixel() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.clear(WHITE);
        canvas.stroke_line(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0), 1.0, INK);
        assert_eq!(canvas.pixel(4, 4), INK);
        let marked = canvas
            .data()
            .iter()
            .filter(|&&p| p != WHITE.to_u32())
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn sub_pixel_width_renders_fainter() {
        let mut full = PixelCanvas::new(8, 8);
        full.clear(WHITE);
        full.stroke_line(Vec2::new(1.0, 4.0), Vec2::new(6.0, 4.0), 1.0, INK);

        let mut thin = PixelCanvas::new(8, 8);
        thin.clear(WHITE);
        thin.stroke_line(Vec2::new(1.0, 4.0), Vec2::new(6.0, 4.0), 0.4, INK);

        // Fainter means closer to the white background.
        assert!(thin.pixel(3, 4).r > full.pixel(3, 4).r);
    }

    #[test]
    fn blend_half_alpha_over_white() {
        let mut canvas = PixelCanvas::new(1, 1);
        canvas.clear(WHITE);
        canvas.stroke_line(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            1.0,
            Rgba::new(0, 0, 0, 255).with_alpha(0.5),
        );
        let out = canvas.pixel(0, 0);
        assert!((out.r as i32 - 128).abs() <= 2);
    }

    #[test]
    fn resize_changes_dimensions() {
        let mut canvas = PixelCanvas::new(8, 6);
        canvas.resize(3, 2);
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.data().len(), 6);
    }
}
