//! Monochrome framebuffer and the display hints passed through to hosts.

/// Canonical framebuffer width in pixels.
pub const SCREEN_WIDTH: usize = 64;
/// Canonical framebuffer height in pixels.
pub const SCREEN_HEIGHT: usize = 32;
/// Width in pixels of one sprite row.
pub const SPRITE_WIDTH: usize = 8;

/// Boolean pixel grid, row-major (`index = y * width + x`).
///
/// Sprites are XOR-composited. A pixel outside the grid wraps onto the
/// linear buffer: the target index is reduced modulo `width * height`, so a
/// sprite running off the right edge continues on the next row and one
/// running off the bottom continues at the top. There is no per-axis clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Framebuffer {
    /// Allocates a cleared buffer. Zero dimensions are raised to one pixel.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.pixels.chunks(self.width)
    }

    /// Reads the pixel at `(x, y)`; coordinates outside the grid read as unset.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x]
    }

    /// Number of set pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Unsets every pixel.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// XORs an 8-pixel-wide sprite onto the buffer with its top-left at `(x, y)`.
    ///
    /// Each byte of `rows` is one row, most significant bit leftmost. Returns
    /// `true` when any set pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let area = self.pixels.len();
        let mut collision = false;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..SPRITE_WIDTH {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let index = (usize::from(x) + col + (usize::from(y) + row) * self.width) % area;
                let pixel = &mut self.pixels[index];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }
}

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Builds a colour from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Presentation hints stored for the host and never interpreted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisplayConfig {
    /// Logical width the host should present.
    pub width: u32,
    /// Logical height the host should present.
    pub height: u32,
    /// Colour for set pixels.
    pub foreground: Rgba,
    /// Colour for unset pixels.
    pub background: Rgba,
    /// Host pixels per framebuffer pixel.
    pub scale: u32,
}

impl Default for DisplayConfig {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH as u32,
            height: SCREEN_HEIGHT as u32,
            foreground: Rgba::new(0xFF, 0xFF, 0xFF, 0xFF),
            background: Rgba::new(0x00, 0x00, 0x00, 0x00),
            scale: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayConfig, Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn default_buffer_is_canonical_and_blank() {
        let fb = Framebuffer::default();
        assert_eq!(fb.width(), SCREEN_WIDTH);
        assert_eq!(fb.height(), SCREEN_HEIGHT);
        assert_eq!(fb.pixels().len(), 64 * 32);
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.rows().count(), SCREEN_HEIGHT);
    }

    #[test]
    fn sprite_bits_map_msb_first() {
        let mut fb = Framebuffer::default();
        let collided = fb.draw_sprite(2, 1, &[0b1000_0001]);

        assert!(!collided);
        assert!(fb.pixel(2, 1));
        assert!(!fb.pixel(3, 1));
        assert!(fb.pixel(9, 1));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn redraw_erases_and_reports_collision() {
        let mut fb = Framebuffer::default();
        assert!(!fb.draw_sprite(10, 10, &[0xF0, 0x90]));
        assert!(fb.draw_sprite(10, 10, &[0xF0, 0x90]));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn collision_is_sticky_across_rows() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(0, 0, &[0x80]);

        // Row 0 collides, row 1 does not; the flag must survive row 1.
        assert!(fb.draw_sprite(0, 0, &[0x80, 0x80]));
        assert!(!fb.pixel(0, 0));
        assert!(fb.pixel(0, 1));
    }

    #[test]
    fn right_edge_wraps_onto_next_row() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(62, 0, &[0xF0]);

        assert!(fb.pixel(62, 0));
        assert!(fb.pixel(63, 0));
        assert!(fb.pixel(0, 1));
        assert!(fb.pixel(1, 1));
        assert!(!fb.pixel(0, 0));
    }

    #[test]
    fn bottom_right_corner_wraps_to_top_left() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(63, 31, &[0xC0]);

        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 0));
    }

    #[test]
    fn coordinates_past_the_grid_reduce_modulo_area() {
        let mut fb = Framebuffer::default();
        // y = 40 is 8 rows past the bottom: index 40 * 64 + 5 wraps to row 8.
        fb.draw_sprite(5, 40, &[0x80]);
        assert!(fb.pixel(5, 8));
    }

    #[test]
    fn small_buffers_use_the_same_rule() {
        let mut fb = Framebuffer::new(4, 2);
        fb.draw_sprite(0, 0, &[0xFF]);
        assert_eq!(fb.lit_count(), 8);
        assert!(fb.draw_sprite(0, 1, &[0x80]));
    }

    #[test]
    fn clear_unsets_every_pixel() {
        let mut fb = Framebuffer::default();
        fb.draw_sprite(0, 0, &[0xFF; 15]);
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn display_hints_default_to_canonical_values() {
        let hints = DisplayConfig::default();
        assert_eq!((hints.width, hints.height, hints.scale), (64, 32, 20));
        assert_eq!(hints.foreground.r, 0xFF);
        assert_eq!(hints.background.a, 0x00);
    }
}
