//! Pixel and legend grids.
//!
//! The canvas holds a premultiplied-RGBA pixel grid at double vertical
//! resolution (two pixel rows per terminal row) plus a parallel grid of
//! legend override characters, one byte per character cell (0 = no
//! override). Both are reallocated on every terminal resize; the bottom
//! terminal row is reserved for the status line.

/// Premultiplied RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black; the blank canvas value.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from channel values.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

/// Pixel grid plus legend overlay for one terminal geometry.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
    legend: Vec<u8>,
}

impl Canvas {
    /// Allocate a canvas for a terminal of `cols` x `rows` cells.
    ///
    /// Pixel height is twice the cell height minus the reserved status
    /// row. The decorative border gradient is drawn immediately; the
    /// interior starts transparent.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        let width = cols as usize;
        let height = 2 * (rows.max(1) as usize - 1).max(1);
        let mut canvas = Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
            legend: vec![0u8; width * (height / 2)],
        };
        canvas.draw_border();
        canvas
    }

    /// Pixel grid width (terminal columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Pixel grid height (twice the plot rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`; row 0 is the top.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x] = color;
    }

    /// Legend override for the character cell at `(x, row)`, 0 = none.
    #[must_use]
    pub fn legend_at(&self, x: usize, row: usize) -> u8 {
        debug_assert!(x < self.width && row < self.height / 2);
        self.legend[row * self.width + x]
    }

    /// Stamp ASCII label text into the legend grid at a character cell,
    /// truncated at the right edge.
    pub fn stamp_legend(&mut self, x: usize, row: usize, text: &str) {
        if row >= self.height / 2 {
            return;
        }
        for (i, byte) in text.bytes().enumerate() {
            let col = x + i;
            if col >= self.width {
                break;
            }
            self.legend[row * self.width + col] = byte;
        }
    }

    /// One-pixel decorative frame with a vertical blue-green gradient.
    ///
    /// Data-independent, so it is drawn once per (re)allocation and the
    /// rasterizer leaves the edge rows and columns alone.
    fn draw_border(&mut self) {
        for y in 0..self.height {
            let b = (0x80 + (y / 2) * 0xff / self.height).min(0xff);
            let g = 0xff - b;
            let color = Rgba::opaque(0, g as u8, b as u8);
            for x in 0..self.width {
                let on_edge = x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1;
                if on_edge {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}
