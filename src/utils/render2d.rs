use crate::core::RenderFrame;

/// RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0, 255);
pub const WHITE: Color = Color(255, 255, 255, 255);
pub const GRAY: Color = Color(120, 120, 120, 255);
pub const LIGHT_GRAY: Color = Color(225, 225, 225, 255);
pub const GREEN: Color = Color(0, 200, 0, 255);
pub const BLUE: Color = Color(0, 120, 255, 255);
pub const RED: Color = Color(220, 20, 60, 255);

/// Palette for shape symbols `'0'..='9'`.
pub const SHAPE_COLORS: [Color; 10] = [
    Color(128, 0, 128, 255),
    Color(255, 165, 0, 255),
    Color(0, 170, 170, 255),
    Color(220, 20, 60, 255),
    Color(139, 69, 19, 255),
    Color(255, 105, 180, 255),
    Color(85, 107, 47, 255),
    Color(70, 70, 200, 255),
    Color(200, 200, 0, 255),
    Color(0, 0, 0, 255),
];

/// A minimal RGBA software canvas addressed in square tiles.
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Side of one grid tile, in pixels.
    pub tile: u32,
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// Canvas for a `rows` x `cols` grid of `tile`-pixel cells.
    pub fn for_grid(rows: usize, cols: usize, tile: u32) -> Self {
        let tile = tile.max(1);
        let width = cols as u32 * tile;
        let height = rows as u32 * tile;
        Self { width, height, tile, pixels: vec![0; (width * height * 4) as usize] }
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.0, color.1, color.2, color.3]);
        }
    }

    /// Fill the pixel rectangle `[x, x + w) x [y, y + h)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for yy in y.min(y1)..y1 {
            for xx in x.min(x1)..x1 {
                let idx = ((yy * self.width + xx) * 4) as usize;
                self.pixels[idx..idx + 4].copy_from_slice(&[color.0, color.1, color.2, color.3]);
            }
        }
    }

    /// Fill grid cell `(row, col)`, leaving an `inset`-pixel border on each side.
    pub fn fill_tile(&mut self, (row, col): (usize, usize), inset: u32, color: Color) {
        let inset = inset.min(self.tile / 2);
        let side = self.tile - 2 * inset;
        let x = col as u32 * self.tile + inset;
        let y = row as u32 * self.tile + inset;
        self.fill_rect(x, y, side, side, color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[idx..idx + 4];
        Some(Color(p[0], p[1], p[2], p[3]))
    }

    pub fn into_render_frame(self) -> RenderFrame {
        RenderFrame::Pixels { width: self.width, height: self.height, data: self.pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_are_clipped_and_inset() {
        let mut c = Canvas::for_grid(2, 3, 4);
        assert_eq!((c.width, c.height), (12, 8));
        c.clear(WHITE);
        c.fill_tile((1, 2), 1, RED);
        assert_eq!(c.pixel(8, 4), Some(WHITE));
        assert_eq!(c.pixel(9, 5), Some(RED));
        assert_eq!(c.pixel(10, 6), Some(RED));
        assert_eq!(c.pixel(11, 7), Some(WHITE));
        assert_eq!(c.pixel(12, 0), None);
        c.fill_rect(10, 6, 100, 100, BLACK);
        assert_eq!(c.pixel(11, 7), Some(BLACK));
    }
}
