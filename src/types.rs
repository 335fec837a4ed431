// Core types shared by the capture widget and the game.

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reallocate to a new size; contents become black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    #[inline]
    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Shrink by a fraction of width/height on *each* side, keeping the center.
    pub fn inset(&self, frac_x: f32, frac_y: f32) -> Self {
        let px = self.width * frac_x;
        let py = self.height * frac_y;
        Self {
            x: self.x + px,
            y: self.y + py,
            width: self.width - px * 2.0,
            height: self.height - py * 2.0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// AABB overlap. Rectangles that merely touch count as overlapping;
    /// only strict separation on some axis is a miss.
    pub fn collides(&self, other: &Rect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }
}

/// Straight-alpha RGBA color used by the software painter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32, // 0..1
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn packed(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_rects_never_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(!a.collides(&b));
        assert!(!b.collides(&a));
    }

    #[test]
    fn identical_rects_collide() {
        let a = Rect::new(3.5, -2.0, 7.0, 9.0);
        assert!(a.collides(&a));
    }

    #[test]
    fn touching_edges_count_as_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.collides(&b));
        let c = Rect::new(10.01, 0.0, 10.0, 10.0);
        assert!(!a.collides(&c));
    }

    #[test]
    fn collision_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(-20.0, 3.0, 4.0, 40.0),
            Rect::new(9.0, -9.0, 1.0, 1.0),
            Rect::new(100.0, 100.0, 0.0, 0.0),
            Rect::new(2.0, 2.0, 1.0, 1.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.collides(b), b.collides(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn inset_keeps_center() {
        let r = Rect::new(50.0, 100.0, 60.0, 85.0);
        let hit = r.inset(0.1, 0.1);
        assert!((hit.width - 48.0).abs() < 1e-4);
        assert!((hit.height - 68.0).abs() < 1e-4);
        let (cx, cy) = r.center();
        let (hx, hy) = hit.center();
        assert!((cx - hx).abs() < 1e-4 && (cy - hy).abs() < 1e-4);
    }
}
