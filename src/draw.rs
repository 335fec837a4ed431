// Window + software drawing utilities.
// Both widgets render into a FrameBuffer with the helpers below and hand the
// finished frame to `Drawer::present`.
// 1) A resizable window that reports key edges (arrows, Enter/Space, Esc).
// 2) Alpha-blended rectangles, outlines and a dashed ellipse.
// 3) Scaled and rotated sprite blits from RGBA images.
// 4) A 5x7 bitmap font, integer-scaled, with alignment and outline.

use crate::error::Error;
use crate::types::{FrameBuffer, Rect, Rgba};
use image::RgbaImage;
use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Create a resizable window. The framebuffer is stretched to fit, keeping aspect.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: this is the moment the window actually changes.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Enter or Space, edge-triggered.
    pub fn confirm_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Enter, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    /// Keys that went down since the last update.
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }

    /// Every key held right now, edges or not.
    pub fn keys_down(&self) -> Vec<Key> {
        self.window.get_keys()
    }

    /// Keys that went up since the last update.
    pub fn keys_released(&self) -> Vec<Key> {
        self.window.get_keys_released()
    }

    /// Inner size of the window in pixels; the game treats this as its container.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

/* ---------- Pixels, blending, shapes ---------- */

/// Source-over blend of a straight-alpha color onto one pixel.
#[inline]
pub fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba) {
    if color.a <= 0.0 || x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    if color.a >= 1.0 {
        fb.pixels[idx] = color.packed();
        return;
    }
    fb.pixels[idx] = mix(fb.pixels[idx], color.r, color.g, color.b, color.a);
}

#[inline]
fn mix(dst: u32, r: u8, g: u8, b: u8, a: f32) -> u32 {
    let inv = 1.0 - a;
    let dr = ((dst >> 16) & 0xFF) as f32;
    let dg = ((dst >> 8) & 0xFF) as f32;
    let db = (dst & 0xFF) as f32;
    let nr = (r as f32 * a + dr * inv).round() as u32;
    let ng = (g as f32 * a + dg * inv).round() as u32;
    let nb = (b as f32 * a + db * inv).round() as u32;
    (nr.min(255) << 16) | (ng.min(255) << 8) | nb.min(255)
}

/// Pixel span covered by [start, start+len), clipped to [0, limit).
fn span(start: f32, len: f32, limit: usize) -> (i32, i32) {
    let lo = start.round().max(0.0) as i32;
    let hi = (start + len).round().min(limit as f32) as i32;
    (lo, hi)
}

/// Fill a rectangle, blending when the color is translucent.
/// Visual: HUD bars, the end-screen dimmer, square stars.
pub fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: Rgba) {
    let (x0, x1) = span(rect.x, rect.width, fb.width);
    let (y0, y1) = span(rect.y, rect.height, fb.height);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(fb, x, y, color);
        }
    }
}

/// Outline a rectangle with a border of `thickness` pixels centered on its edge.
pub fn stroke_rect(fb: &mut FrameBuffer, rect: Rect, thickness: f32, color: Rgba) {
    let half = thickness / 2.0;
    let Rect { x, y, width, height } = rect;
    fill_rect(fb, Rect::new(x - half, y - half, width + thickness, thickness), color);
    fill_rect(fb, Rect::new(x - half, y + height - half, width + thickness, thickness), color);
    fill_rect(fb, Rect::new(x - half, y + half, thickness, height - thickness), color);
    fill_rect(fb, Rect::new(x + width - half, y + half, thickness, height - thickness), color);
}

/// Dashed ellipse outline: dots of `thickness` px stamped along the perimeter,
/// alternating on/off every `dash` px of arc length.
/// Visual: the face-alignment oval in the capture preview.
pub fn stroke_ellipse_dashed(
    fb: &mut FrameBuffer,
    cx: f32, cy: f32,
    rx: f32, ry: f32,
    thickness: f32,
    dash: f32,
    color: Rgba,
) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    // Ramanujan's perimeter approximation
    let h = ((rx - ry) / (rx + ry)).powi(2);
    let perimeter = std::f32::consts::PI * (rx + ry) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
    let steps = perimeter.ceil().max(8.0) as usize;
    let half = thickness / 2.0;
    let mut last = (i32::MIN, i32::MIN);
    for i in 0..steps {
        let arc = perimeter * i as f32 / steps as f32;
        if ((arc / dash) as usize) % 2 == 1 {
            continue;
        }
        let t = std::f32::consts::TAU * i as f32 / steps as f32;
        let px = cx + rx * t.cos();
        let py = cy + ry * t.sin();
        let key = (px.round() as i32, py.round() as i32);
        if key == last {
            continue;
        }
        last = key;
        fill_rect(fb, Rect::new(px - half, py - half, thickness, thickness), color);
    }
}

/* ---------- Sprites ---------- */

/// Sample the source texel for normalized coordinates (u,v) in [0,1).
#[inline]
fn sample(img: &RgbaImage, u: f32, v: f32) -> Option<[u8; 4]> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }
    let sx = ((u * w as f32) as u32).min(w - 1);
    let sy = ((v * h as f32) as u32).min(h - 1);
    Some(img.get_pixel(sx, sy).0)
}

#[inline]
fn blend_texel(fb: &mut FrameBuffer, x: i32, y: i32, texel: [u8; 4]) {
    let [r, g, b, a] = texel;
    blend_pixel(fb, x, y, Rgba::rgba(r, g, b, a as f32 / 255.0));
}

/// Draw `img` stretched into `dst` (nearest-neighbour, alpha-blended).
/// Visual: astronaut and station; transparent sprite pixels leave the stars showing.
pub fn blit_scaled(fb: &mut FrameBuffer, img: &RgbaImage, dst: Rect) {
    if dst.width <= 0.0 || dst.height <= 0.0 {
        return;
    }
    let (x0, x1) = span(dst.x, dst.width, fb.width);
    let (y0, y1) = span(dst.y, dst.height, fb.height);
    for y in y0..y1 {
        let v = (y as f32 + 0.5 - dst.y) / dst.height;
        for x in x0..x1 {
            let u = (x as f32 + 0.5 - dst.x) / dst.width;
            if let Some(texel) = sample(img, u, v) {
                blend_texel(fb, x, y, texel);
            }
        }
    }
}

/// Draw `img` sized to `dst`, rotated by `angle` radians (clockwise on screen)
/// about the center of `dst`.
/// Visual: tumbling debris.
pub fn blit_rotated(fb: &mut FrameBuffer, img: &RgbaImage, dst: Rect, angle: f32) {
    if dst.width <= 0.0 || dst.height <= 0.0 {
        return;
    }
    let (cx, cy) = dst.center();
    let (sin, cos) = angle.sin_cos();
    // Bounding circle of the rotated rectangle
    let reach = (dst.width * dst.width + dst.height * dst.height).sqrt() / 2.0;
    let (x0, x1) = span(cx - reach, reach * 2.0, fb.width);
    let (y0, y1) = span(cy - reach, reach * 2.0, fb.height);
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - cy;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            // Undo the rotation to land in sprite-local space
            let lx = cos * dx + sin * dy;
            let ly = -sin * dx + cos * dy;
            let u = (lx + dst.width / 2.0) / dst.width;
            let v = (ly + dst.height / 2.0) / dst.height;
            if let Some(texel) = sample(img, u, v) {
                blend_texel(fb, x, y, texel);
            }
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters map to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '[' => g!(0b01110,0b01000,0b01000,0b01000,0b01000,0b01000,0b01110),
        ']' => g!(0b01110,0b00010,0b00010,0b00010,0b00010,0b00010,0b01110),

        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

/// How a string is laid out around its anchor point.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub px: u32,                        // cap height in pixels (rounded to a multiple of 7)
    pub color: Rgba,
    pub align: Align,
    pub baseline: Baseline,
    pub outline: Option<(Rgba, i32)>,   // color + thickness in pixels
}

impl TextStyle {
    pub fn new(px: u32, color: Rgba) -> Self {
        Self { px, color, align: Align::Left, baseline: Baseline::Top, outline: None }
    }

    pub fn align(mut self, align: Align, baseline: Baseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    pub fn outline(mut self, color: Rgba, thickness: i32) -> Self {
        self.outline = Some((color, thickness));
        self
    }

    fn scale(&self) -> i32 {
        ((self.px as f32 / 7.0).round() as i32).max(1)
    }
}

/// Width in pixels of `text` rendered with `style` (no trailing spacing).
pub fn measure_text(text: &str, style: &TextStyle) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    style.scale() * (n * 6 - 1)
}

fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: Rgba) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i32 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    blend_pixel(fb, px + sx, py + sy, color);
                }
            }
        }
    }
}

fn draw_run(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: Rgba) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Draw `text` anchored at (x,y) according to the style's alignment.
pub fn draw_text(fb: &mut FrameBuffer, x: f32, y: f32, text: &str, style: &TextStyle) {
    let scale = style.scale();
    let width = measure_text(text, style);
    let height = 7 * scale;
    let left = match style.align {
        Align::Left => x.round() as i32,
        Align::Center => x.round() as i32 - width / 2,
        Align::Right => x.round() as i32 - width,
    };
    let top = match style.baseline {
        Baseline::Top => y.round() as i32,
        Baseline::Middle => y.round() as i32 - height / 2,
        Baseline::Bottom => y.round() as i32 - height,
    };

    // Outline first, then the fill on top: a dark halo around the letters.
    if let Some((outline, t)) = style.outline {
        for oy in -t..=t {
            for ox in -t..=t {
                if ox == 0 && oy == 0 {
                    continue;
                }
                draw_run(fb, left + ox, top + oy, text, scale, outline);
            }
        }
    }
    draw_run(fb, left, top, text, scale, style.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as Px;

    #[test]
    fn blend_half_white_over_black_is_mid_gray() {
        let mut fb = FrameBuffer::new(1, 1);
        blend_pixel(&mut fb, 0, 0, Rgba::rgba(255, 255, 255, 0.5));
        assert_eq!(fb.pixels[0], 0x0080_8080);
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut fb = FrameBuffer::new(4, 4);
        fill_rect(&mut fb, Rect::new(-10.0, 2.0, 100.0, 100.0), Rgba::rgb(255, 0, 0));
        assert_eq!(fb.get(0, 1), Some(0));
        assert_eq!(fb.get(3, 3), Some(0x00FF_0000));
    }

    #[test]
    fn transparent_texels_leave_background() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Px([0, 255, 0, 255]));
        img.put_pixel(1, 0, Px([0, 0, 255, 0]));
        let mut fb = FrameBuffer::new(4, 2);
        blit_scaled(&mut fb, &img, Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(fb.get(0, 0), Some(0x0000_FF00));
        assert_eq!(fb.get(3, 1), Some(0));
    }

    #[test]
    fn half_turn_rotation_mirrors_sprite() {
        let mut img = RgbaImage::from_pixel(2, 2, Px([0, 0, 0, 255]));
        img.put_pixel(0, 0, Px([255, 255, 255, 255]));
        let mut fb = FrameBuffer::new(2, 2);
        blit_rotated(&mut fb, &img, Rect::new(0.0, 0.0, 2.0, 2.0), std::f32::consts::PI);
        assert_eq!(fb.get(1, 1), Some(0x00FF_FFFF));
        assert_eq!(fb.get(0, 0), Some(0));
    }

    #[test]
    fn centered_text_is_balanced() {
        let style = TextStyle::new(14, Rgba::rgb(255, 255, 255)).align(Align::Center, Baseline::Middle);
        assert_eq!(measure_text("AB", &style), 2 * 11);
        let mut fb = FrameBuffer::new(40, 20);
        draw_text(&mut fb, 20.0, 10.0, "I", &style);
        // 'I' has its stem in the middle column; it must land on the anchor column.
        assert_eq!(fb.get(20, 10), Some(0x00FF_FFFF));
    }
}
