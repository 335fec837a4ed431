// Twinkling starfield background.

use rand::Rng;

use crate::draw;
use crate::types::{FrameBuffer, Rect, Rgba};

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub base_alpha: f32,
    pub phase: f32,
    pub size: f32,
}

impl Star {
    /// Brightness at `ts_ms`; a pure function of time and the star's phase.
    pub fn alpha(&self, ts_ms: f64) -> f32 {
        let wave = ((ts_ms / 400.0) as f32 + self.phase).sin();
        self.base_alpha * (0.6 + 0.4 * wave)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars over a `width` x `height` canvas.
    pub fn scatter<R: Rng>(rng: &mut R, count: usize, width: f32, height: f32) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..width.max(1.0)),
                y: rng.gen_range(0.0..height.max(1.0)),
                base_alpha: rng.gen_range(0.4..1.0),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                size: if rng.gen_bool(0.1) {
                    2.5
                } else if rng.gen_bool(0.2) {
                    2.0
                } else {
                    1.0
                },
            })
            .collect();
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Clear to black, then draw every star at its current brightness.
    pub fn draw(&self, fb: &mut FrameBuffer, ts_ms: f64) {
        fb.pixels.fill(0);
        for s in &self.stars {
            let color = Rgba::rgba(255, 255, 255, s.alpha(ts_ms));
            draw::fill_rect(fb, Rect::new(s.x, s.y, s.size, s.size), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn twinkle_is_deterministic_and_bounded() {
        let star = Star { x: 0.0, y: 0.0, base_alpha: 0.8, phase: 1.3, size: 1.0 };
        for ts in [0.0, 16.7, 400.0, 12_345.6] {
            let a = star.alpha(ts);
            assert_eq!(a, star.alpha(ts));
            assert!(a >= 0.8 * 0.2 - 1e-6 && a <= 0.8 + 1e-6);
        }
    }

    #[test]
    fn scatter_stays_on_canvas() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = Starfield::scatter(&mut rng, 80, 700.0, 420.0);
        assert_eq!(field.len(), 80);
        for s in &field.stars {
            assert!(s.x < 700.0 && s.y < 420.0);
            assert!([1.0, 2.0, 2.5].contains(&s.size));
        }
    }
}
