// Player and obstacle kinematics.

use rand::Rng;

use crate::config::GameConfig;
use crate::game::input::HeldKeys;
use crate::types::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
}

impl Player {
    /// Player at its starting spot: fixed x, vertically centered.
    pub fn spawn(config: &GameConfig, canvas_height: f32) -> Self {
        let rect = Rect::new(
            config.player_start_x,
            canvas_height / 2.0 - config.player_height / 2.0,
            config.player_width,
            config.player_height,
        );
        Self { rect, speed: config.player_speed }
    }

    /// Move by the held arrows for `dt` seconds, then clamp to the playfield.
    pub fn steer(&mut self, keys: &HeldKeys, dt: f32, canvas_width: f32, canvas_height: f32) {
        let (ax, ay) = keys.axes();
        self.rect.x += ax * self.speed * dt;
        self.rect.y += ay * self.speed * dt;

        let r = &mut self.rect;
        if r.y < 0.0 { r.y = 0.0; }
        if r.y + r.height > canvas_height { r.y = canvas_height - r.height; }
        if r.x < 0.0 { r.x = 0.0; }
        if r.x + r.width > canvas_width { r.x = canvas_width - r.width; }
    }

    pub fn hitbox(&self, inset: f32) -> Rect {
        self.rect.inset(inset, inset)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub speed: f32,         // leftward, px/s
    pub angle: f32,         // radians
    pub angular_speed: f32, // radians/s
    pub sprite: usize,      // index into the obstacle sprite set
}

impl Obstacle {
    /// A fresh obstacle just past the right edge with randomized size,
    /// lane, speed, spin and sprite.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        config: &GameConfig,
        canvas_width: f32,
        canvas_height: f32,
        sprite_count: usize,
    ) -> Self {
        let sprite = if sprite_count == 0 { 0 } else { rng.gen_range(0..sprite_count) };
        let (min_size, max_size) = config.obstacle_size;
        let size = rng.gen_range(min_size..=max_size);
        let y = rng.gen_range(0.0..=(canvas_height - size).max(0.0));
        let (min_speed, max_speed) = config.obstacle_speed;
        let speed = rng.gen_range(min_speed..=max_speed);
        let spin = config.obstacle_spin_deg;
        let angular_speed = rng.gen_range(-spin..=spin).to_radians();
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);

        Self {
            rect: Rect::new(canvas_width + config.spawn_offset, y, size, size),
            speed,
            angle,
            angular_speed,
            sprite,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.x -= self.speed * dt;
        self.angle += self.angular_speed * dt;
    }

    /// Still on (or near) screen: right edge beyond `-margin`.
    pub fn is_visible(&self, margin: f32) -> bool {
        self.rect.x + self.rect.width > -margin
    }

    pub fn hitbox(&self, inset: f32) -> Rect {
        self.rect.inset(inset, inset)
    }
}
