// Space EVA: steer the astronaut to the station before the oxygen runs out,
// dodging tumbling debris.
//
// Two clocks drive a session, both owned by the game's Scheduler:
// - a per-frame callback (re-requested every tick) for movement and drawing;
// - a 1 s interval that owns the countdown and the timeout loss.
// Input listeners, the pending frame and the interval are always released
// together by `stop`, so a restart never inherits callbacks from a previous run.

pub mod assets;
pub mod entities;
pub mod hud;
pub mod input;
pub mod stars;

use std::time::Duration;

use log::{debug, error, info, trace};
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::draw;
use crate::error::Error;
use crate::schedule::{FrameHandle, IntervalHandle, Scheduler, Tick};
use crate::types::{FrameBuffer, Rect};
use assets::{AssetPaths, SpriteLoader, Sprites};
use entities::{Obstacle, Player};
use input::{Direction, HeldKeys};
use stars::Starfield;

pub const START_ERROR: &str = "ERROR: Could not start game. See console.";

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Attract,
    Running,
    Ended(Outcome),
}

pub struct Game {
    config: GameConfig,
    paths: AssetPaths,
    loader: Box<dyn SpriteLoader>,
    sprites: Option<Sprites>,
    rng: StdRng,

    scheduler: Scheduler,
    frame: Option<FrameHandle>,
    clock: Option<IntervalHandle>,
    input_attached: bool,

    state: SessionState,
    container_width: Option<usize>,
    canvas: FrameBuffer,
    final_frame: Option<FrameBuffer>,
    stars: Starfield,

    player: Player,
    obstacles: Vec<Obstacle>,
    spawn_cooldown: f32,
    time_remaining: u32,
    started_at: Duration,
    last_frame: Option<Duration>,

    keys: HeldKeys,
    control_message: Option<&'static str>,
    status: String,
}

impl Game {
    /// A game in the attract state, sized for `container_width`.
    pub fn new(
        config: GameConfig,
        paths: AssetPaths,
        loader: Box<dyn SpriteLoader>,
        rng: StdRng,
        container_width: Option<usize>,
    ) -> Self {
        let (w, h) = config.canvas_size(container_width);
        let player = Player::spawn(&config, h as f32);
        let time_remaining = config.duration_secs;
        let mut game = Self {
            config,
            paths,
            loader,
            sprites: None,
            rng,
            scheduler: Scheduler::new(),
            frame: None,
            clock: None,
            input_attached: false,
            state: SessionState::Attract,
            container_width,
            canvas: FrameBuffer::new(w, h),
            final_frame: None,
            stars: Starfield::default(),
            player,
            obstacles: Vec::new(),
            spawn_cooldown: 0.0,
            time_remaining,
            started_at: Duration::ZERO,
            last_frame: None,
            keys: HeldKeys::default(),
            control_message: None,
            status: String::new(),
        };
        game.reseed_stars();
        game.enter_attract();
        game
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[cfg(test)]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Text for the host's status line; empty when there is nothing to say.
    pub fn status_text(&self) -> &str {
        &self.status
    }

    #[cfg(test)]
    pub fn control_message(&self) -> Option<&'static str> {
        self.control_message
    }

    /// "YOU WIN!" / "YOU DIED!" once a session has ended.
    pub fn end_text(&self) -> Option<&'static str> {
        match self.state {
            SessionState::Ended(outcome) => Some(hud::end_message(outcome)),
            _ => None,
        }
    }

    /// The window was resized; the container is the window plus its gutter.
    /// Takes effect at the next start.
    pub fn set_window_width(&mut self, width: usize) {
        self.container_width = Some(self.config.container_for_window(width));
    }

    /// Start, or restart from any state, with a full reset.
    /// On a preload failure the game stays in Attract and reports via the status text.
    pub fn start(&mut self, now: Duration) -> Result<(), Error> {
        self.stop();

        self.keys = HeldKeys::default();
        self.control_message = None;
        self.final_frame = None;

        let (w, h) = self.config.canvas_size(self.container_width);
        if (w, h) != (self.canvas.width, self.canvas.height) {
            self.canvas.resize(w, h);
        }

        self.time_remaining = self.config.duration_secs;
        self.started_at = now;
        self.last_frame = None;
        self.obstacles.clear();
        self.spawn_cooldown = self.config.first_spawn_delay;
        self.player = Player::spawn(&self.config, h as f32);

        if self.sprites.is_none() {
            match assets::preload(self.loader.as_ref(), &self.paths) {
                Ok(sprites) => self.sprites = Some(sprites),
                Err(e) => {
                    error!("failed to start space game: {e}");
                    self.status = START_ERROR.to_string();
                    self.reseed_stars();
                    self.enter_attract();
                    return Err(e);
                }
            }
        }

        self.reseed_stars();
        self.input_attached = true;
        self.clock = Some(self.scheduler.set_interval(CLOCK_PERIOD, now));
        self.frame = Some(self.scheduler.request_frame());
        self.status.clear();
        self.state = SessionState::Running;
        info!("session started on a {w}x{h} canvas");
        Ok(())
    }

    /// Release the frame callback, the countdown and the input listeners.
    fn stop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel_frame(frame);
        }
        if let Some(clock) = self.clock.take() {
            self.scheduler.clear_interval(clock);
        }
        self.input_attached = false;
    }

    fn end(&mut self, outcome: Outcome) {
        self.stop();
        self.state = SessionState::Ended(outcome);
        self.final_frame = Some(self.canvas.clone());
        self.status.clear();
        info!("session ended: {outcome:?} with {}s of oxygen left", self.time_remaining);
        // The end screen is redrawn on every frame until the next start.
        self.frame = Some(self.scheduler.request_frame());
    }

    fn enter_attract(&mut self) {
        self.state = SessionState::Attract;
        self.frame = Some(self.scheduler.request_frame());
    }

    fn reseed_stars(&mut self) {
        self.stars = Starfield::scatter(
            &mut self.rng,
            self.config.star_count,
            self.canvas.width as f32,
            self.canvas.height as f32,
        );
        trace!("scattered {} stars", self.stars.len());
    }

    pub fn key_down(&mut self, dir: Direction) {
        self.on_key(dir, true);
    }

    pub fn key_up(&mut self, dir: Direction) {
        self.on_key(dir, false);
    }

    /// Replay arrows that were already down when the session started; a held
    /// key produces no fresh press edge.
    pub fn hold_keys(&mut self, held: impl IntoIterator<Item = Direction>) {
        for dir in held {
            self.key_down(dir);
        }
    }

    fn on_key(&mut self, dir: Direction, pressed: bool) {
        if !self.input_attached {
            return;
        }
        self.keys.set(dir, pressed);
        if let Some(message) = input::message_for(dir, pressed) {
            self.control_message = message;
        }
    }

    /// Run every callback due at `now`. Returns true when the canvas was redrawn.
    pub fn pump(&mut self, now: Duration) -> bool {
        let mut drew = false;
        for tick in self.scheduler.poll(now) {
            match tick {
                Tick::Interval(h) if self.clock == Some(h) => self.on_clock_tick(),
                Tick::Frame(h, ts) if self.frame == Some(h) => {
                    self.frame = None;
                    self.on_frame(ts);
                    drew = true;
                }
                stale => trace!("dropping stale {stale:?}"),
            }
        }
        drew
    }

    fn on_clock_tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        debug!("oxygen: {}s", self.time_remaining);
        if self.time_remaining == 0 {
            self.end(Outcome::Lost);
        }
    }

    fn on_frame(&mut self, ts: Duration) {
        let ts_ms = ts.as_secs_f64() * 1000.0;
        match self.state {
            SessionState::Attract => {
                self.stars.draw(&mut self.canvas, ts_ms);
                hud::draw_attract_title(&mut self.canvas);
                self.frame = Some(self.scheduler.request_frame());
            }
            SessionState::Ended(outcome) => {
                if let Some(last) = &self.final_frame {
                    self.canvas.pixels.copy_from_slice(&last.pixels);
                }
                let fill = self.fill_ratio(ts);
                hud::draw_end_screen(&mut self.canvas, outcome, fill, self.time_remaining);
                self.frame = Some(self.scheduler.request_frame());
            }
            SessionState::Running => self.step(ts),
        }
    }

    /// Meter fill in [0,1]: smooth wall-clock while running, the discrete
    /// countdown otherwise.
    pub fn fill_ratio(&self, now: Duration) -> f32 {
        let total = self.config.duration_secs.max(1) as f32;
        let ratio = if self.state == SessionState::Running {
            1.0 - now.saturating_sub(self.started_at).as_secs_f32() / total
        } else {
            self.time_remaining as f32 / total
        };
        ratio.clamp(0.0, 1.0)
    }

    /// Station sprite placement: 40% of canvas height, right-aligned.
    pub fn goal_rect(&self) -> Rect {
        let w = self.canvas.width as f32;
        let h = self.canvas.height as f32;
        let aspect = self.sprites.as_ref().map_or(1.0, Sprites::goal_aspect);
        let gh = h * self.config.goal_height_frac;
        let gw = gh * aspect;
        Rect::new(w - gw - self.config.goal_margin, h / 2.0 - gh / 2.0, gw, gh)
    }

    fn try_spawn(&mut self) {
        let w = self.canvas.width as f32;
        let h = self.canvas.height as f32;
        if let Some(last) = self.obstacles.last() {
            if last.rect.x > w - self.config.spawn_spacing {
                trace!("spawn suppressed, last obstacle at x={:.1}", last.rect.x);
                return;
            }
        }
        let sprite_count = self.sprites.as_ref().map_or(0, |s| s.obstacles.len());
        let obstacle = Obstacle::spawn(&mut self.rng, &self.config, w, h, sprite_count);
        self.obstacles.push(obstacle);
        let (lo, hi) = self.config.spawn_cooldown;
        self.spawn_cooldown = self.rng.gen_range(lo..=hi);
    }

    /// One running frame, in order: background, station, player, spawn,
    /// obstacles, cull, collisions, HUD, next frame.
    fn step(&mut self, ts: Duration) {
        let dt = match self.last_frame {
            Some(prev) => ts.saturating_sub(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(ts);
        let ts_ms = ts.as_secs_f64() * 1000.0;
        let w = self.canvas.width as f32;
        let h = self.canvas.height as f32;

        self.stars.draw(&mut self.canvas, ts_ms);

        let goal = self.goal_rect();
        if let Some(sprites) = &self.sprites {
            draw::blit_scaled(&mut self.canvas, &sprites.goal, goal);
        }

        self.player.steer(&self.keys, dt, w, h);
        if let Some(sprites) = &self.sprites {
            draw::blit_scaled(&mut self.canvas, &sprites.player, self.player.rect);
        }

        self.spawn_cooldown -= dt;
        if self.spawn_cooldown <= 0.0 {
            self.try_spawn();
        }

        for obs in &mut self.obstacles {
            obs.advance(dt);
            if let Some(img) = self.sprites.as_ref().and_then(|s| s.obstacles.get(obs.sprite)) {
                draw::blit_rotated(&mut self.canvas, img, obs.rect, obs.angle);
            }
        }

        let margin = self.config.cull_margin;
        self.obstacles.retain(|o| o.is_visible(margin));

        let inset = self.config.hitbox_inset;
        let player_box = self.player.hitbox(inset);
        if self.obstacles.iter().any(|o| player_box.collides(&o.hitbox(inset))) {
            self.end(Outcome::Lost);
            return;
        }

        let (pad_x, pad_y) = self.config.goal_inset;
        if player_box.collides(&goal.inset(pad_x, pad_y)) {
            self.end(Outcome::Won);
            return;
        }

        hud::draw_low_time_warning(&mut self.canvas, self.time_remaining, ts_ms);
        if let Some(message) = self.control_message {
            hud::draw_control_message(&mut self.canvas, message);
        }
        let fill = self.fill_ratio(ts);
        hud::draw_oxygen_meter(&mut self.canvas, fill, self.time_remaining);

        self.frame = Some(self.scheduler.request_frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assets::tests::FakeLoader;
    use rand::SeedableRng;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    struct SharedLoader(Arc<FakeLoader>);

    impl SpriteLoader for SharedLoader {
        fn load(&self, path: &Path) -> Result<image::RgbaImage, Error> {
            self.0.load(path)
        }
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    /// Default tuning, but no debris for the first thousand seconds.
    fn calm() -> GameConfig {
        GameConfig { first_spawn_delay: 1_000.0, ..GameConfig::default() }
    }

    fn game_with(config: GameConfig, loader: Arc<FakeLoader>) -> Game {
        Game::new(
            config,
            AssetPaths::in_dir(Path::new("assets")),
            Box::new(SharedLoader(loader)),
            StdRng::seed_from_u64(42),
            None,
        )
    }

    fn game(config: GameConfig) -> Game {
        game_with(config, Arc::new(FakeLoader::default()))
    }

    fn initial_player(g: &Game) -> Rect {
        Rect::new(50.0, g.canvas.height as f32 / 2.0 - 42.5, 60.0, 85.0)
    }

    fn parked_obstacle(rect: Rect) -> Obstacle {
        Obstacle { rect, speed: 0.0, angle: 0.0, angular_speed: 0.0, sprite: 0 }
    }

    #[test]
    fn new_game_idles_in_attract() {
        let mut g = game(calm());
        assert_eq!(g.state(), SessionState::Attract);
        assert!(g.pump(Duration::ZERO));
        assert!(g.pump(secs(0.016)));
        assert_eq!(g.state(), SessionState::Attract);
        assert_eq!(g.scheduler.active_intervals(), 0);
    }

    #[test]
    fn start_from_attract_runs_with_full_clock() {
        let mut g = game(GameConfig::default());
        g.start(Duration::ZERO).unwrap();
        assert_eq!(g.state(), SessionState::Running);
        assert_eq!(g.time_remaining(), 20);
        assert!(g.obstacles().is_empty());
        assert_eq!(g.player().rect, initial_player(&g));
        assert_eq!(g.fill_ratio(Duration::ZERO), 1.0);
    }

    #[test]
    fn first_frame_only_sets_the_baseline() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.key_down(Direction::Right);
        g.pump(secs(0.5));
        assert_eq!(g.player().rect.x, 50.0);
        g.pump(secs(0.6));
        assert!((g.player().rect.x - 68.0).abs() < 1e-3, "{}", g.player().rect.x);
    }

    #[test]
    fn running_out_of_oxygen_loses() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        let mut last_ratio = g.fill_ratio(Duration::ZERO);
        for s in 1..20 {
            g.pump(secs(s as f32));
            assert_eq!(g.state(), SessionState::Running);
            assert_eq!(g.time_remaining(), 20 - s);
            let ratio = g.fill_ratio(secs(s as f32));
            assert!(ratio <= last_ratio && (0.0..=1.0).contains(&ratio));
            last_ratio = ratio;
        }
        g.pump(secs(20.0));
        assert_eq!(g.state(), SessionState::Ended(Outcome::Lost));
        assert_eq!(g.time_remaining(), 0);
        assert_eq!(g.fill_ratio(secs(20.0)), 0.0);
        // Countdown and input are gone; only the end-screen frame remains.
        assert_eq!(g.scheduler.active_intervals(), 0);
        assert_eq!(g.scheduler.pending_frames(), 1);
    }

    #[test]
    fn reaching_the_station_wins_despite_debris() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.pump(Duration::ZERO);
        // Debris far from the player, still on screen.
        g.obstacles.push(parked_obstacle(Rect::new(300.0, 0.0, 40.0, 40.0)));
        let (gx, gy) = g.goal_rect().center();
        g.player.rect.x = gx - 30.0;
        g.player.rect.y = gy - 42.5;
        g.pump(secs(0.016));
        assert_eq!(g.state(), SessionState::Ended(Outcome::Won));
        assert_eq!(g.obstacles().len(), 1);
        assert_eq!(g.end_text(), Some("YOU WIN!"));
    }

    #[test]
    fn hitting_debris_loses_immediately() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.pump(Duration::ZERO);
        let p = g.player().rect;
        g.obstacles.push(parked_obstacle(Rect::new(p.x, p.y, 60.0, 60.0)));
        g.pump(secs(0.016));
        assert_eq!(g.state(), SessionState::Ended(Outcome::Lost));
        assert_eq!(g.end_text(), Some("YOU DIED!"));
    }

    #[test]
    fn arrow_held_through_start_steers() {
        let mut g = game(calm());
        g.hold_keys([Direction::Up]);
        assert_eq!(g.keys, HeldKeys::default());

        g.start(Duration::ZERO).unwrap();
        g.hold_keys([Direction::Up]);
        assert_eq!(g.control_message(), Some(input::LIFT_MESSAGE));
        let y0 = g.player().rect.y;
        g.pump(Duration::ZERO);
        g.pump(secs(0.1));
        assert!((g.player().rect.y - (y0 - 18.0)).abs() < 1e-3, "{}", g.player().rect.y);
    }

    #[test]
    fn debris_inside_the_sprite_margin_is_a_miss() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.pump(Duration::ZERO);
        // Sprites overlap by 5 px, less than the 10% trim on either box.
        let p = g.player().rect;
        g.obstacles.push(parked_obstacle(Rect::new(p.x + p.width - 5.0, p.y, 60.0, 60.0)));
        g.pump(secs(0.016));
        assert_eq!(g.state(), SessionState::Running);
    }

    #[test]
    fn grazing_the_station_edge_is_not_a_win() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.pump(Duration::ZERO);
        let goal = g.goal_rect();
        // 10 px into the sprite, short of the 20% side padding.
        g.player.rect.x = goal.x - g.player.rect.width + 10.0;
        g.player.rect.y = goal.y + goal.height / 2.0 - g.player.rect.height / 2.0;
        g.pump(secs(0.016));
        assert_eq!(g.state(), SessionState::Running);
    }

    #[test]
    fn spawn_waits_for_spacing() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        let w = g.canvas.width as f32;
        g.obstacles.push(parked_obstacle(Rect::new(w - 200.0, 10.0, 50.0, 50.0)));
        g.spawn_cooldown = -0.1;
        g.try_spawn();
        assert_eq!(g.obstacles().len(), 1);
        assert_eq!(g.spawn_cooldown, -0.1);

        g.obstacles[0].rect.x = w - 300.0;
        g.try_spawn();
        assert_eq!(g.obstacles().len(), 2);
        assert!((0.35..=1.25).contains(&g.spawn_cooldown));
        assert_eq!(g.obstacles()[1].rect.x, w + 20.0);
    }

    #[test]
    fn debris_spawns_and_leaves_the_screen() {
        let mut g = game(GameConfig { first_spawn_delay: 0.0, ..GameConfig::default() });
        g.start(Duration::ZERO).unwrap();
        g.player.rect.y = 0.0;
        g.pump(Duration::ZERO);
        assert_eq!(g.obstacles().len(), 1);
        let mut o = g.obstacles[0].clone();
        o.rect.x = -o.rect.width - 49.0;
        o.rect.y = 400.0;
        o.speed = 100.0;
        g.obstacles[0] = o;
        g.spawn_cooldown = 10.0;
        g.pump(secs(0.016));
        assert!(g.obstacles().is_empty());
    }

    #[test]
    fn restart_resets_everything() {
        let mut g = game(GameConfig { first_spawn_delay: 0.0, ..GameConfig::default() });
        g.start(Duration::ZERO).unwrap();
        g.key_down(Direction::Down);
        for i in 0..30 {
            g.pump(secs(i as f32 * 0.05));
        }
        g.end(Outcome::Lost);
        assert!(!g.obstacles().is_empty() || g.player().rect != initial_player(&g));

        g.start(secs(5.0)).unwrap();
        assert_eq!(g.state(), SessionState::Running);
        assert!(g.obstacles().is_empty());
        assert_eq!(g.player().rect, initial_player(&g));
        assert_eq!(g.time_remaining(), 20);
        assert_eq!(g.control_message(), None);
        assert_eq!(g.keys, HeldKeys::default());
    }

    #[test]
    fn restart_keeps_a_single_frame_chain() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.start(Duration::ZERO).unwrap();
        g.start(Duration::ZERO).unwrap();
        assert_eq!(g.scheduler.pending_frames(), 1);
        assert_eq!(g.scheduler.active_intervals(), 1);
        // A full second later the countdown ticks exactly once.
        g.pump(secs(1.0));
        assert_eq!(g.time_remaining(), 19);
    }

    #[test]
    fn input_is_ignored_unless_running() {
        let mut g = game(calm());
        g.key_down(Direction::Up);
        assert_eq!(g.control_message(), None);

        g.start(Duration::ZERO).unwrap();
        g.key_down(Direction::Up);
        assert_eq!(g.control_message(), Some(input::LIFT_MESSAGE));
        g.key_up(Direction::Up);
        assert_eq!(g.control_message(), None);

        g.end(Outcome::Won);
        g.key_down(Direction::Down);
        assert_eq!(g.control_message(), None);
        assert!(!g.keys.down);
    }

    #[test]
    fn end_screen_persists_until_restart() {
        let mut g = game(calm());
        g.start(Duration::ZERO).unwrap();
        g.pump(Duration::ZERO);
        g.end(Outcome::Won);
        for i in 1..5 {
            assert!(g.pump(secs(i as f32 * 0.016)));
            assert_eq!(g.state(), SessionState::Ended(Outcome::Won));
        }
        // Repeated redraws start from the same snapshot, so frames are identical.
        let a = g.canvas().clone();
        g.pump(secs(1.0));
        assert_eq!(&a, g.canvas());
    }

    #[test]
    fn failed_preload_stays_in_attract() {
        let loader = Arc::new(FakeLoader { fail_on: Some("me.png"), ..Default::default() });
        let mut g = game_with(calm(), loader);
        assert!(g.start(Duration::ZERO).is_err());
        assert_eq!(g.state(), SessionState::Attract);
        assert_eq!(g.status_text(), START_ERROR);
        assert_eq!(g.scheduler.active_intervals(), 0);
        assert_eq!(g.scheduler.pending_frames(), 1);
        g.key_down(Direction::Up);
        assert_eq!(g.control_message(), None);
    }

    #[test]
    fn sprites_load_once() {
        let loader = Arc::new(FakeLoader::default());
        let mut g = game_with(calm(), loader.clone());
        g.start(Duration::ZERO).unwrap();
        g.start(secs(1.0)).unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn canvas_follows_the_container_on_start() {
        let mut g = game(calm());
        g.set_window_width(1000);
        g.start(Duration::ZERO).unwrap();
        // The window shows the whole canvas, so nothing is letterboxed.
        assert_eq!((g.canvas().width, g.canvas().height), (1000, 420));
        // 40% of 420 tall, goal sprite is 2:1.
        let goal = g.goal_rect();
        assert!((goal.height - 168.0).abs() < 1e-3);
        assert!((goal.x - (1000.0 - 336.0 - 40.0)).abs() < 1e-3);
    }

    #[test]
    fn meter_ratio_is_clamped() {
        let mut g = game(calm());
        g.start(secs(10.0)).unwrap();
        assert_eq!(g.fill_ratio(secs(10.0)), 1.0);
        assert_eq!(g.fill_ratio(secs(5.0)), 1.0);
        assert_eq!(g.fill_ratio(secs(100.0)), 0.0);
    }
}
