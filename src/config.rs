// Process options (CLI) and the gameplay tuning table.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "space-eva", version, about = "Helmet-camera avatar capture and the Space EVA mini game")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play the timed EVA game (arrows move, Enter/Space start, Esc quits)
    Game {
        /// Directory holding iss.png, me.png and obstacle1..3.png
        #[arg(long, default_value = "public/game")]
        assets: PathBuf,
        /// Width of the hosting container; the window opens at the canvas size it yields
        #[arg(long, default_value_t = 900)]
        width: usize,
        /// Seed for obstacle and star placement (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Align your face in the oval and capture a 256x256 avatar PNG
    Capture {
        #[arg(long, default_value_t = 0)]
        camera_index: u32,
        #[arg(long, default_value_t = 640)]
        camera_width: u32,
        #[arg(long, default_value_t = 480)]
        camera_height: u32,
        /// Where the avatar PNG is written
        #[arg(long, short, default_value = "avatar.png")]
        output: PathBuf,
    },
}

/// Every gameplay constant in one place. Distances are canvas pixels,
/// speeds pixels per second, times seconds.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub duration_secs: u32,

    pub canvas_min_width: usize,
    pub canvas_max_width: usize,
    pub canvas_height: usize,
    pub container_gutter: usize,
    pub fallback_container_width: usize,

    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub player_speed: f32,

    pub first_spawn_delay: f32,
    pub spawn_cooldown: (f32, f32),
    pub spawn_spacing: f32,
    pub spawn_offset: f32,
    pub obstacle_size: (f32, f32),
    pub obstacle_speed: (f32, f32),
    pub obstacle_spin_deg: f32,
    pub cull_margin: f32,

    pub hitbox_inset: f32,
    pub goal_inset: (f32, f32),
    pub goal_height_frac: f32,
    pub goal_margin: f32,

    pub star_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: 20,

            canvas_min_width: 700,
            canvas_max_width: 1100,
            canvas_height: 420,
            container_gutter: 32,
            fallback_container_width: 900,

            player_width: 60.0,
            player_height: 85.0,
            player_start_x: 50.0,
            player_speed: 180.0,

            first_spawn_delay: 0.5,
            spawn_cooldown: (0.35, 1.25),
            spawn_spacing: 250.0,
            spawn_offset: 20.0,
            obstacle_size: (40.0, 100.0),
            obstacle_speed: (180.0, 330.0),
            obstacle_spin_deg: 45.0,
            cull_margin: 50.0,

            hitbox_inset: 0.1,
            goal_inset: (0.2, 0.15),
            goal_height_frac: 0.4,
            goal_margin: 40.0,

            star_count: 80,
        }
    }
}

impl GameConfig {
    /// Canvas size for a container of the given width (None when there is no container).
    pub fn canvas_size(&self, container_width: Option<usize>) -> (usize, usize) {
        let available = match container_width {
            Some(w) => w.saturating_sub(self.container_gutter),
            None => self.fallback_container_width,
        };
        let width = available.min(self.canvas_max_width).max(self.canvas_min_width);
        (width, self.canvas_height)
    }

    /// The window shows the canvas only, so the container is the window plus its gutter.
    pub fn container_for_window(&self, window_width: usize) -> usize {
        window_width + self.container_gutter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_width_follows_container_within_bounds() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.canvas_size(Some(932)), (900, 420));
        assert_eq!(cfg.canvas_size(Some(300)), (700, 420));
        assert_eq!(cfg.canvas_size(Some(4000)), (1100, 420));
        assert_eq!(cfg.canvas_size(None), (900, 420));
    }

    #[test]
    fn window_opened_at_canvas_size_keeps_it() {
        let cfg = GameConfig::default();
        let (w, _) = cfg.canvas_size(Some(900));
        assert_eq!(w, 868);
        assert_eq!(cfg.canvas_size(Some(cfg.container_for_window(w))).0, w);
        // A window dragged narrower than the minimum still gets the minimum canvas.
        assert_eq!(cfg.canvas_size(Some(cfg.container_for_window(500))).0, 700);
    }

    #[test]
    fn cli_parses_both_widgets() {
        let cli = Cli::try_parse_from(["space-eva", "game", "--seed", "7"]).unwrap();
        assert!(matches!(cli.command, Command::Game { seed: Some(7), width: 900, .. }));
        assert_eq!(cli.log_level, LevelFilter::Info);

        let cli = Cli::try_parse_from(["space-eva", "--log-level", "debug", "capture", "-o", "me.png"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);
        match cli.command {
            Command::Capture { output, camera_index, .. } => {
                assert_eq!(output, PathBuf::from("me.png"));
                assert_eq!(camera_index, 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
