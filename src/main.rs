// Two small widgets sharing one binary:
// • `space-eva game`    – Enter/Space starts (or restarts) a 20 s run; arrows steer
//                         the astronaut to the station; Esc quits.
// • `space-eva capture` – live camera with an alignment oval; Enter/Space captures
//                         a 256x256 avatar PNG; Esc cancels.

mod camera;
mod capture;
mod config;
mod crop;
mod draw;
mod error;
mod game;
mod schedule;
mod types;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use camera::CameraSource;
use capture::{CaptureWidget, LogNotifier, MessageKind, Notifier};
use config::{Cli, Command, GameConfig};
use crop::CapturedImage;
use draw::Drawer;
use error::Error;
use game::{Game, SessionState};
use game::assets::{AssetPaths, FileLoader};
use game::input::Direction;
use types::FrameBuffer;

const GAME_TITLE: &str = "Space EVA";
const CAPTURE_TITLE: &str = ":: HELMET CAMERA ALIGNMENT ::";
const PREVIEW_SIZE: usize = 512;

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Game { assets, width, seed } => run_game(&assets, width, seed),
        Command::Capture { camera_index, camera_width, camera_height, output } => {
            let source = CameraSource { index: camera_index, width: camera_width, height: camera_height };
            run_capture(source, output)
        }
    }
}

fn run_game(assets: &Path, width: usize, seed: Option<u64>) -> Result<(), Error> {
    /* --- Window sized to the canvas ---
       Visual: starfield with "PLAY THE GAME" until Enter/Space. */
    let config = GameConfig::default();
    let (canvas_w, canvas_h) = config.canvas_size(Some(width));
    let mut drawer = Drawer::new(GAME_TITLE, canvas_w, canvas_h)?;

    /* --- Session ---
       A fixed --seed replays the same stars and debris. */
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let container = config.container_for_window(drawer.size().0);
    let mut game = Game::new(
        config,
        AssetPaths::in_dir(assets),
        Box::new(FileLoader),
        rng,
        Some(container),
    );

    /* --- Status line + FPS --- */
    let epoch = Instant::now();
    let mut title = String::from(GAME_TITLE);
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = epoch.elapsed();
        game.set_window_width(drawer.size().0);

        /* 1) Start / restart. Arrows already held have no press edge, so
           replay them into the fresh session. */
        if drawer.confirm_pressed() {
            match game.start(now) {
                Ok(()) => game.hold_keys(drawer.keys_down().into_iter().filter_map(Direction::from_key)),
                // A failed start is already on the status line.
                Err(e) => warn!("start aborted: {e}"),
            }
        }

        /* 2) Arrow edges; the game ignores them unless a run is live. */
        for key in drawer.keys_pressed() {
            if let Some(dir) = Direction::from_key(key) {
                game.key_down(dir);
            }
        }
        for key in drawer.keys_released() {
            if let Some(dir) = Direction::from_key(key) {
                game.key_up(dir);
            }
        }

        /* 3) Fire whatever is due: countdown first, then the frame.
           Visual: canvas advances one step (or redraws the end screen). */
        if game.pump(now) {
            frames_this_second += 1;
        }

        /* 4) The window title doubles as the host status line. */
        let wanted = match (game.status_text(), game.end_text()) {
            ("", Some(end)) => format!("{GAME_TITLE} | {end} Enter to retry"),
            ("", None) if game.state() == SessionState::Running => {
                format!("{GAME_TITLE} | OXYGEN {}s", game.time_remaining())
            }
            ("", None) => GAME_TITLE.to_string(),
            (status, _) => format!("{GAME_TITLE} | {status}"),
        };
        if wanted != title {
            drawer.set_title(&wanted);
            title = wanted;
        }

        /* 5) Present to the window. */
        drawer.present(game.canvas())?;

        /* 6) FPS counter (debug log once per second). */
        let since = last_fps_time.elapsed();
        if since >= Duration::from_secs(1) {
            debug!("FPS: {:.1}", frames_this_second as f32 / since.as_secs_f32());
            frames_this_second = 0;
            last_fps_time = Instant::now();
        }
    }

    Ok(())
}

fn run_capture(source: CameraSource, output: PathBuf) -> Result<(), Error> {
    /* --- Square preview window + reusable screen buffer --- */
    let mut drawer = Drawer::new(CAPTURE_TITLE, PREVIEW_SIZE, PREVIEW_SIZE)?;
    let mut screen = FrameBuffer::new(PREVIEW_SIZE, PREVIEW_SIZE);

    /* --- Widget ---
       The callback parks the avatar; it is written to disk after the loop. */
    let captured: Rc<RefCell<Option<CapturedImage>>> = Rc::default();
    let slot = captured.clone();
    let mut widget = CaptureWidget::new(
        source,
        Box::new(LogNotifier),
        Box::new(move |image: CapturedImage| {
            debug!("avatar ready: {} byte data URL", image.data_url().len());
            *slot.borrow_mut() = Some(image);
        }),
    );

    /* --- Camera on ---
       Visual: a denied camera logs the error and the loop never runs. */
    widget.open();
    let opened = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while widget.is_open() && drawer.is_open() {
        /* 1) Esc cancels, Enter/Space captures (both close the widget). */
        if drawer.esc_pressed() {
            widget.close();
            break;
        }
        if drawer.confirm_pressed() {
            widget.capture();
            continue;
        }
        /* 2) Live mirrored feed with the pulsing oval.
           Visual: line your face up inside the dashed ellipse. */
        if let Err(e) = widget.preview(&mut screen, opened.elapsed().as_secs_f32()) {
            error!("preview failed: {e}");
            LogNotifier.show_message(capture::MSG_NOT_READY, MessageKind::Error);
            widget.close();
            break;
        }
        /* 3) Present to the window. */
        drawer.present(&screen)?;
    }
    // Window closed under an open widget: release the camera.
    widget.close();

    /* --- Persist the avatar, if one was taken --- */
    if let Some(image) = captured.borrow_mut().take() {
        image.save(&output)?;
        info!("avatar written to {}", output.display());
    }
    Ok(())
}
