// Sprite paths and the parallel preload that runs before a session starts.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::info;
use rayon::prelude::*;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct AssetPaths {
    pub goal: PathBuf,
    pub player: PathBuf,
    pub obstacles: Vec<PathBuf>,
}

impl AssetPaths {
    /// The standard sprite set inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            goal: dir.join("iss.png"),
            player: dir.join("me.png"),
            obstacles: (1..=3).map(|i| dir.join(format!("obstacle{i}.png"))).collect(),
        }
    }

    pub fn count(&self) -> usize {
        2 + self.obstacles.len()
    }
}

pub struct Sprites {
    pub goal: RgbaImage,
    pub player: RgbaImage,
    pub obstacles: Vec<RgbaImage>,
}

impl Sprites {
    /// Width / height of the goal sprite (1.0 for a degenerate image).
    pub fn goal_aspect(&self) -> f32 {
        let (w, h) = self.goal.dimensions();
        if w == 0 || h == 0 { 1.0 } else { w as f32 / h as f32 }
    }
}

/// Decodes one sprite. Shared across the preload worker threads.
pub trait SpriteLoader: Sync {
    fn load(&self, path: &Path) -> Result<RgbaImage, Error>;
}

/// Reads sprites from disk with the `image` decoders.
pub struct FileLoader;

impl SpriteLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, Error> {
        let img = image::open(path).map_err(|source| Error::AssetLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}

/// Load every sprite concurrently; the first failure aborts the whole set.
pub fn preload(loader: &dyn SpriteLoader, paths: &AssetPaths) -> Result<Sprites, Error> {
    let (goal, (player, obstacles)) = rayon::join(
        || loader.load(&paths.goal),
        || {
            rayon::join(
                || loader.load(&paths.player),
                || {
                    paths
                        .obstacles
                        .par_iter()
                        .map(|path| loader.load(path))
                        .collect::<Result<Vec<_>, _>>()
                },
            )
        },
    );
    let sprites = Sprites { goal: goal?, player: player?, obstacles: obstacles? };
    info!("preloaded {} sprites", paths.count());
    Ok(sprites)
}
