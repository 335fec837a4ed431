// Turns one camera frame into the avatar image: largest centered square,
// scaled to 256x256, everything outside the face ellipse made transparent.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::Error;
use crate::types::FrameBuffer;

/// Side of the square avatar in pixels.
pub const CAPTURE_SIZE: u32 = 256;

/// Ellipse semi-axes as a fraction of CAPTURE_SIZE (horizontal, vertical).
pub const MASK_RX: f32 = 0.35;
pub const MASK_RY: f32 = 0.45;

/// An encoded avatar, handed to the image-ready callback by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub png: Vec<u8>,
}

impl CapturedImage {
    /// `data:image/png;base64,...` form, for hosts that want a URL.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, &self.png)?;
        Ok(())
    }
}

/// Largest centered square inside a `width` x `height` frame: (x, y, side).
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Unpack a 0x00RRGGBB frame into an opaque RGBA image.
pub fn frame_to_rgba(frame: &FrameBuffer) -> RgbaImage {
    RgbaImage::from_fn(frame.width as u32, frame.height as u32, |x, y| {
        let px = frame.pixels[y as usize * frame.width + x as usize];
        image::Rgba([(px >> 16) as u8, (px >> 8) as u8, px as u8, 255])
    })
}

/// Fraction of pixel (x,y) covered by the mask ellipse, from a 2x2 supersample.
pub fn mask_coverage(x: u32, y: u32) -> f32 {
    let c = CAPTURE_SIZE as f32 / 2.0;
    let rx = CAPTURE_SIZE as f32 * MASK_RX;
    let ry = CAPTURE_SIZE as f32 * MASK_RY;
    let mut hits = 0;
    for (ox, oy) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
        let nx = (x as f32 + ox - c) / rx;
        let ny = (y as f32 + oy - c) / ry;
        if nx * nx + ny * ny <= 1.0 {
            hits += 1;
        }
    }
    hits as f32 / 4.0
}

/// Keep only the ellipse: alpha is multiplied by coverage, so outside becomes 0.
pub fn apply_ellipse_mask(img: &mut RgbaImage) {
    for (x, y, px) in img.enumerate_pixels_mut() {
        let cover = mask_coverage(x, y);
        px[3] = (px[3] as f32 * cover).round() as u8;
    }
}

/// Crop, scale and mask one frame into the 256x256 avatar.
pub fn avatar_from_frame(frame: &FrameBuffer) -> Result<RgbaImage, Error> {
    if frame.width == 0 || frame.height == 0 || frame.pixels.len() != frame.width * frame.height {
        return Err(Error::CameraFrame(format!(
            "unusable frame {}x{} ({} pixels)",
            frame.width,
            frame.height,
            frame.pixels.len()
        )));
    }
    let full = frame_to_rgba(frame);
    let (sx, sy, side) = center_square(full.width(), full.height());
    let square = imageops::crop_imm(&full, sx, sy, side, side).to_image();
    let mut avatar = imageops::resize(&square, CAPTURE_SIZE, CAPTURE_SIZE, FilterType::Triangle);
    apply_ellipse_mask(&mut avatar);
    Ok(avatar)
}

pub fn encode_png(img: &RgbaImage) -> Result<CapturedImage, Error> {
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(CapturedImage { png })
}
