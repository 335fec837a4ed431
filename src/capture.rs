// Camera capture widget: live preview with an alignment oval, and a one-shot
// capture that crops/masks the current frame into a 256x256 avatar.
//
// The widget owns its stream. Host integration goes through two hooks:
// a `Notifier` for user-facing messages and an image-ready callback.

use log::{error, info, warn};

use crate::crop::{self, CapturedImage};
use crate::draw::{self, Align, Baseline, TextStyle};
use crate::error::Error;
use crate::types::{FrameBuffer, Rect, Rgba};

pub const MSG_CAMERA_REQUIRED: &str = "Error: Camera access required to use this feature.";
pub const MSG_NOT_READY: &str = "Camera not ready. Please try again.";
pub const MSG_CAPTURED: &str = "Avatar captured.";

/// Something that can hand out a live video stream (video only, no audio).
pub trait StreamSource {
    type Stream: VideoStream;

    fn acquire(&mut self) -> Result<Self::Stream, Error>;
}

/// An active capture. `stop` releases the device and must be safe to call twice.
pub trait VideoStream {
    fn frame(&mut self) -> Result<FrameBuffer, Error>;
    fn stop(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Host hook for user-facing messages.
pub trait Notifier {
    fn show_message(&self, text: &str, kind: MessageKind);
}

/// Routes messages into the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_message(&self, text: &str, kind: MessageKind) {
        match kind {
            MessageKind::Info => info!("{text}"),
            MessageKind::Error => error!("{text}"),
        }
    }
}

pub type ImageReady = Box<dyn FnMut(CapturedImage)>;

pub struct CaptureWidget<S: StreamSource> {
    source: S,
    stream: Option<S::Stream>,
    visible: bool,
    notifier: Box<dyn Notifier>,
    on_image: ImageReady,
}

impl<S: StreamSource> CaptureWidget<S> {
    pub fn new(source: S, notifier: Box<dyn Notifier>, on_image: ImageReady) -> Self {
        Self { source, stream: None, visible: false, notifier, on_image }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Show the widget and start the camera. On failure the user is told and
    /// the widget closes itself again.
    pub fn open(&mut self) {
        // Re-opening an open widget restarts its stream.
        self.release_stream();
        self.visible = true;
        match self.source.acquire() {
            Ok(stream) => {
                info!("capture widget opened");
                self.stream = Some(stream);
            }
            Err(e) => {
                error!("camera access denied or failed: {e}");
                self.notifier.show_message(MSG_CAMERA_REQUIRED, MessageKind::Error);
                self.close();
            }
        }
    }

    /// Take the current frame, turn it into the avatar and hand it to the host.
    /// Without a stream this only tells the user; otherwise the widget always
    /// closes afterwards.
    pub fn capture(&mut self) {
        let Some(stream) = self.stream.as_mut() else {
            warn!("capture requested without an active stream");
            self.notifier.show_message(MSG_NOT_READY, MessageKind::Error);
            return;
        };

        let result = stream
            .frame()
            .and_then(|frame| crop::avatar_from_frame(&frame))
            .and_then(|avatar| crop::encode_png(&avatar));

        match result {
            Ok(image) => {
                info!("captured avatar ({} bytes)", image.png.len());
                (self.on_image)(image);
                self.notifier.show_message(MSG_CAPTURED, MessageKind::Info);
            }
            Err(e) => {
                error!("capture failed: {e}");
                self.notifier.show_message(MSG_NOT_READY, MessageKind::Error);
            }
        }
        self.close();
    }

    /// Stop every track and hide. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.release_stream();
        if self.visible {
            info!("capture widget closed");
        }
        self.visible = false;
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }

    /// Draw the live preview with the alignment overlay into `fb`.
    /// `t` is seconds since the widget opened and drives the pulse.
    pub fn preview(&mut self, fb: &mut FrameBuffer, t: f32) -> Result<(), Error> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(());
        };
        let frame = stream.frame()?;
        draw_mirrored_square(&frame, fb);
        draw_alignment_overlay(fb, t);
        Ok(())
    }
}

/// Nearest-neighbour scale of the frame's centered square into `fb`,
/// flipped horizontally so the preview behaves like a mirror.
fn draw_mirrored_square(frame: &FrameBuffer, fb: &mut FrameBuffer) {
    if frame.width == 0 || frame.height == 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let (sx, sy, side) = crop::center_square(frame.width as u32, frame.height as u32);
    let (sx, sy, side) = (sx as usize, sy as usize, side as usize);
    for y in 0..fb.height {
        let src_y = sy + (y * side / fb.height).min(side - 1);
        for x in 0..fb.width {
            let src_x = sx + side - 1 - (x * side / fb.width).min(side - 1);
            fb.pixels[y * fb.width + x] = frame.pixels[src_y * frame.width + src_x];
        }
    }
}

const OVERLAY_RED: Rgba = Rgba::rgb(0xEF, 0x44, 0x44);

/// Dashed oval (1/2 width x 3/4 height) pulsing over 2s, plus the label.
fn draw_alignment_overlay(fb: &mut FrameBuffer, t: f32) {
    let w = fb.width as f32;
    let h = fb.height as f32;
    let pulse = 0.75 + 0.25 * (t * std::f32::consts::PI).cos();
    let color = OVERLAY_RED.with_alpha(pulse);
    let thickness = (w / 128.0).max(2.0);
    draw::stroke_ellipse_dashed(fb, w / 2.0, h / 2.0, w / 4.0, h * 3.0 / 8.0, thickness, thickness * 3.0, color);

    let label = TextStyle::new(14, color).align(Align::Center, Baseline::Middle);
    draw::draw_text(fb, w / 2.0, h / 2.0, "ALIGN FACE", &label);

    // Keep the frame's border visible against bright scenes
    draw::stroke_rect(fb, Rect::new(0.0, 0.0, w, h), 4.0, Rgba::rgb(0x37, 0x41, 0x51));
}
