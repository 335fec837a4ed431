// Opens a camera through nokhwa and converts frames into FrameBuffers.
// This is the production `StreamSource` behind the capture widget.

use crate::capture::{StreamSource, VideoStream};
use crate::error::Error;
use crate::types::FrameBuffer;

use log::{debug, info, warn};
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Which device to open and the resolution to ask it for.
#[derive(Clone, Debug)]
pub struct CameraSource {
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

impl StreamSource for CameraSource {
    type Stream = CameraCapture;

    fn acquire(&mut self) -> Result<CameraCapture, Error> {
        CameraCapture::new(self.index, self.width, self.height)
    }
}

// A small wrapper around nokhwa::Camera holding one open video-only stream.
pub struct CameraCapture {
    cam: Camera,
    streaming: bool,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution and start streaming.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        // 1) Choose the device (0 = default webcam)
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        // 2) Ask for RGB frames near the requested format.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 3) Create the camera (fails if no device or permission is denied).
        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        // 4) Start streaming. Visual: the webcam light turns on.
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!("camera {index} streaming at {}x{}", actual.width(), actual.height());

        Ok(Self { cam, streaming: true })
    }
}

impl VideoStream for CameraCapture {
    /// Grab one frame (blocks until ready) and pack it as 0x00RRGGBB.
    fn frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // Pack RGB bytes into one u32 per pixel for the window.
        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();

        Ok(FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels,
        })
    }

    /// Release the device. Visual: the webcam light turns off.
    fn stop(&mut self) {
        if !self.streaming {
            return;
        }
        self.streaming = false;
        match self.cam.stop_stream() {
            Ok(()) => debug!("camera stream stopped"),
            Err(e) => warn!("stopping camera stream: {e}"),
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.stop();
    }
}
