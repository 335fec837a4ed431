// Overlay text and the oxygen meter, plus the attract and end screens.

use crate::draw::{self, Align, Baseline, TextStyle};
use crate::game::Outcome;
use crate::types::{FrameBuffer, Rect, Rgba};

const LIME: Rgba = Rgba::rgb(0, 255, 0);
const RED: Rgba = Rgba::rgb(255, 0, 0);
const WHITE: Rgba = Rgba::rgb(255, 255, 255);

const METER_W: f32 = 120.0;
const METER_H: f32 = 20.0;
const METER_PAD: f32 = 18.0;

/// Seconds at or below which the meter turns orange / red.
pub const CAUTION_SECS: u32 = 10;
pub const CRITICAL_SECS: u32 = 5;

pub fn meter_color(remaining: u32) -> Rgba {
    if remaining <= CRITICAL_SECS {
        RED
    } else if remaining <= CAUTION_SECS {
        Rgba::rgb(255, 140, 0)
    } else {
        Rgba::rgb(0, 200, 255)
    }
}

/// Bottom-right bar; `fill` is already clamped to [0,1] by the caller.
pub fn draw_oxygen_meter(fb: &mut FrameBuffer, fill: f32, remaining: u32) {
    let w = fb.width as f32;
    let h = fb.height as f32;
    let x = w - METER_W - METER_PAD;
    let y = h - METER_H - METER_PAD;

    draw::fill_rect(fb, Rect::new(x, y, METER_W, METER_H), WHITE.with_alpha(0.12));
    draw::fill_rect(fb, Rect::new(x, y, METER_W * fill.clamp(0.0, 1.0), METER_H), meter_color(remaining));

    let label = TextStyle::new(12, WHITE).align(Align::Right, Baseline::Bottom);
    draw::draw_text(fb, x + METER_W, y - 6.0, &format!("OXYGEN: {remaining}s"), &label);

    draw::stroke_rect(fb, Rect::new(x, y, METER_W, METER_H), 2.0, WHITE);
}

/// Big pulsing countdown, top-right, only during the last ten seconds.
pub fn draw_low_time_warning(fb: &mut FrameBuffer, remaining: u32, ts_ms: f64) {
    if remaining == 0 || remaining > CAUTION_SECS {
        return;
    }
    let alpha = 0.5 + 0.5 * ((ts_ms / 150.0) as f32).sin().abs();
    let style = TextStyle::new(64, RED.with_alpha(alpha)).align(Align::Right, Baseline::Top);
    draw::draw_text(fb, fb.width as f32 - 24.0, 12.0, &remaining.to_string(), &style);
}

pub fn draw_control_message(fb: &mut FrameBuffer, message: &str) {
    let style = TextStyle::new(16, LIME.with_alpha(0.9)).align(Align::Left, Baseline::Bottom);
    draw::draw_text(fb, 10.0, fb.height as f32 - 10.0, message, &style);
}

/// "PLAY THE GAME" over whatever background is already drawn.
pub fn draw_attract_title(fb: &mut FrameBuffer) {
    let style = TextStyle::new(48, LIME).align(Align::Center, Baseline::Middle);
    draw::draw_text(fb, fb.width as f32 / 2.0, fb.height as f32 / 2.0, "PLAY THE GAME", &style);
}

pub fn end_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "YOU WIN!",
        Outcome::Lost => "YOU DIED!",
    }
}

/// Dim the frame, stamp the outcome in the middle, then the meter.
pub fn draw_end_screen(fb: &mut FrameBuffer, outcome: Outcome, fill: f32, remaining: u32) {
    let w = fb.width as f32;
    let h = fb.height as f32;
    draw::fill_rect(fb, Rect::new(0.0, 0.0, w, h), Rgba::rgba(0, 0, 0, 0.6));

    let color = match outcome {
        Outcome::Won => LIME,
        Outcome::Lost => RED,
    };
    let style = TextStyle::new(80, color)
        .align(Align::Center, Baseline::Middle)
        .outline(Rgba::rgba(0, 0, 0, 0.8), 4);
    draw::draw_text(fb, w / 2.0, h / 2.0, end_message(outcome), &style);

    draw_oxygen_meter(fb, fill, remaining);
}
