//! Artist's (red-yellow-blue) colour wheel
//!
//! The wheel is twelve anchor colours at equal RYB spacing, joined by
//! straight lines in RGB space. HSL hue is monotonic along each of those
//! lines, so the inverse mapping is found per segment by bisection.

use crate::color::{wrap_unit, Color};

const SEGMENTS: usize = 12;
const BISECT_STEPS: usize = 60;

/// Anchor colours, starting at red and walking through yellow and blue
const WHEEL: [Color; SEGMENTS] = [
    Color::new(1.0, 0.0, 0.0),   // red
    Color::new(1.0, 0.25, 0.0),  // red-orange
    Color::new(1.0, 0.5, 0.0),   // orange
    Color::new(1.0, 0.75, 0.0),  // yellow-orange
    Color::new(1.0, 1.0, 0.0),   // yellow
    Color::new(0.5, 0.8, 0.1),   // yellow-green
    Color::new(0.0, 0.65, 0.3),  // green
    Color::new(0.0, 0.5, 0.6),   // blue-green
    Color::new(0.1, 0.2, 0.9),   // blue
    Color::new(0.35, 0.1, 0.75), // blue-violet
    Color::new(0.55, 0.0, 0.6),  // violet
    Color::new(0.8, 0.0, 0.4),   // red-violet
];

/// Colour at the given RYB hue (turns)
pub fn ryb_hue_to_rgb(hue: f64) -> Color {
    let position = wrap_unit(hue) * SEGMENTS as f64;
    let index = (position.floor() as usize).min(SEGMENTS - 1);
    segment_color(index, position - index as f64)
}

/// RYB hue (turns) of the wheel colour that has the given HSL hue
pub fn rgb_hue_to_ryb_hue(hue: f64) -> f64 {
    let hue = wrap_unit(hue);
    let index = (0..SEGMENTS)
        .rev()
        .find(|&i| anchor_hue(i) <= hue)
        .unwrap_or(0);

    let start = anchor_hue(index);
    let (mut low, mut high) = (0.0_f64, 1.0_f64);
    for _ in 0..BISECT_STEPS {
        let mid = (low + high) / 2.0;
        if unwrapped_hue(segment_color(index, mid), start) < hue {
            low = mid;
        } else {
            high = mid;
        }
    }

    wrap_unit((index as f64 + (low + high) / 2.0) / SEGMENTS as f64)
}

fn segment_color(index: usize, t: f64) -> Color {
    WHEEL[index].lerp(WHEEL[(index + 1) % SEGMENTS], t)
}

fn anchor_hue(index: usize) -> f64 {
    WHEEL[index].to_hsl().hue
}

/// Hue measured so that it never drops below the segment start
fn unwrapped_hue(color: Color, start: f64) -> f64 {
    let hue = color.to_hsl().hue;
    if hue < start {
        hue + 1.0
    } else {
        hue
    }
}
