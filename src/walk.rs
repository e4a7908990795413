//! Random-walk visualization: each digit steers a walker across the
//! surface, leaving a fading trail. The path only ever grows; `reset`
//! throws it away wholesale and starts the digit stream over.

use crate::canvas::Canvas;
use crate::digits::DigitSnapshot;
use crate::font;
use crate::util::{BACKGROUND, DIGIT_PALETTE, map_range, square_layout};
use crate::viz::{VizError, VizKind, Visualization};

/// One digit is consumed every 15 frames (half a second at the 30 fps
/// target) so the walk stays legible.
const STEP_INTERVAL_FRAMES: u64 = 15;

/// Step length as a fraction of the square side.
const STEP_DIVISOR: f64 = 60.0;

const DIAGONAL_FACTOR: f64 = 0.7;
const TRAIL_FADE_ALPHA: u8 = 10;

/// A resize that changes the square side by more than this restarts the
/// walk, since step geometry is not rescaled retroactively.
const RESET_SIZE_THRESHOLD: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
struct WalkerStep {
    x: f64,
    y: f64,
    digit: u8,
}

/// Direction table: 0-1 up, 2-3 right, 4-5 down, 6-7 left, 8 diagonal
/// up-right, 9 diagonal up-left (diagonals at 0.7x).
fn step_delta(digit: u8, step: f64) -> (f64, f64) {
    match digit {
        0 | 1 => (0.0, -step),
        2 | 3 => (step, 0.0),
        4 | 5 => (0.0, step),
        6 | 7 => (-step, 0.0),
        8 => (step * DIAGONAL_FACTOR, -step * DIAGONAL_FACTOR),
        9 => (-step * DIAGONAL_FACTOR, -step * DIAGONAL_FACTOR),
        _ => (0.0, 0.0),
    }
}

pub struct WalkViz {
    digits: DigitSnapshot,
    /// Append-only path in square-local coordinates.
    path: Vec<WalkerStep>,
    x: f64,
    y: f64,
    next_index: usize,
    frames: u64,
    size: f64,
    ox: f64,
    oy: f64,
    step: f64,
    needs_clear: bool,
}

impl WalkViz {
    pub fn new(width: usize, height: usize, digits: DigitSnapshot) -> Result<Self, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::NoSurface { width, height });
        }
        let mut viz = WalkViz {
            digits,
            path: Vec::new(),
            x: 0.0,
            y: 0.0,
            next_index: 0,
            frames: 0,
            size: 0.0,
            ox: 0.0,
            oy: 0.0,
            step: 0.0,
            needs_clear: true,
        };
        viz.apply_size(width, height);
        viz.seed();
        Ok(viz)
    }

    fn apply_size(&mut self, width: usize, height: usize) {
        let (size, ox, oy) = square_layout(width, height);
        self.size = size;
        self.ox = ox;
        self.oy = oy;
        self.step = size / STEP_DIVISOR;
    }

    /// Back to the center, with the implicit leading digit 3 of Pi as the
    /// single seed step.
    fn seed(&mut self) {
        self.x = self.size / 2.0;
        self.y = self.size / 2.0;
        self.path = vec![WalkerStep {
            x: self.x,
            y: self.y,
            digit: 3,
        }];
        self.next_index = 0;
    }

    fn advance(&mut self) {
        let Some(digit) = self.digits.digit(self.next_index) else {
            return;
        };
        let (dx, dy) = step_delta(digit, self.step);
        self.x += dx;
        self.y += dy;

        // Toroidal wrap at the square bounds.
        if self.x < 0.0 {
            self.x = self.size;
        }
        if self.x > self.size {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = self.size;
        }
        if self.y > self.size {
            self.y = 0.0;
        }

        self.path.push(WalkerStep {
            x: self.x,
            y: self.y,
            digit,
        });
        self.next_index += 1;
    }

    fn draw_path(&self, canvas: &mut Canvas) {
        for i in 1..self.path.len() {
            let prev = &self.path[i - 1];
            let here = &self.path[i];
            let color = DIGIT_PALETTE[here.digit as usize];
            let alpha = map_range(i as f64, 0.0, self.path.len() as f64, 40.0, 180.0) as u8;
            canvas.line(
                self.ox + prev.x,
                self.oy + prev.y,
                self.ox + here.x,
                self.oy + here.y,
                color,
                alpha,
            );
            if i < self.path.len() - 1 && i % 10 == 0 {
                canvas.fill_circle(self.ox + here.x, self.oy + here.y, 2.0, color, alpha + 20);
            }
        }
    }

    fn draw_head(&self, canvas: &mut Canvas) {
        let Some(head) = self.path.last() else {
            return;
        };
        let x = self.ox + head.x;
        let y = self.oy + head.y;
        let pulse = 6.0 + (self.frames as f64 * 0.1).sin() * 2.0;
        canvas.fill_circle(x, y, pulse / 2.0, (255, 255, 255), 200);
        font::draw_char(
            canvas,
            x - font::GLYPH_W as f64,
            y - font::GLYPH_H as f64,
            (b'0' + head.digit) as char,
            2,
            (255, 255, 255),
            255,
        );
    }
}

impl Visualization for WalkViz {
    fn kind(&self) -> VizKind {
        VizKind::Walk
    }

    fn frame(&mut self, canvas: &mut Canvas) {
        self.frames += 1;
        if self.needs_clear {
            canvas.clear(BACKGROUND);
            self.needs_clear = false;
        } else {
            canvas.fade(BACKGROUND, TRAIL_FADE_ALPHA);
        }

        self.draw_path(canvas);
        if self.frames % STEP_INTERVAL_FRAMES == 0 && self.next_index < self.digits.len() {
            self.advance();
        }
        self.draw_head(canvas);

        let stats = format!("digits processed: {}/{}", self.next_index, self.digits.len());
        font::draw_text(
            canvas,
            self.ox + 20.0,
            self.oy + 20.0,
            &stats,
            2,
            (255, 255, 255),
            200,
        );
    }

    fn on_digits_changed(&mut self, digits: DigitSnapshot) {
        // Consumption continues from the first unconsumed index.
        self.digits = digits;
    }

    fn on_resize(&mut self, width: usize, height: usize) {
        let old_size = self.size;
        self.apply_size(width, height);
        if (self.size - old_size).abs() > RESET_SIZE_THRESHOLD {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.seed();
        self.needs_clear = true;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot(digits: &[u8]) -> DigitSnapshot {
        DigitSnapshot::from(digits.to_vec())
    }

    fn run_frames(viz: &mut WalkViz, canvas: &mut Canvas, frames: usize) {
        for _ in 0..frames {
            viz.frame(canvas);
        }
    }

    #[test]
    fn up_right_down_left_cancels_exactly() {
        let mut viz = WalkViz::new(600, 600, snapshot(&[0, 2, 4, 6])).unwrap();
        let start = (viz.x, viz.y);
        let mut canvas = Canvas::new(600, 600);
        run_frames(&mut viz, &mut canvas, 60);
        assert_eq!(viz.next_index, 4, "all four digits consumed");
        assert_eq!(viz.path.len(), 5);
        // up (0,-s), right (s,0), down (0,s), left (-s,0): both axes
        // cancel to zero net displacement.
        assert_eq!((viz.x, viz.y), start);
    }

    #[test]
    fn consumption_cadence_is_fifteen_frames() {
        let mut viz = WalkViz::new(600, 600, snapshot(&[1; 50])).unwrap();
        let mut canvas = Canvas::new(600, 600);
        run_frames(&mut viz, &mut canvas, 59);
        assert_eq!(viz.next_index, 3);
        run_frames(&mut viz, &mut canvas, 1);
        assert_eq!(viz.next_index, 4);
    }

    #[test]
    fn walker_wraps_at_the_bounds() {
        // 600px square, step 10: 40 moves left crosses the edge.
        let mut viz = WalkViz::new(600, 600, snapshot(&[6; 40])).unwrap();
        let mut canvas = Canvas::new(600, 600);
        run_frames(&mut viz, &mut canvas, 40 * STEP_INTERVAL_FRAMES as usize);
        assert_eq!(viz.next_index, 40);
        for step in &viz.path {
            assert!(step.x >= 0.0 && step.x <= viz.size);
            assert!(step.y >= 0.0 && step.y <= viz.size);
        }
    }

    #[test]
    fn reset_rewinds_and_reproduces_the_path() {
        let digits: Vec<u8> = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8];
        let mut viz = WalkViz::new(600, 600, snapshot(&digits)).unwrap();
        let mut canvas = Canvas::new(600, 600);
        run_frames(&mut viz, &mut canvas, 150);
        let first_run = viz.path.clone();
        assert!(first_run.len() > 1);

        viz.reset();
        assert_eq!(viz.path.len(), 1);
        assert_eq!(viz.path[0].x, viz.size / 2.0);
        assert_eq!(viz.path[0].y, viz.size / 2.0);
        assert_eq!(viz.next_index, 0);

        run_frames(&mut viz, &mut canvas, 150);
        assert_eq!(viz.path, first_run);
    }

    #[test]
    fn small_resize_keeps_the_path_large_resize_restarts_it() {
        let mut viz = WalkViz::new(600, 600, snapshot(&[2; 20])).unwrap();
        let mut canvas = Canvas::new(600, 600);
        run_frames(&mut viz, &mut canvas, 90);
        let walked = viz.path.len();
        assert!(walked > 1);

        viz.on_resize(650, 650);
        assert_eq!(viz.path.len(), walked, "50px change keeps the walk");

        viz.on_resize(900, 900);
        assert_eq!(viz.path.len(), 1, "large change restarts the walk");
        assert_eq!(viz.next_index, 0);
    }

    #[test]
    fn tolerates_an_empty_snapshot() {
        let mut viz = WalkViz::new(400, 400, DigitSnapshot::empty()).unwrap();
        let mut canvas = Canvas::new(400, 400);
        run_frames(&mut viz, &mut canvas, 45);
        assert_eq!(viz.path.len(), 1);
        assert_eq!(viz.next_index, 0);
    }

    #[test]
    fn refuses_a_zero_area_surface() {
        assert!(WalkViz::new(0, 0, snapshot(&[1])).is_err());
    }
}
