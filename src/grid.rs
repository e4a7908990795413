//! Grid visualization: the digit sequence laid out as a 25x25 field of
//! colored cells, with a sparse set of cells pulsing for emphasis.

use rand::seq::SliceRandom;

use crate::canvas::Canvas;
use crate::digits::DigitSnapshot;
use crate::font;
use crate::util::{BACKGROUND, DIGIT_PALETTE, map_range, square_layout};
use crate::viz::{VizError, VizKind, Visualization};

pub const GRID_SIZE: usize = 25;

/// A pulse decays over this many frames, then the cell drops out of the
/// overlay set.
const PULSE_FRAMES: u32 = 60;

/// New pulses spawn every two seconds at the 30 fps target.
const SPAWN_INTERVAL_FRAMES: u64 = 60;

const BASE_ALPHA: u8 = 100;

struct PulsatingCell {
    x: usize,
    y: usize,
    frame: u32,
}

pub struct GridViz {
    digits: DigitSnapshot,
    pulsating: Vec<PulsatingCell>,
    frames: u64,
    cell: f64,
    ox: f64,
    oy: f64,
}

impl GridViz {
    pub fn new(width: usize, height: usize, digits: DigitSnapshot) -> Result<Self, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::NoSurface { width, height });
        }
        let mut viz = GridViz {
            digits,
            pulsating: Vec::new(),
            frames: 0,
            cell: 0.0,
            ox: 0.0,
            oy: 0.0,
        };
        viz.apply_size(width, height);
        viz.spawn_pulses(5);
        Ok(viz)
    }

    fn apply_size(&mut self, width: usize, height: usize) {
        let (size, ox, oy) = square_layout(width, height);
        self.cell = size / GRID_SIZE as f64;
        self.ox = ox;
        self.oy = oy;
    }

    fn occupied(&self, x: usize, y: usize) -> bool {
        y * GRID_SIZE + x < self.digits.len()
    }

    /// Pick up to `want` cells uniformly among occupied cells that are not
    /// already pulsating.
    fn spawn_pulses(&mut self, want: usize) {
        let eligible: Vec<(usize, usize)> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| (x, y)))
            .filter(|&(x, y)| {
                self.occupied(x, y) && !self.pulsating.iter().any(|c| c.x == x && c.y == y)
            })
            .collect();
        let mut rng = rand::thread_rng();
        for &(x, y) in eligible.choose_multiple(&mut rng, want) {
            self.pulsating.push(PulsatingCell { x, y, frame: 0 });
        }
    }

    fn advance_pulses(&mut self) {
        for cell in &mut self.pulsating {
            cell.frame += 1;
        }
        self.pulsating.retain(|cell| cell.frame <= PULSE_FRAMES);
    }

    fn pulse_scale(frame: u32) -> f64 {
        map_range(frame as f64, 0.0, PULSE_FRAMES as f64, 1.2, 1.0)
    }

    fn pulse_alpha(frame: u32) -> u8 {
        map_range(frame as f64, 0.0, PULSE_FRAMES as f64, 255.0, BASE_ALPHA as f64) as u8
    }
}

impl Visualization for GridViz {
    fn kind(&self) -> VizKind {
        VizKind::Grid
    }

    fn frame(&mut self, canvas: &mut Canvas) {
        canvas.clear(BACKGROUND);

        let glyph_scale = ((self.cell * 0.5) / font::GLYPH_H as f64).max(1.0) as usize;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let Some(digit) = self.digits.digit(y * GRID_SIZE + x) else {
                    continue;
                };
                let color = DIGIT_PALETTE[digit as usize];

                let mut alpha = BASE_ALPHA;
                let mut scale = 1.0;
                if let Some(pulse) = self.pulsating.iter().find(|c| c.x == x && c.y == y) {
                    alpha = Self::pulse_alpha(pulse.frame);
                    scale = Self::pulse_scale(pulse.frame);
                }

                let cx = self.ox + x as f64 * self.cell + self.cell / 2.0;
                let cy = self.oy + y as f64 * self.cell + self.cell / 2.0;
                let side = self.cell * scale;
                canvas.fill_round_rect(
                    cx - side / 2.0,
                    cy - side / 2.0,
                    side,
                    side,
                    side * 0.2,
                    color,
                    alpha,
                );

                let text_alpha = map_range(alpha as f64, BASE_ALPHA as f64, 255.0, 180.0, 255.0) as u8;
                font::draw_char(
                    canvas,
                    cx - (font::GLYPH_W * glyph_scale) as f64 / 2.0,
                    cy - (font::GLYPH_H * glyph_scale) as f64 / 2.0,
                    (b'0' + digit) as char,
                    glyph_scale,
                    (255, 255, 255),
                    text_alpha,
                );
            }
        }

        self.advance_pulses();
        self.frames += 1;
        if self.frames % SPAWN_INTERVAL_FRAMES == 0 {
            self.spawn_pulses(2);
        }
    }

    fn on_digits_changed(&mut self, digits: DigitSnapshot) {
        self.digits = digits;
        self.pulsating.clear();
        self.spawn_pulses(5);
    }

    fn on_resize(&mut self, width: usize, height: usize) {
        self.apply_size(width, height);
    }
}
