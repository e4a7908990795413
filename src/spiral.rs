//! Spiral visualization: each digit gets a fixed polar coordinate along an
//! Archimedean-style spiral, rendered as oscillating particles over a
//! slowly rotating background curve.

use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::digits::DigitSnapshot;
use crate::font;
use crate::util::{BACKGROUND, DIGIT_PALETTE, square_layout};
use crate::viz::{VizError, VizKind, Visualization};

/// Only the first 500 digits become particles.
const PARTICLE_CAP: usize = 500;

/// The background curve samples every other digit of the first 1000.
const CURVE_CAP: usize = 1000;
const CURVE_STEP: usize = 2;

const ROTATION_PER_FRAME: f64 = 0.002;
const TRAIL_FADE_ALPHA: u8 = 20;
const CURVE_COLOR: (u8, u8, u8) = (90, 120, 220);

#[derive(Clone, Debug, PartialEq)]
struct Particle {
    /// Polar origin angle; the shared rotation offset is applied at render
    /// time, never baked in here.
    angle: f64,
    base_radius: f64,
    digit: u8,
    /// Dot radius in pixels.
    radius: f64,
    color: (u8, u8, u8),
    oscillation: f64,
    oscillation_speed: f64,
}

pub struct SpiralViz {
    digits: DigitSnapshot,
    particles: Vec<Particle>,
    angle_offset: f64,
    cx: f64,
    cy: f64,
    scale: f64,
}

impl SpiralViz {
    pub fn new(width: usize, height: usize, digits: DigitSnapshot) -> Result<Self, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::NoSurface { width, height });
        }
        let mut viz = SpiralViz {
            digits,
            particles: Vec::new(),
            angle_offset: 0.0,
            cx: 0.0,
            cy: 0.0,
            scale: 0.0,
        };
        viz.apply_size(width, height);
        viz.rebuild_particles();
        Ok(viz)
    }

    fn apply_size(&mut self, width: usize, height: usize) {
        let (size, ox, oy) = square_layout(width, height);
        self.cx = ox + size / 2.0;
        self.cy = oy + size / 2.0;
        self.scale = size / 300.0;
    }

    /// The digit-to-polar mapping is deterministic, so the same snapshot
    /// always reproduces the same initial layout.
    fn rebuild_particles(&mut self) {
        self.particles = self
            .digits
            .iter()
            .take(PARTICLE_CAP)
            .enumerate()
            .map(|(i, digit)| Particle {
                angle: i as f64 * 0.5 + digit as f64 * 0.2,
                base_radius: (i as f64).sqrt() * self.scale * (1.0 + digit as f64 * 0.1),
                digit,
                radius: 2.0 + digit as f64 * 0.6,
                color: DIGIT_PALETTE[digit as usize],
                oscillation: digit as f64 * 0.2,
                oscillation_speed: 0.05 + digit as f64 * 0.01,
            })
            .collect();
    }

    fn draw_curve(&self, canvas: &mut Canvas) {
        let mut prev: Option<(f64, f64)> = None;
        let end = self.digits.len().min(CURVE_CAP);
        for i in (0..end).step_by(CURVE_STEP) {
            let Some(digit) = self.digits.digit(i) else {
                break;
            };
            let angle = i as f64 * 0.5 + digit as f64 * 0.2 + self.angle_offset;
            let radius = (i as f64).sqrt() * self.scale;
            let x = self.cx + angle.cos() * radius;
            let y = self.cy + angle.sin() * radius;
            if let Some((px, py)) = prev {
                canvas.line(px, py, x, y, CURVE_COLOR, 40);
            }
            prev = Some((x, y));
        }
    }
}

impl Visualization for SpiralViz {
    fn kind(&self) -> VizKind {
        VizKind::Spiral
    }

    fn frame(&mut self, canvas: &mut Canvas) {
        canvas.fade(BACKGROUND, TRAIL_FADE_ALPHA);

        self.angle_offset += ROTATION_PER_FRAME;
        self.draw_curve(canvas);

        for (i, particle) in self.particles.iter_mut().enumerate() {
            particle.oscillation += particle.oscillation_speed;

            // Shared rotation plus a per-particle sway perpendicular to
            // the radius.
            let angle = particle.angle + self.angle_offset;
            let sway = particle.oscillation.sin() * (3.0 + particle.digit as f64);
            let x = self.cx + angle.cos() * particle.base_radius + (angle + PI / 2.0).cos() * sway;
            let y = self.cy + angle.sin() * particle.base_radius + (angle + PI / 2.0).sin() * sway;

            canvas.fill_circle(x, y, particle.radius, particle.color, 220);

            if i % 20 == 0 {
                font::draw_char(
                    canvas,
                    x - font::GLYPH_W as f64,
                    y - font::GLYPH_H as f64,
                    (b'0' + particle.digit) as char,
                    2,
                    (255, 255, 255),
                    200,
                );
            }
        }
    }

    fn on_digits_changed(&mut self, digits: DigitSnapshot) {
        self.digits = digits;
        self.rebuild_particles();
    }

    fn on_resize(&mut self, width: usize, height: usize) {
        self.apply_size(width, height);
        self.rebuild_particles();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn snapshot(n: usize) -> DigitSnapshot {
        DigitSnapshot::from((0..n).map(|i| ((i * 7) % 10) as u8).collect::<Vec<_>>())
    }

    #[test]
    fn layout_is_deterministic_for_a_snapshot() {
        let a = SpiralViz::new(600, 600, snapshot(300)).unwrap();
        let b = SpiralViz::new(600, 600, snapshot(300)).unwrap();
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn particle_count_caps_at_five_hundred() {
        let viz = SpiralViz::new(600, 600, snapshot(2000)).unwrap();
        assert_eq!(viz.particles.len(), PARTICLE_CAP);
        let small = SpiralViz::new(600, 600, snapshot(42)).unwrap();
        assert_eq!(small.particles.len(), 42);
    }

    #[test]
    fn digit_update_rebuilds_from_scratch() {
        let mut viz = SpiralViz::new(600, 600, snapshot(100)).unwrap();
        let mut canvas = Canvas::new(600, 600);
        for _ in 0..10 {
            viz.frame(&mut canvas);
        }
        viz.on_digits_changed(snapshot(100));
        let fresh = SpiralViz::new(600, 600, snapshot(100)).unwrap();
        assert_eq!(viz.particles, fresh.particles);
    }

    #[test]
    fn rotation_is_not_baked_into_geometry() {
        let mut viz = SpiralViz::new(600, 600, snapshot(50)).unwrap();
        let before = viz.particles.clone();
        let mut canvas = Canvas::new(600, 600);
        viz.frame(&mut canvas);
        assert!(viz.angle_offset > 0.0);
        for (a, b) in viz.particles.iter().zip(&before) {
            assert_eq!(a.angle, b.angle);
            assert_eq!(a.base_radius, b.base_radius);
        }
    }

    #[test]
    fn tolerates_an_empty_snapshot() {
        let mut viz = SpiralViz::new(400, 400, DigitSnapshot::empty()).unwrap();
        assert!(viz.particles.is_empty());
        let mut canvas = Canvas::new(400, 400);
        viz.frame(&mut canvas);
    }

    #[test]
    fn refuses_a_zero_area_surface() {
        assert!(SpiralViz::new(400, 0, snapshot(10)).is_err());
    }
}
