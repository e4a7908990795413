//! Decorative backdrop: mathematical symbols drifting slowly across the
//! window, drawn at low alpha over the active visualization so they never
//! obscure it.

use rand::Rng;

use crate::canvas::{Canvas, Color};

const SYMBOL_COUNT: usize = 15;
const MIN_SCALE: usize = 4;
const MAX_SCALE: usize = 12;
const MIN_SPEED: f64 = 0.2;
const MAX_SPEED: f64 = 0.8;

/// 5x5 bitmaps for pi, product, sum and infinity.
const GLYPHS: [[u8; 5]; 4] = [
    [0b11111, 0b01010, 0b01010, 0b01010, 0b01011],
    [0b11111, 0b01010, 0b01010, 0b01010, 0b01010],
    [0b11111, 0b01000, 0b00100, 0b01000, 0b11111],
    [0b00000, 0b01010, 0b10101, 0b01010, 0b00000],
];

struct Symbol {
    // Position as a fraction of the surface, so resizes keep the layout.
    x: f64,
    y: f64,
    scale: usize,
    speed: f64,
    phase: f64,
    alpha: u8,
    glyph: usize,
}

pub struct FloatingSymbols {
    symbols: Vec<Symbol>,
}

impl FloatingSymbols {
    pub fn new() -> Self {
        FloatingSymbols {
            symbols: Self::scatter(),
        }
    }

    fn scatter() -> Vec<Symbol> {
        let mut rng = rand::thread_rng();
        (0..SYMBOL_COUNT)
            .map(|_| Symbol {
                x: rng.gen_range(0.0..1.0),
                y: rng.gen_range(0.0..1.0),
                scale: rng.gen_range(MIN_SCALE..=MAX_SCALE),
                speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
                phase: rng.gen_range(0.0..std::f64::consts::TAU),
                // Opacity 0.05 to 0.20.
                alpha: rng.gen_range(13..=51),
                glyph: rng.gen_range(0..GLYPHS.len()),
            })
            .collect()
    }

    /// Re-scatter for new surface dimensions.
    pub fn rebuild(&mut self) {
        self.symbols = Self::scatter();
    }

    pub fn draw(&mut self, canvas: &mut Canvas) {
        for symbol in &mut self.symbols {
            symbol.phase += symbol.speed / 100.0;
            let dx = (symbol.phase * 0.8).cos() * 1.5;
            let dy = symbol.phase.sin() * 2.0;
            let px = symbol.x * canvas.width() as f64 + dx;
            let py = symbol.y * canvas.height() as f64 + dy;
            draw_glyph(
                canvas,
                &GLYPHS[symbol.glyph],
                px,
                py,
                symbol.scale,
                (255, 255, 255),
                symbol.alpha,
            );
        }
    }
}

fn draw_glyph(
    canvas: &mut Canvas,
    pattern: &[u8; 5],
    x: f64,
    y: f64,
    scale: usize,
    color: Color,
    alpha: u8,
) {
    let x = x.round() as i64;
    let y = y.round() as i64;
    for (dy, &row) in pattern.iter().enumerate() {
        for dx in 0..5 {
            if row & (1 << (4 - dx)) == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    canvas.blend_pixel(
                        x + (dx * scale + sx) as i64,
                        y + (dy * scale + sy) as i64,
                        color,
                        alpha,
                    );
                }
            }
        }
    }
}
