/// Background color shared by every visualization.
pub const BACKGROUND: (u8, u8, u8) = (10, 13, 28);

/// Color palette for digits 0-9, shared by all three visualizations
/// so a digit keeps its color no matter how it is rendered.
pub const DIGIT_PALETTE: [(u8, u8, u8); 10] = [
    (41, 98, 255),   // 0: blue
    (93, 58, 252),   // 1: purple
    (152, 68, 248),  // 2: violet
    (211, 79, 244),  // 3: magenta
    (255, 89, 230),  // 4: pink
    (255, 99, 177),  // 5: rose
    (255, 109, 124), // 6: coral
    (255, 119, 71),  // 7: orange
    (235, 129, 27),  // 8: amber
    (200, 139, 0),   // 9: gold
];

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Largest centered square that fits the surface: (side, origin x, origin y).
/// All three visualizations draw inside this region, matching the 1:1
/// canvas the layouts were designed for.
pub fn square_layout(width: usize, height: usize) -> (f64, f64, f64) {
    let size = width.min(height) as f64;
    let ox = (width as f64 - size) / 2.0;
    let oy = (height as f64 - size) / 2.0;
    (size, ox, oy)
}
