//! Rotating Pi facts for the HUD ticker.

use crate::util::ease_in_out_quad;

const ROTATE_INTERVAL_MS: u64 = 8000;
const FADE_MS: u64 = 500;
const MAX_ALPHA: f64 = 200.0;

const FACTS: [&str; 10] = [
    "Pi is the ratio of a circle's circumference to its diameter.",
    "The first 144 digits of Pi sum up to 666, which many associate with the Number of the Beast.",
    "Pi is an irrational number, meaning it cannot be expressed as a simple fraction.",
    "The record for calculating Pi is over 100 trillion digits.",
    "March 14 (3/14) is celebrated as Pi Day in many countries.",
    "If you write Pi/4 as a continued fraction, you get the Leibniz formula: 1 - 1/3 + 1/5 - 1/7 + ...",
    "The symbol for Pi was first used by Welsh mathematician William Jones in 1706.",
    "No pattern has ever been found in the digits of Pi, making it useful for random number generation.",
    "Albert Einstein was born on Pi Day (March 14).",
    "In the Star Trek episode 'Wolf in the Fold,' Spock defeats an evil computer by commanding it to 'compute to the last digit the value of pi.'",
];

pub struct PiFacts {
    index: usize,
    rotated_at_ms: u64,
}

impl PiFacts {
    pub fn new() -> Self {
        PiFacts {
            index: 0,
            rotated_at_ms: 0,
        }
    }

    /// The fact to show at `now_ms` and its fade alpha. Facts rotate every
    /// eight seconds, easing out just before the switch and back in just
    /// after it.
    pub fn current(&mut self, now_ms: u64) -> (&'static str, u8) {
        let mut age = now_ms.saturating_sub(self.rotated_at_ms);
        if age >= ROTATE_INTERVAL_MS {
            self.index = (self.index + 1) % FACTS.len();
            self.rotated_at_ms = now_ms;
            age = 0;
        }

        let alpha = if age < FADE_MS {
            ease_in_out_quad(age as f64 / FADE_MS as f64) * MAX_ALPHA
        } else if age > ROTATE_INTERVAL_MS - FADE_MS {
            let t = (ROTATE_INTERVAL_MS - age) as f64 / FADE_MS as f64;
            ease_in_out_quad(t) * MAX_ALPHA
        } else {
            MAX_ALPHA
        };
        (FACTS[self.index], alpha as u8)
    }
}
