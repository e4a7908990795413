//! The capability set shared by the three visualizations.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::canvas::Canvas;
use crate::digits::DigitSnapshot;

#[derive(Debug, Error)]
pub enum VizError {
    /// A visualization cannot come up without a real surface to draw on.
    #[error("render surface has zero area ({width}x{height})")]
    NoSurface { width: usize, height: usize },

    #[error("unknown visualization '{0}'")]
    UnknownKind(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VizKind {
    Grid,
    Spiral,
    Walk,
}

impl VizKind {
    pub fn name(&self) -> &'static str {
        match self {
            VizKind::Grid => "grid",
            VizKind::Spiral => "spiral",
            VizKind::Walk => "walk",
        }
    }
}

impl fmt::Display for VizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VizKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(VizKind::Grid),
            "spiral" => Ok(VizKind::Spiral),
            "walk" => Ok(VizKind::Walk),
            other => Err(VizError::UnknownKind(other.to_string())),
        }
    }
}

/// One running visualization. Construction binds it to the surface
/// dimensions; dropping it is destruction, so a destroyed instance can
/// never be called again.
pub trait Visualization: Send {
    fn kind(&self) -> VizKind;

    /// One tick of the render loop. Must tolerate an empty digit
    /// snapshot by drawing nothing beyond the background.
    fn frame(&mut self, canvas: &mut Canvas);

    /// Re-derive animation state from a fresh snapshot without
    /// restarting the render loop.
    fn on_digits_changed(&mut self, digits: DigitSnapshot);

    /// Recompute dimension-derived geometry for a new surface size.
    fn on_resize(&mut self, width: usize, height: usize);

    /// Meaningful for the walk only; everywhere else a no-op.
    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_names() {
        for kind in [VizKind::Grid, VizKind::Spiral, VizKind::Walk] {
            assert_eq!(kind.name().parse::<VizKind>().unwrap(), kind);
        }
        assert!("scatter".parse::<VizKind>().is_err());
    }
}
