//! Lifecycle controller: at most one visualization owns the render
//! surface at a time. Selection strictly destroys the old instance before
//! creating the new one, digit growth and resizes are forwarded to the
//! active instance, and resize bursts are debounced.

use crate::canvas::Canvas;
use crate::digits::DigitSnapshot;
use crate::grid::GridViz;
use crate::spiral::SpiralViz;
use crate::util::BACKGROUND;
use crate::viz::{VizError, VizKind, Visualization};
use crate::walk::WalkViz;

/// Trailing-edge quiescence window for resize bursts.
pub const RESIZE_DEBOUNCE_MS: u64 = 200;

pub struct VizController {
    active: Option<Box<dyn Visualization>>,
    width: usize,
    height: usize,
    pending_resize: Option<(usize, usize)>,
    resize_noted_at_ms: u64,
    generation: u64,
}

impl VizController {
    pub fn new(width: usize, height: usize) -> Self {
        VizController {
            active: None,
            width,
            height,
            pending_resize: None,
            resize_noted_at_ms: 0,
            generation: 0,
        }
    }

    pub fn active_kind(&self) -> Option<VizKind> {
        self.active.as_ref().map(|viz| viz.kind())
    }

    /// Counts successful instance creations; unchanged generation across a
    /// call means the running instance was kept.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Activate `kind`. Selecting the already-active kind keeps the
    /// running instance untouched.
    pub fn select(&mut self, kind: VizKind, digits: DigitSnapshot) -> Result<(), VizError> {
        if self.active_kind() == Some(kind) {
            log::debug!("{kind} already active");
            return Ok(());
        }

        // Destroy before create: the surface has exactly one owner.
        if let Some(old) = self.active.take() {
            log::debug!("tearing down {} visualization", old.kind());
        }

        let viz: Box<dyn Visualization> = match kind {
            VizKind::Grid => Box::new(GridViz::new(self.width, self.height, digits)?),
            VizKind::Spiral => Box::new(SpiralViz::new(self.width, self.height, digits)?),
            VizKind::Walk => Box::new(WalkViz::new(self.width, self.height, digits)?),
        };
        self.generation += 1;
        log::info!("{kind} visualization active (generation {})", self.generation);
        self.active = Some(viz);
        Ok(())
    }

    /// Hand the fresh snapshot to the active instance, if any.
    pub fn notify_digits_grew(&mut self, digits: DigitSnapshot) {
        if let Some(viz) = self.active.as_mut() {
            viz.on_digits_changed(digits);
        }
    }

    /// Record a surface size observation. Bursts coalesce: only the most
    /// recent pending size survives, and returning to the current size
    /// cancels the pending resize entirely.
    pub fn note_resize(&mut self, width: usize, height: usize, now_ms: u64) {
        if (width, height) == (self.width, self.height) {
            self.pending_resize = None;
            return;
        }
        if self.pending_resize != Some((width, height)) {
            self.resize_noted_at_ms = now_ms;
        }
        self.pending_resize = Some((width, height));
    }

    /// Apply the pending resize once the burst has been quiet for the
    /// debounce window. Returns the applied dimensions so the render loop
    /// can resize its buffer.
    pub fn tick_resize(&mut self, now_ms: u64) -> Option<(usize, usize)> {
        let (width, height) = self.pending_resize?;
        if now_ms.saturating_sub(self.resize_noted_at_ms) < RESIZE_DEBOUNCE_MS {
            return None;
        }
        self.pending_resize = None;
        self.width = width;
        self.height = height;
        if let Some(viz) = self.active.as_mut() {
            viz.on_resize(width, height);
        }
        log::debug!("resize applied: {width}x{height}");
        Some((width, height))
    }

    /// Restart the walk. Meaningless for the other kinds, so a no-op there.
    pub fn reset_active(&mut self) {
        if let Some(viz) = self.active.as_mut() {
            if viz.kind() == VizKind::Walk {
                viz.reset();
            }
        }
    }

    /// Render one frame of whatever is active.
    pub fn frame(&mut self, canvas: &mut Canvas) {
        match self.active.as_mut() {
            Some(viz) => viz.frame(canvas),
            None => canvas.clear(BACKGROUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> DigitSnapshot {
        DigitSnapshot::from(vec![3, 1, 4, 1, 5, 9, 2, 6])
    }

    #[test]
    fn starts_with_nothing_active() {
        let controller = VizController::new(400, 400);
        assert_eq!(controller.active_kind(), None);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn selecting_the_active_kind_keeps_the_instance() {
        let mut controller = VizController::new(400, 400);
        controller.select(VizKind::Grid, snapshot()).unwrap();
        assert_eq!(controller.generation(), 1);

        controller.select(VizKind::Grid, snapshot()).unwrap();
        assert_eq!(controller.generation(), 1, "no destroy/create pair");
        assert_eq!(controller.active_kind(), Some(VizKind::Grid));

        controller.select(VizKind::Spiral, snapshot()).unwrap();
        assert_eq!(controller.generation(), 2);
        assert_eq!(controller.active_kind(), Some(VizKind::Spiral));
    }

    #[test]
    fn zero_area_surface_is_fatal_and_leaves_nothing_active() {
        let mut controller = VizController::new(0, 0);
        assert!(controller.select(VizKind::Walk, snapshot()).is_err());
        assert_eq!(controller.active_kind(), None);
    }

    #[test]
    fn resize_bursts_apply_exactly_once() {
        let mut controller = VizController::new(800, 800);
        controller.select(VizKind::Grid, snapshot()).unwrap();

        controller.note_resize(700, 700, 0);
        assert_eq!(controller.tick_resize(100), None);
        controller.note_resize(650, 650, 150);
        assert_eq!(controller.tick_resize(200), None, "burst still active");
        assert_eq!(controller.tick_resize(349), None);
        assert_eq!(controller.tick_resize(350), Some((650, 650)));
        assert_eq!(controller.tick_resize(400), None, "applied only once");
        assert_eq!(controller.surface(), (650, 650));
    }

    #[test]
    fn returning_to_the_current_size_cancels_the_pending_resize() {
        let mut controller = VizController::new(800, 800);
        controller.note_resize(700, 700, 0);
        controller.note_resize(800, 800, 50);
        assert_eq!(controller.tick_resize(1000), None);
    }

    #[test]
    fn repeated_observations_of_one_size_do_not_refresh_the_window() {
        let mut controller = VizController::new(800, 800);
        controller.note_resize(700, 700, 0);
        // The same pending size reported again must not push the deadline out.
        controller.note_resize(700, 700, 199);
        assert_eq!(controller.tick_resize(200), Some((700, 700)));
    }

    #[test]
    fn reset_is_walk_only() {
        let mut controller = VizController::new(400, 400);
        controller.reset_active(); // nothing active: no-op
        controller.select(VizKind::Grid, snapshot()).unwrap();
        controller.reset_active(); // grid: no-op
        controller.select(VizKind::Walk, snapshot()).unwrap();
        controller.reset_active();
        assert_eq!(controller.active_kind(), Some(VizKind::Walk));
    }

    #[test]
    fn frame_without_an_active_strategy_paints_background() {
        let mut controller = VizController::new(16, 16);
        let mut canvas = Canvas::new(16, 16);
        controller.frame(&mut canvas);
        assert!(canvas.buffer().iter().all(|&px| px == 0x0A0D1C));
    }
}
