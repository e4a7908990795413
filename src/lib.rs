pub mod backdrop;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod digits;
pub mod events;
pub mod facts;
pub mod font;
pub mod grid;
pub mod spiral;
pub mod util;
pub mod visualizer;
pub mod viz;
pub mod walk;

pub use canvas::Canvas;
pub use config::Config;
pub use controller::VizController;
pub use digits::{DigitSnapshot, DigitStore, MAX_DIGITS};
pub use events::{Intent, Notification};
pub use grid::GridViz;
pub use spiral::SpiralViz;
pub use visualizer::spawn_visualizer;
pub use viz::{VizError, VizKind, Visualization};
pub use walk::WalkViz;
