//! Render thread: owns the window and the pixel canvas, drives the active
//! visualization at the target frame rate, and overlays the backdrop, the
//! HUD and the fact ticker. Window hotkeys emit the same intents as the
//! terminal commands.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tokio::sync::mpsc;

use crate::backdrop::FloatingSymbols;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::controller::VizController;
use crate::digits::{DigitStore, MAX_DIGITS};
use crate::events::Intent;
use crate::facts::PiFacts;
use crate::font;
use crate::viz::VizKind;

pub fn spawn_visualizer(
    controller: Arc<Mutex<VizController>>,
    store: DigitStore,
    intents: mpsc::UnboundedSender<Intent>,
    config: Config,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut window = Window::new(
            "Pi Visualizer",
            config.width,
            config.height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .unwrap();

        window.set_target_fps(config.target_fps);

        let mut canvas = Canvas::new(config.width, config.height);
        let mut backdrop = FloatingSymbols::new();
        let mut facts = PiFacts::new();
        let start = Instant::now();

        while window.is_open() && !window.is_key_down(Key::Escape) {
            let now_ms = start.elapsed().as_millis() as u64;
            let (win_w, win_h) = window.get_size();

            {
                let mut controller = controller.lock().unwrap();
                controller.note_resize(win_w, win_h, now_ms);
                if let Some((w, h)) = controller.tick_resize(now_ms) {
                    canvas.resize(w, h);
                    backdrop.rebuild();
                }
                controller.frame(&mut canvas);
            }

            backdrop.draw(&mut canvas);
            draw_hud(&mut canvas, &store, &mut facts, now_ms);
            emit_hotkeys(&window, &intents);

            window
                .update_with_buffer(canvas.buffer(), canvas.width(), canvas.height())
                .unwrap();
        }
        log::info!("visualizer window closed");
    })
}

fn draw_hud(canvas: &mut Canvas, store: &DigitStore, facts: &mut PiFacts, now_ms: u64) {
    font::draw_text(
        canvas,
        10.0,
        10.0,
        &format!("digits: {}", store.count()),
        2,
        (255, 255, 255),
        230,
    );
    if store.is_growing() {
        font::draw_text(
            canvas,
            10.0,
            24.0,
            "loading more digits...",
            2,
            (235, 129, 27),
            230,
        );
    }

    let (fact, alpha) = facts.current(now_ms);
    let y = canvas.height() as f64 - 18.0;
    font::draw_text(canvas, 10.0, y, fact, 2, (180, 200, 255), alpha);
}

fn emit_hotkeys(window: &Window, intents: &mpsc::UnboundedSender<Intent>) {
    let bindings = [
        (Key::G, Intent::ChangeVisualization(VizKind::Grid)),
        (Key::S, Intent::ChangeVisualization(VizKind::Spiral)),
        (Key::W, Intent::ChangeVisualization(VizKind::Walk)),
        (Key::M, Intent::ContinueDigits(MAX_DIGITS)),
        (Key::R, Intent::ResetWalk),
    ];
    for (key, intent) in bindings {
        if window.is_key_pressed(key, KeyRepeat::No) {
            let _ = intents.send(intent);
        }
    }
}
