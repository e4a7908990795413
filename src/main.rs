use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use piviz::{
    Config, DigitStore, Intent, MAX_DIGITS, Notification, VizController, VizKind, events,
    spawn_visualizer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load("piviz.json");
    let store = DigitStore::new();
    let count = store.initialize();

    let controller = Arc::new(Mutex::new(VizController::new(config.width, config.height)));
    controller
        .lock()
        .unwrap()
        .select(VizKind::Grid, store.snapshot())?;

    let (intents, mut notifications) = events::spawn(store.clone(), Arc::clone(&controller));
    spawn_visualizer(Arc::clone(&controller), store.clone(), intents.clone(), config);

    // Echo coordinator notifications to the terminal.
    tokio::spawn(async move {
        while let Some(note) = notifications.recv().await {
            match note {
                Notification::DigitCountChanged(count) if count >= MAX_DIGITS => {
                    println!("digit cap reached: {count}");
                }
                Notification::DigitCountChanged(count) => println!("digits loaded: {count}"),
                Notification::LoadingStateChanged(true) => println!("loading more digits..."),
                Notification::LoadingStateChanged(false) => {}
            }
        }
    });

    println!("\n╭──────────────────────────────────────────╮");
    println!("│       pi visualizer - {count} digits        │");
    println!("│                                          │");
    println!("│ /grid      - digit grid                  │");
    println!("│ /spiral    - polar spiral                │");
    println!("│ /walk      - random walk                 │");
    println!("│ /more [n]  - load more digits (max 5000) │");
    println!("│ /reset     - restart the walk            │");
    println!("│ /quit      - exit                        │");
    println!("│                                          │");
    println!("│ (G/S/W/M/R also work in the window,      │");
    println!("│  Esc closes it)                          │");
    println!("╰──────────────────────────────────────────╯\n");

    loop {
        print!("pi: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" => break,
            "/grid" | "/spiral" | "/walk" => {
                let kind: VizKind = input.trim_start_matches('/').parse()?;
                let _ = intents.send(Intent::ChangeVisualization(kind));
            }
            "/reset" => {
                let _ = intents.send(Intent::ResetWalk);
            }
            _ if input.starts_with("/more") => {
                let target = input
                    .split_whitespace()
                    .nth(1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(MAX_DIGITS);
                let _ = intents.send(Intent::ContinueDigits(target));
            }
            _ => println!("unknown command: {input}"),
        }
    }

    Ok(())
}
