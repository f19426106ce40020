//! Headless demo runner.
//!
//! Plays the built-in plan with a scripted input sequence at a synthetic
//! 60 Hz and reports how the run ended. Real hosts replace the loop below
//! with their frame scheduler and keyboard events.

use std::collections::HashMap;

use grid_hopper::plan::LevelPlan;
use grid_hopper::sim::{Game, Key, Level, Outcome};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60 * 2; // two simulated minutes

fn demo_plan() -> LevelPlan {
    LevelPlan {
        rows: [
            "                    ",
            "                    ",
            "                    ",
            "                    ",
            " x              = x ",
            " x         o o    x ",
            " x @      xxxxx   x ",
            " xxxxx            x ",
            "     x!!!!!!!!!!!!x ",
            "     xxxxxxxxxxxxxx ",
            "                    ",
        ]
        .iter()
        .map(|row| row.to_string())
        .collect(),
        legend: HashMap::from([
            ('@', "player".to_string()),
            ('o', "coin".to_string()),
            ('=', "lava-horiz".to_string()),
            ('|', "lava-vert".to_string()),
            ('v', "lava-drip".to_string()),
            ('x', "wall".to_string()),
            ('!', "lava".to_string()),
        ]),
    }
}

fn main() {
    env_logger::init();

    let level = Level::from_plan(&demo_plan()).expect("built-in plan is well-formed");
    let mut game = Game::new();
    if let Err(signal) = game.set_up_level(level) {
        eprintln!("level setup failed: {signal:?}");
        std::process::exit(1);
    }

    // Scripted input: run right, hopping every two seconds.
    game.on_key_down(Key::Right);

    let mut time = 0.0;
    for frame in 0..MAX_FRAMES {
        if frame % 120 == 0 {
            game.on_key_down(Key::Jump);
        }
        if frame % 120 == 30 {
            game.on_key_up(Key::Jump);
        }

        match game.tick(time) {
            Outcome::Continue => {}
            Outcome::Defeated(cause) => {
                println!("defeated after {frame} frames: {cause:?}");
                return;
            }
            Outcome::Victorious => {
                println!("victory after {frame} frames");
                return;
            }
        }
        time += FRAME_MS;
    }

    println!("still going after {MAX_FRAMES} frames; tearing down");
    game.tear_down_level();
}
