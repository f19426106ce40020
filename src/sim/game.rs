//! Game orchestration: level lifecycle, input gating, and the tick entry
//! point the host's frame scheduler drives.

use super::level::Level;
use super::player::{Key, Player};
use super::{Defeat, Signal};

/// Result of one tick, branched on by the host loop. Terminal variants are
/// one-shot: the level has already been torn down and the scheduler must
/// not be re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep scheduling ticks.
    Continue,
    /// The player died; the level has been torn down.
    Defeated(Defeat),
    /// All coins collected; the level has been torn down.
    Victorious,
}

/// Owns exactly one level and one player at a time. A level transition
/// always fully tears down before the next setup.
#[derive(Debug, Default)]
pub struct Game {
    level: Option<Level>,
    player: Option<Player>,
    running: bool,
    last_time: Option<f64>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Install a level, spawn a fresh player at its start cell, and start
    /// accepting ticks and key events. Any previous level is fully torn
    /// down first.
    ///
    /// Fails only when the start cell already touches a deadly obstacle,
    /// which is a level-design error.
    pub fn set_up_level(&mut self, mut level: Level) -> Result<(), Signal> {
        if self.level.is_some() {
            self.tear_down_level();
        }

        let player = Player::spawn(&mut level)?;
        log::info!(
            "level up: {}x{} cells, {} obstacles, {} coins",
            level.width(),
            level.height(),
            level.obstacle_count(),
            level.coin_count()
        );

        self.level = Some(level);
        self.player = Some(player);
        self.running = true;
        self.last_time = None;
        Ok(())
    }

    /// Release the current level and player. Idempotent.
    pub fn tear_down_level(&mut self) {
        if self.level.take().is_some() {
            log::info!("level torn down");
        }
        self.player = None;
        self.running = false;
        self.last_time = None;
    }

    /// Key press from the host's input layer. Honored only while running;
    /// the held-key set is idempotent.
    pub fn on_key_down(&mut self, key: Key) {
        if !self.running {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.key_down(key);
        }
    }

    /// Key release from the host's input layer. Honored only while running.
    pub fn on_key_up(&mut self, key: Key) {
        if !self.running {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.key_up(key);
        }
    }

    /// One simulation tick, driven once per animation frame with a
    /// monotonic timestamp in milliseconds. The first tick after setup
    /// sees a zero interval.
    ///
    /// The level stepper runs first (victory check, patrol advance), then
    /// player physics. On a terminal outcome the level is torn down before
    /// returning; stray ticks afterward are ignored.
    pub fn tick(&mut self, time: f64) -> Outcome {
        if !self.running {
            log::warn!("tick after the level ended; ignoring");
            return Outcome::Continue;
        }
        let (Some(level), Some(player)) = (self.level.as_mut(), self.player.as_mut()) else {
            return Outcome::Continue;
        };

        let interval = match self.last_time {
            Some(previous) => (time - previous) as f32,
            None => 0.0,
        };

        let result = match level.step(interval) {
            Ok(()) => player.step(level, interval),
            Err(signal) => Err(signal),
        };

        match result {
            Ok(()) => {
                self.last_time = Some(time);
                Outcome::Continue
            }
            Err(Signal::Dead(cause)) => {
                self.tear_down_level();
                log::info!("Defeat...");
                Outcome::Defeated(cause)
            }
            Err(Signal::Won) => {
                self.tear_down_level();
                log::info!("Victory!");
                Outcome::Victorious
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::MoveKind;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// 10x10 board, full floor at row 7, player start on it at column 2,
    /// one coin sitting on the floor a few cells to the right.
    fn walkable_level() -> Level {
        let mut level = Level::new(10, 10);
        for x in 0..10 {
            level.add_static_obstacle((x, 7), false, false, "white");
        }
        level.add_static_obstacle((5, 6), false, true, "yellow");
        level.set_player_start((2, 6));
        level
    }

    fn run_until_terminal(game: &mut Game, max_ticks: u32) -> (Outcome, u32) {
        let mut time = 0.0;
        for n in 0..max_ticks {
            let outcome = game.tick(time);
            if outcome != Outcome::Continue {
                return (outcome, n);
            }
            time += FRAME_MS;
        }
        (Outcome::Continue, max_ticks)
    }

    #[test]
    fn walking_into_the_last_coin_wins() {
        let mut game = Game::new();
        game.set_up_level(walkable_level()).unwrap();
        game.on_key_down(Key::Right);

        let (outcome, ticks) = run_until_terminal(&mut game, 300);
        assert_eq!(outcome, Outcome::Victorious);
        assert!(ticks < 100, "took {ticks} ticks");
        assert!(!game.running());
        assert!(game.level().is_none());
        assert!(game.player().is_none());
    }

    #[test]
    fn first_tick_has_zero_interval() {
        let mut game = Game::new();
        game.set_up_level(walkable_level()).unwrap();
        game.on_key_down(Key::Right);

        let before = game.player().unwrap().rect;
        assert_eq!(game.tick(5_000.0), Outcome::Continue);
        assert_eq!(game.player().unwrap().rect, before);

        // The second tick measures from the first timestamp and moves.
        assert_eq!(game.tick(5_000.0 + FRAME_MS), Outcome::Continue);
        assert!(game.player().unwrap().rect.left > before.left);
    }

    #[test]
    fn walking_into_lava_defeats() {
        // Lava between the player and the coin, so death comes first.
        let mut level = walkable_level();
        level.add_static_obstacle((4, 6), true, false, "red");
        let mut game = Game::new();
        game.set_up_level(level).unwrap();
        game.on_key_down(Key::Right);

        let (outcome, _) = run_until_terminal(&mut game, 300);
        assert_eq!(outcome, Outcome::Defeated(Defeat::DeadlyContact));
        assert!(!game.running());
    }

    #[test]
    fn falling_off_the_board_defeats() {
        let mut level = Level::new(10, 10);
        level.add_static_obstacle((9, 0), false, true, "yellow");
        let mut game = Game::new();
        game.set_up_level(level).unwrap();

        let (outcome, _) = run_until_terminal(&mut game, 10_000);
        assert_eq!(outcome, Outcome::Defeated(Defeat::FellOffMap));
    }

    #[test]
    fn keys_are_ignored_when_not_running() {
        let mut game = Game::new();
        game.on_key_down(Key::Right);
        assert!(game.player().is_none());

        game.set_up_level(walkable_level()).unwrap();
        game.tear_down_level();
        game.on_key_down(Key::Right);

        // A fresh level starts with no held keys.
        game.set_up_level(walkable_level()).unwrap();
        assert!(!game.player().unwrap().held(Key::Right));
    }

    #[test]
    fn ticks_after_termination_are_ignored() {
        let mut game = Game::new();
        game.set_up_level(walkable_level()).unwrap();
        game.on_key_down(Key::Right);
        let (outcome, _) = run_until_terminal(&mut game, 300);
        assert_eq!(outcome, Outcome::Victorious);

        assert_eq!(game.tick(1_000_000.0), Outcome::Continue);
        assert!(game.level().is_none());
    }

    #[test]
    fn setup_replaces_any_previous_level() {
        let mut game = Game::new();
        game.set_up_level(walkable_level()).unwrap();

        let mut other = Level::new(10, 10);
        other.add_static_obstacle((1, 1), false, true, "yellow");
        other.add_dynamic_obstacle((3, 3), MoveKind::Vert, true, false, "red", None);
        game.set_up_level(other).unwrap();

        assert!(game.running());
        assert_eq!(game.level().unwrap().coin_count(), 1);
    }

    #[test]
    fn spawning_on_lava_is_a_setup_error() {
        let mut level = walkable_level();
        // Deadly block overlapping the start cell.
        level.add_static_obstacle((2, 6), true, false, "red");
        let mut game = Game::new();
        assert_eq!(
            game.set_up_level(level),
            Err(Signal::Dead(Defeat::DeadlyContact))
        );
        assert!(!game.running());
    }
}
