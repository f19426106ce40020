//! Player body physics: gravity, jumping, and key-driven movement.

use std::collections::HashSet;

use super::border::{BorderQuery, detect_borders};
use super::geometry::Rect;
use super::level::Level;
use super::{Defeat, Signal};
use crate::consts::{BOARD_SPAN, JUMP_B, PLAYER_SCALE};

/// Named movement keys delivered by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// The player body: one cell wide, two cells tall, shrunk to 90% about its
/// center.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Signed vertical velocity in percent per millisecond; positive moves
    /// the body upward on screen.
    pub y_velocity: f32,
    keys: HashSet<Key>,
}

impl Player {
    /// Spawn the player at the level's start cell and settle it against the
    /// surrounding obstacles with one resolving border scan.
    ///
    /// Fails only when the start cell already touches a deadly obstacle,
    /// which is a level-design error.
    pub fn spawn(level: &mut Level) -> Result<Self, Signal> {
        let cell_width = level.cell_width();
        let cell_height = level.cell_height();
        let (start_x, start_y) = level.player_start();

        let mut rect = Rect::new(
            start_x as f32 * cell_width,
            start_y as f32 * cell_height,
            cell_width,
            cell_height * 2.0,
        );
        rect.scale_about_center(PLAYER_SCALE);

        let mut player = Self {
            rect,
            y_velocity: 0.0,
            keys: HashSet::new(),
        };
        detect_borders(
            &mut player.rect,
            level,
            BorderQuery {
                resolve: true,
                ..Default::default()
            },
        )?;
        Ok(player)
    }

    /// Mark a key as held. Re-pressing a held key is a no-op.
    pub fn key_down(&mut self, key: Key) {
        self.keys.insert(key);
    }

    /// Mark a key as released. Releasing an absent key is a no-op.
    pub fn key_up(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Gravity and initial jump speed for a board `h` cells tall, chosen so
    /// a jump peaks at a height proportional to the jump parameter
    /// regardless of board height. Tunable design constants, not physical
    /// law; preserve the formula for gameplay parity.
    fn jump_constants(h: f32) -> (f32, f32) {
        let b = JUMP_B;
        let t = 100.0 * b;
        let a = -(200.0 * b) / (h * t * t);
        let v0 = (200.0 * b - a * t * t * h) / (2.0 * h * t);
        (a, v0)
    }

    /// One physics tick: resolve borders, integrate vertical velocity,
    /// apply key-driven horizontal movement, and detect falling off the
    /// map. `interval` is the elapsed time in milliseconds.
    pub fn step(&mut self, level: &mut Level, interval: f32) -> Result<(), Signal> {
        let borders = detect_borders(
            &mut self.rect,
            level,
            BorderQuery {
                resolve: true,
                ..Default::default()
            },
        )?;

        let (a, v0) = Self::jump_constants(level.height() as f32);

        if borders.bottom {
            self.y_velocity = 0.0;
            // The impulse fires every grounded tick the key is held, not
            // edge-triggered.
            if self.held(Key::Jump) {
                self.y_velocity = v0;
            }
        } else {
            if borders.top {
                self.y_velocity = 0.0;
            }
            self.y_velocity += a * interval;
        }

        self.rect.top -= self.y_velocity * interval;

        // Both direction keys held cancel out.
        let mut xmove = 0.0;
        if self.held(Key::Left) != self.held(Key::Right) {
            if self.held(Key::Left) && !borders.left {
                xmove = -1.0;
            }
            if self.held(Key::Right) && !borders.right {
                xmove = 1.0;
            }
        }
        let vx = (0.1 * 3.0 * JUMP_B) / level.width() as f32;
        self.rect.left += xmove * interval * vx;

        if self.rect.top > BOARD_SPAN {
            return Err(Signal::Dead(Defeat::FellOffMap));
        }

        Ok(())
    }
}
