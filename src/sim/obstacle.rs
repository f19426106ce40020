//! Static cells and patrolling obstacles.

use glam::Vec2;

use super::border::Borders;
use super::geometry::Rect;

/// Unique obstacle identity within a level. Exemption lists and coin
/// removal refer to obstacles by id rather than by reference.
pub type ObstacleId = u32;

/// Movement rule for a dynamic obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveKind {
    /// Patrols horizontally, reversing on left/right contact.
    Horiz,
    /// Patrols vertically, reversing on top/bottom contact.
    Vert,
    /// Falls until bottom contact, then teleports back to its spawn cell.
    Drip,
    /// Never moves on its own.
    #[default]
    Fixed,
}

/// A rectangular obstacle placed on the level grid.
///
/// Static obstacles keep a zero direction and rate. Dynamic ones are
/// advanced once per tick by the level stepper.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub rect: Rect,
    pub deadly: bool,
    pub coin: bool,
    /// Display hint for the rendering collaborator; the sim never reads it.
    pub color: String,
    pub move_kind: MoveKind,
    /// Current patrol heading. Recomputed from scratch on each contact as
    /// the vector sum of per-side reversal contributions, so simultaneous
    /// opposite contacts cancel to zero.
    pub direction: Vec2,
    /// Per-tick displacement scale, elementwise.
    pub rate: Vec2,
    /// Spawn rectangle; drip obstacles teleport back to it.
    spawn: Rect,
    /// Whether the level stepper advances this obstacle each tick.
    dynamic: bool,
}

impl Obstacle {
    pub(crate) fn new_static(
        id: ObstacleId,
        rect: Rect,
        deadly: bool,
        coin: bool,
        color: &str,
    ) -> Self {
        Self {
            id,
            rect,
            deadly,
            coin,
            color: color.to_string(),
            move_kind: MoveKind::Fixed,
            direction: Vec2::ZERO,
            rate: Vec2::ZERO,
            spawn: rect,
            dynamic: false,
        }
    }

    pub(crate) fn new_dynamic(
        id: ObstacleId,
        rect: Rect,
        move_kind: MoveKind,
        deadly: bool,
        coin: bool,
        color: &str,
        rate: Vec2,
    ) -> Self {
        let direction = match move_kind {
            MoveKind::Horiz => Vec2::new(-1.0, 0.0),
            MoveKind::Vert | MoveKind::Drip => Vec2::new(0.0, 1.0),
            MoveKind::Fixed => Vec2::ZERO,
        };
        Self {
            id,
            rect,
            deadly,
            coin,
            color: color.to_string(),
            move_kind,
            direction,
            rate,
            spawn: rect,
            dynamic: true,
        }
    }

    /// Whether the level stepper advances this obstacle each tick.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// The rectangle this obstacle spawned with.
    pub fn spawn_rect(&self) -> Rect {
        self.spawn
    }

    /// React to this tick's border contacts. Returns whether the obstacle
    /// should still be displaced this tick (drip suppresses its move on the
    /// reset tick).
    pub fn patrol_update(&mut self, borders: Borders) -> bool {
        match self.move_kind {
            MoveKind::Horiz => {
                if borders.left || borders.right {
                    let mut next = Vec2::ZERO;
                    if borders.left {
                        next += Vec2::new(1.0, 0.0);
                    }
                    if borders.right {
                        next += Vec2::new(-1.0, 0.0);
                    }
                    self.direction = next;
                }
                true
            }
            MoveKind::Vert => {
                if borders.top || borders.bottom {
                    let mut next = Vec2::ZERO;
                    if borders.top {
                        next += Vec2::new(0.0, 1.0);
                    }
                    if borders.bottom {
                        next += Vec2::new(0.0, -1.0);
                    }
                    self.direction = next;
                }
                true
            }
            MoveKind::Drip => {
                if borders.bottom {
                    self.rect = self.spawn;
                    false
                } else {
                    true
                }
            }
            MoveKind::Fixed => true,
        }
    }

    /// Apply one tick of patrol displacement.
    pub(crate) fn advance(&mut self) {
        self.rect.left += self.direction.x * self.rate.x;
        self.rect.top += self.direction.y * self.rate.y;
    }
}
