//! Border detection and collision resolution.
//!
//! The heart of the sim: which faces of a moving rectangle touch which
//! obstacles or the board's outer walls, with optional position correction.
//! Player physics runs this in resolve mode against everything; each
//! patroller runs it read-only with itself and every coin exempted.

use glam::Vec2;

use super::geometry::Rect;
use super::level::Level;
use super::obstacle::ObstacleId;
use super::{Defeat, Signal};
use crate::consts::{BOARD_SPAN, BORDER_TOLERANCE};

/// Set of rectangle faces in contact. Duplicates collapse by construction;
/// order carries no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Borders {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Borders {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    fn merge(&mut self, other: Borders) {
        self.top |= other.top;
        self.bottom |= other.bottom;
        self.left |= other.left;
        self.right |= other.right;
    }
}

/// How a border scan should behave.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderQuery<'a> {
    /// Push the moving rectangle out of any overlap as it is found.
    pub resolve: bool,
    /// Obstacle ids skipped entirely (a patroller's own id plus every coin).
    pub exempt: &'a [ObstacleId],
    /// Treat coin contact like any other contact instead of collecting.
    pub cant_collect: bool,
}

/// Compute which faces of `rect` touch level obstacles or the outer walls.
///
/// The overlap guards are deliberately loose, not exact AABB overlap: an
/// obstacle counts as "roughly above/below" when its horizontal extent falls
/// strictly inside the moving rectangle's extent widened by the obstacle's
/// own width, less a one-unit tolerance. The mirrored guard on the vertical
/// extent gates the left/right checks. Gameplay feel depends on this
/// heuristic; do not tighten it.
///
/// In resolve mode, `rect` is shifted out of each overlap as it is found
/// (later obstacles in the scan see the corrected position) and finally
/// clamped inside the board's left/right walls. Contact with a deadly
/// obstacle aborts the scan with [`Signal::Dead`]. Contact with a coin
/// removes it from the level unless `cant_collect` is set, and a coin's
/// sides are never recorded as borders, so coins never block movement.
pub fn detect_borders(
    rect: &mut Rect,
    level: &mut Level,
    query: BorderQuery,
) -> Result<Borders, Signal> {
    let mut corners = rect.corners();
    let mut all = Borders::default();
    let mut collected: Vec<ObstacleId> = Vec::new();
    let tol = Vec2::new(BORDER_TOLERANCE, BORDER_TOLERANCE);

    for obstacle in level.obstacles() {
        if query.exempt.contains(&obstacle.id) {
            continue;
        }

        let other = obstacle.rect.corners();
        let other_width = obstacle.rect.width;
        let other_height = obstacle.rect.height;
        let mut sides = Borders::default();

        if other.top_left.x > corners.top_left.x - other_width + tol.x
            && other.top_right.x < corners.top_right.x + other_width - tol.x
        {
            if other.bottom_left.y >= corners.top_left.y && other.top_left.y < corners.top_left.y {
                sides.top = true;
                if query.resolve {
                    let diff = other.bottom_left.y - corners.top_left.y;
                    corners.translate(Vec2::new(0.0, diff));
                }
            }

            if other.top_left.y <= corners.bottom_left.y
                && other.bottom_left.y > corners.bottom_left.y
            {
                sides.bottom = true;
                if query.resolve {
                    let diff = other.top_left.y - corners.bottom_left.y;
                    corners.translate(Vec2::new(0.0, diff));
                }
            }
        }

        if other.top_left.y > corners.top_left.y - other_height + tol.y
            && other.bottom_left.y < corners.bottom_left.y + other_height - tol.y
        {
            if other.top_right.x >= corners.top_left.x && other.top_left.x < corners.top_left.x {
                sides.left = true;
                if query.resolve {
                    let diff = other.top_right.x - corners.top_left.x;
                    corners.translate(Vec2::new(diff, 0.0));
                }
            }

            if other.top_left.x <= corners.top_right.x && other.top_left.x > corners.top_left.x {
                sides.right = true;
                if query.resolve {
                    let diff = other.top_left.x - corners.top_right.x;
                    corners.translate(Vec2::new(diff, 0.0));
                }
            }
        }

        if sides.any() && obstacle.deadly {
            return Err(Signal::Dead(Defeat::DeadlyContact));
        }

        if sides.any() && obstacle.coin && !query.cant_collect {
            collected.push(obstacle.id);
        } else {
            all.merge(sides);
        }
    }

    // The board only has side walls; falling past the bottom edge is the
    // player physics' concern.
    if corners.top_left.x <= 0.0 {
        all.left = true;
        if query.resolve {
            corners.translate(Vec2::new(-corners.top_left.x, 0.0));
        }
    }
    if corners.top_right.x >= BOARD_SPAN {
        all.right = true;
        if query.resolve {
            corners.translate(Vec2::new(BOARD_SPAN - corners.top_right.x, 0.0));
        }
    }

    rect.left = corners.top_left.x;
    rect.top = corners.top_left.y;

    for id in collected {
        level.remove_coin(id);
    }

    Ok(all)
}
