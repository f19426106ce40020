//! Level grid, obstacle bookkeeping, and the per-tick stepper.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::border::{BorderQuery, detect_borders};
use super::geometry::Rect;
use super::obstacle::{MoveKind, Obstacle, ObstacleId};
use super::Signal;
use crate::consts::{BOARD_SPAN, COIN_SCALE, PATROL_RATE_SCALE};

/// Grid cell coordinate, column then row. Valid cells lie within
/// `[0, width) x [0, height)`.
pub type GridPos = (i32, i32);

/// A level: grid dimensions, one obstacle per occupied cell, and the
/// player's start cell.
///
/// Obstacles are keyed by the cell they were placed at; patrol movement
/// changes an obstacle's rectangle, never its key. Iteration order is the
/// key order, which keeps every tick deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    width: u32,
    height: u32,
    player_start: GridPos,
    obstacles: BTreeMap<GridPos, Obstacle>,
    next_id: ObstacleId,
}

impl Level {
    /// An empty level with the player start centered.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            player_start: ((width / 2) as i32, (height / 2) as i32),
            obstacles: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Deterministic procedural layout: a gapped floor, a wall column
    /// pinning the left edge, coin-topped platforms, and one patrolling
    /// lava block. Same seed, same level. Needs a board of at least 8x6
    /// cells.
    pub fn from_procedural_layout(width: u32, height: u32, seed: u64) -> Self {
        assert!(width >= 8 && height >= 6, "board too small to generate");

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut level = Level::new(width, height);
        let w = width as i32;
        let h = height as i32;

        // Floor with a gap roughly every few cells.
        let gap_every = rng.random_range(5..8);
        for x in 0..w {
            if x % gap_every != 0 {
                level.add_static_obstacle((x, h - 1), false, false, "white");
            }
        }

        // Wall column on the left edge.
        for y in (h - 5).max(0)..h {
            level.add_static_obstacle((0, y), false, false, "white");
        }

        // Short platforms, then a coin above each so no platform cell can
        // overwrite a coin placed earlier.
        let platforms = rng.random_range(2..=4);
        let mut origins = Vec::with_capacity(platforms as usize);
        for _ in 0..platforms {
            let x = rng.random_range(3..w - 4);
            let y = rng.random_range(2..h - 3);
            origins.push((x, y));
            for dx in 0..3 {
                level.add_static_obstacle((x + dx, y), false, false, "white");
            }
        }
        for (x, y) in origins {
            level.add_static_obstacle((x + 1, y - 1), false, true, "yellow");
        }

        // One patroller on the floor.
        let lava_x = rng.random_range(2..w - 2);
        level.add_dynamic_obstacle((lava_x, h - 2), MoveKind::Horiz, true, false, "red", None);

        log::info!(
            "generated {}x{} layout: {} obstacles, {} coins",
            width,
            height,
            level.obstacle_count(),
            level.coin_count()
        );
        level
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn player_start(&self) -> GridPos {
        self.player_start
    }

    pub fn set_player_start(&mut self, pos: GridPos) {
        debug_assert!(self.contains(pos));
        self.player_start = pos;
    }

    /// Whether a cell coordinate lies on the grid.
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.0 >= 0 && pos.0 < self.width as i32 && pos.1 >= 0 && pos.1 < self.height as i32
    }

    /// Width of one grid cell in percentage units.
    pub fn cell_width(&self) -> f32 {
        BOARD_SPAN / self.width as f32
    }

    /// Height of one grid cell in percentage units.
    pub fn cell_height(&self) -> f32 {
        BOARD_SPAN / self.height as f32
    }

    /// Rectangle covering the given cell.
    pub fn cell_rect(&self, pos: GridPos) -> Rect {
        Rect::new(
            pos.0 as f32 * self.cell_width(),
            pos.1 as f32 * self.cell_height(),
            self.cell_width(),
            self.cell_height(),
        )
    }

    fn alloc_id(&mut self) -> ObstacleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a static obstacle at a grid cell, replacing any obstacle
    /// already there. Coins occupy a shrunken rectangle within their cell.
    pub fn add_static_obstacle(
        &mut self,
        pos: GridPos,
        deadly: bool,
        coin: bool,
        color: &str,
    ) -> ObstacleId {
        debug_assert!(self.contains(pos));
        let mut rect = self.cell_rect(pos);
        if coin {
            rect.scale_about_center(COIN_SCALE);
        }
        let id = self.alloc_id();
        self.obstacles
            .insert(pos, Obstacle::new_static(id, rect, deadly, coin, color));
        id
    }

    /// Place a dynamic obstacle at a grid cell. `rate` defaults to
    /// one-cell-per-2000-ticks on each axis when not given.
    pub fn add_dynamic_obstacle(
        &mut self,
        pos: GridPos,
        move_kind: MoveKind,
        deadly: bool,
        coin: bool,
        color: &str,
        rate: Option<Vec2>,
    ) -> ObstacleId {
        debug_assert!(self.contains(pos));
        let mut rect = self.cell_rect(pos);
        if coin {
            rect.scale_about_center(COIN_SCALE);
        }
        let rate = rate.unwrap_or_else(|| {
            Vec2::new(self.cell_width(), self.cell_height()) * PATROL_RATE_SCALE
        });
        let id = self.alloc_id();
        self.obstacles.insert(
            pos,
            Obstacle::new_dynamic(id, rect, move_kind, deadly, coin, color, rate),
        );
        id
    }

    /// All obstacles, in stable key order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.values()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn coin_count(&self) -> usize {
        self.obstacles.values().filter(|o| o.coin).count()
    }

    /// Ids of every coin still on the board.
    pub fn coin_ids(&self) -> Vec<ObstacleId> {
        self.obstacles
            .values()
            .filter(|o| o.coin)
            .map(|o| o.id)
            .collect()
    }

    /// Permanently delete a collected coin. A no-op for unknown ids.
    pub fn remove_coin(&mut self, id: ObstacleId) {
        let pos = self
            .obstacles
            .iter()
            .find(|(_, o)| o.id == id && o.coin)
            .map(|(pos, _)| *pos);
        if let Some(pos) = pos {
            self.obstacles.remove(&pos);
            log::debug!("coin collected, {} remaining", self.coin_count());
        }
    }

    /// One stepper pass: victory check first, then advance every patroller.
    ///
    /// Victory fires the tick after the last coin disappeared, before any
    /// obstacle moves. Each patroller scans borders read-only with itself
    /// and every coin exempted; a patroller running into a deadly obstacle
    /// it has not exempted still ends the level.
    pub fn step(&mut self, _interval: f32) -> Result<(), Signal> {
        if self.coin_count() == 0 {
            return Err(Signal::Won);
        }

        let patrol: Vec<GridPos> = self
            .obstacles
            .iter()
            .filter(|(_, o)| o.is_dynamic())
            .map(|(pos, _)| *pos)
            .collect();

        for pos in patrol {
            let Some((id, mut rect)) = self.obstacles.get(&pos).map(|o| (o.id, o.rect)) else {
                continue;
            };
            let mut exempt = self.coin_ids();
            exempt.push(id);

            let borders = detect_borders(
                &mut rect,
                self,
                BorderQuery {
                    resolve: false,
                    exempt: &exempt,
                    cant_collect: true,
                },
            )?;

            if let Some(obstacle) = self.obstacles.get_mut(&pos) {
                if obstacle.patrol_update(borders) {
                    obstacle.advance();
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_rect_obstacle(
        &mut self,
        pos: GridPos,
        rect: Rect,
        deadly: bool,
        coin: bool,
    ) -> ObstacleId {
        let id = self.alloc_id();
        self.obstacles
            .insert(pos, Obstacle::new_static(id, rect, deadly, coin, "white"));
        id
    }
}
