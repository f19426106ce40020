//! Text-plan level definitions.
//!
//! A plan is a list of equal-length rows of tile characters plus a legend
//! mapping each character to a kind string: `"player"`, `"wall"`, `"coin"`
//! or `"lava"`, optionally suffixed with a move kind (`"lava-horiz"`,
//! `"coin-vert"`, `"lava-drip"`). Spaces are empty cells. Plans are plain
//! data and serde-deserializable, so hosts can ship them as JSON.
//!
//! A malformed plan is a design/configuration error surfaced here at setup
//! time; the sim never tries to run one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::level::{GridPos, Level};
use crate::sim::obstacle::MoveKind;

/// What is wrong with a plan or its legend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("plan has no rows or an empty first row")]
    EmptyPlan,
    #[error("row {row} is {got} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("tile '{0}' has no legend entry")]
    MissingLegendEntry(char),
    #[error("unknown tile kind '{0}'")]
    UnknownTileKind(String),
    #[error("unknown move kind '{0}'")]
    UnknownMoveKind(String),
    #[error("plan has no player tile")]
    NoPlayerStart,
}

/// A level described as rows of tile characters plus a legend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPlan {
    pub rows: Vec<String>,
    pub legend: HashMap<char, String>,
}

impl LevelPlan {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Level {
    /// Build a level from a text plan. The grid dimensions come from the
    /// plan's row count and row width; the player start from its `player`
    /// tile.
    pub fn from_plan(plan: &LevelPlan) -> Result<Level, PlanError> {
        let height = plan.rows.len();
        if height == 0 || plan.rows[0].is_empty() {
            return Err(PlanError::EmptyPlan);
        }
        let width = plan.rows[0].chars().count();
        for (row, line) in plan.rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(PlanError::RaggedRow {
                    row,
                    got,
                    expected: width,
                });
            }
        }

        let mut level = Level::new(width as u32, height as u32);
        let mut player_start = None;

        for (y, line) in plan.rows.iter().enumerate() {
            for (x, tile) in line.chars().enumerate() {
                if tile == ' ' {
                    continue;
                }
                let entry = plan
                    .legend
                    .get(&tile)
                    .ok_or(PlanError::MissingLegendEntry(tile))?;
                let (kind, move_kind) = split_entry(entry)?;
                let pos: GridPos = (x as i32, y as i32);
                match kind {
                    "player" => player_start = Some(pos),
                    "wall" => place(&mut level, pos, move_kind, false, false, "white"),
                    "coin" => place(&mut level, pos, move_kind, false, true, "yellow"),
                    "lava" => place(&mut level, pos, move_kind, true, false, "red"),
                    other => return Err(PlanError::UnknownTileKind(other.to_string())),
                }
            }
        }

        let start = player_start.ok_or(PlanError::NoPlayerStart)?;
        level.set_player_start(start);
        Ok(level)
    }
}

fn split_entry(entry: &str) -> Result<(&str, Option<MoveKind>), PlanError> {
    match entry.split_once('-') {
        None => Ok((entry, None)),
        Some((kind, move_kind)) => {
            let move_kind = match move_kind {
                "horiz" => MoveKind::Horiz,
                "vert" => MoveKind::Vert,
                "drip" => MoveKind::Drip,
                other => return Err(PlanError::UnknownMoveKind(other.to_string())),
            };
            Ok((kind, Some(move_kind)))
        }
    }
}

fn place(
    level: &mut Level,
    pos: GridPos,
    move_kind: Option<MoveKind>,
    deadly: bool,
    coin: bool,
    color: &str,
) {
    match move_kind {
        Some(kind) => {
            level.add_dynamic_obstacle(pos, kind, deadly, coin, color, None);
        }
        None => {
            level.add_static_obstacle(pos, deadly, coin, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_plan() -> LevelPlan {
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
            legend: [
                ('@', "player"),
                ('o', "coin"),
                ('=', "lava-horiz"),
                ('|', "lava-vert"),
                ('v', "lava-drip"),
                ('x', "wall"),
                ('!', "lava"),
            ]
            .iter()
            .map(|(tile, kind)| (*tile, kind.to_string()))
            .collect(),
        }
    }

    #[test]
    fn classic_plan_parses() {
        let level = Level::from_plan(&classic_plan()).unwrap();
        assert_eq!(level.width(), 20);
        assert_eq!(level.height(), 11);
        assert_eq!(level.player_start(), (3, 6));
        assert_eq!(level.coin_count(), 2);

        // One patroller from the '=' tile, heading left.
        let patrollers: Vec<_> = level.obstacles().filter(|o| o.is_dynamic()).collect();
        assert_eq!(patrollers.len(), 1);
        assert!(patrollers[0].deadly);
        assert_eq!(patrollers[0].move_kind, MoveKind::Horiz);

        // The '!' strip is static lava.
        assert!(
            level
                .obstacles()
                .any(|o| o.deadly && !o.is_dynamic())
        );
    }

    #[test]
    fn missing_legend_entry_is_an_error() {
        let mut plan = classic_plan();
        plan.rows[0] = "z                   ".to_string();
        assert_eq!(
            Level::from_plan(&plan),
            Err(PlanError::MissingLegendEntry('z'))
        );
    }

    #[test]
    fn unknown_tile_kind_is_an_error() {
        let mut plan = classic_plan();
        plan.legend.insert('x', "blob".to_string());
        assert_eq!(
            Level::from_plan(&plan),
            Err(PlanError::UnknownTileKind("blob".to_string()))
        );
    }

    #[test]
    fn unknown_move_kind_is_an_error() {
        let mut plan = classic_plan();
        plan.legend.insert('=', "lava-spin".to_string());
        assert_eq!(
            Level::from_plan(&plan),
            Err(PlanError::UnknownMoveKind("spin".to_string()))
        );
    }

    #[test]
    fn plan_without_player_is_an_error() {
        let plan = LevelPlan {
            rows: vec!["xx".to_string(), "xx".to_string()],
            legend: [('x', "wall".to_string())].into_iter().collect(),
        };
        assert_eq!(Level::from_plan(&plan), Err(PlanError::NoPlayerStart));
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let plan = LevelPlan {
            rows: vec!["x@".to_string(), "x".to_string()],
            legend: [
                ('x', "wall".to_string()),
                ('@', "player".to_string()),
            ]
            .into_iter()
            .collect(),
        };
        assert_eq!(
            Level::from_plan(&plan),
            Err(PlanError::RaggedRow {
                row: 1,
                got: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn empty_plan_is_an_error() {
        let plan = LevelPlan {
            rows: vec![],
            legend: HashMap::new(),
        };
        assert_eq!(Level::from_plan(&plan), Err(PlanError::EmptyPlan));
    }

    #[test]
    fn plans_round_trip_through_json() {
        let plan = classic_plan();
        let json = serde_json::to_string(&plan).unwrap();
        let parsed = LevelPlan::from_json(&json).unwrap();
        assert_eq!(parsed.rows, plan.rows);
        assert_eq!(parsed.legend, plan.legend);

        let level = Level::from_plan(&parsed).unwrap();
        assert_eq!(level.coin_count(), 2);
    }
}
