//! Board geometry for the dual-grid battlefield.
//!
//! The battlefield is two mirrored 6x7 grids: RED on the left (x: 0-5),
//! BLUE on the right (x: 8-13), rows y: 0-6. The gap between them is
//! bridged by two diagonal crossing points at half-integer coordinates,
//! (6.5, 1.5) and (6.5, 4.5), each linked to four cells on the grids'
//! facing columns.
//!
//! Coordinates are stored as `f64` so the crossing points share the same
//! type as ordinary cells; comparisons go through a small epsilon.

use serde::{Deserialize, Serialize};

use crate::piece::PlayerColor;

/// Tolerance for coordinate comparison.
const EPSILON: f64 = 0.01;

/// The two diagonal crossing points, paired with their four linked cells.
const CROSSINGS: [(Position, [Position; 4]); 2] = [
    (
        Position::new(6.5, 1.5),
        [
            Position::new(5.0, 1.0),
            Position::new(5.0, 2.0),
            Position::new(8.0, 1.0),
            Position::new(8.0, 2.0),
        ],
    ),
    (
        Position::new(6.5, 4.5),
        [
            Position::new(5.0, 4.0),
            Position::new(5.0, 5.0),
            Position::new(8.0, 4.0),
            Position::new(8.0, 5.0),
        ],
    ),
];

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// A point on the battlefield.
///
/// Integer coordinates address grid cells; the two half-integer crossing
/// points are the only valid non-integer positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    /// Column. 0-5 on the RED grid, 8-13 on the BLUE grid, 6.5 at a crossing.
    pub x: f64,
    /// Row. 0-6, or 1.5 / 4.5 at a crossing.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether two positions address the same cell.
    pub fn coincides(&self, other: &Position) -> bool {
        near(self.x, other.x) && near(self.y, other.y)
    }

    /// Whether this position exists on the battlefield.
    pub fn is_valid(&self) -> bool {
        if self.is_crossing() {
            return true;
        }
        if self.y < -EPSILON || self.y > 6.0 + EPSILON {
            return false;
        }
        // Grid cells must sit on integer coordinates.
        if !near(self.x, self.x.round()) || !near(self.y, self.y.round()) {
            return false;
        }
        (self.x > -EPSILON && self.x < 5.0 + EPSILON)
            || (self.x > 8.0 - EPSILON && self.x < 13.0 + EPSILON)
    }

    /// Whether this is one of the two diagonal crossing points.
    pub fn is_crossing(&self) -> bool {
        CROSSINGS.iter().any(|(c, _)| self.coincides(c))
    }

    /// Whether this position lies on the RED grid.
    pub fn is_red_side(&self) -> bool {
        self.x > -EPSILON && self.x < 5.0 + EPSILON
    }

    /// Whether this position lies on the BLUE grid.
    pub fn is_blue_side(&self) -> bool {
        self.x > 8.0 - EPSILON && self.x < 13.0 + EPSILON
    }

    /// Whether this position lies on the given color's grid.
    pub fn is_on_side(&self, color: PlayerColor) -> bool {
        match color {
            PlayerColor::Red => self.is_red_side(),
            PlayerColor::Blue => self.is_blue_side(),
        }
    }

    /// Whether this is the given color's front-line column (x=5 for RED,
    /// x=8 for BLUE). Playable during the game, but barred to setup
    /// placement.
    pub fn is_front_line(&self, color: PlayerColor) -> bool {
        match color {
            PlayerColor::Red => near(self.x, 5.0),
            PlayerColor::Blue => near(self.x, 8.0),
        }
    }

    /// Whether a single move may step from `self` to `to`.
    ///
    /// Legal steps are a unit move along exactly one axis, or a diagonal
    /// step between a crossing point and one of its four linked cells.
    pub fn is_step_to(&self, to: &Position) -> bool {
        let dx = (to.x - self.x).abs();
        let dy = (to.y - self.y).abs();
        if (near(dx, 1.0) && near(dy, 0.0)) || (near(dx, 0.0) && near(dy, 1.0)) {
            return true;
        }
        self.is_crossing_step(to)
    }

    /// Whether the move from `self` to `to` passes through a crossing
    /// point, i.e. one endpoint is a crossing and the other is one of its
    /// linked cells.
    fn is_crossing_step(&self, to: &Position) -> bool {
        for (crossing, links) in &CROSSINGS {
            if self.coincides(crossing) {
                return links.iter().any(|l| to.coincides(l));
            }
            if to.coincides(crossing) {
                return links.iter().any(|l| self.coincides(l));
            }
        }
        false
    }
}
