//! Hex coordinate system for battle maps
//!
//! Maps use 1-based offset coordinates `(q, r)` on flat-topped hexes, where
//! `q` is the column and `r` the row. Distance, neighbours and lines are
//! computed in cube space. Screen space is y-down, so a positive bearing
//! turns clockwise.

use serde::{Deserialize, Serialize};

/// Tolerance for hexes whose bearing falls exactly on an arc boundary
const ARC_EPSILON: f64 = 1e-6;

/// Offset hex coordinate on the battle map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoordinates {
    pub q: i32,
    pub r: i32,
}

impl HexCoordinates {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinates `(x, z)`; y is implied as `-x - z`
    fn to_cube(self) -> (i32, i32) {
        let x = self.q;
        let z = self.r - (self.q - (self.q & 1)) / 2;
        (x, z)
    }

    fn from_cube(x: i32, z: i32) -> Self {
        Self::new(x, z + (x - (x & 1)) / 2)
    }

    /// Number of hex steps between two coordinates
    pub fn distance(&self, other: &Self) -> u32 {
        let (ax, az) = self.to_cube();
        let (bx, bz) = other.to_cube();
        let dx = (ax - bx).abs();
        let dz = (az - bz).abs();
        let dy = ((-ax - az) - (-bx - bz)).abs();
        ((dx + dy + dz) / 2) as u32
    }

    /// Adjacent hex in the given direction
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        let (x, z) = self.to_cube();
        let (dx, dz) = direction.cube_offset();
        Self::from_cube(x + dx, z + dz)
    }

    /// Get all 6 neighboring hex coordinates, in direction order
    pub fn neighbors(&self) -> [HexCoordinates; 6] {
        HexDirection::all().map(|d| self.neighbor(d))
    }

    /// Centre of the hex in screen space (unit hex size, y down)
    pub fn center(&self) -> (f64, f64) {
        let (x, z) = self.to_cube();
        let px = 1.5 * x as f64;
        let py = 3f64.sqrt() * (z as f64 + x as f64 / 2.0);
        (px, py)
    }

    /// Bearing from this hex to another in degrees, 0 = east, clockwise
    pub fn bearing_to(&self, other: &Self) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (by - ay).atan2(bx - ax).to_degrees()
    }

    /// Get hex coordinates in a line from self to other (inclusive)
    pub fn line_to(&self, other: &Self) -> Vec<HexCoordinates> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        let (ax, az) = self.to_cube();
        let (bx, bz) = other.to_cube();
        // Nudge off hex edges so ties round consistently
        let (ax, az) = (ax as f64 + 1e-6, az as f64 - 2e-6);
        let (bx, bz) = (bx as f64 + 1e-6, bz as f64 - 2e-6);

        let mut results = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let x = ax + (bx - ax) * t;
            let z = az + (bz - az) * t;
            results.push(Self::round(x, z));
        }
        results
    }

    /// Round fractional cube coordinates to the nearest hex
    fn round(x: f64, z: f64) -> Self {
        let y = -x - z;
        let mut rx = x.round();
        let ry = y.round();
        let mut rz = z.round();

        let x_diff = (rx - x).abs();
        let y_diff = (ry - y).abs();
        let z_diff = (rz - z).abs();

        if x_diff > y_diff && x_diff > z_diff {
            rx = -ry - rz;
        } else if z_diff > y_diff {
            rz = -rx - ry;
        }

        Self::from_cube(rx as i32, rz as i32)
    }

    /// Get all hexes within range (inclusive), unbounded by any map
    pub fn hexes_in_range(&self, range: u32) -> Vec<HexCoordinates> {
        let range = range as i32;
        let (cx, cz) = self.to_cube();
        let mut results = Vec::new();
        for dx in -range..=range {
            for dz in (-range).max(-dx - range)..=range.min(-dx + range) {
                results.push(Self::from_cube(cx + dx, cz + dz));
            }
        }
        results
    }
}

/// Facing of a unit; flat-topped hexes have a hexside in each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    Top,
    TopRight,
    BottomRight,
    Bottom,
    BottomLeft,
    TopLeft,
}

impl HexDirection {
    /// All directions, clockwise from Top
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::Top,
            HexDirection::TopRight,
            HexDirection::BottomRight,
            HexDirection::Bottom,
            HexDirection::BottomLeft,
            HexDirection::TopLeft,
        ]
    }

    pub fn index(&self) -> i32 {
        *self as i32
    }

    /// Direction from an index; wraps around
    pub fn from_index(index: i32) -> Self {
        Self::all()[index.rem_euclid(6) as usize]
    }

    /// Rotate by hexsides, positive = clockwise
    pub fn rotate(&self, steps: i32) -> Self {
        Self::from_index(self.index() + steps)
    }

    pub fn opposite(&self) -> Self {
        self.rotate(3)
    }

    /// Hexside turns needed to go from one facing to another
    pub fn turns_to(&self, other: HexDirection) -> u32 {
        let diff = (other.index() - self.index()).rem_euclid(6);
        diff.min(6 - diff) as u32
    }

    /// Screen-space bearing of this facing in degrees
    pub fn angle_degrees(&self) -> f64 {
        -90.0 + 60.0 * self.index() as f64
    }

    /// Facing whose bearing is closest to the given one
    pub fn closest_to_bearing(bearing: f64) -> Self {
        let steps = ((bearing + 90.0) / 60.0).round() as i32;
        Self::from_index(steps)
    }

    fn cube_offset(&self) -> (i32, i32) {
        match self {
            HexDirection::Top => (0, -1),
            HexDirection::TopRight => (1, -1),
            HexDirection::BottomRight => (1, 0),
            HexDirection::Bottom => (0, 1),
            HexDirection::BottomLeft => (-1, 1),
            HexDirection::TopLeft => (-1, 0),
        }
    }
}

/// Facing-relative zone a hex falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiringArc {
    Front,
    Left,
    Right,
    Rear,
}

/// A hex plus the facing of whatever stands on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexPosition {
    pub coordinates: HexCoordinates,
    pub facing: HexDirection,
}

impl HexPosition {
    pub fn new(coordinates: HexCoordinates, facing: HexDirection) -> Self {
        Self {
            coordinates,
            facing,
        }
    }

    pub fn with_facing(&self, facing: HexDirection) -> Self {
        Self::new(self.coordinates, facing)
    }

    /// Arc of `target` relative to this position's facing
    ///
    /// Front covers 60 degrees either side of the facing, the sides run to
    /// 120 degrees and everything further round is rear. The own hex is Front.
    pub fn arc_to(&self, target: HexCoordinates) -> FiringArc {
        if target == self.coordinates {
            return FiringArc::Front;
        }

        let relative = normalize_degrees(
            self.coordinates.bearing_to(&target) - self.facing.angle_degrees(),
        );
        let magnitude = relative.abs();

        if magnitude <= 60.0 + ARC_EPSILON {
            FiringArc::Front
        } else if magnitude > 120.0 + ARC_EPSILON {
            FiringArc::Rear
        } else if relative > 0.0 {
            FiringArc::Right
        } else {
            FiringArc::Left
        }
    }
}

/// Normalize an angle into (-180, 180]
fn normalize_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}
