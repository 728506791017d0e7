//! Hex battle map: coordinates, terrain, movement paths and pathfinding

pub mod battle_map;
pub mod hex;
pub mod path;
pub mod pathfinding;
pub mod terrain;

pub use battle_map::{BattleMap, HexGridMap, MapDefinition, TerrainPatch};
pub use hex::{FiringArc, HexCoordinates, HexDirection, HexPosition};
pub use path::{MovementPath, MovementType, PathSegment};
pub use terrain::Terrain;
