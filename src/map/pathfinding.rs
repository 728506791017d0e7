//! Movement-point pathfinding over (hex, facing) states
//!
//! Walking and running move forward into the faced hex, paying the entered
//! hex's terrain cost, and turn one hexside per MP. Jumping ignores terrain
//! and facing and pays one MP per hex.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::map::hex::{HexCoordinates, HexPosition};
use crate::map::path::PathSegment;

/// MP spent turning one hexside
const TURN_COST: u32 = 1;

/// Node in the open set
#[derive(Debug, Clone)]
struct PathNode {
    position: HexPosition,
    cost: u32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.cost == other.cost
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best known cost and predecessor per state
type Explored = HashMap<HexPosition, (u32, Option<HexPosition>)>;

/// States one step away from `position`, with their step cost
fn successors<F>(position: HexPosition, enter_cost: &F) -> Vec<(HexPosition, u32)>
where
    F: Fn(HexCoordinates) -> Option<u32>,
{
    let mut next = vec![
        (position.with_facing(position.facing.rotate(1)), TURN_COST),
        (position.with_facing(position.facing.rotate(-1)), TURN_COST),
    ];

    let ahead = position.coordinates.neighbor(position.facing);
    if let Some(cost) = enter_cost(ahead) {
        next.push((HexPosition::new(ahead, position.facing), cost));
    }

    next
}

/// Dijkstra from `start`, bounded by `budget`; stops early once `goal` is settled
fn explore<F>(
    start: HexPosition,
    budget: u32,
    goal: Option<HexPosition>,
    enter_cost: &F,
) -> Explored
where
    F: Fn(HexCoordinates) -> Option<u32>,
{
    let mut open_set = BinaryHeap::new();
    let mut explored: Explored = HashMap::new();

    explored.insert(start, (0, None));
    open_set.push(PathNode {
        position: start,
        cost: 0,
    });

    while let Some(current) = open_set.pop() {
        if Some(current.position) == goal {
            break;
        }

        let best = explored.get(&current.position).map(|(c, _)| *c).unwrap_or(u32::MAX);
        if current.cost > best {
            continue; // Stale entry
        }

        for (next, step) in successors(current.position, enter_cost) {
            let tentative = current.cost + step;
            if tentative > budget {
                continue;
            }

            let known = explored.get(&next).map(|(c, _)| *c).unwrap_or(u32::MAX);
            if tentative < known {
                explored.insert(next, (tentative, Some(current.position)));
                open_set.push(PathNode {
                    position: next,
                    cost: tentative,
                });
            }
        }
    }

    explored
}

/// All hexes other than the start reachable within `budget`, with their
/// cheapest cost, sorted by coordinate
///
/// `enter_cost` returns `None` for hexes that cannot be entered.
pub fn reachable_hexes<F>(
    start: HexPosition,
    budget: u32,
    enter_cost: F,
) -> Vec<(HexCoordinates, u32)>
where
    F: Fn(HexCoordinates) -> Option<u32>,
{
    let explored = explore(start, budget, None, &enter_cost);

    let mut cheapest: HashMap<HexCoordinates, u32> = HashMap::new();
    for (position, (cost, _)) in &explored {
        if position.coordinates == start.coordinates {
            continue;
        }
        let entry = cheapest.entry(position.coordinates).or_insert(*cost);
        *entry = (*entry).min(*cost);
    }

    let mut result: Vec<(HexCoordinates, u32)> = cheapest.into_iter().collect();
    result.sort();
    result
}

/// Cheapest walking path from `start` to `goal` (hex and facing) within `budget`
///
/// Returns None if the goal cannot be reached. An empty path means start
/// and goal are the same position.
pub fn find_path<F>(
    start: HexPosition,
    goal: HexPosition,
    budget: u32,
    enter_cost: F,
) -> Option<Vec<PathSegment>>
where
    F: Fn(HexCoordinates) -> Option<u32>,
{
    if start == goal {
        return Some(Vec::new());
    }

    let explored = explore(start, budget, Some(goal), &enter_cost);
    explored.get(&goal)?;
    Some(reconstruct_path(&explored, goal))
}

/// Rebuild segments by walking predecessors back from `goal`
fn reconstruct_path(explored: &Explored, goal: HexPosition) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = goal;

    while let Some(&(cost, Some(previous))) = explored.get(&current) {
        let previous_cost = explored.get(&previous).map(|(c, _)| *c).unwrap_or(0);
        segments.push(PathSegment::new(previous, current, cost - previous_cost));
        current = previous;
    }

    segments.reverse();
    segments
}

/// Straight-line jump from `start` to `goal`
///
/// Costs one MP per hex regardless of terrain; the final facing is free.
/// `can_land` rejects destinations that cannot be occupied.
pub fn jump_path<F>(
    start: HexPosition,
    goal: HexPosition,
    budget: u32,
    can_land: F,
) -> Option<Vec<PathSegment>>
where
    F: Fn(HexCoordinates) -> bool,
{
    let distance = start.coordinates.distance(&goal.coordinates);
    if distance == 0 || distance > budget || !can_land(goal.coordinates) {
        return None;
    }

    let line = start.coordinates.line_to(&goal.coordinates);
    let last = line.len() - 1;
    let segments = line
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let from = HexPosition::new(pair[0], start.facing);
            let to = if i + 1 == last {
                goal
            } else {
                HexPosition::new(pair[1], start.facing)
            };
            PathSegment::new(from, to, 1)
        })
        .collect();

    Some(segments)
}
