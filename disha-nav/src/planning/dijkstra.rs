//! Dijkstra's shortest path with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Node, NodeKind};

/// Relative tolerance under which two path costs count as equal.
pub const COST_EPSILON: f32 = 1e-4;

/// Whether two costs are equal within [`COST_EPSILON`].
#[inline]
pub fn costs_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= COST_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// State for Dijkstra's algorithm priority queue.
#[derive(Clone, Copy, Debug)]
pub struct DijkstraState {
    /// Current path cost (distance).
    pub cost: f32,
    /// Current node index.
    pub node: usize,
    /// Label version this entry was pushed for; older entries are stale.
    stamp: u32,
}

impl PartialEq for DijkstraState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.stamp.cmp(&self.stamp))
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a Dijkstra search.
#[derive(Clone, Debug)]
pub struct DijkstraResult {
    /// Sequence of node indices from start to goal.
    pub path: Vec<usize>,
    /// Total path cost.
    pub distance: f32,
    /// Door nodes strictly between start and goal.
    pub door_crossings: usize,
}

/// Best known way to reach a node.
#[derive(Clone, Copy, Debug)]
struct Label {
    cost: f32,
    doors: usize,
    prev: Option<usize>,
}

/// Find the lowest-cost path using Dijkstra's algorithm.
///
/// Among paths of equal cost the one with fewer door nodes wins, then the
/// one whose sequence of node ids is lexicographically smaller. Labels are
/// refined whenever a better tie-break arrives, and the search runs until
/// the frontier is strictly costlier than the goal.
///
/// # Arguments
/// * `edges` - Adjacency list: edges[i] = [(neighbor_idx, weight), ...]
/// * `nodes` - Node arena (ids and kinds for tie-breaking)
/// * `start` - Start node index
/// * `goal` - Goal node index
///
/// # Returns
/// DijkstraResult with path and cost, or None if no path exists.
pub fn dijkstra(
    edges: &[Vec<(usize, f32)>],
    nodes: &[Node],
    start: usize,
    goal: usize,
) -> Option<DijkstraResult> {
    let n = edges.len();

    if n == 0 || start >= n || goal >= n || nodes.len() != n {
        return None;
    }

    // Handle same start and goal
    if start == goal {
        return Some(DijkstraResult {
            path: vec![start],
            distance: 0.0,
            door_crossings: 0,
        });
    }

    let is_door = |idx: usize| usize::from(nodes[idx].kind == NodeKind::Door);

    let mut labels: Vec<Option<Label>> = vec![None; n];
    let mut stamps: Vec<u32> = vec![0; n];
    labels[start] = Some(Label {
        cost: 0.0,
        doors: is_door(start),
        prev: None,
    });

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0.0,
        node: start,
        stamp: 0,
    });

    let mut goal_cost: Option<f32> = None;

    while let Some(DijkstraState { cost, node, stamp }) = heap.pop() {
        // Superseded by a better label
        if stamp != stamps[node] {
            continue;
        }

        if let Some(best) = goal_cost
            && cost > best
            && !costs_equal(cost, best)
        {
            break;
        }

        if node == goal {
            goal_cost = Some(cost);
            continue;
        }

        let Some(label) = labels[node] else {
            continue;
        };

        for &(neighbor, weight) in &edges[node] {
            if neighbor == start {
                continue;
            }

            let candidate = Label {
                cost: label.cost + weight,
                doors: label.doors + is_door(neighbor),
                prev: Some(node),
            };

            let improves = match labels[neighbor] {
                None => true,
                Some(current) => {
                    compare(&candidate, &current, neighbor, &labels, nodes) == Ordering::Less
                }
            };

            if improves {
                labels[neighbor] = Some(candidate);
                stamps[neighbor] = stamps[neighbor].wrapping_add(1);
                heap.push(DijkstraState {
                    cost: candidate.cost,
                    node: neighbor,
                    stamp: stamps[neighbor],
                });
            }
        }
    }

    let goal_label = labels[goal]?;
    let path = trace(&labels, goal)?;

    let door_crossings = path[1..path.len() - 1]
        .iter()
        .map(|&i| is_door(i))
        .sum();

    Some(DijkstraResult {
        path,
        distance: goal_label.cost,
        door_crossings,
    })
}

/// Order two labels for the same node.
fn compare(
    candidate: &Label,
    current: &Label,
    node: usize,
    labels: &[Option<Label>],
    nodes: &[Node],
) -> Ordering {
    if !costs_equal(candidate.cost, current.cost) {
        return candidate.cost.total_cmp(&current.cost);
    }

    match candidate.doors.cmp(&current.doors) {
        Ordering::Equal => {}
        other => return other,
    }

    let Some(candidate_prev) = candidate.prev else {
        return Ordering::Greater;
    };

    // Prefix through the candidate's predecessor; a path that already
    // visits the node would form a cycle.
    let Some(candidate_path) = trace(labels, candidate_prev) else {
        return Ordering::Greater;
    };
    if candidate_path.contains(&node) {
        return Ordering::Greater;
    }
    let Some(current_path) = trace(labels, node) else {
        return Ordering::Less;
    };

    let ids = |path: &[usize]| -> Vec<&str> { path.iter().map(|&i| nodes[i].id.as_str()).collect() };
    let mut candidate_ids = ids(&candidate_path);
    candidate_ids.push(nodes[node].id.as_str());

    candidate_ids.cmp(&ids(&current_path))
}

/// Follow predecessor links back to the start.
///
/// Returns None if the links loop (bounded by the node count).
fn trace(labels: &[Option<Label>], end: usize) -> Option<Vec<usize>> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(prev) = labels[current]?.prev {
        if path.len() > labels.len() {
            return None;
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    Some(path)
}
