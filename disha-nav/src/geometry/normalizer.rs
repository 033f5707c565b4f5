//! Geometry normalizer: floor-plan primitives to navigation anchors.

use std::collections::{HashMap, HashSet};

use crate::config::GeometryConfig;
use crate::core::{Point2D, Segment2D, polygon};
use crate::error::GeometryError;
use crate::floorplan::{FloorPlan, OpeningKind};
use crate::graph::NodeKind;

use super::anchor::{Anchor, NormalizedGeometry, Passage, RoomOutline, WallSegment};

type Result<T> = std::result::Result<T, GeometryError>;

/// Anchor candidate before merging.
#[derive(Clone, Debug)]
struct Candidate {
    id: String,
    kind: NodeKind,
    position: Point2D,
    passage_width: Option<f32>,
    /// Index into the passage list for door/window candidates.
    passage: Option<usize>,
}

/// Converts a [`FloorPlan`] into [`NormalizedGeometry`].
///
/// Anchors are emitted for every door/window centre, POI, zone, room centre
/// and wall junction. Anchors closer than `min_anchor_separation` are
/// merged, keeping the higher-priority type
/// (door > window > poi > zone > room > junction).
#[derive(Clone, Debug)]
pub struct GeometryNormalizer {
    config: GeometryConfig,
}

impl GeometryNormalizer {
    /// Create a normalizer with the given configuration.
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Validate and normalize a floor plan.
    pub fn normalize(&self, plan: &FloorPlan) -> Result<NormalizedGeometry> {
        let (walls, wall_index) = self.collect_walls(plan)?;
        let used_ids = self.check_node_ids(plan)?;
        let rooms = self.collect_rooms(plan)?;

        let mut passages = Vec::new();
        let mut candidates = Vec::new();

        for (kind, opening) in plan.openings() {
            let passage = self.snap_opening(kind, opening, &walls, &wall_index)?;
            candidates.push(Candidate {
                id: passage.id.clone(),
                kind: match kind {
                    OpeningKind::Door => NodeKind::Door,
                    OpeningKind::Window => NodeKind::Window,
                },
                position: passage.center,
                passage_width: Some(passage.width),
                passage: Some(passages.len()),
            });
            passages.push(passage);
        }

        for poi in &plan.pois {
            check_finite("poi", &poi.id, &[poi.position])?;
            candidates.push(Candidate::point(&poi.id, NodeKind::Poi, poi.position));
        }

        for zone in &plan.zones {
            check_finite("zone", &zone.id, &[zone.position])?;
            candidates.push(Candidate::point(&zone.id, NodeKind::Zone, zone.position));
        }

        for room in &rooms {
            let center = polygon::interior_point(&room.polygon);
            candidates.push(Candidate::point(&room.id, NodeKind::Room, center));
        }

        let mut next_junction = 0usize;
        for position in self.find_junctions(&walls) {
            let id = loop {
                let id = format!("junction-{}", next_junction);
                next_junction += 1;
                if !used_ids.contains(id.as_str()) {
                    break id;
                }
            };
            candidates.push(Candidate::point(&id, NodeKind::Junction, position));
        }

        let candidate_count = candidates.len();
        let (anchors, assignment) = self.merge(candidates.clone());

        for (candidate, anchor) in candidates.iter().zip(&assignment) {
            if let Some(p) = candidate.passage {
                passages[p].anchor = *anchor;
            }
        }

        let mut geometry = NormalizedGeometry {
            anchors,
            walls,
            passages,
            rooms,
            one_way: Vec::new(),
        };

        for rule in &plan.one_way {
            let from = geometry
                .anchor_index(&rule.from)
                .ok_or_else(|| GeometryError::UnknownOneWayAnchor(rule.from.clone()))?;
            let to = geometry
                .anchor_index(&rule.to)
                .ok_or_else(|| GeometryError::UnknownOneWayAnchor(rule.to.clone()))?;
            geometry.one_way.push((from, to));
        }

        tracing::info!(
            "Normalized floor plan: {} anchors ({} merged), {} walls, {} passages, {} rooms",
            geometry.anchors.len(),
            candidate_count - geometry.anchors.len(),
            geometry.walls.len(),
            geometry.passages.len(),
            geometry.rooms.len()
        );

        Ok(geometry)
    }

    /// Validate walls and index them by id.
    fn collect_walls(&self, plan: &FloorPlan) -> Result<(Vec<WallSegment>, HashMap<String, usize>)> {
        let mut walls = Vec::with_capacity(plan.walls.len());
        let mut index = HashMap::with_capacity(plan.walls.len());

        for wall in &plan.walls {
            check_finite("wall", &wall.id, &[wall.start, wall.end])?;
            if index.insert(wall.id.clone(), walls.len()).is_some() {
                return Err(GeometryError::DuplicateId(wall.id.clone()));
            }
            walls.push(WallSegment {
                id: wall.id.clone(),
                segment: Segment2D::new(wall.start, wall.end),
            });
        }

        Ok((walls, index))
    }

    /// Node-producing primitives share one id namespace.
    fn check_node_ids<'a>(&self, plan: &'a FloorPlan) -> Result<HashSet<&'a str>> {
        let ids = plan
            .doors
            .iter()
            .chain(&plan.windows)
            .map(|o| o.id.as_str())
            .chain(plan.rooms.iter().map(|r| r.id.as_str()))
            .chain(plan.pois.iter().map(|p| p.id.as_str()))
            .chain(plan.zones.iter().map(|z| z.id.as_str()));

        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(GeometryError::DuplicateId(id.to_string()));
            }
        }
        Ok(seen)
    }

    fn collect_rooms(&self, plan: &FloorPlan) -> Result<Vec<RoomOutline>> {
        plan.rooms
            .iter()
            .map(|room| {
                if room.polygon.len() < 3 {
                    return Err(GeometryError::DegeneratePolygon {
                        id: room.id.clone(),
                        vertices: room.polygon.len(),
                    });
                }
                check_finite("room", &room.id, &room.polygon)?;
                Ok(RoomOutline {
                    id: room.id.clone(),
                    polygon: room.polygon.clone(),
                })
            })
            .collect()
    }

    /// Resolve the wall reference and project the opening centre onto it.
    fn snap_opening(
        &self,
        kind: OpeningKind,
        opening: &crate::floorplan::Opening,
        walls: &[WallSegment],
        wall_index: &HashMap<String, usize>,
    ) -> Result<Passage> {
        check_finite(kind.name(), &opening.id, &[opening.position])?;

        if !(opening.width.is_finite() && opening.width > 0.0) {
            return Err(GeometryError::InvalidWidth {
                kind: kind.name(),
                id: opening.id.clone(),
                width: opening.width,
            });
        }

        let wall = *wall_index
            .get(&opening.wall)
            .ok_or_else(|| GeometryError::UnknownWall {
                kind: kind.name(),
                id: opening.id.clone(),
                wall: opening.wall.clone(),
            })?;

        let segment = &walls[wall].segment;
        let center = segment.closest_point(opening.position);
        let offset = center.distance(&opening.position);
        if offset > self.config.max_opening_offset {
            return Err(GeometryError::OpeningOffWall {
                kind: kind.name(),
                id: opening.id.clone(),
                wall: opening.wall.clone(),
                offset,
            });
        }

        Ok(Passage {
            id: opening.id.clone(),
            kind,
            wall,
            center,
            width: opening.width,
            anchor: usize::MAX,
        })
    }

    /// Points where two or more walls meet (L/X corners and T joints).
    fn find_junctions(&self, walls: &[WallSegment]) -> Vec<Point2D> {
        let snap = self.config.junction_snap_distance;

        // Cluster endpoints: (first point, sum, count, wall set)
        let mut clusters: Vec<(Point2D, Point2D, usize, Vec<usize>)> = Vec::new();
        for (idx, wall) in walls.iter().enumerate() {
            for p in [wall.segment.start, wall.segment.end] {
                match clusters.iter_mut().find(|c| c.0.distance(&p) <= snap) {
                    Some(cluster) => {
                        cluster.1 = cluster.1 + p;
                        cluster.2 += 1;
                        if !cluster.3.contains(&idx) {
                            cluster.3.push(idx);
                        }
                    }
                    None => clusters.push((p, p, 1, vec![idx])),
                }
            }
        }

        clusters
            .into_iter()
            .filter_map(|(_, sum, count, members)| {
                let center = sum * (1.0 / count as f32);
                let t_joint = members.len() == 1
                    && walls.iter().enumerate().any(|(other, w)| {
                        other != members[0] && w.segment.distance_to_point(center) <= snap
                    });
                (members.len() >= 2 || t_joint).then_some(center)
            })
            .collect()
    }

    /// Greedy merge in priority order. Returns anchors and, for every
    /// candidate, the index of the anchor that represents it.
    fn merge(&self, candidates: Vec<Candidate>) -> (Vec<Anchor>, Vec<usize>) {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            candidates[b]
                .kind
                .priority()
                .cmp(&candidates[a].kind.priority())
                .then(a.cmp(&b))
        });

        let mut anchors: Vec<Anchor> = Vec::new();
        let mut assignment = vec![0usize; candidates.len()];

        for ci in order {
            let c = &candidates[ci];
            let existing = anchors
                .iter()
                .position(|a| a.position.distance(&c.position) < self.config.min_anchor_separation);

            match existing {
                Some(ai) => {
                    tracing::debug!(
                        "Merging {} '{}' into {} '{}'",
                        c.kind.name(),
                        c.id,
                        anchors[ai].kind.name(),
                        anchors[ai].id
                    );
                    anchors[ai].absorbed.push(c.id.clone());
                    assignment[ci] = ai;
                }
                None => {
                    assignment[ci] = anchors.len();
                    anchors.push(Anchor {
                        id: c.id.clone(),
                        kind: c.kind,
                        position: c.position,
                        absorbed: Vec::new(),
                        passage_width: c.passage_width,
                    });
                }
            }
        }

        (anchors, assignment)
    }
}

impl Candidate {
    fn point(id: &str, kind: NodeKind, position: Point2D) -> Self {
        Self {
            id: id.to_string(),
            kind,
            position,
            passage_width: None,
            passage: None,
        }
    }
}

fn check_finite(kind: &'static str, id: &str, points: &[Point2D]) -> Result<()> {
    if points.iter().all(Point2D::is_finite) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCoordinate {
            kind,
            id: id.to_string(),
        })
    }
}
