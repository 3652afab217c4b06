//! Geometry repair.
//!
//! Cheap fixes come first: consecutive duplicate vertices are removed and
//! open rings are closed. A polygon that is still invalid afterwards is
//! rebuilt through a boolean union with an empty set, which resolves
//! self-intersections into simple polygons. Rings of the union result that
//! pass through the same vertex twice are split at that vertex.

use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use tracing::debug;

use crate::convert::RawRings;
use crate::validity::{check_polygon, point_in_ring, Invalidity};

/// Outcome of repairing one polygon.
#[derive(Debug)]
pub struct Repaired {
    /// Zero or more polygons covering the input's area
    pub polygons: Vec<Polygon<f64>>,
    /// Whether anything had to be changed
    pub modified: bool,
}

/// Remove consecutive duplicate vertices and close the ring.
///
/// Returns the cleaned ring and whether it differs from the input.
pub fn clean_ring(ring: &[Coord<f64>]) -> (Vec<Coord<f64>>, bool) {
    let mut cleaned: Vec<Coord<f64>> = Vec::with_capacity(ring.len() + 1);
    for coord in ring {
        if cleaned.last() != Some(coord) {
            cleaned.push(*coord);
        }
    }
    if let (Some(first), Some(last)) = (cleaned.first().copied(), cleaned.last()) {
        if first != *last {
            cleaned.push(first);
        }
    }
    let modified = cleaned.as_slice() != ring;
    (cleaned, modified)
}

/// Build a polygon from raw rings, cleaning each ring.
pub fn polygon_from_rings(rings: RawRings) -> (Polygon<f64>, bool) {
    let mut modified = false;
    let mut cleaned = rings.iter().map(|ring| {
        let (ring, changed) = clean_ring(ring);
        modified |= changed;
        LineString::new(ring)
    });

    let exterior = cleaned.next().unwrap_or_else(|| LineString::new(Vec::new()));
    let interiors: Vec<LineString<f64>> = cleaned.collect();
    (Polygon::new(exterior, interiors), modified)
}

/// Rebuild an invalid polygon as a union of simple polygons.
pub fn make_valid(polygon: &Polygon<f64>) -> Vec<Polygon<f64>> {
    let subject = MultiPolygon::new(vec![polygon.clone()]);
    subject.union(&MultiPolygon::new(Vec::new())).0
}

/// Split every ring that revisits a vertex into simple closed cycles.
///
/// Cycles nested an odd number of times inside other cycles of the exterior
/// become holes of the smallest cycle enclosing them; the rest become
/// shells. Interior cycles stay holes. Cycles with fewer than four
/// positions are dropped.
pub fn split_pinched_rings(polygon: &Polygon<f64>) -> Vec<Polygon<f64>> {
    let outer = simple_cycles(&polygon.exterior().0);
    let depths: Vec<usize> = (0..outer.len())
        .map(|i| {
            outer
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && encloses(other, &outer[i]))
                .count()
        })
        .collect();

    let mut shells: Vec<(Vec<Coord<f64>>, Vec<LineString<f64>>)> = Vec::new();
    let mut holes: Vec<Vec<Coord<f64>>> = Vec::new();
    for (cycle, depth) in outer.into_iter().zip(depths) {
        if depth % 2 == 0 {
            shells.push((cycle, Vec::new()));
        } else {
            holes.push(cycle);
        }
    }
    holes.extend(polygon.interiors().iter().flat_map(|ring| simple_cycles(&ring.0)));

    for hole in holes {
        let owner = shells
            .iter_mut()
            .filter(|(shell, _)| encloses(shell, &hole))
            .min_by(|a, b| ring_area(&a.0).total_cmp(&ring_area(&b.0)));
        match owner {
            Some((_, interiors)) => interiors.push(LineString::new(hole)),
            None => debug!(positions = hole.len(), "Dropped hole outside every shell"),
        }
    }

    shells
        .into_iter()
        .map(|(shell, interiors)| Polygon::new(LineString::new(shell), interiors))
        .collect()
}

/// Decompose a closed ring at repeated vertices.
fn simple_cycles(ring: &[Coord<f64>]) -> Vec<Vec<Coord<f64>>> {
    let Some((_, open)) = ring.split_last() else {
        return Vec::new();
    };

    let mut cycles = Vec::new();
    let mut stack: Vec<Coord<f64>> = Vec::with_capacity(open.len() + 1);
    for coord in open {
        match stack.iter().position(|c| c == coord) {
            Some(start) => {
                let mut cycle = stack.split_off(start);
                cycle.push(*coord);
                cycles.push(cycle);
                stack.push(*coord);
            }
            None => stack.push(*coord),
        }
    }
    if let Some(first) = stack.first().copied() {
        stack.push(first);
        cycles.push(stack);
    }

    cycles.retain(|cycle| cycle.len() >= 4);
    cycles
}

fn ring_area(ring: &[Coord<f64>]) -> f64 {
    Polygon::new(LineString::new(ring.to_vec()), Vec::new()).unsigned_area()
}

/// Whether `inner` lies inside the larger ring `outer`, judged by the first
/// vertex of `inner` that is not also a vertex of `outer`.
fn encloses(outer: &[Coord<f64>], inner: &[Coord<f64>]) -> bool {
    if ring_area(outer) <= ring_area(inner) {
        return false;
    }
    inner
        .iter()
        .find(|c| !outer.contains(c))
        .is_some_and(|c| point_in_ring(*c, outer))
}

/// Repair a polygon given as raw rings.
pub fn repair(rings: RawRings) -> Repaired {
    let (polygon, modified) = polygon_from_rings(rings);

    match check_polygon(&polygon) {
        Ok(()) => Repaired {
            polygons: vec![polygon],
            modified,
        },
        // Nothing a union can do with these
        Err(Invalidity::NonFiniteCoordinate) => Repaired {
            polygons: vec![polygon],
            modified,
        },
        Err(reason) => {
            let polygons: Vec<Polygon<f64>> = make_valid(&polygon)
                .into_iter()
                .flat_map(|part| match check_polygon(&part) {
                    Ok(()) => vec![part],
                    Err(_) => split_pinched_rings(&part),
                })
                .collect();
            debug!(?reason, parts = polygons.len(), "Rebuilt invalid polygon");
            Repaired {
                polygons,
                modified: true,
            }
        }
    }
}
