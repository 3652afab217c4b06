//! Simple-feature validity checks for single polygons.
//!
//! A polygon is valid when all coordinates are finite, every ring is closed
//! with at least four positions and spans an area, no ring crosses itself,
//! rings meet each other at most in isolated points, and every hole lies
//! inside the shell.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line, Polygon};

/// Reason a polygon failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidity {
    NonFiniteCoordinate,
    /// Ring (0 = shell) is open or has fewer than four positions
    DegenerateRing(usize),
    /// All vertices of the ring are collinear
    ZeroArea(usize),
    SelfIntersection(usize),
    RingsCross(usize, usize),
    HoleOutsideShell(usize),
}

/// Check a polygon, reporting the first problem found.
pub fn check_polygon(polygon: &Polygon<f64>) -> Result<(), Invalidity> {
    let rings: Vec<Vec<Coord<f64>>> = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.0.clone())
        .collect();

    for (index, ring) in rings.iter().enumerate() {
        if ring.iter().any(|c| !(c.x.is_finite() && c.y.is_finite())) {
            return Err(Invalidity::NonFiniteCoordinate);
        }
        if ring.len() < 4 || ring.first() != ring.last() {
            return Err(Invalidity::DegenerateRing(index));
        }
        if is_collinear(ring) {
            return Err(Invalidity::ZeroArea(index));
        }
    }

    check_crossings(&rings)?;

    let shell = &rings[0];
    for (index, hole) in rings.iter().enumerate().skip(1) {
        if !hole.iter().any(|c| point_in_ring(*c, shell)) {
            return Err(Invalidity::HoleOutsideShell(index));
        }
    }

    Ok(())
}

/// Whether the polygon passes [`check_polygon`].
pub fn is_valid(polygon: &Polygon<f64>) -> bool {
    check_polygon(polygon).is_ok()
}

fn is_collinear(ring: &[Coord<f64>]) -> bool {
    let origin = ring[0];
    let Some(direction) = ring.iter().find(|c| **c != origin).map(|c| *c - origin) else {
        return true;
    };
    let scale = direction.x.abs().max(direction.y.abs());

    ring.iter().all(|c| {
        let d = *c - origin;
        (direction.x * d.y - direction.y * d.x).abs() <= 1e-12 * scale * scale.max(d.x.abs().max(d.y.abs()))
    })
}

/// Even-odd point-in-ring test (boundary points are unspecified).
pub fn point_in_ring(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    let mut inside = false;
    for w in ring.windows(2) {
        let (a, b) = (w[0], w[1]);
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

struct Segment {
    ring: usize,
    index: usize,
    line: Line<f64>,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

/// Sweep over segments sorted by minimum x, testing only pairs whose
/// bounding boxes overlap.
fn check_crossings(rings: &[Vec<Coord<f64>>]) -> Result<(), Invalidity> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut ring_lengths = Vec::with_capacity(rings.len());

    for (ring_index, ring) in rings.iter().enumerate() {
        let mut count = 0;
        for w in ring.windows(2) {
            if w[0] == w[1] {
                continue;
            }
            segments.push(Segment {
                ring: ring_index,
                index: count,
                line: Line::new(w[0], w[1]),
                min_x: w[0].x.min(w[1].x),
                max_x: w[0].x.max(w[1].x),
                min_y: w[0].y.min(w[1].y),
                max_y: w[0].y.max(w[1].y),
            });
            count += 1;
        }
        ring_lengths.push(count);
    }

    segments.sort_by(|a, b| a.min_x.total_cmp(&b.min_x));

    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if b.min_x > a.max_x {
                break;
            }
            if b.min_y > a.max_y || b.max_y < a.min_y {
                continue;
            }
            let Some(hit) = line_intersection(a.line, b.line) else {
                continue;
            };

            if a.ring == b.ring {
                let n = ring_lengths[a.ring];
                let gap = a.index.abs_diff(b.index);
                let adjacent = gap == 1 || gap == n - 1;
                match hit {
                    LineIntersection::SinglePoint { .. } if adjacent => {}
                    _ => return Err(Invalidity::SelfIntersection(a.ring)),
                }
            } else {
                match hit {
                    LineIntersection::SinglePoint {
                        is_proper: false, ..
                    } => {}
                    _ => return Err(Invalidity::RingsCross(a.ring.min(b.ring), a.ring.max(b.ring))),
                }
            }
        }
    }

    Ok(())
}
