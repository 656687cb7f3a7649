use super::{GeometryError, Polygon, TOLERANCE};

/// An area-queryable region of the plane.
///
/// A region is the intersection of one or more *groups*, each group being
/// the union of a polygon list. [`Region::union`] builds a single-group
/// region and [`Region::intersect`] concatenates group lists, deferring the
/// actual measure to [`Region::area`]. Regions do not expose vertices.
///
/// The measure is computed by a slab-decomposition sweep that replaces the
/// boolean area algebra a GUI toolkit would normally supply. Event
/// abscissae are all edge endpoints plus all pairwise proper edge
/// crossings, so inside a slab the active edges span it without crossing.
/// Ordering them by height and accumulating per-polygon even-odd parity
/// (reduced to a covered-polygon count per group) turns each slab into a
/// stack of exact trapezoids, summed wherever every group is covered.
#[derive(Debug, Clone)]
pub struct Region {
    groups: Vec<Group>,
}

#[derive(Debug, Clone, Default)]
struct Group {
    edges: Vec<Edge>,
    polygons: u32,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    poly: u32,
}

impl Edge {
    fn span(&self) -> (f64, f64) {
        if self.x0 < self.x1 {
            (self.x0, self.x1)
        } else {
            (self.x1, self.x0)
        }
    }

    fn y_at(&self, x: f64) -> f64 {
        self.y0 + (self.y1 - self.y0) * (x - self.x0) / (self.x1 - self.x0)
    }
}

impl Region {
    /// A region covering nothing.
    pub fn empty() -> Self {
        Self {
            groups: vec![Group::default()],
        }
    }

    /// The union of a polygon list: the combined area covered by any input
    /// polygon. Overlap is never double-counted, disjoint areas sum, and
    /// duplicate or zero-area polygons do not change the measure.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePolygon`] if any input polygon
    /// has fewer than 3 distinct vertices.
    pub fn union(polygons: &[Polygon]) -> Result<Self, GeometryError> {
        let mut group = Group::default();
        for polygon in polygons {
            polygon.require_closure()?;
            let poly = group.polygons;
            group.edges.extend(polygon.edges().map(|(a, b)| Edge {
                x0: a.x,
                y0: a.y,
                x1: b.x,
                y1: b.y,
                poly,
            }));
            group.polygons += 1;
        }
        Ok(Self {
            groups: vec![group],
        })
    }

    /// The area-accurate geometric intersection of two regions.
    ///
    /// Commutative and lazy: the combined group lists are measured on
    /// demand by [`Region::area`].
    #[must_use]
    pub fn intersect(&self, other: &Region) -> Region {
        let mut groups = self.groups.clone();
        groups.extend(other.groups.iter().cloned());
        Region { groups }
    }

    /// The measure of the region.
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.groups.iter().any(|g| g.edges.is_empty()) {
            return 0.0;
        }
        covered_area(&self.groups)
    }
}

/// One active edge inside a slab: heights at the slab midpoint and both
/// boundaries, plus the group and (globally renumbered) polygon it bounds.
struct ActiveEdge {
    y_mid: f64,
    y_left: f64,
    y_right: f64,
    group: usize,
    poly: usize,
}

fn covered_area(groups: &[Group]) -> f64 {
    struct SweepEdge {
        edge: Edge,
        group: usize,
        poly: usize,
    }

    let mut edges = Vec::new();
    let mut poly_base = 0usize;
    for (group, g) in groups.iter().enumerate() {
        for e in &g.edges {
            // Vertical edges have no x-span and never bound a trapezoid.
            if (e.x0 - e.x1).abs() <= TOLERANCE {
                continue;
            }
            edges.push(SweepEdge {
                edge: *e,
                group,
                poly: poly_base + e.poly as usize,
            });
        }
        poly_base += g.polygons as usize;
    }
    if edges.is_empty() {
        return 0.0;
    }

    let mut events: Vec<f64> = Vec::with_capacity(edges.len() * 2);
    for e in &edges {
        events.push(e.edge.x0);
        events.push(e.edge.x1);
    }
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if let Some(x) = crossing_x(&edges[i].edge, &edges[j].edge) {
                events.push(x);
            }
        }
    }
    events.sort_by(f64::total_cmp);
    events.dedup_by(|a, b| (*a - *b).abs() <= TOLERANCE);

    let mut parity = vec![false; poly_base];
    let mut covered = vec![0u32; groups.len()];
    let mut active: Vec<ActiveEdge> = Vec::new();
    let mut area = 0.0;

    for window in events.windows(2) {
        let (xa, xb) = (window[0], window[1]);
        let width = xb - xa;
        if width <= TOLERANCE {
            continue;
        }
        let xm = 0.5 * (xa + xb);

        active.clear();
        for e in &edges {
            let (lo, hi) = e.edge.span();
            if lo < xm && xm < hi {
                active.push(ActiveEdge {
                    y_mid: e.edge.y_at(xm),
                    y_left: e.edge.y_at(xa),
                    y_right: e.edge.y_at(xb),
                    group: e.group,
                    poly: e.poly,
                });
            }
        }
        active.sort_by(|a, b| a.y_mid.total_cmp(&b.y_mid));

        parity.fill(false);
        covered.fill(0);
        for i in 0..active.len() {
            let e = &active[i];
            parity[e.poly] = !parity[e.poly];
            if parity[e.poly] {
                covered[e.group] += 1;
            } else {
                covered[e.group] -= 1;
            }
            if i + 1 < active.len() && covered.iter().all(|&c| c > 0) {
                let next = &active[i + 1];
                area += 0.5
                    * ((next.y_left - e.y_left) + (next.y_right - e.y_right))
                    * width;
            }
        }
    }
    area
}

/// The abscissa where two edges properly cross, if they do. Crossings at
/// endpoints are already event abscissae and need no extra event.
fn crossing_x(a: &Edge, b: &Edge) -> Option<f64> {
    let d1x = a.x1 - a.x0;
    let d1y = a.y1 - a.y0;
    let d2x = b.x1 - b.x0;
    let d2y = b.y1 - b.y0;
    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() <= TOLERANCE {
        return None;
    }
    let rx = b.x0 - a.x0;
    let ry = b.y0 - a.y0;
    let t = (rx * d2y - ry * d2x) / denom;
    let u = (rx * d1y - ry * d1x) / denom;
    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(a.x0 + t * d1x)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn polygon(coords: &[(f64, f64)]) -> Polygon {
        Polygon::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()).unwrap()
    }

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        polygon(&[(x, y), (x + side, y), (x + side, y + side), (x, y + side)])
    }

    #[test]
    fn union_of_single_polygon_matches_its_area() {
        let p = square(0.0, 0.0, 10.0);
        let region = Region::union(std::slice::from_ref(&p)).unwrap();
        assert_relative_eq!(region.area(), p.area().unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn union_does_not_double_count_duplicates() {
        let p = square(0.0, 0.0, 10.0);
        let region = Region::union(&[p.clone(), p]).unwrap();
        assert_relative_eq!(region.area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn union_of_disjoint_polygons_sums_their_areas() {
        let region = Region::union(&[square(0.0, 0.0, 2.0), square(10.0, 10.0, 3.0)]).unwrap();
        assert_relative_eq!(region.area(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn union_of_overlapping_squares_counts_overlap_once() {
        // Two 10x10 squares sharing a 5x10 strip.
        let region = Region::union(&[square(0.0, 0.0, 10.0), square(5.0, 0.0, 10.0)]).unwrap();
        assert_relative_eq!(region.area(), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn union_ignores_zero_area_polygons() {
        let flat = polygon(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let region = Region::union(&[square(0.0, 0.0, 10.0), flat]).unwrap();
        assert_relative_eq!(region.area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn union_rejects_open_contours() {
        let segment = polygon(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(matches!(
            Region::union(&[segment]),
            Err(GeometryError::DegeneratePolygon { .. })
        ));
    }

    #[test]
    fn empty_region_has_zero_area() {
        assert_relative_eq!(Region::empty().area(), 0.0);
        assert_relative_eq!(Region::union(&[]).unwrap().area(), 0.0);
    }

    #[test]
    fn intersection_with_self_preserves_area() {
        let region = Region::union(&[square(0.0, 0.0, 10.0)]).unwrap();
        assert_relative_eq!(region.intersect(&region).area(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn intersection_with_empty_region_is_empty() {
        let region = Region::union(&[square(0.0, 0.0, 10.0)]).unwrap();
        assert_relative_eq!(region.intersect(&Region::empty()).area(), 0.0);
        assert_relative_eq!(Region::empty().intersect(&region).area(), 0.0);
    }

    #[test]
    fn intersection_of_disjoint_regions_is_empty() {
        let a = Region::union(&[square(0.0, 0.0, 4.0)]).unwrap();
        let b = Region::union(&[square(100.0, 100.0, 4.0)]).unwrap();
        assert_relative_eq!(a.intersect(&b).area(), 0.0);
    }

    #[test]
    fn intersection_of_offset_squares_is_the_shared_strip() {
        let truth = Region::union(&[square(0.0, 0.0, 10.0)]).unwrap();
        let solution = Region::union(&[square(5.0, 0.0, 10.0)]).unwrap();
        assert_relative_eq!(truth.intersect(&solution).area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn intersection_is_commutative() {
        let a = Region::union(&[square(0.0, 0.0, 10.0)]).unwrap();
        let b = Region::union(&[square(3.0, 4.0, 10.0)]).unwrap();
        assert_relative_eq!(
            a.intersect(&b).area(),
            b.intersect(&a).area(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn intersection_with_concave_region_splits_into_pieces() {
        // L-shape covering [0,4]x[0,2] plus [0,2]x[2,4].
        let l_shape = polygon(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]);
        let a = Region::union(&[l_shape]).unwrap();
        let b = Region::union(&[square(1.0, 1.0, 2.0)]).unwrap();
        // [1,3]x[1,2] plus [1,2]x[2,3].
        assert_relative_eq!(a.intersect(&b).area(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_edges_are_split_at_interior_events() {
        // A diamond over a square: every diamond edge crosses a square edge
        // away from any endpoint, clipping a corner triangle of area 8 each.
        let diamond = polygon(&[(5.0, -1.0), (11.0, 5.0), (5.0, 11.0), (-1.0, 5.0)]);
        let a = Region::union(&[square(0.0, 0.0, 10.0)]).unwrap();
        let b = Region::union(&[diamond]).unwrap();
        assert_relative_eq!(a.intersect(&b).area(), 68.0, epsilon = 1e-9);
    }

    #[test]
    fn triangle_clips_a_square_corner() {
        let triangle = polygon(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let a = Region::union(&[triangle]).unwrap();
        let b = Region::union(&[square(1.0, 1.0, 2.0)]).unwrap();
        // The half-plane x + y <= 4 removes the triangle (3,1)-(3,3)-(1,3).
        assert_relative_eq!(a.intersect(&b).area(), 2.0, epsilon = 1e-9);
    }
}
