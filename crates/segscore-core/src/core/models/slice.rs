use super::structure::Structure;
use crate::core::geometry::Polygon;
use std::collections::HashMap;

/// Distinguishes the two contour corpora attached to a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContourSource {
    /// Expert ground-truth contours.
    Truth,
    /// Submitted solution contours.
    Solution,
}

/// One 2-D cross-section within a scan, addressed by 1-based ordinal.
///
/// A slice holds two mappings from structure to an ordered contour list,
/// one per [`ContourSource`]. A structure with no contours on a slice is a
/// normal, expected data state, not an error.
#[derive(Debug, Clone)]
pub struct Slice {
    ordinal: usize,
    truth: HashMap<Structure, Vec<Polygon>>,
    solution: HashMap<Structure, Vec<Polygon>>,
}

impl Slice {
    pub(crate) fn new(ordinal: usize) -> Self {
        Self {
            ordinal,
            truth: HashMap::new(),
            solution: HashMap::new(),
        }
    }

    /// The 1-based position of this slice within its scan.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The contours recorded for a structure from the given source, in
    /// input order. Empty when the structure is absent on this slice.
    pub fn contours(&self, source: ContourSource, structure: Structure) -> &[Polygon] {
        self.map(source)
            .get(&structure)
            .map_or(&[], Vec::as_slice)
    }

    /// Appends a contour for a structure from the given source.
    pub fn add_contour(&mut self, source: ContourSource, structure: Structure, polygon: Polygon) {
        self.map_mut(source)
            .entry(structure)
            .or_default()
            .push(polygon);
    }

    fn map(&self, source: ContourSource) -> &HashMap<Structure, Vec<Polygon>> {
        match source {
            ContourSource::Truth => &self.truth,
            ContourSource::Solution => &self.solution,
        }
    }

    fn map_mut(&mut self, source: ContourSource) -> &mut HashMap<Structure, Vec<Polygon>> {
        match source {
            ContourSource::Truth => &mut self.truth,
            ContourSource::Solution => &mut self.solution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn absent_structure_yields_an_empty_contour_list() {
        let slice = Slice::new(1);
        assert!(slice
            .contours(ContourSource::Truth, Structure::Tumor)
            .is_empty());
    }

    #[test]
    fn contours_are_kept_per_source_in_input_order() {
        let mut slice = Slice::new(3);
        slice.add_contour(ContourSource::Truth, Structure::Tumor, triangle());
        slice.add_contour(ContourSource::Truth, Structure::Tumor, triangle());
        slice.add_contour(ContourSource::Solution, Structure::Tumor, triangle());

        assert_eq!(slice.contours(ContourSource::Truth, Structure::Tumor).len(), 2);
        assert_eq!(
            slice.contours(ContourSource::Solution, Structure::Tumor).len(),
            1
        );
        assert!(slice
            .contours(ContourSource::Solution, Structure::Aorta)
            .is_empty());
    }
}
