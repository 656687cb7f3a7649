//! # Region Algebra
//!
//! Area and boolean set operations over 2-D vector regions defined by closed
//! polygon contours in image-pixel space.
//!
//! The two building blocks are [`Polygon`], an immutable closed contour with
//! a shoelace-integral area, and [`Region`], an area-queryable set built from
//! polygon lists by union and combined by intersection. Regions never
//! re-serialize to vertices; they only answer area queries, which is all the
//! overlap scorer needs.

mod polygon;
mod region;

pub use polygon::Polygon;
pub use region::Region;

use thiserror::Error;

/// Coordinate tolerance for geometric comparisons.
pub(crate) const TOLERANCE: f64 = 1e-9;

/// Errors related to geometric computations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("polygon has no vertices")]
    EmptyPolygon,

    #[error(
        "degenerate polygon: {distinct} distinct vertices of {total}; \
         at least 3 are required to close a region"
    )]
    DegeneratePolygon { distinct: usize, total: usize },
}
