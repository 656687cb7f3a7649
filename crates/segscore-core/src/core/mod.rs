//! # Core Module
//!
//! Fundamental building blocks for contour scoring: the 2-D region algebra,
//! the scan/slice domain model, and the record-stream parser.
//!
//! The submodules are strictly layered, leaves first:
//!
//! - [`geometry`] - Polygon area and boolean set operations over vector
//!   regions. No dependencies on the rest of the crate.
//! - [`models`] - Scans, slices, the anatomical structure catalog, and the
//!   scan registry. Depends on [`geometry`] for the polygon representation.
//! - [`io`] - Ingestion of the truth/solution text record streams into the
//!   domain model. Depends on [`models`].

pub mod geometry;
pub mod io;
pub mod models;
