//! # Segscore Core Library
//!
//! A library for scoring automated medical-image segmentation output against
//! expert ground truth across 3-D stacks of CT slices, producing a single
//! weighted F-score for a competitive-evaluation setting.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless region algebra over
//!   slice contours (`geometry`), the domain model for scans, slices, and the
//!   structure catalog (`models`), and the record-stream parser (`io`).
//!
//! - **[`engine`]: The Logic Core.** Computes the per-slice, per-scan, and
//!   corpus-level overlap metrics (TP/FP/FN areas and F-scores) and defines
//!   the run configuration and error surface.
//!
//! - **[`workflows`]: The Public API.** Ties the `engine` and `core` together
//!   to execute a complete evaluation (load, score, aggregate) and to write
//!   the result and diagnostic artifacts.

pub mod core;
pub mod engine;
pub mod workflows;
