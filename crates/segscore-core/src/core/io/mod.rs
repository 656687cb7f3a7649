//! # Record I/O
//!
//! Ingestion of the line-oriented truth and solution record streams into
//! the domain model. Loading is fail-fast: the first malformed line aborts
//! the whole load with a diagnostic naming the line number and content;
//! there is no partial or best-effort load.

pub mod records;
