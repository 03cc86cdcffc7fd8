//! Catalog cleaning and aggregation.
//!
//! This module takes raw catalog rows, removes known-bad and duplicate
//! entries, filters by name heuristic and price, and computes the
//! per-category frequency and popularity reports.

pub mod cleaning;
pub mod dedupe;
pub mod frequency;
pub mod profiler;
pub mod types;
pub mod utility;
