//! Derived-state maintenance run after task mutations.
//!
//! Contains the best-effort project progress aggregation step.

pub mod aggregation;
