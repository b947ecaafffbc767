//! Project progress aggregation.
//!
//! A project's `progress` is derived: the mean of its tasks' progress values,
//! rounded half-up to the nearest integer, or 0 for a project without tasks.

/// Aggregate written when loading the task set fails.
pub const FALLBACK_PROGRESS: i32 = 0;

/// Compute the aggregate progress for a project from its tasks' progress values.
pub fn aggregate_progress(task_progress: &[i32]) -> i32 {
    if task_progress.is_empty() {
        return 0;
    }
    let sum: i64 = task_progress.iter().map(|&p| i64::from(p)).sum();
    let count = task_progress.len() as i64;
    // Half-up rounding on non-negative integers without going through floats.
    ((2 * sum + count) / (2 * count)) as i32
}

/// Aggregate a loaded task set, substituting [`FALLBACK_PROGRESS`] when
/// loading failed.
///
/// The error is handed back so the caller can log it; it is never propagated.
pub fn aggregate_or_fallback<E>(loaded: Result<Vec<i32>, E>) -> (i32, Option<E>) {
    match loaded {
        Ok(values) => (aggregate_progress(&values), None),
        Err(e) => (FALLBACK_PROGRESS, Some(e)),
    }
}
