//! ProjectHub domain core.
//!
//! Pure logic shared by the persistence and HTTP layers. Nothing in this
//! crate performs I/O: callers load fresh records, hand them to these
//! functions, and persist the result.

pub mod access;
pub mod dates;
pub mod error;
pub mod membership;
pub mod progress;
pub mod task_state;
pub mod types;
pub mod update;
