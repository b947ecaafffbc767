pub mod auth;
pub mod project;
pub mod task;
