// src/dag/mod.rs

//! Job model and static graph views.
//!
//! - [`job`] holds the immutable [`Job`] record and the validated [`JobSet`].
//! - [`graph`] builds a petgraph view of the jobs for cycle detection.
//! - [`render`] turns a [`JobSet`] into a DOT `digraph`.

pub mod graph;
pub mod job;
pub mod render;

pub use job::{Job, JobSet};
pub use render::{render, write_graph};
