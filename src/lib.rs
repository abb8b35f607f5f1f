//! Valkyrie - branching detective story server
//!
//! Serves a YAML-defined story graph, tracks per-player progress and
//! renders story illustrations through the `hires-filter` pipeline.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
