//! Public API for the hires-filter crate.
//!
//! This module provides the high-level API: [`Stylizer`] builder and
//! [`StylizeError`] unified error type.

mod builder;
mod error;

pub use builder::Stylizer;
pub use error::StylizeError;
