//! # boxpack
//!
//! A greedy, single-pass 3D bin packing engine. Given item and bin cuboids it
//! decides which items go into which bins and where, then reports the packed bins,
//! the items left over, or the smallest bin able to hold everything.
//!
//! The engine does no I/O. [`payload`] decodes records supplied by a caller and
//! [`report`] builds a serialisable result.

pub mod algorithms;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod heuristics;
pub mod payload;
pub mod placement;
pub mod report;
mod traits;

pub use traits::*;

pub use algorithms::packing::Strategy;
pub use collection::Collection;
pub use config::Config;
pub use entity::{Bin, Item};
pub use error::{LoadError, PackError, Result};
pub use geometry::{Dimensions, Slot, Space};
pub use payload::Payload;
pub use placement::PlacementEngine;
pub use report::{PackingReport, PackingRun};
