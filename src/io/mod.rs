//! Input/output helpers.
//!
//! - tier table JSON read/write (`tiers`)
//! - estimate exports (CSV/JSON) (`export`)

pub mod export;
pub mod tiers;

pub use export::*;
pub use tiers::*;
