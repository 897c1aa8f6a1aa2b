//! Credit tier rate lookup.

pub mod lookup;

pub use lookup::*;
