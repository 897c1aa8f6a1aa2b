//! Reporting utilities: formatted terminal output for estimates and tier tables.

pub mod format;

pub use format::*;
