//! Monthly payment calculation and currency display.
//!
//! Both are small, pure functions so the CLI, TUI and exports share one code path.

pub mod amortize;
pub mod currency;

pub use amortize::*;
pub use currency::*;
