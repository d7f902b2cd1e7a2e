//! Report module - summarizing preparation results

pub mod params_export;
pub mod summary;

pub use params_export::*;
pub use summary::*;
