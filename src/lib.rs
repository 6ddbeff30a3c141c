//! Charts and comparison tables for external-memory sorting and Kruskal
//! experiment results.

pub mod batch;
pub mod chart;
pub mod cli;
pub mod compare;
pub mod error;
pub mod logger;
pub mod naming;
pub mod presets;
pub mod render;
pub mod table;

pub use error::{PlotError, Result};
