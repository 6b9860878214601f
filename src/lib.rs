//! Pupil recording viewer: filters a `pupil_positions.csv` export and charts
//! its `phi` / `theta` time series as a standalone HTML document.

pub mod chart;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod launch;
pub mod pipeline;

pub use error::{Error, Result};
