/// Data layer: table model, loading, filtering, and persistence.
///
/// Architecture:
/// ```text
///  pupil_positions.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table (typed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  ExclusionRule → retained row indices → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer  │  Table → analysis/filtered_pupil_data.csv
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
